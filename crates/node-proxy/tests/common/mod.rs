use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

#[derive(Clone)]
struct Route {
    prefix: &'static str,
    status: StatusCode,
    body: String,
    delay: Option<Duration>,
}

#[derive(Clone, Default)]
struct FakeState {
    routes: Arc<Vec<Route>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Minimal stand-in for a node daemon, answering by path prefix.
pub struct FakeDaemon {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

pub struct FakeDaemonBuilder {
    routes: Vec<Route>,
}

impl FakeDaemonBuilder {
    pub fn route(mut self, prefix: &'static str, status: StatusCode, body: impl Into<String>) -> Self {
        self.routes.push(Route {
            prefix,
            status,
            body: body.into(),
            delay: None,
        });
        self
    }

    pub fn slow_route(mut self, prefix: &'static str, delay: Duration) -> Self {
        self.routes.push(Route {
            prefix,
            status: StatusCode::NO_CONTENT,
            body: String::new(),
            delay: Some(delay),
        });
        self
    }

    pub async fn start(self) -> FakeDaemon {
        let state = FakeState {
            routes: Arc::new(self.routes),
            requests: Arc::new(Mutex::new(Vec::new())),
        };
        let requests = state.requests.clone();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake daemon");
        let addr = listener.local_addr().expect("fake daemon address");
        let app = Router::new().fallback(respond).with_state(state);
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake daemon serve");
        });

        FakeDaemon { addr, requests }
    }
}

impl FakeDaemon {
    pub fn builder() -> FakeDaemonBuilder {
        FakeDaemonBuilder { routes: Vec::new() }
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("requests lock").clone()
    }
}

async fn respond(
    State(state): State<FakeState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };

    state
        .requests
        .lock()
        .expect("requests lock")
        .push(RecordedRequest {
            method,
            path: uri.path().to_string(),
            authorization: header("authorization"),
            content_type: header("content-type"),
            body,
        });

    let Some(route) = state
        .routes
        .iter()
        .find(|route| uri.path().starts_with(route.prefix))
    else {
        return (StatusCode::NOT_FOUND, "no route".to_string());
    };

    if let Some(delay) = route.delay {
        tokio::time::sleep(delay).await;
    }
    (route.status, route.body.clone())
}

/// Port on localhost that refuses connections.
pub async fn closed_port() -> u16 {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe listener");
    let port = listener.local_addr().expect("probe address").port();
    drop(listener);
    port
}
