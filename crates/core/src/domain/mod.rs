mod access;
mod capability;
mod error;
mod file_manager;
mod file_path;
mod ids;
mod listing;
mod node_files;
mod session;

pub use access::{PermissionChecker, SessionPermissions, SessionXsrf, XsrfValidator};
pub use capability::Capability;
pub use error::{DomainError, FilesError, PathError};
pub use file_manager::{FileManager, SaveRequest};
pub use file_path::{EditableExtensions, FilePath, normalize_directory};
pub use ids::SessionId;
pub use listing::{DirectoryContents, DirectoryListing, ParentLink, RemoteEntry};
pub use node_files::{NodeFiles, RemoteError};
pub use session::{NodeAddress, ServerRef, Session};
