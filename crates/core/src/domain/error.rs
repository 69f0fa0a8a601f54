use thiserror::Error;

use super::{Capability, RemoteError};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("unknown capability: {0}")]
    UnknownCapability(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("no file path was given")]
    Empty,
    #[error("path may not leave the server root")]
    Traversal,
    #[error("path contains an invalid character")]
    InvalidCharacter,
}

/// Every way a file request can end without the daemon doing the work.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilesError {
    #[error("You are not authorized to perform this action.")]
    Forbidden(Capability),

    #[error(
        "The XSRF token received was not valid. Please make sure cookies are enabled and try your request again."
    )]
    InvalidXsrf,

    #[error("Not all required parameters were passed to the script.")]
    MissingParameters,

    #[error("Invalid path: {0}.")]
    InvalidPath(#[from] PathError),

    #[error("This type of file cannot be edited.")]
    NotEditable(Option<String>),

    #[error(transparent)]
    Remote(#[from] RemoteError),
}
