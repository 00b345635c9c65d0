use thiserror::Error as ThisError;

#[derive(Debug, ThisError, PartialEq, Eq)]
pub enum RequestRejectError {
    #[error("invalid request path")]
    InvalidPath,

    #[error("path traverses above the root")]
    PathTraversal,

    #[error("method not allowed")]
    MethodNotAllowed,
}
