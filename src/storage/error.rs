use derive_more::Display;
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The error returned by storage drivers.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    kind: ErrorKind,
    #[source]
    source: Option<BoxError>,
}

impl Error {
    /// Creates a new storage error with an underlying cause.
    pub fn new<E>(kind: ErrorKind, error: E) -> Error
    where
        E: Into<BoxError>,
    {
        Error {
            kind,
            source: Some(error.into()),
        }
    }

    /// Detailed information about what the server should do with the failure.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error { kind, source: None }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Error::new(ErrorKind::PermanentFileNotAvailable, err),
            std::io::ErrorKind::PermissionDenied => Error::new(ErrorKind::PermissionDenied, err),
            _ => Error::new(ErrorKind::LocalError, err),
        }
    }
}

/// The `ErrorKind` variants that can be produced by [`Driver`] implementations.
///
/// [`Driver`]: trait.Driver.html
#[derive(Copy, Clone, Eq, PartialEq, Debug, Display)]
pub enum ErrorKind {
    /// The file is temporarily unavailable (e.g. file busy).
    #[display(fmt = "transient file not available")]
    TransientFileNotAvailable,
    /// The file is permanently unavailable (e.g. not found, no access).
    #[display(fmt = "permanent file not available")]
    PermanentFileNotAvailable,
    /// The driver denied access to the path.
    #[display(fmt = "permission denied")]
    PermissionDenied,
    /// A local error occurred while processing.
    #[display(fmt = "local error")]
    LocalError,
    /// There is not enough space to complete the operation.
    #[display(fmt = "insufficient storage space")]
    InsufficientStorageSpaceError,
    /// The file name is not allowed by the driver.
    #[display(fmt = "file name not allowed")]
    FileNameNotAllowedError,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_kind_and_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = Error::from(io);
        assert_eq!(err.kind(), ErrorKind::PermanentFileNotAvailable);
        assert_eq!(format!("{}", err), "permanent file not available");
        assert!(std::error::Error::source(&err).is_some());
    }
}
