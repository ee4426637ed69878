//! Error types for Codegauge core.

use std::path::PathBuf;
use std::{error::Error as StdError, fmt, io};

/// Error type for Codegauge core operations.
#[derive(Debug)]
pub enum Error {
    /// An underlying I/O error.
    Io(io::Error),
    /// Content that could not be decoded as text.
    Input(String),
    /// A project path that does not exist.
    NotFound(PathBuf),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io error: {err}"),
            Self::Input(message) => write!(f, "invalid input: {message}"),
            Self::NotFound(path) => write!(f, "path not found: {}", path.display()),
        }
    }
}

impl StdError for Error {}

impl From<io::Error> for Error {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// Convenience result type for Codegauge core.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::Error;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn io_error_formats_message() {
        let error = Error::Io(io::Error::new(io::ErrorKind::Other, "boom"));
        assert_eq!(format!("{error}"), "io error: boom");
    }

    #[test]
    fn input_error_formats_message() {
        let error = Error::Input("binary content".to_string());
        assert_eq!(format!("{error}"), "invalid input: binary content");
    }

    #[test]
    fn not_found_error_names_path() {
        let error = Error::NotFound(PathBuf::from("/missing/project"));
        assert_eq!(format!("{error}"), "path not found: /missing/project");
    }

    #[test]
    fn from_io_error_maps_variant() {
        let error: Error = io::Error::new(io::ErrorKind::PermissionDenied, "denied").into();
        match error {
            Error::Io(inner) => {
                assert_eq!(inner.kind(), io::ErrorKind::PermissionDenied);
            }
            other => panic!("expected Io variant, got {other:?}"),
        }
    }
}
