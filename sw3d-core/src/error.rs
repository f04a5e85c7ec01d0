//! Error types for mesh loading

use std::fmt;
use std::io;

/// Error returned when a mesh file cannot be loaded
#[derive(Debug)]
pub enum LoadError {
    /// The file could not be read
    Io(io::Error),
    /// A `v` or `f` statement was malformed or referenced a missing vertex
    Parse { line: usize, message: String },
}

impl LoadError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        LoadError::Parse {
            line,
            message: message.into(),
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(err) => write!(f, "Mesh IO error: {}", err),
            LoadError::Parse { line, message } => {
                write!(f, "Mesh parse error on line {}: {}", line, message)
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(err) => Some(err),
            LoadError::Parse { .. } => None,
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(err: io::Error) -> Self {
        LoadError::Io(err)
    }
}
