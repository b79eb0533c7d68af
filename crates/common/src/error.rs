//! Common error types.
//!
//! These cover the host side of the scratchpad (configuration files and their
//! I/O). Failures of user scripts are reported as output entries and
//! never surface through this type.

use thiserror::Error;

/// Main error type for the scratchpad host.
#[derive(Error, Debug)]
pub enum ScratchpadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type ScratchpadResult<T> = Result<T, ScratchpadError>;

impl ScratchpadError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes() {
        assert_eq!(
            ScratchpadError::config("bad theme").to_string(),
            "Configuration error: bad theme"
        );
    }

    #[test]
    fn test_from_io() {
        let err: ScratchpadError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
        assert!(matches!(err, ScratchpadError::Io(_)));
    }
}
