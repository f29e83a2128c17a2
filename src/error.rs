use thiserror::Error;

/// Main error type for Wordlit
#[derive(Error, Debug)]
pub enum WordlitError {
    /// File system I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Text acquisition errors (fetch failed, unreadable file).
    /// Reported to the caller as an error, never handed to the core as text.
    #[error("Acquisition error: {0}")]
    Acquire(String),

    /// Annotator service errors (parse failed, bad response)
    #[error("Annotator error: {0}")]
    Annotate(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Convenient Result type using WordlitError
pub type Result<T> = std::result::Result<T, WordlitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WordlitError::Config("Test error".to_string());
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("Test error"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let wordlit_err: WordlitError = io_err.into();
        assert!(matches!(wordlit_err, WordlitError::Io(_)));
    }

    #[test]
    fn test_acquire_error_display() {
        let err = WordlitError::Acquire("connection refused".to_string());
        assert!(err.to_string().starts_with("Acquisition error"));
    }
}
