use thiserror::Error;

#[derive(Debug, Error)]
pub enum NeuriteError {
    #[error("Geometry error: {0}")]
    Geometry(String),

    #[error("Animation error: {0}")]
    Animation(String),

    #[error("Unsupported environment: {0}")]
    UnsupportedEnvironment(String),

    #[error("Invalid handle: {0}")]
    InvalidHandle(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NeuriteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_context() {
        let err = NeuriteError::UnsupportedEnvironment("no WebGL".into());
        assert_eq!(err.to_string(), "Unsupported environment: no WebGL");
    }

    #[test]
    fn test_io_conversion() {
        fn open() -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"))?;
            Ok(())
        }
        assert!(matches!(open(), Err(NeuriteError::Io(_))));
    }
}
