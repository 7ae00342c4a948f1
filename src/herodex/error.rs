use thiserror::Error;

use crate::model::HeroValidationError;

#[derive(Error, Debug)]
pub enum HerodexError {
    #[error("Configuration error: {0}")]
    Config(#[from] confique::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid hero: {0}")]
    InvalidHero(#[from] HeroValidationError),

    #[error("Preferences error: {0}")]
    Preferences(String),
}

pub type Result<T> = std::result::Result<T, HerodexError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HeroDraft;

    fn checked(draft: &HeroDraft) -> Result<()> {
        draft.validate()?;
        Ok(())
    }

    #[test]
    fn test_validation_error_converts() {
        let err = checked(&HeroDraft::new("Al")).unwrap_err();
        assert!(matches!(err, HerodexError::InvalidHero(_)));
        assert_eq!(
            err.to_string(),
            "Invalid hero: name must be at least 3 characters, found 2"
        );
    }

    #[test]
    fn test_io_error_converts() {
        let err: HerodexError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.to_string(), "IO error: gone");
    }
}
