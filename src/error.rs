
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StocktakeError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Persistence error: {0}")]
    Persistence(String),
    #[error("Constraint violation: {0}")]
    Constraint(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Import error: {message}")]
    Import { message: String, row: Option<usize> },
}

pub type Result<T> = std::result::Result<T, StocktakeError>;

// Helper conversions
impl From<rusqlite::Error> for StocktakeError {
    fn from(e: rusqlite::Error) -> Self {
        match &e {
            rusqlite::Error::SqliteFailure(f, _)
                if f.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Self::Constraint(e.to_string())
            }
            _ => Self::Persistence(e.to_string()),
        }
    }
}

impl From<config::ConfigError> for StocktakeError {
    fn from(e: config::ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}

impl From<csv::Error> for StocktakeError {
    fn from(e: csv::Error) -> Self {
        Self::Import { message: e.to_string(), row: None }
    }
}
