//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`InvalidParameter`] thrown when a caller-supplied value fails validation.
//!
//!  [`InvalidParameter`]: EngineError::InvalidParameter
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("{0}")]
    InvalidParameter(String),
    #[error(transparent)]
    Database(#[from] DbErr),
    #[error("lock file error: {0}")]
    Lock(#[from] std::io::Error),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidParameter(a), Self::InvalidParameter(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            (Self::Lock(a), Self::Lock(b)) => a.kind() == b.kind(),
            _ => false,
        }
    }
}
