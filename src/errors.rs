//! Unified error types and result handling for gift orders.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A required input was missing or empty. `field` names the offending input.
    #[error("Invalid parameter `{field}`: {message}")]
    InvalidParameter {
        field: &'static str,
        message: String,
    },

    /// The gift's status (or its acceptance deadline) does not permit the operation.
    #[error("Illegal gift status: {message}")]
    IllegalState { message: String },

    #[error("Gift not found: {token}")]
    GiftNotFound { token: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

impl Error {
    pub(crate) fn invalid_parameter(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field,
            message: message.into(),
        }
    }

    pub(crate) fn illegal_state(message: impl Into<String>) -> Self {
        Self::IllegalState {
            message: message.into(),
        }
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_message_names_field() {
        let err = Error::invalid_parameter("gift_message", "Gift constructor gift_message is empty");
        assert_eq!(
            err.to_string(),
            "Invalid parameter `gift_message`: Gift constructor gift_message is empty"
        );
    }

    #[test]
    fn test_db_err_converts_to_database_variant() {
        let err: Error = sea_orm::DbErr::RecordNotUpdated.into();
        assert!(matches!(err, Error::Database(_)));
    }
}
