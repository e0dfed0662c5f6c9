use crate::components::shift_templates::validation::ValidationError;
use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Invalid shift template: {0}")]
    #[diagnostic(
        code(shift_templates::validation),
        help("fix the reported field and submit again")
    )]
    Validation(#[from] ValidationError),

    #[error("Environment error: {0}")]
    #[diagnostic(code(shift_templates::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(shift_templates::config))]
    Config(String),

    #[error("Shift template API error: {0}")]
    #[diagnostic(code(shift_templates::api))]
    Api(String),

    #[error("HTTP client error: {0}")]
    #[diagnostic(code(shift_templates::http))]
    Http(#[from] reqwest::Error),

    #[error("Component error: {0}")]
    #[diagnostic(code(shift_templates::component))]
    Component(String),

    #[error(transparent)]
    #[diagnostic(code(shift_templates::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(shift_templates::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(shift_templates::other))]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type AppResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(message: &str) -> Error {
    Error::Environment(message.to_string())
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create backend API errors
pub fn api_error(message: &str) -> Error {
    Error::Api(message.to_string())
}

/// Helper to create component errors
pub fn component_error(message: &str) -> Error {
    Error::Component(message.to_string())
}
