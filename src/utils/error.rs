use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoxLayoutError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server answered {status} for {url}")]
    HttpStatus {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Form field '{field}' not found")]
    MissingField { field: String },

    #[error("Object URL '{url}' is not registered")]
    UnknownObjectUrl { url: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Form,
    Download,
    Configuration,
}

impl BoxLayoutError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BoxLayoutError::Http(_) | BoxLayoutError::HttpStatus { .. } => ErrorCategory::Network,
            BoxLayoutError::MissingField { .. } | BoxLayoutError::Serialization(_) => {
                ErrorCategory::Form
            }
            BoxLayoutError::Io(_) | BoxLayoutError::UnknownObjectUrl { .. } => {
                ErrorCategory::Download
            }
            BoxLayoutError::Url(_)
            | BoxLayoutError::ConfigError { .. }
            | BoxLayoutError::InvalidConfigValue { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            BoxLayoutError::Http(e) if e.is_connect() => {
                "Could not reach the layout server".to_string()
            }
            BoxLayoutError::Http(e) if e.is_timeout() => {
                "The layout server did not answer in time".to_string()
            }
            BoxLayoutError::HttpStatus { status, .. } => {
                format!("The layout server refused the request ({})", status)
            }
            BoxLayoutError::InvalidConfigValue { field, reason, .. } => {
                format!("Please check '{}': {}", field, reason)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BoxLayoutError>;
