use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv_async::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Not found: {what}")]
    NotFoundError { what: String },

    #[error("Malformed event: {message}")]
    MalformedEventError { message: String },

    #[error("{service} request failed: {message}")]
    UpstreamError {
        service: &'static str,
        message: String,
    },

    #[error("Item decoding error: {message}")]
    DecodeError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Config,
    Validation,
    NotFound,
    MalformedEvent,
    Upstream,
    Internal,
}

impl CatalogError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFoundError { what: what.into() }
    }

    pub fn malformed_event(message: impl Into<String>) -> Self {
        Self::MalformedEventError {
            message: message.into(),
        }
    }

    pub fn upstream(service: &'static str, err: impl std::fmt::Display) -> Self {
        Self::UpstreamError {
            service,
            message: err.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Config,
            Self::ValidationError { .. } => ErrorCategory::Validation,
            Self::NotFoundError { .. } => ErrorCategory::NotFound,
            Self::MalformedEventError { .. } | Self::SerializationError(_) => {
                ErrorCategory::MalformedEvent
            }
            Self::UpstreamError { .. } => ErrorCategory::Upstream,
            Self::CsvError(_) | Self::IoError(_) | Self::DecodeError { .. } => {
                ErrorCategory::Internal
            }
        }
    }

    /// True when the caller sent something wrong, as opposed to a failure on our side.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Validation | ErrorCategory::MalformedEvent
        )
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
