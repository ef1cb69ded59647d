//! Error types for spendbook-core
//!
//! Fetch failures are split into network and application errors so the list
//! can turn either into one short notification. Export input problems are
//! validation errors. Every error carries a code, a severity and a message
//! suitable for display.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Request did not complete
    NetworkError,
    /// Backend answered with a non-success status
    ApplicationError,
    /// Input rejected before any request was made
    ValidationError,
    /// Export file could not be written
    ExportFailed,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::NetworkError => write!(f, "NETWORK_ERROR"),
            ErrorCode::ApplicationError => write!(f, "APPLICATION_ERROR"),
            ErrorCode::ValidationError => write!(f, "VALIDATION_ERROR"),
            ErrorCode::ExportFailed => write!(f, "EXPORT_FAILED"),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
        }
    }
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            suggestions: vec![],
        }
    }

    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, "\nDetails: {}", details)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Failure of a single list request
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Server error: {message}")]
    Application {
        status: Option<u16>,
        message: String,
    },
}

impl FetchError {
    pub fn network(message: impl Into<String>) -> Self {
        FetchError::Network {
            message: message.into(),
        }
    }

    pub fn application(status: Option<u16>, message: impl Into<String>) -> Self {
        FetchError::Application {
            status,
            message: message.into(),
        }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            FetchError::Network { .. } => ErrorCode::NetworkError,
            FetchError::Application { .. } => ErrorCode::ApplicationError,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            FetchError::Network { .. } => ErrorSeverity::Warning,
            FetchError::Application { .. } => ErrorSeverity::Error,
        }
    }

    /// The single line shown to the user in a toast
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Network { .. } => {
                "Failed to fetch all transactions: Try again later!".to_string()
            }
            FetchError::Application { message, .. } if !message.trim().is_empty() => {
                format!("Failed to fetch transactions: {}", message.trim())
            }
            FetchError::Application { .. } => {
                "Failed to fetch transactions: the server rejected the request".to_string()
            }
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let details = ErrorDetails::new(self.code(), self.to_string());
        match self {
            FetchError::Network { .. } => details
                .with_suggestion("Check that the SpendBook backend is running.".to_string()),
            FetchError::Application { status, .. } => {
                details.with_detail(serde_json::json!({ "status": status }))
            }
        }
    }
}

/// Failure while building a category export
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("{message}")]
    Validation { message: String },

    #[error("Failed to write export: {message}")]
    Write { message: String },
}

impl ExportError {
    pub fn validation(message: impl Into<String>) -> Self {
        ExportError::Validation {
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ExportError::Validation { .. } => ErrorCode::ValidationError,
            ExportError::Write { .. } => ErrorCode::ExportFailed,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ExportError::Validation { .. } => ErrorSeverity::Info,
            ExportError::Write { .. } => ErrorSeverity::Error,
        }
    }

    pub fn to_details(&self) -> ErrorDetails {
        ErrorDetails::new(self.code(), self.to_string())
    }
}

impl From<csv::Error> for ExportError {
    fn from(error: csv::Error) -> Self {
        ExportError::Write {
            message: error.to_string(),
        }
    }
}

/// Result type with FetchError
pub type FetchResult<T> = Result<T, FetchError>;

/// Error context for reporting
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Sequence number of the request, when one was issued
    pub request_seq: Option<u64>,
    /// Actor the request was made for
    pub actor: Option<String>,
    /// Operation being performed
    pub operation: String,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            request_seq: None,
            actor: None,
            operation: operation.into(),
        }
    }

    pub fn with_request_seq(mut self, seq: u64) -> Self {
        self.request_seq = Some(seq);
        self
    }

    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }
}

/// Error logger trait
pub trait ErrorLogger: Send + Sync {
    fn log_error(&self, error: &FetchError, context: &ErrorContext);
    fn log_debug(&self, message: &str, context: &ErrorContext);
}

/// Default error logger using log crate
#[derive(Debug, Default)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &FetchError, context: &ErrorContext) {
        match error.severity() {
            ErrorSeverity::Error => log::error!(
                target: "spendbook::fetch",
                "{} - Operation: {} - Request: {:?}",
                error.to_details(),
                context.operation,
                context.request_seq
            ),
            _ => log::warn!(
                target: "spendbook::fetch",
                "{} - Operation: {} - Request: {:?}",
                error.to_details(),
                context.operation,
                context.request_seq
            ),
        }
    }

    fn log_debug(&self, message: &str, context: &ErrorContext) {
        log::debug!(
            target: "spendbook::fetch",
            "{} - Operation: {} - Request: {:?}",
            message,
            context.operation,
            context.request_seq
        );
    }
}

// ==================== Tests ====================
