//! Error types for criteria parsing, configuration and query execution.
//!
//! Building a predicate never fails. Errors only come from the layers around
//! it: decoding wire parameters into criteria, loading configuration, and the
//! storage collaborator that executes a specification.
//!
//! # Error Codes
//!
//! Error codes follow a pattern: P{category}{number}
//! - 1xxx: Filter and parameter errors (unknown field, unsupported operation, bad value)
//! - 5xxx: Execution errors raised by a repository
//! - 7xxx: Configuration errors
//! - 9xxx: Internal errors
//!
//! ```rust
//! use yocoma_query::{QueryError, ErrorCode};
//!
//! let err = QueryError::unknown_field("Contact", "nickname");
//! assert_eq!(err.code, ErrorCode::UnknownField);
//! assert!(err.is_client_error());
//! assert!(err.to_string().contains("nickname"));
//! ```

use std::fmt;
use thiserror::Error;

/// Result type for query operations.
pub type QueryResult<T> = Result<T, QueryError>;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Filter and parameter errors (1xxx)
    /// Invalid filter operation for the field's type (P1003).
    InvalidFilter = 1003,
    /// Unknown criteria field (P1006).
    UnknownField = 1006,
    /// Unparsable filter or paging value (P1007).
    InvalidParameter = 1007,
    /// Unknown or malformed sort specification (P1008).
    InvalidSort = 1008,

    // Execution errors (5xxx)
    /// General storage failure (P5005).
    DatabaseError = 5005,

    // Configuration errors (7xxx)
    /// Invalid configuration (P7001).
    InvalidConfiguration = 7001,

    // Internal errors (9xxx)
    /// Internal error (P9001).
    Internal = 9001,
}

impl ErrorCode {
    /// Get the error code string (e.g., "P1003").
    pub fn code(&self) -> String {
        format!("P{}", *self as u16)
    }

    /// Get a short description of the error code.
    pub fn description(&self) -> &'static str {
        match self {
            Self::InvalidFilter => "Invalid filter condition",
            Self::UnknownField => "Unknown criteria field",
            Self::InvalidParameter => "Invalid parameter",
            Self::InvalidSort => "Invalid sort specification",
            Self::DatabaseError => "Database error",
            Self::InvalidConfiguration => "Invalid configuration",
            Self::Internal => "Internal error",
        }
    }

    /// Whether this code describes a malformed request rather than a server failure.
    pub fn is_client_error(&self) -> bool {
        (*self as u16) < 5000
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Suggestion for fixing an error.
#[derive(Debug, Clone)]
pub struct Suggestion {
    /// The suggestion text.
    pub text: String,
    /// Optional example.
    pub code: Option<String>,
}

impl Suggestion {
    /// Create a new suggestion.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            code: None,
        }
    }

    /// Add an example.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

/// Additional context for an error.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The operation that was being performed.
    pub operation: Option<String>,
    /// The model involved.
    pub model: Option<String>,
    /// The field involved.
    pub field: Option<String>,
    /// The offending raw parameter, if any.
    pub parameter: Option<String>,
    /// Suggestions for fixing the error.
    pub suggestions: Vec<Suggestion>,
    /// Help text.
    pub help: Option<String>,
}

impl ErrorContext {
    /// Create new empty context.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Errors raised around query construction and execution.
#[derive(Error, Debug)]
pub struct QueryError {
    /// The error code.
    pub code: ErrorCode,
    /// The error message.
    pub message: String,
    /// Additional context.
    pub context: ErrorContext,
    /// The source error (if any).
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.code(), self.message)
    }
}

impl QueryError {
    /// Create a new error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: ErrorContext::default(),
            source: None,
        }
    }

    /// Add context about the operation.
    pub fn with_context(mut self, operation: impl Into<String>) -> Self {
        self.context.operation = Some(operation.into());
        self
    }

    /// Add a suggestion for fixing the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.context.suggestions.push(Suggestion::new(suggestion));
        self
    }

    /// Add a suggestion with an example.
    pub fn with_code_suggestion(mut self, text: impl Into<String>, code: impl Into<String>) -> Self {
        self.context.suggestions.push(Suggestion::new(text).with_code(code));
        self
    }

    /// Add help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.context.help = Some(help.into());
        self
    }

    /// Set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.context.model = Some(model.into());
        self
    }

    /// Set the field.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.context.field = Some(field.into());
        self
    }

    /// Set the raw parameter.
    pub fn with_parameter(mut self, parameter: impl Into<String>) -> Self {
        self.context.parameter = Some(parameter.into());
        self
    }

    /// Set the source error.
    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // ============== Constructor Functions ==============

    /// The criteria of `model` has no field called `field`.
    pub fn unknown_field(model: impl Into<String>, field: impl Into<String>) -> Self {
        let model = model.into();
        let field = field.into();
        Self::new(
            ErrorCode::UnknownField,
            format!("{} criteria has no field '{}'", model, field),
        )
        .with_model(&model)
        .with_field(&field)
        .with_suggestion("Check the spelling of the field name; names are camelCase")
    }

    /// `op` is not an operation supported by the filter type of `field`.
    pub fn unsupported_operation(field: impl Into<String>, op: impl Into<String>) -> Self {
        let field = field.into();
        let op = op.into();
        Self::new(
            ErrorCode::InvalidFilter,
            format!("Operation '{}' is not supported on field '{}'", op, field),
        )
        .with_field(&field)
        .with_suggestion("Range operations apply to numeric fields only")
        .with_suggestion("contains/doesNotContain apply to text fields only")
    }

    /// A raw parameter value could not be decoded.
    pub fn invalid_value(
        field: impl Into<String>,
        raw: impl Into<String>,
        expected: impl fmt::Display,
    ) -> Self {
        let field = field.into();
        let raw = raw.into();
        Self::new(
            ErrorCode::InvalidParameter,
            format!("Invalid value '{}' for '{}': expected {}", raw, field, expected),
        )
        .with_field(&field)
        .with_parameter(&raw)
    }

    /// A sort column does not exist on the model.
    pub fn invalid_sort(model: impl Into<String>, column: impl Into<String>) -> Self {
        let model = model.into();
        let column = column.into();
        Self::new(
            ErrorCode::InvalidSort,
            format!("Cannot sort {} by unknown property '{}'", model, column),
        )
        .with_model(&model)
        .with_field(&column)
        .with_code_suggestion("Sort by an existing field", "sort=id,desc")
    }

    /// Invalid configuration value.
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidConfiguration, message)
            .with_help("See the [query] table of yocoma.toml")
    }

    /// Storage failure reported by a repository.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Whether this error should be reported as a bad request.
    pub fn is_client_error(&self) -> bool {
        self.code.is_client_error()
    }

    /// Render the error with its context, suggestions and help text.
    pub fn display_full(&self) -> String {
        let mut out = format!("Error [{}] {}: {}", self.code.code(), self.code.description(), self.message);

        if let Some(operation) = &self.context.operation {
            out.push_str(&format!("\n  While: {}", operation));
        }
        if let Some(model) = &self.context.model {
            out.push_str(&format!("\n  Model: {}", model));
        }
        if let Some(field) = &self.context.field {
            out.push_str(&format!("\n  Field: {}", field));
        }
        if let Some(parameter) = &self.context.parameter {
            out.push_str(&format!("\n  Value: {}", parameter));
        }
        for suggestion in &self.context.suggestions {
            out.push_str(&format!("\n  Suggestion: {}", suggestion.text));
            if let Some(code) = &suggestion.code {
                out.push_str(&format!("\n    e.g. {}", code));
            }
        }
        if let Some(help) = &self.context.help {
            out.push_str(&format!("\n  Help: {}", help));
        }

        out
    }
}

impl From<toml::de::Error> for QueryError {
    fn from(err: toml::de::Error) -> Self {
        QueryError::invalid_configuration(format!("Failed to parse configuration: {}", err))
            .with_source(err)
    }
}

impl From<serde_json::Error> for QueryError {
    fn from(err: serde_json::Error) -> Self {
        QueryError::new(ErrorCode::InvalidParameter, format!("Invalid criteria document: {}", err))
            .with_source(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_format() {
        assert_eq!(ErrorCode::InvalidFilter.code(), "P1003");
        assert_eq!(ErrorCode::DatabaseError.code(), "P5005");
        assert_eq!(ErrorCode::Internal.to_string(), "P9001");
    }

    #[test]
    fn test_client_error_classification() {
        assert!(ErrorCode::UnknownField.is_client_error());
        assert!(ErrorCode::InvalidSort.is_client_error());
        assert!(!ErrorCode::DatabaseError.is_client_error());
        assert!(!ErrorCode::InvalidConfiguration.is_client_error());
    }

    #[test]
    fn test_unknown_field_context() {
        let err = QueryError::unknown_field("Team", "slogan");
        assert_eq!(err.context.model.as_deref(), Some("Team"));
        assert_eq!(err.context.field.as_deref(), Some("slogan"));
        assert_eq!(err.to_string(), "[P1006] Team criteria has no field 'slogan'");
    }

    #[test]
    fn test_invalid_value_display_full() {
        let err = QueryError::invalid_value("id.equals", "abc", "an integer");
        let full = err.display_full();
        assert!(full.starts_with("Error [P1007] Invalid parameter: "));
        assert!(full.contains("Value: abc"));
        assert!(full.contains("expected an integer"));
    }

    #[test]
    fn test_from_json_error() {
        let err: QueryError = serde_json::from_str::<u8>("[").unwrap_err().into();
        assert_eq!(err.code, ErrorCode::InvalidParameter);
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_with_source() {
        let io = std::io::Error::other("disk gone");
        let err = QueryError::database("read failed").with_source(io);
        assert!(std::error::Error::source(&err).is_some());
    }
}
