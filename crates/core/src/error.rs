//! Error handling with context and recovery suggestions
//!
//! This module provides structured error types with:
//! - Detailed error context
//! - Recovery suggestions
//! - Error codes for programmatic handling
//! - Serializable error reports

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // General errors (1xxx)
    /// Unknown failure
    Unknown = 1000,
    /// Bug in the tool itself
    Internal = 1001,

    // IO errors (2xxx)
    /// Generic I/O failure
    IoError = 2000,
    /// File does not exist
    FileNotFound = 2001,
    /// File is not readable or writable
    PermissionDenied = 2002,

    // Configuration errors (3xxx)
    /// Generic configuration failure
    ConfigError = 3000,
    /// Explicit configuration file is missing
    ConfigNotFound = 3001,
    /// Configuration file is not valid TOML
    ConfigParseError = 3002,
    /// Configuration values are rejected
    ConfigValidationError = 3003,

    // Xcode project errors (4xxx)
    /// Generic Xcode project failure
    ProjectError = 4000,
    /// `.xcodeproj` bundle or `project.pbxproj` is missing
    ProjectNotFound = 4001,
    /// `project.pbxproj` is not a valid property list
    ProjectParseError = 4002,
    /// Object graph does not have the expected shape
    InvalidProject = 4003,
    /// Primary target is missing
    TargetNotFound = 4004,
    /// Settings group is missing
    GroupNotFound = 4005,
    /// Dangling object reference
    ObjectNotFound = 4006,
    /// Scheme file cannot be read or written
    SchemeError = 4007,

    // Android errors (5xxx)
    /// Gradle script cannot be understood
    AndroidError = 5000,
    /// Gradle script is missing
    GradleFileNotFound = 5001,
    /// Keystore properties cannot be read
    KeystoreError = 5002,

    // Validation errors (6xxx)
    /// Generic validation failure
    ValidationError = 6000,
    /// Bad input value
    InvalidInput = 6001,
    /// Bad serialized data
    InvalidFormat = 6002,
}

impl ErrorCode {
    /// Get the numeric code
    pub fn code(&self) -> u32 {
        *self as u32
    }

    /// Get a human-readable category
    pub fn category(&self) -> &'static str {
        match self.code() / 1000 {
            1 => "General",
            2 => "IO",
            3 => "Configuration",
            4 => "Project",
            5 => "Android",
            6 => "Validation",
            _ => "Unknown",
        }
    }

    /// Whether this error means a precondition failed before anything was touched
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            ErrorCode::ProjectNotFound | ErrorCode::TargetNotFound | ErrorCode::GroupNotFound
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

/// Main error type with rich context
#[derive(Error, Debug)]
pub struct Error {
    /// Error code for programmatic handling
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional context
    pub context: Option<String>,
    /// Recovery suggestion
    pub suggestion: Option<String>,
    /// Source error
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ctx) = &self.context {
            write!(f, "\n  Context: {}", ctx)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n  Suggestion: {}", suggestion)?;
        }
        Ok(())
    }
}

impl Error {
    /// Create a new error
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: None,
            suggestion: None,
            source: None,
        }
    }

    /// Add context to the error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add a recovery suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Convert to a serializable report
    pub fn to_report(&self) -> ErrorReport {
        ErrorReport {
            code: self.code,
            code_str: self.code.to_string(),
            category: self.code.category().to_string(),
            message: self.message.clone(),
            context: self.context.clone(),
            suggestion: self.suggestion.clone(),
            source: self.source.as_ref().map(|e| e.to_string()),
        }
    }

    // Convenience constructors

    /// I/O failure
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::IoError, message)
    }

    /// Internal failure
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, message)
    }

    /// Missing file with a permissions hint
    pub fn file_not_found(path: impl AsRef<Path>) -> Self {
        Self::new(
            ErrorCode::FileNotFound,
            format!("File not found: {}", path.as_ref().display()),
        )
        .with_suggestion("Check that the file exists and you have read permissions")
    }

    /// Generic configuration failure
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Explicit configuration file is missing
    pub fn config_not_found(path: impl AsRef<Path>) -> Self {
        Self::new(
            ErrorCode::ConfigNotFound,
            format!("Configuration file not found: {}", path.as_ref().display()),
        )
        .with_suggestion(
            "Create a .passvault-flavors.toml file or use --config to specify a path",
        )
    }

    /// Project bundle is missing, reported as `{path} not found!`
    pub fn project_not_found(path: impl AsRef<Path>) -> Self {
        Self::new(
            ErrorCode::ProjectNotFound,
            format!("{} not found!", path.as_ref().display()),
        )
        .with_suggestion("Run from the ios/ directory or pass --project-dir")
    }

    /// Malformed `project.pbxproj`
    pub fn project_parse(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ProjectParseError, message)
    }

    /// Unexpected object graph
    pub fn invalid_project(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidProject, message)
    }

    /// Primary target is missing, reported as `{name} target not found!`
    pub fn target_not_found(name: &str) -> Self {
        Self::new(ErrorCode::TargetNotFound, format!("{} target not found!", name))
            .with_suggestion("Check xcode.primary_target in the configuration file")
    }

    /// Settings group is missing
    pub fn group_not_found(name: &str) -> Self {
        Self::new(ErrorCode::GroupNotFound, format!("{} group not found!", name))
            .with_suggestion("Check xcode.settings_group in the configuration file")
    }

    /// Object id referenced but not defined
    pub fn object_not_found(id: &str) -> Self {
        Self::new(
            ErrorCode::ObjectNotFound,
            format!("Object {} is referenced but not defined", id),
        )
    }

    /// Scheme read or write failure
    pub fn scheme(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SchemeError, message)
    }

    /// Gradle script failure
    pub fn android(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AndroidError, message)
    }

    /// Missing Gradle script
    pub fn gradle_file_not_found(path: impl AsRef<Path>) -> Self {
        Self::new(
            ErrorCode::GradleFileNotFound,
            format!("Gradle build file not found: {}", path.as_ref().display()),
        )
        .with_suggestion("Pass --gradle-file or set android.gradle_file in the configuration")
    }

    /// Validation failure
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }
}

/// Serializable error report for logging and machine-readable output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Error code
    pub code: ErrorCode,
    /// Code rendered as `E{:04}`
    pub code_str: String,
    /// Code category
    pub category: String,
    /// Human-readable message
    pub message: String,
    /// Additional context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    /// Recovery suggestion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Source error message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Exit codes for CLI commands
pub mod exit_codes {
    /// Command completed
    pub const SUCCESS: i32 = 0;
    /// Precondition or runtime failure
    pub const FAILURE: i32 = 1;
    /// Checks found problems
    pub const VALIDATION_ERROR: i32 = 2;
    /// Configuration could not be loaded
    pub const CONFIG_ERROR: i32 = 3;

    use super::Error;

    /// Map an error to the process exit code
    pub fn for_error(err: &Error) -> i32 {
        match err.code.category() {
            "Configuration" => CONFIG_ERROR,
            "Validation" => VALIDATION_ERROR,
            _ => FAILURE,
        }
    }
}

// Implement From for common error types

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let code = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorCode::PermissionDenied,
            _ => ErrorCode::IoError,
        };
        Error::new(code, err.to_string()).with_source(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::new(ErrorCode::InvalidFormat, format!("JSON error: {}", err)).with_source(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::new(ErrorCode::ConfigParseError, format!("TOML parse error: {}", err))
            .with_source(err)
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::new(ErrorCode::InvalidFormat, format!("Regex error: {}", err)).with_source(err)
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Attach context to the error
    fn context(self, context: impl Into<String>) -> Result<T>;
    /// Attach a recovery suggestion to the error
    fn with_suggestion(self, suggestion: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_suggestion(self, suggestion: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_suggestion(suggestion))
    }
}
