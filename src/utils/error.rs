use thiserror::Error;

#[derive(Error, Debug)]
pub enum WaybackError {
    #[error("Usage error: {message}")]
    UsageError { message: String },

    #[error("Domain list error ({path}): {message}")]
    DomainListError { path: String, message: String },

    #[error("Wayback fetch failed for pattern {pattern}: {message}")]
    FetchError { pattern: String, message: String },

    #[error("Could not write HTML report {path}: {source}")]
    ReportWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Usage,
    Input,
    Network,
    Output,
}

impl WaybackError {
    pub fn fetch(pattern: &str, message: impl Into<String>) -> Self {
        WaybackError::FetchError {
            pattern: pattern.to_string(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            WaybackError::UsageError { .. }
            | WaybackError::ConfigError { .. }
            | WaybackError::InvalidConfigValueError { .. } => ErrorCategory::Usage,
            WaybackError::DomainListError { .. } | WaybackError::ValidationError { .. } => {
                ErrorCategory::Input
            }
            WaybackError::FetchError { .. } | WaybackError::ApiError(_) => ErrorCategory::Network,
            WaybackError::ReportWriteError { .. } | WaybackError::IoError(_) => {
                ErrorCategory::Output
            }
        }
    }

    /// 致命錯誤會在任何查詢開始之前中止執行
    pub fn is_fatal(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Usage | ErrorCategory::Input
        )
    }

    pub fn exit_code(&self) -> i32 {
        if self.is_fatal() {
            1
        } else {
            0
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            WaybackError::UsageError { message } => message.clone(),
            WaybackError::DomainListError { path, message } => {
                format!("Unable to use domain list {}: {}", path, message)
            }
            WaybackError::FetchError { pattern, .. } => {
                format!("Wayback lookup failed for {}", pattern)
            }
            WaybackError::ReportWriteError { path, .. } => {
                format!("Could not write HTML report {}", path)
            }
            WaybackError::ValidationError { message } => message.clone(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, WaybackError>;
