//! Error types module
//!
//! All failures of a tool invocation are unified under [`DiaryError`]. Each
//! variant self-describes how it should be reported: a machine-readable code,
//! whether the caller is at fault, and the level it should be logged at.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like malformed tool arguments
    Debug,
    /// Warning level - for backend failures outside our control
    Warn,
    /// Error level - for broken deployments (configuration)
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum DiaryError {
    #[error("Unknown tool: {0}")]
    InvalidToolName(String),

    #[error("Missing argument: {0}")]
    MissingArgument(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Diary backend unreachable at {url}")]
    BackendUnreachable {
        url: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Diary backend error{}: {message}", status_suffix(.status))]
    BackendError {
        status: Option<u16>,
        message: String,
    },

    #[error("Missing configuration: {0}")]
    ConfigurationMissing(String),

    #[error("Invalid configuration: {0}")]
    ConfigurationInvalid(String),
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (status {s})")).unwrap_or_default()
}

impl DiaryError {
    pub fn backend(message: impl Into<String>) -> Self {
        Self::BackendError {
            status: None,
            message: message.into(),
        }
    }

    /// Machine-readable error code (e.g. "MISSING_ARGUMENT")
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidToolName(_) => "INVALID_TOOL_NAME",
            Self::MissingArgument(_) => "MISSING_ARGUMENT",
            Self::InvalidArgument(_) => "INVALID_ARGUMENT",
            Self::BackendUnreachable { .. } => "BACKEND_UNREACHABLE",
            Self::BackendError { .. } => "BACKEND_ERROR",
            Self::ConfigurationMissing(_) => "CONFIGURATION_MISSING",
            Self::ConfigurationInvalid(_) => "CONFIGURATION_INVALID",
        }
    }

    /// True when the request itself was malformed, as opposed to the backend
    /// or the deployment failing.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidToolName(_) | Self::MissingArgument(_) | Self::InvalidArgument(_)
        )
    }

    pub fn log_level(&self) -> LogLevel {
        match self {
            Self::InvalidToolName(_) | Self::MissingArgument(_) | Self::InvalidArgument(_) => {
                LogLevel::Debug
            }
            Self::BackendUnreachable { .. } | Self::BackendError { .. } => LogLevel::Warn,
            Self::ConfigurationMissing(_) | Self::ConfigurationInvalid(_) => LogLevel::Error,
        }
    }
}
