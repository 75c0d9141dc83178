//! Error types for the GELF appender

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Endpoint could not be turned into a socket address
    #[error("Endpoint resolution failed: {0}")]
    Resolve(#[from] ResolveError),

    /// Compressed payload needs more chunks than the chunk header can count
    #[error("GELF message too large: {size} bytes needs {chunks} chunks (max {max})")]
    MessageTooLarge {
        size: usize,
        chunks: usize,
        max: usize,
    },

    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Dispatch worker is gone
    #[error("Failed to post task to GELF dispatch worker")]
    ChannelSendError,

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Reasons a textual endpoint could not be resolved
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("the logging destination port is not specified in '{endpoint}'")]
    MissingPort { endpoint: String },

    #[error("bad port: '{port}'")]
    BadPort { port: String },

    #[error("the logging destination host name can not be resolved: {hostname}")]
    UnknownHost { hostname: String },
}

impl LoggerError {
    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    pub fn message_too_large(size: usize, chunks: usize, max: usize) -> Self {
        LoggerError::MessageTooLarge { size, chunks, max }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}
