//! Core types and traits shared by appenders

pub mod appender;
pub mod error;
pub mod log_context;
pub mod log_level;
pub mod log_message;
pub mod metrics;

pub use appender::Appender;
pub use error::{LoggerError, ResolveError, Result};
pub use log_context::{FieldValue, LogContext};
pub use log_level::LogLevel;
pub use log_message::LogMessage;
pub use metrics::GelfMetrics;
