//! Appender trait for log output destinations

use super::{error::Result, log_message::LogMessage};

/// Boundary between the logging framework and an output destination
pub trait Appender: Send + Sync {
    fn append(&mut self, message: &LogMessage) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
