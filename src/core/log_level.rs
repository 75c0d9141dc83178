//! Log level definitions

use serde::{Deserialize, Serialize};

/// Severity of a log message.
///
/// `All` and `Off` are threshold sentinels used by logger configuration. They
/// should never be attached to a real message, but an appender must still
/// handle them deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[derive(Default)]
pub enum LogLevel {
    All = 0,
    Debug = 1,
    #[default]
    Info = 2,
    Warn = 3,
    Error = 4,
    Off = 5,
}

impl LogLevel {
    /// Numeric syslog severity used by the GELF `level` field
    pub fn syslog_severity(&self) -> u8 {
        match self {
            LogLevel::Debug => 7,
            LogLevel::Info => 6,
            LogLevel::Warn => 4,
            LogLevel::Error => 3,
            // sentinels, not real message levels
            LogLevel::All | LogLevel::Off => 6,
        }
    }
}
