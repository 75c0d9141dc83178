//! Logging macros that capture the call site.
//!
//! These build a [`LogMessage`](crate::LogMessage) with `file!()`, `line!()`
//! and `module_path!()` filled in, so GELF records carry `_file`, `_line` and
//! `_method_name` without any extra effort at the call site.
//!
//! # Examples
//!
//! ```
//! use gelf_udp_appender::prelude::*;
//! use gelf_udp_appender::gelf_info;
//!
//! let appender = GelfAppender::new(GelfConfig::new("127.0.0.1:12201", "svc1")).unwrap();
//!
//! // Basic logging
//! gelf_info!(appender, "Server started");
//!
//! // With positional arguments
//! let port = 8080;
//! gelf_info!(appender, "Server listening on port {}", port);
//! ```

/// Build a [`LogMessage`](crate::LogMessage) located at the macro call site.
///
/// Arguments are converted with `FieldValue::from` and substituted into `{}`
/// placeholders when the message is rendered.
///
/// ```
/// use gelf_udp_appender::{gelf_message, LogLevel};
///
/// let message = gelf_message!(LogLevel::Warn, "retry {} of {}", 3, 5);
/// assert_eq!(message.render(), "retry 3 of 5");
/// assert_eq!(message.file, file!());
/// ```
#[macro_export]
macro_rules! gelf_message {
    ($level:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::LogMessage::new($level, $fmt)
            .with_args(vec![$($crate::FieldValue::from($arg)),*])
            .with_location(file!(), line!(), module_path!())
    };
}

/// Log a message at an explicit level.
///
/// ```
/// # use gelf_udp_appender::prelude::*;
/// # let appender = GelfAppender::new(GelfConfig::new("127.0.0.1:12201", "svc1")).unwrap();
/// use gelf_udp_appender::gelf_log;
/// gelf_log!(appender, LogLevel::Info, "Simple message");
/// gelf_log!(appender, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! gelf_log {
    ($appender:expr, $level:expr, $($arg:tt)+) => {
        $appender.log(&$crate::gelf_message!($level, $($arg)+))
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! gelf_debug {
    ($appender:expr, $($arg:tt)+) => {
        $crate::gelf_log!($appender, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! gelf_info {
    ($appender:expr, $($arg:tt)+) => {
        $crate::gelf_log!($appender, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! gelf_warn {
    ($appender:expr, $($arg:tt)+) => {
        $crate::gelf_log!($appender, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// ```
/// # use gelf_udp_appender::prelude::*;
/// # let appender = GelfAppender::new(GelfConfig::new("127.0.0.1:12201", "svc1")).unwrap();
/// use gelf_udp_appender::gelf_error;
/// gelf_error!(appender, "Failed to connect to {}", "db-1");
/// ```
#[macro_export]
macro_rules! gelf_error {
    ($appender:expr, $($arg:tt)+) => {
        $crate::gelf_log!($appender, $crate::LogLevel::Error, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{FieldValue, LogLevel};
    use crate::{GelfAppender, GelfConfig};

    fn disabled_appender() -> GelfAppender {
        GelfAppender::new(GelfConfig::new("127.0.0.1:12201", "svc1")).unwrap()
    }

    #[test]
    fn test_message_macro_captures_location() {
        let message = gelf_message!(LogLevel::Info, "plain");
        assert_eq!(message.file, file!());
        assert!(message.line > 0);
        assert_eq!(message.method, module_path!());
        assert!(message.args.is_empty());
    }

    #[test]
    fn test_message_macro_converts_args() {
        let message = gelf_message!(LogLevel::Debug, "{} {} {}", 1, "two", 3.5);
        assert_eq!(
            message.args,
            vec![
                FieldValue::Int(1),
                FieldValue::String("two".to_string()),
                FieldValue::Float(3.5)
            ]
        );
        assert_eq!(message.render(), "1 two 3.5");
    }

    #[test]
    fn test_level_macros_reach_appender() {
        let appender = disabled_appender();
        gelf_log!(appender, LogLevel::Info, "Test message");
        gelf_debug!(appender, "Count: {}", 5);
        gelf_info!(appender, "Items: {}", 100);
        gelf_warn!(appender, "Retry {} of {}", 1, 3);
        gelf_error!(appender, "Code: {}", 500);

        // not initialized, so every call is counted as dropped
        assert_eq!(appender.metrics().dropped_disabled(), 5);
    }
}
