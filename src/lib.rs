//! # GELF UDP Appender
//!
//! A log appender that converts structured log messages into GELF 1.1
//! records and ships them to Graylog (or any GELF UDP input).
//!
//! ## Features
//!
//! - **Non-blocking**: messages are queued to a single background sender
//! - **Chunking**: oversized payloads use the GELF UDP chunking protocol
//! - **Compression**: zlib by default, gzip or none on request
//! - **Degrades gracefully**: an unreachable endpoint disables the appender
//!   instead of failing the application

pub mod appenders;
pub mod core;
pub mod gelf;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::GelfAppender;
    pub use crate::core::{
        Appender, FieldValue, GelfMetrics, LogContext, LogLevel, LogMessage, LoggerError,
        ResolveError, Result,
    };
    pub use crate::gelf::{GelfCompression, GelfConfig, DEFAULT_SHUTDOWN_TIMEOUT};
}

pub use appenders::GelfAppender;
pub use core::{
    Appender, FieldValue, GelfMetrics, LogContext, LogLevel, LogMessage, LoggerError,
    ResolveError, Result,
};
pub use gelf::{GelfCompression, GelfConfig, DEFAULT_SHUTDOWN_TIMEOUT};
