//! Appender implementations

pub mod gelf;

pub use gelf::GelfAppender;

pub use crate::core::Appender;
