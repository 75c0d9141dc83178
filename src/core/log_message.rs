//! Log message handed to appenders by the logging framework

use super::log_context::{FieldValue, LogContext};
use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;

// Thread-local cache so every message built on a thread reuses one allocation path
thread_local! {
    static THREAD_NAME_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Get cached thread name, falling back to the thread id for unnamed threads
fn get_thread_name() -> String {
    THREAD_NAME_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| {
                let current = std::thread::current();
                match current.name() {
                    Some(name) => name.to_string(),
                    None => format!("{:?}", current.id()),
                }
            })
            .clone()
    })
}

/// A log statement: format string, positional data, severity and origin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogMessage {
    pub level: LogLevel,
    pub format: String,
    #[serde(default)]
    pub args: Vec<FieldValue>,
    /// When the message object was built, not when it is shipped
    pub timestamp: DateTime<Utc>,
    pub file: String,
    pub line: u32,
    pub method: String,
    pub thread_name: String,
    #[serde(default)]
    pub task_name: String,
    #[serde(default)]
    pub context: LogContext,
}

impl LogMessage {
    pub fn new(level: LogLevel, format: impl Into<String>) -> Self {
        Self {
            level,
            format: format.into(),
            args: Vec::new(),
            timestamp: Utc::now(),
            file: String::new(),
            line: 0,
            method: String::new(),
            thread_name: get_thread_name(),
            task_name: String::new(),
            context: LogContext::new(),
        }
    }

    pub fn with_arg(mut self, arg: impl Into<FieldValue>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn with_args(mut self, args: Vec<FieldValue>) -> Self {
        self.args = args;
        self
    }

    pub fn with_location(mut self, file: &str, line: u32, method: &str) -> Self {
        self.file = file.to_string();
        self.line = line;
        self.method = method.to_string();
        self
    }

    pub fn with_thread_name(mut self, thread_name: impl Into<String>) -> Self {
        self.thread_name = thread_name.into();
        self
    }

    pub fn with_task_name(mut self, task_name: impl Into<String>) -> Self {
        self.task_name = task_name.into();
        self
    }

    pub fn with_context(mut self, context: LogContext) -> Self {
        self.context = context;
        self
    }

    /// Render the format string with its positional arguments.
    ///
    /// Each `{}` consumes the next argument; `{{` and `}}` are literal braces.
    /// A `{}` with no argument left is kept as is, and surplus arguments are
    /// ignored, so a malformed statement still produces a readable line.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.format.len());
        let mut args = self.args.iter();
        let mut chars = self.format.chars().peekable();

        while let Some(c) = chars.next() {
            match (c, chars.peek()) {
                ('{', Some('{')) => {
                    chars.next();
                    out.push('{');
                }
                ('}', Some('}')) => {
                    chars.next();
                    out.push('}');
                }
                ('{', Some('}')) => {
                    chars.next();
                    match args.next() {
                        Some(arg) => out.push_str(&arg.to_string()),
                        None => out.push_str("{}"),
                    }
                }
                _ => out.push(c),
            }
        }

        out
    }
}
