//! GELF appender configuration and field-name validation

use super::chunker::{CHUNK_HEADER_SIZE, DEFAULT_MAX_PAYLOAD_SIZE, MAX_UDP_PAYLOAD_SIZE};
use super::compression::GelfCompression;
use crate::core::{LoggerError, Result};
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::LazyLock;

const COMPONENT: &str = "GelfConfig";

/// Additional-field names the appender populates itself (`_id` is forbidden by GELF)
pub const RESERVED_FIELD_NAMES: [&str; 8] = [
    "_id",
    "_timestamp_ns",
    "_log_id",
    "_line",
    "_file",
    "_method_name",
    "_thread_name",
    "_task_name",
];

static USER_FIELD_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^_[\w.\-]*$").expect("user field pattern is a valid regex"));

/// Immutable configuration of a [`GelfAppender`](crate::appenders::GelfAppender).
///
/// `endpoint` and `host` are required. Every other key of the source object
/// becomes a user field copied verbatim into each message, so its name must
/// follow the GELF additional-field rules.
///
/// # Example
///
/// ```
/// use gelf_udp_appender::GelfConfig;
/// use serde_json::json;
///
/// let config = GelfConfig::from_value(&json!({
///     "endpoint": "graylog.internal:12201",
///     "host": "node-7",
///     "_network": "testnet",
/// }))
/// .unwrap();
///
/// assert_eq!(config.host(), "node-7");
/// assert_eq!(config.user_fields()["_network"], json!("testnet"));
///
/// let err = GelfConfig::from_value(&json!({
///     "endpoint": "127.0.0.1:12201",
///     "host": "node-7",
///     "_line": 1,
/// }));
/// assert!(err.is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GelfConfig {
    endpoint: String,
    host: String,
    user_fields: BTreeMap<String, Value>,
    max_payload_size: usize,
    compression: GelfCompression,
}

impl GelfConfig {
    /// Start a configuration with no user fields and default transport knobs.
    ///
    /// Call [`validate`](Self::validate) (or hand it to the appender, which
    /// does) after adding fields.
    pub fn new(endpoint: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            host: host.into(),
            user_fields: BTreeMap::new(),
            max_payload_size: DEFAULT_MAX_PAYLOAD_SIZE,
            compression: GelfCompression::default(),
        }
    }

    /// Parse and validate a configuration object.
    pub fn from_value(value: &Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| LoggerError::config(COMPONENT, "configuration must be an object"))?;

        let endpoint = required_string(object, "endpoint")?;
        let host = required_string(object, "host")?;

        let mut config = Self::new(endpoint, host);
        config.user_fields = object
            .iter()
            .filter(|(key, _)| key.as_str() != "endpoint" && key.as_str() != "host")
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        config.validate()?;
        Ok(config)
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.user_fields.insert(name.into(), value.into());
        self
    }

    /// Largest datagram the appender will emit, header included
    #[must_use = "builder methods return a new value"]
    pub fn with_max_payload_size(mut self, size: usize) -> Self {
        self.max_payload_size = size;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_compression(mut self, compression: GelfCompression) -> Self {
        self.compression = compression;
        self
    }

    /// Check user field names and transport limits.
    ///
    /// Reserved names are reported before pattern violations.
    pub fn validate(&self) -> Result<()> {
        for name in RESERVED_FIELD_NAMES {
            if self.user_fields.contains_key(name) {
                return Err(LoggerError::config(
                    COMPONENT,
                    format!("Field name '{}' is reserved", name),
                ));
            }
        }

        for name in self.user_fields.keys() {
            if !is_valid_user_field_name(name) {
                return Err(LoggerError::config(
                    COMPONENT,
                    format!(
                        "Field name '{}' must begin with an underscore and contain only \
                         letters, numbers, underscores, dashes, and dots",
                        name
                    ),
                ));
            }
        }

        if self.max_payload_size <= CHUNK_HEADER_SIZE
            || self.max_payload_size > MAX_UDP_PAYLOAD_SIZE
        {
            return Err(LoggerError::config(
                COMPONENT,
                format!(
                    "max_payload_size {} must be between {} and {}",
                    self.max_payload_size,
                    CHUNK_HEADER_SIZE + 1,
                    MAX_UDP_PAYLOAD_SIZE
                ),
            ));
        }

        Ok(())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn user_fields(&self) -> &BTreeMap<String, Value> {
        &self.user_fields
    }

    pub fn max_payload_size(&self) -> usize {
        self.max_payload_size
    }

    pub fn compression(&self) -> GelfCompression {
        self.compression
    }
}

impl TryFrom<Value> for GelfConfig {
    type Error = LoggerError;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(&value)
    }
}

/// Whether `name` is acceptable as a GELF additional field
pub fn is_valid_user_field_name(name: &str) -> bool {
    USER_FIELD_NAME_PATTERN.is_match(name)
}

fn required_string(object: &serde_json::Map<String, Value>, key: &str) -> Result<String> {
    match object.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(LoggerError::config(
            COMPONENT,
            format!("'{}' must be a string, got {}", key, other),
        )),
        None => Err(LoggerError::config(
            COMPONENT,
            format!("missing required field '{}'", key),
        )),
    }
}
