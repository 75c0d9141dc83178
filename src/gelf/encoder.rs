//! GELF 1.1 record construction

use super::config::GelfConfig;
use crate::core::LogMessage;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

pub const GELF_VERSION: &str = "1.1";

/// Source of `_log_id` values.
///
/// Receivers use the id to order and deduplicate messages that share a
/// timestamp. Ids start at 1 and are unique for the life of the counter.
#[derive(Debug, Default)]
pub struct LogIdCounter {
    last: AtomicU64,
}

impl LogIdCounter {
    pub const fn new() -> Self {
        Self {
            last: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn next_id(&self) -> u64 {
        self.last.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Last id handed out, 0 if none
    pub fn current(&self) -> u64 {
        self.last.load(Ordering::Relaxed)
    }
}

/// Builds GELF records for one appender
///
/// The log id counter is shared with the dispatch worker, which stamps each
/// record right before it is sent. Ids therefore follow wire order.
#[derive(Debug)]
pub struct GelfEncoder {
    config: Arc<GelfConfig>,
    log_ids: Arc<LogIdCounter>,
}

impl GelfEncoder {
    pub fn new(config: Arc<GelfConfig>) -> Self {
        Self {
            config,
            log_ids: Arc::new(LogIdCounter::new()),
        }
    }

    pub fn config(&self) -> &GelfConfig {
        &self.config
    }

    pub fn log_ids(&self) -> &Arc<LogIdCounter> {
        &self.log_ids
    }

    /// Encode `message` as submitted at `submitted_at`. The record has no
    /// `_log_id` yet; see [`stamp_log_id`].
    pub fn encode(
        &self,
        message: &LogMessage,
        submitted_at: DateTime<Utc>,
    ) -> Map<String, Value> {
        encode_record(&self.config, message, submitted_at)
    }
}

/// Give `record` the next id from `log_ids`.
pub fn stamp_log_id(record: &mut Map<String, Value>, log_ids: &LogIdCounter) -> u64 {
    let log_id = log_ids.next_id();
    record.insert("_log_id".into(), log_id.to_string().into());
    log_id
}

/// Build the GELF record for one message, without its `_log_id`.
///
/// `submitted_at` is when the caller handed the message to the appender.
/// Building the message may itself have taken a while, so the message's own
/// timestamp is not used.
pub fn encode_record(
    config: &GelfConfig,
    message: &LogMessage,
    submitted_at: DateTime<Utc>,
) -> Map<String, Value> {
    let mut record = Map::new();

    record.insert("version".into(), GELF_VERSION.into());
    record.insert("host".into(), config.host().into());
    record.insert("short_message".into(), message.render().into());

    let seconds =
        submitted_at.timestamp() as f64 + f64::from(submitted_at.timestamp_subsec_nanos()) / 1e9;
    record.insert("timestamp".into(), seconds.into());
    record.insert(
        "_timestamp_ns".into(),
        submitted_at.timestamp_nanos_opt().unwrap_or_default().into(),
    );
    record.insert("level".into(), message.level.syslog_severity().into());

    if !message.context.is_empty() {
        record.insert("context".into(), message.context.to_json_value());
    }
    record.insert("_line".into(), message.line.into());
    record.insert("_file".into(), message.file.as_str().into());
    record.insert("_method_name".into(), message.method.as_str().into());
    record.insert("_thread_name".into(), message.thread_name.as_str().into());
    if !message.task_name.is_empty() {
        record.insert("_task_name".into(), message.task_name.as_str().into());
    }

    for (name, value) in config.user_fields() {
        record.insert(name.clone(), value.clone());
    }

    record
}
