//! GELF appender for Graylog
//!
//! Ships each log message as a compressed GELF 1.1 record over UDP. Sending
//! happens on a dedicated background thread; the logging call site only
//! encodes the record and queues it.

use crate::core::{Appender, GelfMetrics, LogMessage, LoggerError, Result};
use crate::gelf::{
    encode_payload, resolve_endpoint_with, send_payload, stamp_log_id, DatagramSink,
    DispatchExecutor, GelfConfig, GelfEncoder, HostResolver, SystemResolver, Task,
};
use chrono::Utc;
use serde_json::Value;
use std::net::{SocketAddr, UdpSocket};
use std::sync::Arc;
use std::time::Duration;

/// Appender that forwards log messages to a GELF UDP input
///
/// An endpoint that cannot be resolved does not fail construction: the
/// appender reports it on stderr and silently drops every message from then
/// on. Observability trouble must not take the application down with it.
///
/// # Example
///
/// ```no_run
/// use gelf_udp_appender::prelude::*;
/// use serde_json::json;
///
/// let appender = GelfAppender::start(GelfConfig::from_value(&json!({
///     "endpoint": "127.0.0.1:12201",
///     "host": "svc1",
///     "_environment": "staging",
/// }))?)?;
///
/// appender.log(&LogMessage::new(LogLevel::Info, "started"));
/// # Ok::<(), LoggerError>(())
/// ```
pub struct GelfAppender {
    encoder: GelfEncoder,
    endpoint: Option<SocketAddr>,
    executor: Option<DispatchExecutor>,
    metrics: Arc<GelfMetrics>,
}

impl GelfAppender {
    /// Validate `config` and build a not-yet-initialized appender.
    ///
    /// # Errors
    ///
    /// [`LoggerError::InvalidConfiguration`] for reserved or malformed user
    /// field names and out-of-range payload sizes.
    pub fn new(config: GelfConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            encoder: GelfEncoder::new(Arc::new(config)),
            endpoint: None,
            executor: None,
            metrics: Arc::new(GelfMetrics::new()),
        })
    }

    /// Build from an untyped configuration object.
    pub fn from_value(value: &Value) -> Result<Self> {
        Self::new(GelfConfig::from_value(value)?)
    }

    /// Build and initialize in one step.
    pub fn start(config: GelfConfig) -> Result<Self> {
        let mut appender = Self::new(config)?;
        appender.initialize();
        Ok(appender)
    }

    /// Resolve the endpoint, open the socket and start the dispatch thread.
    ///
    /// Failures are reported on stderr and leave the appender disabled.
    pub fn initialize(&mut self) {
        self.initialize_with(&SystemResolver);
    }

    /// [`initialize`](Self::initialize) with a caller-supplied name resolver.
    pub fn initialize_with<R: HostResolver + ?Sized>(&mut self, resolver: &R) {
        if self.is_enabled() {
            return;
        }

        let endpoint = match resolve_endpoint_with(self.config().endpoint(), resolver) {
            Ok(endpoint) => endpoint,
            Err(e) => {
                self.report_open_failure(&LoggerError::from(e));
                return;
            }
        };

        match open_socket(endpoint) {
            Ok(socket) => self.initialize_with_sink(endpoint, socket),
            Err(e) => self.report_open_failure(&e),
        }
    }

    /// Start dispatching to `endpoint` through a custom sink.
    pub fn initialize_with_sink<S>(&mut self, endpoint: SocketAddr, sink: S)
    where
        S: DatagramSink + 'static,
    {
        if self.is_enabled() {
            return;
        }

        match DispatchExecutor::spawn(sink, Arc::clone(&self.metrics)) {
            Ok(executor) => {
                eprintln!(
                    "[GELF INFO] opened GELF socket to endpoint {}",
                    self.config().endpoint()
                );
                self.endpoint = Some(endpoint);
                self.executor = Some(executor);
            }
            Err(e) => self.report_open_failure(&e),
        }
    }

    fn report_open_failure(&self, error: &LoggerError) {
        eprintln!(
            "[GELF ERROR] error opening GELF socket to endpoint {}: {}",
            self.config().endpoint(),
            error
        );
    }

    /// Submit a message. Never blocks on the network and never fails.
    ///
    /// The GELF timestamp is taken here, not when the message was built or
    /// when it is eventually sent. The `_log_id` is taken on the dispatch
    /// thread, so ids increase in the order records are sent.
    pub fn log(&self, message: &LogMessage) {
        let (Some(executor), Some(target)) = (&self.executor, self.endpoint) else {
            self.metrics.record_dropped_disabled();
            return;
        };

        let submitted_at = Utc::now();
        let mut record = self.encoder.encode(message, submitted_at);

        let compression = self.config().compression();
        let max_payload_size = self.config().max_payload_size();
        let log_ids = Arc::clone(self.encoder.log_ids());
        let metrics = Arc::clone(&self.metrics);

        let task: Task = Box::new(move |sink: &dyn DatagramSink| -> Result<()> {
            stamp_log_id(&mut record, &log_ids);
            let payload = encode_payload(&record, compression)?;
            let datagrams = send_payload(sink, target, &payload, max_payload_size)?;
            metrics.record_sent(datagrams);
            Ok(())
        });

        match executor.post(task) {
            Ok(()) => {
                self.metrics.record_submitted();
            }
            Err(_) => {
                // shut down already
                self.metrics.record_dropped_disabled();
            }
        }
    }

    /// Stop the dispatch thread, waiting up to `timeout` for queued sends.
    ///
    /// Returns `true` when the queue drained in time. The appender drops all
    /// messages afterwards.
    pub fn shutdown(&self, timeout: Duration) -> bool {
        match &self.executor {
            Some(executor) => executor.shutdown(timeout),
            None => true,
        }
    }

    /// Whether messages are being forwarded
    pub fn is_enabled(&self) -> bool {
        self.executor
            .as_ref()
            .is_some_and(DispatchExecutor::is_running)
    }

    /// Resolved destination, if initialization succeeded
    pub fn endpoint(&self) -> Option<SocketAddr> {
        self.endpoint
    }

    pub fn config(&self) -> &GelfConfig {
        self.encoder.config()
    }

    pub fn metrics(&self) -> &GelfMetrics {
        &self.metrics
    }

    /// Last `_log_id` handed out, 0 before the first message
    pub fn last_log_id(&self) -> u64 {
        self.encoder.log_ids().current()
    }
}

impl Appender for GelfAppender {
    fn append(&mut self, message: &LogMessage) -> Result<()> {
        self.log(message);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        // datagrams are not buffered
        Ok(())
    }

    fn name(&self) -> &str {
        "gelf"
    }
}

fn open_socket(endpoint: SocketAddr) -> Result<UdpSocket> {
    let local: SocketAddr = if endpoint.is_ipv4() {
        (std::net::Ipv4Addr::UNSPECIFIED, 0).into()
    } else {
        (std::net::Ipv6Addr::UNSPECIFIED, 0).into()
    };
    UdpSocket::bind(local)
        .map_err(|e| LoggerError::io_operation("opening GELF socket", format!("bind {}", local), e))
}
