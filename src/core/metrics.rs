//! Appender metrics for observability
//!
//! UDP gives no delivery feedback, so these counters only describe what the
//! appender itself did: what it accepted, dropped, and put on the wire.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for a single GELF appender instance
///
/// # Example
///
/// ```
/// use gelf_udp_appender::GelfMetrics;
///
/// let metrics = GelfMetrics::new();
///
/// metrics.record_submitted();
/// metrics.record_sent(3);
///
/// assert_eq!(metrics.submitted(), 1);
/// assert_eq!(metrics.datagrams_sent(), 3);
/// assert_eq!(metrics.chunked_messages(), 1);
/// ```
#[derive(Debug)]
pub struct GelfMetrics {
    /// Messages accepted from the caller and posted to the worker
    submitted: AtomicU64,

    /// Messages dropped because the endpoint never resolved
    dropped_disabled: AtomicU64,

    /// Messages fully handed to the socket
    messages_sent: AtomicU64,

    /// Individual datagrams handed to the socket
    datagrams_sent: AtomicU64,

    /// Messages that needed the chunking protocol
    chunked_messages: AtomicU64,

    /// Tasks that returned an error or panicked on the worker
    failed: AtomicU64,
}

impl GelfMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            submitted: AtomicU64::new(0),
            dropped_disabled: AtomicU64::new(0),
            messages_sent: AtomicU64::new(0),
            datagrams_sent: AtomicU64::new(0),
            chunked_messages: AtomicU64::new(0),
            failed: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn submitted(&self) -> u64 {
        self.submitted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dropped_disabled(&self) -> u64 {
        self.dropped_disabled.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn messages_sent(&self) -> u64 {
        self.messages_sent.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn datagrams_sent(&self) -> u64 {
        self.datagrams_sent.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn chunked_messages(&self) -> u64 {
        self.chunked_messages.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_submitted(&self) -> u64 {
        self.submitted.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dropped_disabled(&self) -> u64 {
        self.dropped_disabled.fetch_add(1, Ordering::Relaxed)
    }

    /// Record one message that went out as `datagrams` datagrams
    #[inline]
    pub fn record_sent(&self, datagrams: usize) {
        self.messages_sent.fetch_add(1, Ordering::Relaxed);
        self.datagrams_sent
            .fetch_add(datagrams as u64, Ordering::Relaxed);
        if datagrams > 1 {
            self.chunked_messages.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[inline]
    pub fn record_failed(&self) -> u64 {
        self.failed.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for GelfMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for GelfMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            submitted: AtomicU64::new(self.submitted()),
            dropped_disabled: AtomicU64::new(self.dropped_disabled()),
            messages_sent: AtomicU64::new(self.messages_sent()),
            datagrams_sent: AtomicU64::new(self.datagrams_sent()),
            chunked_messages: AtomicU64::new(self.chunked_messages()),
            failed: AtomicU64::new(self.failed()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = GelfMetrics::new();
        assert_eq!(metrics.submitted(), 0);
        assert_eq!(metrics.dropped_disabled(), 0);
        assert_eq!(metrics.messages_sent(), 0);
        assert_eq!(metrics.datagrams_sent(), 0);
        assert_eq!(metrics.failed(), 0);
    }

    #[test]
    fn test_record_sent_tracks_chunking() {
        let metrics = GelfMetrics::new();
        metrics.record_sent(1);
        metrics.record_sent(4);

        assert_eq!(metrics.messages_sent(), 2);
        assert_eq!(metrics.datagrams_sent(), 5);
        assert_eq!(metrics.chunked_messages(), 1);
    }

    #[test]
    fn test_record_returns_previous_value() {
        let metrics = GelfMetrics::new();
        assert_eq!(metrics.record_failed(), 0);
        assert_eq!(metrics.record_failed(), 1);
        assert_eq!(metrics.failed(), 2);
    }

    #[test]
    fn test_metrics_clone() {
        let metrics = GelfMetrics::new();
        metrics.record_submitted();

        let snapshot = metrics.clone();
        metrics.record_submitted();

        assert_eq!(snapshot.submitted(), 1);
        assert_eq!(metrics.submitted(), 2);
    }
}
