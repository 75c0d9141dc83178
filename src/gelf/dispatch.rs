//! Background dispatch of outbound datagrams
//!
//! A single worker thread owns the datagram sink and runs posted tasks one at
//! a time, in the order they were posted. Posting never blocks: the queue is
//! unbounded, and there is no backpressure on the logging call site.

use super::chunker::DatagramSink;
use crate::core::{GelfMetrics, LoggerError, Result};
use crossbeam_channel::{unbounded, Sender};
use parking_lot::{Mutex, RwLock};
use std::any::Any;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Default time to wait for the worker to drain on shutdown
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Unit of work run on the dispatch thread with exclusive use of the sink
pub type Task = Box<dyn FnOnce(&dyn DatagramSink) -> Result<()> + Send>;

/// Told about tasks that failed on the worker
pub trait TaskObserver: Send {
    fn task_failed(&self);
}

impl TaskObserver for Arc<GelfMetrics> {
    fn task_failed(&self) {
        self.record_failed();
    }
}

pub struct DispatchExecutor {
    // Holding the sender keeps the worker alive; dropping it lets the worker
    // drain what is queued and exit.
    sender: RwLock<Option<Sender<Task>>>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl DispatchExecutor {
    /// Move `sink` onto a new worker thread named `gelf`.
    pub fn spawn<S, O>(sink: S, observer: O) -> Result<Self>
    where
        S: DatagramSink + 'static,
        O: TaskObserver + 'static,
    {
        let (sender, receiver) = unbounded::<Task>();

        let handle = thread::Builder::new()
            .name("gelf".to_string())
            .spawn(move || {
                for task in receiver.iter() {
                    Self::run_task(&sink, task, &observer);
                }
            })
            .map_err(|e| {
                LoggerError::io_operation("spawning GELF dispatch thread", "thread spawn failed", e)
            })?;

        Ok(Self {
            sender: RwLock::new(Some(sender)),
            handle: Mutex::new(Some(handle)),
        })
    }

    /// Run one task, isolating its failure from the rest of the queue
    fn run_task<O: TaskObserver>(sink: &dyn DatagramSink, task: Task, observer: &O) {
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| task(sink)));

        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                eprintln!("[GELF ERROR] GELF logger failed to send message: {}", e);
                observer.task_failed();
            }
            Err(panic_info) => {
                eprintln!(
                    "[GELF CRITICAL] GELF logger task panicked: {}. \
                     Subsequent messages are unaffected.",
                    panic_message(panic_info.as_ref())
                );
                observer.task_failed();
            }
        }
    }

    /// Queue a task behind everything posted so far.
    ///
    /// # Errors
    ///
    /// [`LoggerError::ChannelSendError`] once the executor has been shut down.
    pub fn post(&self, task: Task) -> Result<()> {
        match self.sender.read().as_ref() {
            Some(sender) => sender.send(task).map_err(|_| LoggerError::ChannelSendError),
            None => Err(LoggerError::ChannelSendError),
        }
    }

    pub fn is_running(&self) -> bool {
        self.sender.read().is_some()
    }

    /// Stop accepting tasks and wait up to `timeout` for the worker to drain.
    ///
    /// Returns `true` if the worker exited in time. Calling it again is a
    /// no-op that returns `true`. Tasks still queued when the timeout expires
    /// run on the detached worker, if the process lives long enough.
    pub fn shutdown(&self, timeout: Duration) -> bool {
        drop(self.sender.write().take());

        let Some(handle) = self.handle.lock().take() else {
            return true;
        };

        let start = Instant::now();
        loop {
            if handle.is_finished() {
                if let Err(e) = handle.join() {
                    eprintln!(
                        "[GELF ERROR] GELF dispatch thread panicked during shutdown: {}",
                        panic_message(e.as_ref())
                    );
                    return false;
                }
                return true;
            }

            if start.elapsed() >= timeout {
                eprintln!(
                    "[GELF WARNING] GELF dispatch thread did not finish within {:?}. \
                     Some messages may be lost.",
                    timeout
                );
                return false;
            }

            thread::sleep(Duration::from_millis(5));
        }
    }
}

impl Drop for DispatchExecutor {
    fn drop(&mut self) {
        self.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);
    }
}

fn panic_message(panic_info: &(dyn Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
