//! Background event dispatch.
//!
//! # Responsibility
//! - Execute queued work on a dedicated worker thread, in FIFO order,
//!   without ever blocking the producer beyond the enqueue itself.
//!
//! # Invariants
//! - Events dispatched before the dispatcher is dropped are executed before
//!   the worker joins.
//! - The worker blocks on the channel instead of polling.

use log::{error, warn};
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};

type Job = Box<dyn FnOnce() + Send>;

/// Single-worker FIFO executor over an unbounded channel.
pub struct EventDispatcher {
    sender: Option<Sender<Job>>,
    worker: Option<JoinHandle<()>>,
}

impl EventDispatcher {
    /// Starts the worker thread.
    ///
    /// When the thread cannot be spawned the failure is logged and the
    /// dispatcher degrades to dropping events with a warning.
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel::<Job>();
        let spawned = thread::Builder::new()
            .name("event-dispatcher".to_string())
            .spawn(move || {
                while let Ok(job) = receiver.recv() {
                    job();
                }
            });

        match spawned {
            Ok(handle) => Self {
                sender: Some(sender),
                worker: Some(handle),
            },
            Err(err) => {
                error!("event=dispatcher_start module=event status=error error={err}");
                Self {
                    sender: None,
                    worker: None,
                }
            }
        }
    }

    /// Enqueues an event for eventual execution on the worker thread.
    pub fn dispatch(&self, event: impl FnOnce() + Send + 'static) {
        let Some(sender) = &self.sender else {
            warn!("event=dispatch module=event status=dropped reason=no_worker");
            return;
        };
        if sender.send(Box::new(event)).is_err() {
            warn!("event=dispatch module=event status=dropped reason=worker_gone");
        }
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for EventDispatcher {
    fn drop(&mut self) {
        // Closing the channel ends the worker loop after the queue drains.
        drop(self.sender.take());
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::EventDispatcher;
    use std::sync::{Arc, Mutex};

    #[test]
    fn dispatched_events_run_in_fifo_order_before_join() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let dispatcher = EventDispatcher::new();

        for index in 0..16 {
            let seen = Arc::clone(&seen);
            dispatcher.dispatch(move || {
                seen.lock().unwrap().push(index);
            });
        }
        drop(dispatcher);

        let seen = seen.lock().unwrap();
        assert_eq!(*seen, (0..16).collect::<Vec<_>>());
    }
}
