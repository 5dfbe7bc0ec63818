//! Deferred actions tied to the lifetime of the current screen.
//!
//! Every scheduled action is a spawned sleep that posts an event back to the
//! kiosk loop. Navigation calls [`Scheduler::cancel_all`], which aborts the
//! pending sleeps and bumps the epoch; events stamped with an older epoch
//! (one that raced the abort) must be dropped by the receiver.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub struct Scheduler<E> {
    tx: mpsc::UnboundedSender<E>,
    pending: Vec<JoinHandle<()>>,
    epoch: u64,
}

impl<E: Send + 'static> Scheduler<E> {
    pub fn new(tx: mpsc::UnboundedSender<E>) -> Self {
        Self {
            tx,
            pending: Vec::new(),
            epoch: 0,
        }
    }

    /// Current screen epoch. Stamp events with this before scheduling.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_current(&self, epoch: u64) -> bool {
        epoch == self.epoch
    }

    /// Deliver `event` after `delay` unless cancelled first.
    pub fn schedule(&mut self, delay: Duration, event: E) {
        self.pending.retain(|h| !h.is_finished());
        let tx = self.tx.clone();
        self.pending.push(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the kiosk has shut down.
            let _ = tx.send(event);
        }));
    }

    /// Abort everything pending and start a new epoch.
    pub fn cancel_all(&mut self) {
        let mut aborted = 0usize;
        for handle in self.pending.drain(..) {
            if !handle.is_finished() {
                aborted += 1;
            }
            handle.abort();
        }
        self.epoch += 1;
        if aborted > 0 {
            tracing::debug!(aborted, epoch = self.epoch, "cancelled deferred actions");
        }
    }

    /// Number of actions that have not fired yet.
    pub fn pending(&self) -> usize {
        self.pending.iter().filter(|h| !h.is_finished()).count()
    }
}

impl<E> Drop for Scheduler<E> {
    fn drop(&mut self) {
        for handle in &self.pending {
            handle.abort();
        }
    }
}
