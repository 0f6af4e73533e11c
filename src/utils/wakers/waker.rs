use std::sync::{Arc, Mutex, PoisonError};
use std::task::Wake;

use super::Readiness;

/// A waker for a single pool entry, which records the wake in the shared
/// [`Readiness`] before forwarding it to the parent task.
#[derive(Debug, Clone)]
pub(crate) struct InlineWaker {
    pub(crate) index: usize,
    pub(crate) readiness: Arc<Mutex<Readiness>>,
}

impl InlineWaker {
    /// Create a new instance of `InlineWaker`.
    pub(crate) fn new(index: usize, readiness: Arc<Mutex<Readiness>>) -> Self {
        Self { index, readiness }
    }
}

impl Wake for InlineWaker {
    fn wake(self: Arc<Self>) {
        self.wake_by_ref()
    }

    fn wake_by_ref(self: &Arc<Self>) {
        let mut readiness = self
            .readiness
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if !readiness.set_ready(self.index) {
            // Entries may wake before the stream is first polled; the queue
            // is drained on that first poll anyway.
            if let Some(parent) = readiness.parent_waker() {
                parent.wake_by_ref();
            }
        }
    }
}
