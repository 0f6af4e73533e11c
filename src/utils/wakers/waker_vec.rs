use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::Waker;

use super::{InlineWaker, Readiness};

/// A fixed-size collection of wakers which delegate to an in-line waker.
pub(crate) struct WakerVec {
    wakers: Vec<Waker>,
    readiness: Arc<Mutex<Readiness>>,
}

impl WakerVec {
    /// Create a new instance of `WakerVec`.
    pub(crate) fn new(len: usize) -> Self {
        let readiness = Arc::new(Mutex::new(Readiness::new(len)));
        let wakers = (0..len)
            .map(|i| Arc::new(InlineWaker::new(i, readiness.clone())).into())
            .collect();
        Self { wakers, readiness }
    }

    pub(crate) fn get(&self, index: usize) -> Option<&Waker> {
        self.wakers.get(index)
    }

    /// Lock the `Readiness`.
    ///
    /// The lock is never held across a call into user code, so a poisoned
    /// mutex still holds consistent bookkeeping and is recovered.
    pub(crate) fn readiness(&self) -> MutexGuard<'_, Readiness> {
        self.readiness
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
