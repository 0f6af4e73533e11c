use std::collections::VecDeque;
use std::task::Waker;

use fixedbitset::FixedBitSet;

/// Tracks which entries have been woken, and in which order.
///
/// Every index is queued at most once until it is taken again with
/// [`pop_ready`][Self::pop_ready].
#[derive(Debug)]
pub(crate) struct Readiness {
    ready: FixedBitSet,
    queue: VecDeque<usize>,
    parent_waker: Option<Waker>,
}

impl Readiness {
    /// Create a new instance of readiness. All entries start out ready, in
    /// index order.
    pub(crate) fn new(len: usize) -> Self {
        let mut ready = FixedBitSet::with_capacity(len);
        ready.insert_range(..);
        Self {
            ready,
            queue: (0..len).collect(),
            parent_waker: None,
        }
    }

    /// Set the ready state to `true` for the given index.
    ///
    /// Returns the old ready state for this index.
    pub(crate) fn set_ready(&mut self, index: usize) -> bool {
        if self.ready.put(index) {
            true
        } else {
            self.queue.push_back(index);
            false
        }
    }

    /// Take the index which was woken the longest time ago.
    pub(crate) fn pop_ready(&mut self) -> Option<usize> {
        let index = self.queue.pop_front()?;
        self.ready.set(index, false);
        Some(index)
    }

    /// Returns `true` if any of the entries are ready.
    pub(crate) fn any_ready(&self) -> bool {
        !self.queue.is_empty()
    }

    /// The number of entries currently queued.
    pub(crate) fn ready_count(&self) -> usize {
        self.queue.len()
    }

    /// Access the parent waker.
    #[inline]
    pub(crate) fn parent_waker(&self) -> Option<&Waker> {
        self.parent_waker.as_ref()
    }

    /// Set the parent `Waker`. This needs to be called at the start of every
    /// `poll` function.
    pub(crate) fn set_waker(&mut self, parent_waker: &Waker) {
        match &mut self.parent_waker {
            Some(prev) => prev.clone_from(parent_waker),
            None => self.parent_waker = Some(parent_waker.clone()),
        }
    }
}
