use core::fmt;
use core::future::{Future, IntoFuture};
use core::ops::{Deref, DerefMut};
use core::pin::Pin;
use core::task::{Context, Poll};
use futures_core::stream::{FusedStream, Stream};
use pin_project::pin_project;

use crate::tag::{tag, Key, Tagged};
use crate::utils::{get_pin_mut_from_vec, WakerVec};

/// A pool entry. Settled entries keep their slot so keys stay valid indexes.
#[pin_project(project = SlotProj)]
enum Slot<F> {
    Pending(#[pin] Tagged<F>),
    Settled,
}

/// A stream which yields the outputs of a set of futures in the order they
/// complete.
///
/// This `struct` is created by the [`race_stream`] function and the
/// [`IntoRaceStream::race_stream`] method. See their documentation for more.
///
/// All futures are stored when the stream is created; none can be added
/// later. Every call to `next` removes exactly one future from the stream and
/// yields its output, until the stream is empty. Futures which were woken
/// earlier are polled earlier, so outputs come out in completion order rather
/// than input order.
///
/// Dropping the stream drops every future which has not completed yet.
///
/// # Example
///
/// ```rust
/// use race_stream::RaceStream;
/// use futures_lite::StreamExt;
/// use std::future;
///
/// # futures_lite::future::block_on(async {
/// let mut stream = RaceStream::new([future::ready(2), future::ready(4)]);
///
/// let mut out = 0;
/// while let Some(num) = stream.next().await {
///     out += num;
/// }
/// assert_eq!(out, 6);
/// # });
/// ```
///
/// [`race_stream`]: crate::race_stream
/// [`IntoRaceStream::race_stream`]: crate::IntoRaceStream::race_stream
#[must_use = "`RaceStream` does nothing if not iterated over"]
#[pin_project]
pub struct RaceStream<F> {
    #[pin]
    slots: Vec<Slot<F>>,
    wakers: WakerVec,
    pending: usize,
}

impl<F> fmt::Debug for RaceStream<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RaceStream")
            .field("len", &self.len())
            .finish()
    }
}

impl<F: Future> RaceStream<F> {
    /// Create a new instance of `RaceStream`.
    ///
    /// The iterator is consumed right away, and each future is keyed by its
    /// position in it. None of the futures are polled until the stream is.
    ///
    /// # Example
    ///
    /// ```rust
    /// use race_stream::RaceStream;
    /// use std::future;
    ///
    /// let stream = RaceStream::new(vec![future::ready(1), future::ready(2)]);
    /// assert_eq!(stream.len(), 2);
    /// ```
    pub fn new<I>(iter: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoFuture<IntoFuture = F>,
    {
        let slots: Vec<_> = tag(iter).map(Slot::Pending).collect();
        let len = slots.len();

        #[cfg(feature = "tracing")]
        tracing::trace!(len, "race stream created");

        Self {
            wakers: WakerVec::new(len),
            pending: len,
            slots,
        }
    }
}

impl<F> RaceStream<F> {
    /// Return the number of futures which have not yet completed.
    ///
    /// # Example
    ///
    /// ```rust
    /// use race_stream::RaceStream;
    /// use futures_lite::StreamExt;
    /// use std::future;
    ///
    /// # futures_lite::future::block_on(async {
    /// let mut stream = RaceStream::new([future::ready(1), future::ready(2)]);
    /// assert_eq!(stream.len(), 2);
    /// stream.next().await;
    /// assert_eq!(stream.len(), 1);
    /// # });
    /// ```
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.pending
    }

    /// Returns `true` if every future has completed and been yielded.
    ///
    /// # Example
    ///
    /// ```rust
    /// use race_stream::RaceStream;
    /// use std::future::Ready;
    ///
    /// let stream = RaceStream::new(Vec::<Ready<u8>>::new());
    /// assert!(stream.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.pending == 0
    }

    /// Returns `true` if the future for the specified key has not completed
    /// yet.
    ///
    /// # Example
    ///
    /// ```rust
    /// use race_stream::RaceStream;
    /// use futures_lite::StreamExt;
    /// use std::future;
    ///
    /// # futures_lite::future::block_on(async {
    /// let mut stream = RaceStream::new([future::ready(1)]).keyed();
    /// let (key, _) = stream.next().await.unwrap();
    /// assert!(!stream.contains_key(key));
    /// # });
    /// ```
    pub fn contains_key(&self, key: Key) -> bool {
        matches!(self.slots.get(key.index()), Some(Slot::Pending(_)))
    }

    /// Create a stream which also yields the key of each item.
    ///
    /// # Example
    ///
    /// ```rust
    /// use race_stream::RaceStream;
    /// use futures_lite::StreamExt;
    /// use std::future;
    ///
    /// # futures_lite::future::block_on(async {
    /// let mut stream = RaceStream::new([future::ready('a'), future::ready('b')]).keyed();
    ///
    /// let mut keys = vec![];
    /// while let Some((key, _)) = stream.next().await {
    ///     keys.push(key.index());
    /// }
    /// assert_eq!(keys, vec![0, 1]);
    /// # });
    /// ```
    pub fn keyed(self) -> Keyed<F> {
        Keyed { stream: self }
    }
}

impl<F: Future + Unpin> RaceStream<F> {
    /// Return the futures which have not completed yet, in key order.
    ///
    /// Use this to keep driving the remaining futures after you stop
    /// consuming the stream, instead of dropping them with it.
    ///
    /// # Example
    ///
    /// ```rust
    /// use race_stream::RaceStream;
    /// use futures_lite::StreamExt;
    /// use futures::channel::oneshot;
    ///
    /// # futures_lite::future::block_on(async {
    /// let (tx_a, rx_a) = oneshot::channel::<u8>();
    /// let (_tx_b, rx_b) = oneshot::channel::<u8>();
    /// let mut stream = RaceStream::new([rx_a, rx_b]);
    ///
    /// tx_a.send(1).unwrap();
    /// assert_eq!(stream.next().await, Some(Ok(1)));
    ///
    /// let pending = stream.into_pending();
    /// assert_eq!(pending.len(), 1);
    /// assert_eq!(pending[0].0.index(), 1);
    /// # });
    /// ```
    pub fn into_pending(self) -> Vec<(Key, F)> {
        self.slots
            .into_iter()
            .filter_map(|slot| match slot {
                Slot::Pending(tagged) => Some((tagged.key(), tagged.into_inner())),
                Slot::Settled => None,
            })
            .collect()
    }
}

impl<F: Future> RaceStream<F> {
    fn poll_next_inner(
        self: Pin<&mut Self>,
        cx: &Context<'_>,
    ) -> Poll<Option<(Key, <F as Future>::Output)>> {
        let mut this = self.project();

        // Short-circuit if every future has been yielded
        if *this.pending == 0 {
            return Poll::Ready(None);
        }

        // Set the top-level waker and check readiness
        let mut readiness = this.wakers.readiness();
        readiness.set_waker(cx.waker());
        if !readiness.any_ready() {
            // Nothing is ready yet
            return Poll::Pending;
        }

        // Entries which wake again while we poll them are left for the next
        // call, so a future which keeps waking itself can't starve the task.
        let budget = readiness.ready_count();
        for _ in 0..budget {
            let Some(index) = readiness.pop_ready() else {
                break;
            };

            // unlock readiness so we don't deadlock when polling
            drop(readiness);

            if let (Some(mut slot), Some(waker)) = (
                get_pin_mut_from_vec(this.slots.as_mut(), index),
                this.wakers.get(index),
            ) {
                // Obtain the intermediate waker.
                let mut cx = Context::from_waker(waker);

                // Stale wakes of settled entries are ignored.
                let polled = match slot.as_mut().project() {
                    SlotProj::Pending(future) => future.poll(&mut cx),
                    SlotProj::Settled => Poll::Pending,
                };

                if let Poll::Ready((key, item)) = polled {
                    debug_assert_eq!(key.index(), index);

                    // Drop the future in place and remove it from the pool
                    slot.set(Slot::Settled);
                    *this.pending -= 1;

                    #[cfg(feature = "tracing")]
                    {
                        tracing::trace!(
                            key = key.index(),
                            remaining = *this.pending,
                            "future settled"
                        );
                        if *this.pending == 0 {
                            tracing::trace!("race stream exhausted");
                        }
                    }

                    return Poll::Ready(Some((key, item)));
                }
            }

            // Lock readiness so we can use it again
            readiness = this.wakers.readiness();
        }

        Poll::Pending
    }
}

impl<F: Future> Stream for RaceStream<F> {
    type Item = <F as Future>::Output;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        match self.poll_next_inner(cx) {
            Poll::Ready(Some((_key, item))) => Poll::Ready(Some(item)),
            Poll::Ready(None) => Poll::Ready(None),
            Poll::Pending => Poll::Pending,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len(), Some(self.len()))
    }
}

impl<F: Future> FusedStream for RaceStream<F> {
    fn is_terminated(&self) -> bool {
        self.is_empty()
    }
}

impl<F: Future> FromIterator<F> for RaceStream<F> {
    fn from_iter<T: IntoIterator<Item = F>>(iter: T) -> Self {
        Self::new(iter)
    }
}

/// Iterate over the outputs of a [`RaceStream`] together with their keys.
///
/// This `struct` is created by the [`keyed`] method on [`RaceStream`].
///
/// [`keyed`]: RaceStream::keyed
#[must_use = "`Keyed` does nothing if not iterated over"]
#[pin_project]
pub struct Keyed<F> {
    #[pin]
    stream: RaceStream<F>,
}

impl<F> fmt::Debug for Keyed<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keyed").field("stream", &self.stream).finish()
    }
}

impl<F> Deref for Keyed<F> {
    type Target = RaceStream<F>;

    fn deref(&self) -> &Self::Target {
        &self.stream
    }
}

impl<F> DerefMut for Keyed<F> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.stream
    }
}

impl<F: Future> Stream for Keyed<F> {
    type Item = (Key, <F as Future>::Output);

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();
        this.stream.poll_next_inner(cx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.stream.size_hint()
    }
}

impl<F: Future> FusedStream for Keyed<F> {
    fn is_terminated(&self) -> bool {
        self.stream.is_terminated()
    }
}
