use core::future::{Future, IntoFuture};
use core::pin::Pin;
use core::task::{ready, Context, Poll};

use pin_project::pin_project;

/// The identity of a single future inside a [`RaceStream`].
///
/// A key is the position of the future in the iterator the stream was created
/// from. Keys are assigned once, are unique within a stream, and are never
/// reused.
///
/// [`RaceStream`]: crate::RaceStream
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Key(usize);

impl Key {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// The position of the future in the input, starting at `0`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use race_stream::race_stream;
    /// use futures_lite::StreamExt;
    /// use std::future;
    ///
    /// # futures_lite::future::block_on(async {
    /// let mut stream = race_stream([future::ready('a'), future::ready('b')]).keyed();
    /// let (key, value) = stream.next().await.unwrap();
    /// assert_eq!((key.index(), value), (0, 'a'));
    /// # });
    /// ```
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A future which resolves to its own key alongside the inner output.
///
/// The key travels with the output, so the pool can tell which entry settled
/// without comparing values.
#[derive(Debug)]
#[pin_project]
pub(crate) struct Tagged<F> {
    key: Key,
    #[pin]
    future: F,
}

impl<F> Tagged<F> {
    pub(crate) fn new(key: Key, future: F) -> Self {
        Self { key, future }
    }

    pub(crate) fn key(&self) -> Key {
        self.key
    }

    pub(crate) fn into_inner(self) -> F {
        self.future
    }
}

impl<F: Future> Future for Tagged<F> {
    type Output = (Key, F::Output);

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let output = ready!(this.future.poll(cx));
        Poll::Ready((*this.key, output))
    }
}

/// Assign every future its position in `iter`.
pub(crate) fn tag<I>(
    iter: I,
) -> impl Iterator<Item = Tagged<<I::Item as IntoFuture>::IntoFuture>>
where
    I: IntoIterator,
    I::Item: IntoFuture,
{
    iter.into_iter()
        .enumerate()
        .map(|(index, fut)| Tagged::new(Key::new(index), fut.into_future()))
}
