use core::future::IntoFuture;

use crate::RaceStream;

/// Yield the outputs of a set of futures in the order they complete.
///
/// Items are yielded as soon as their future completes, and the stream ends
/// once every future has been yielded. The output ordering follows completion
/// order, not the order of the input.
///
/// This trait is implemented for everything which iterates over futures,
/// such as arrays and vectors of futures.
///
/// # Examples
///
/// ```
/// use race_stream::prelude::*;
/// use futures_lite::future::block_on;
/// use futures_lite::StreamExt;
/// use std::future;
///
/// block_on(async {
///     let a = future::ready(1);
///     let b = future::ready(2);
///     let c = future::ready(3);
///     let s = vec![a, b, c].race_stream();
///
///     let buf: Vec<_> = s.collect().await;
///     assert_eq!(&buf, &[1, 2, 3]);
/// })
/// ```
pub trait IntoRaceStream {
    /// The resulting output type.
    type Item;

    /// The stream type.
    type Stream: futures_core::Stream<Item = Self::Item>;

    /// Combine multiple futures into a single stream of their outputs, in
    /// completion order.
    fn race_stream(self) -> Self::Stream;
}

impl<I> IntoRaceStream for I
where
    I: IntoIterator,
    I::Item: IntoFuture,
{
    type Item = <I::Item as IntoFuture>::Output;
    type Stream = RaceStream<<I::Item as IntoFuture>::IntoFuture>;

    fn race_stream(self) -> Self::Stream {
        RaceStream::new(self)
    }
}

/// Create a [`RaceStream`] from an iterator of futures.
///
/// The iterator is consumed immediately. See [`RaceStream`] for more.
///
/// # Examples
///
/// ```
/// use race_stream::race_stream;
/// use futures_lite::future::block_on;
/// use futures_lite::StreamExt;
/// use std::future;
///
/// block_on(async {
///     let mut s = race_stream((1..=3).map(future::ready));
///
///     let mut sum = 0;
///     while let Some(n) = s.next().await {
///         sum += n;
///     }
///     assert_eq!(sum, 6);
/// })
/// ```
pub fn race_stream<I>(iter: I) -> RaceStream<<I::Item as IntoFuture>::IntoFuture>
where
    I: IntoIterator,
    I::Item: IntoFuture,
{
    RaceStream::new(iter)
}
