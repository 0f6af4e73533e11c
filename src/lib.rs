//! Yield the outputs of a set of futures in the order they complete.
//!
//! Given any number of futures, [`race_stream`] returns a [`Stream`] which
//! yields each future's output as soon as it becomes available. Where
//! [`race`] returns only the first output and drops the rest, a race stream
//! keeps going: the first item is the output of the first future to complete,
//! the second item the output of the second, and so on, until every future has
//! been yielded.
//!
//! [`race`]: https://docs.rs/futures-concurrency/latest/futures_concurrency/future/trait.Race.html
//! [`Stream`]: futures_core::Stream
//!
//! # Examples
//!
//! Await futures in completion order:
//! ```rust
//! use race_stream::prelude::*;
//! use futures_lite::future::{block_on, yield_now};
//! use futures_lite::StreamExt;
//! use std::future::Future;
//! use std::pin::Pin;
//!
//! block_on(async {
//!     let mut futures: Vec<Pin<Box<dyn Future<Output = &str>>>> = Vec::new();
//!     futures.push(Box::pin(async {
//!         yield_now().await;
//!         yield_now().await;
//!         "slow"
//!     }));
//!     futures.push(Box::pin(async { "fast" }));
//!
//!     let out: Vec<_> = futures.race_stream().collect().await;
//!     assert_eq!(out, vec!["fast", "slow"]);
//! })
//! ```
//!
//! # Keys
//!
//! Each future is identified by its position in the input, as a [`Key`]. The
//! key travels with the output, so two futures which produce equal values are
//! still told apart. Use [`RaceStream::keyed`] to get the keys alongside the
//! outputs.
//!
//! # Errors
//!
//! A future which fails is a future which outputs an `Err`. The error is
//! yielded at the position where the future completed, and the future is
//! removed from the stream like any other. The remaining futures keep going.
//!
//! # Cancellation
//!
//! Dropping a [`RaceStream`] drops every future which has not completed yet.
//! To keep work running after you stop consuming the stream, race spawned
//! task handles instead of plain futures, or take the remaining futures back
//! with [`RaceStream::into_pending`].
//!
//! # Features
//!
//! - `tracing`: emit `trace`-level events when a stream is created and every
//!   time a future settles.

#![deny(missing_debug_implementations, nonstandard_style)]
#![warn(missing_docs, unreachable_pub)]

mod into_race_stream;
mod stream;
mod tag;
mod utils;

/// The race stream prelude.
pub mod prelude {
    pub use super::IntoRaceStream as _;
}

pub use crate::into_race_stream::{race_stream, IntoRaceStream};
pub use crate::stream::{Keyed, RaceStream};
pub use crate::tag::Key;
