//! Utilities to implement the race stream.

mod pin;
mod wakers;

pub(crate) use pin::get_pin_mut_from_vec;
pub(crate) use wakers::WakerVec;
