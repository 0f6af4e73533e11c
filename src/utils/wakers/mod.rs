mod readiness;
mod waker;
mod waker_vec;

pub(crate) use readiness::Readiness;
pub(crate) use waker::InlineWaker;
pub(crate) use waker_vec::WakerVec;
