use futures_core::Future;
use race_stream::RaceStream;

use std::cell::{Cell, RefCell};
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

use super::shuffle;

/// Shared state of a set of [`Rung`]s. Only the rung at `next` may complete.
struct Ladder {
    next: Cell<usize>,
    wakers: RefCell<Vec<Option<Waker>>>,
}

/// A future which completes with its own index, but only once every rung with
/// a lower index has completed. Completing wakes the next rung and nothing
/// else.
pub struct Rung {
    index: usize,
    ladder: Rc<Ladder>,
}

/// Create `len` rungs in shuffled order. They complete in index order.
pub fn rungs(len: usize) -> Vec<Rung> {
    let ladder = Rc::new(Ladder {
        next: Cell::new(0),
        wakers: RefCell::new(vec![None; len]),
    });
    let mut rungs: Vec<_> = (0..len)
        .map(|index| Rung {
            index,
            ladder: ladder.clone(),
        })
        .collect();
    shuffle(&mut rungs);
    rungs
}

pub fn make_race_stream(len: usize) -> RaceStream<Rung> {
    rungs(len).into_iter().collect()
}

pub fn make_futures_unordered(len: usize) -> futures::stream::FuturesUnordered<Rung> {
    rungs(len).into_iter().collect()
}

impl Future for Rung {
    type Output = usize;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let ladder = &self.ladder;
        if ladder.next.get() != self.index {
            ladder.wakers.borrow_mut()[self.index] = Some(cx.waker().clone());
            return Poll::Pending;
        }

        ladder.next.set(self.index + 1);
        let next = ladder
            .wakers
            .borrow_mut()
            .get_mut(self.index + 1)
            .and_then(Option::take);
        if let Some(waker) = next {
            waker.wake();
        }
        Poll::Ready(self.index)
    }
}
