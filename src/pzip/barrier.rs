use parking_lot::{Condvar, Mutex};
use thiserror::Error;

/// Returned by [`PhaseBarrier::wait`] once the barrier has been aborted.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("barrier aborted before all parties arrived")]
pub struct BarrierAborted;

#[derive(Debug, Default)]
struct State {
    arrived: usize,
    released: bool,
    aborted: bool,
}

/// Single-use rendezvous for a fixed number of parties.
///
/// Behaves like `std::sync::Barrier` for one generation, with one addition:
/// [`abort`](Self::abort) wakes everyone with `Err(BarrierAborted)`. A worker
/// that fails (or a spawn that never happens) must not leave the others
/// parked forever.
#[derive(Debug)]
pub struct PhaseBarrier {
    parties: usize,
    state: Mutex<State>,
    cvar: Condvar,
}

impl PhaseBarrier {
    pub fn new(parties: usize) -> Self {
        debug_assert!(parties > 0);
        Self {
            parties,
            state: Mutex::new(State::default()),
            cvar: Condvar::new(),
        }
    }

    /// Block until all parties have arrived.
    ///
    /// Returns `Ok(true)` on exactly one party (the last to arrive), `Ok(false)`
    /// on the rest. Everything a party wrote before calling `wait` is visible
    /// to every party after it returns `Ok`.
    pub fn wait(&self) -> Result<bool, BarrierAborted> {
        let mut state = self.state.lock();
        if state.aborted {
            return Err(BarrierAborted);
        }
        debug_assert!(!state.released, "PhaseBarrier is single-use");

        state.arrived += 1;
        if state.arrived == self.parties {
            state.released = true;
            self.cvar.notify_all();
            return Ok(true);
        }

        while !state.released && !state.aborted {
            self.cvar.wait(&mut state);
        }
        if state.released { Ok(false) } else { Err(BarrierAborted) }
    }

    /// Release all current and future waiters with an error.
    /// No-op once the barrier has already released.
    pub fn abort(&self) {
        let mut state = self.state.lock();
        if state.released {
            return;
        }
        state.aborted = true;
        self.cvar.notify_all();
    }
}
