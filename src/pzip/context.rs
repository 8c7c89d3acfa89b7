use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use super::barrier::PhaseBarrier;
use super::encode::LocalFrequency;
use super::output::SharedRuns;
use super::run::{ALPHABET_LEN, FrequencyTable, Run};

/// Everything the workers of one call share.
///
/// Built by the orchestrator, borrowed by each scoped worker and consumed
/// with [`into_totals`](Self::into_totals) once they are all joined, so no
/// state outlives the call and independent calls never see each other.
pub struct ZipContext<'a> {
    barrier: PhaseBarrier,
    /// One slot per worker: written by its owner before the barrier, read by
    /// anyone after it.
    local_counts: Box<[AtomicUsize]>,
    frequency: Mutex<FrequencyTable>,
    run_count: Mutex<usize>,
    output: SharedRuns<'a>,
}

impl<'a> ZipContext<'a> {
    pub fn new(threads: usize, output: &'a mut [Run]) -> Self {
        Self {
            barrier: PhaseBarrier::new(threads),
            local_counts: (0..threads).map(|_| AtomicUsize::new(0)).collect(),
            frequency: Mutex::new([0; ALPHABET_LEN]),
            run_count: Mutex::new(0),
            output: SharedRuns::new(output),
        }
    }

    #[inline]
    pub fn barrier(&self) -> &PhaseBarrier {
        &self.barrier
    }

    /// Record how many runs worker `id` produced. Call once, before the barrier.
    #[inline]
    pub fn publish_local_count(&self, id: usize, count: usize) {
        // Relaxed is enough: the barrier's lock orders this store before
        // every post-barrier load.
        self.local_counts[id].store(count, Ordering::Relaxed);
    }

    /// Start of worker `id`'s output window: the sum of the run counts of
    /// workers `0..id`. Only meaningful after the barrier.
    pub fn write_offset(&self, id: usize) -> usize {
        self.local_counts[..id]
            .iter()
            .map(|c| c.load(Ordering::Relaxed))
            .sum()
    }

    pub fn add_run_count(&self, count: usize) {
        *self.run_count.lock() += count;
    }

    pub fn merge_frequency(&self, local: &LocalFrequency) {
        let mut table = self.frequency.lock();
        local.merge_into(&mut table);
    }

    /// Copy a worker's runs into its output window.
    ///
    /// # Safety
    ///
    /// `offset` must come from [`write_offset`](Self::write_offset) for the
    /// calling worker and `runs.len()` must equal the count it published, so
    /// that no two workers' windows overlap.
    #[inline]
    pub unsafe fn write_runs(&self, offset: usize, runs: &[Run]) {
        // SAFETY: forwarded to the caller.
        unsafe { self.output.write_at(offset, runs) }
    }

    /// Final run count and frequency table. Consumes the context, which also
    /// ends its borrow of the output buffer.
    pub fn into_totals(self) -> (usize, FrequencyTable) {
        (self.run_count.into_inner(), self.frequency.into_inner())
    }
}
