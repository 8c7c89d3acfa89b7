use std::marker::PhantomData;
use std::ptr;

use super::run::Run;

/// The caller's run buffer, shared across workers for disjoint writes.
///
/// Workers only learn where they write after the barrier, so the buffer
/// can't be split with `split_at_mut` up front. Instead every worker holds
/// this shared view and writes its own `[offset, offset + len)` window.
pub struct SharedRuns<'a> {
    ptr: *mut Run,
    len: usize,
    _buf: PhantomData<&'a mut [Run]>,
}

// SAFETY: the view is only written through `write_at`, whose contract
// requires concurrent callers to use non-overlapping windows. `Run` is `Copy`
// and has no interior references.
unsafe impl Send for SharedRuns<'_> {}
unsafe impl Sync for SharedRuns<'_> {}

impl<'a> SharedRuns<'a> {
    pub fn new(buf: &'a mut [Run]) -> Self {
        Self {
            ptr: buf.as_mut_ptr(),
            len: buf.len(),
            _buf: PhantomData,
        }
    }

    /// Copy `runs` into `[offset, offset + runs.len())`.
    ///
    /// Panics if the window runs past the end of the buffer.
    ///
    /// # Safety
    ///
    /// No other thread may read or write any index of this window while the
    /// copy is in progress. The encoder guarantees this because windows come
    /// from a prefix sum over per-worker run counts, which tiles
    /// `[0, total)` exactly.
    #[inline]
    pub unsafe fn write_at(&self, offset: usize, runs: &[Run]) {
        let end = offset.saturating_add(runs.len());
        assert!(
            end <= self.len,
            "run window {}..{} exceeds buffer of {}",
            offset,
            end,
            self.len
        );
        // SAFETY: bounds checked above; exclusivity is the caller's contract.
        unsafe {
            ptr::copy_nonoverlapping(runs.as_ptr(), self.ptr.add(offset), runs.len());
        }
    }
}
