use std::ops::Range;

/// What to do with the `len % threads` bytes that don't fill a whole block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RemainderPolicy {
    /// Leave them out of the encoding entirely. Matches the historical
    /// behavior: `"aaabbbccd"` on 2 threads never sees the `d`.
    #[default]
    Truncate,
    /// Hand them to the last worker.
    ExtendLast,
}

/// Contiguous, equally sized slices of the input, one per worker.
///
/// Worker `i` covers `[i * block, i * block + block)`; with
/// [`RemainderPolicy::ExtendLast`] the last worker runs through to `len`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    len: usize,
    threads: usize,
    block: usize,
    policy: RemainderPolicy,
}

impl Partition {
    /// `threads` must be non-zero; the orchestrator rejects zero before
    /// building a partition.
    pub fn new(len: usize, threads: usize, policy: RemainderPolicy) -> Self {
        debug_assert!(threads > 0);
        Self {
            len,
            threads,
            block: len / threads,
            policy,
        }
    }

    #[inline]
    pub fn threads(&self) -> usize {
        self.threads
    }

    #[inline]
    pub fn block_size(&self) -> usize {
        self.block
    }

    /// Half-open input range assigned to worker `id`.
    pub fn span(&self, id: usize) -> Range<usize> {
        debug_assert!(id < self.threads);
        let start = id * self.block;
        let end = if id + 1 == self.threads && self.policy == RemainderPolicy::ExtendLast {
            self.len
        } else {
            start + self.block
        };
        start..end
    }

    /// All spans in ascending worker order.
    pub fn spans(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        (0..self.threads).map(|id| self.span(id))
    }

    /// Number of input bytes some worker will look at.
    pub fn processed_len(&self) -> usize {
        match self.policy {
            RemainderPolicy::Truncate => self.block * self.threads,
            RemainderPolicy::ExtendLast => self.len,
        }
    }

    /// Trailing bytes no worker is assigned.
    #[inline]
    pub fn dropped_len(&self) -> usize {
        self.len - self.processed_len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_even_split() {
        let p = Partition::new(12, 3, RemainderPolicy::Truncate);
        assert_eq!(p.block_size(), 4);
        assert_eq!(p.spans().collect::<Vec<_>>(), vec![0..4, 4..8, 8..12]);
        assert_eq!(p.dropped_len(), 0);
    }

    #[test]
    fn test_truncate_drops_tail() {
        let p = Partition::new(9, 2, RemainderPolicy::Truncate);
        assert_eq!(p.spans().collect::<Vec<_>>(), vec![0..4, 4..8]);
        assert_eq!(p.processed_len(), 8);
        assert_eq!(p.dropped_len(), 1);
    }

    #[test]
    fn test_extend_last_covers_tail() {
        let p = Partition::new(9, 2, RemainderPolicy::ExtendLast);
        assert_eq!(p.spans().collect::<Vec<_>>(), vec![0..4, 4..9]);
        assert_eq!(p.processed_len(), 9);
        assert_eq!(p.dropped_len(), 0);
    }

    #[test]
    fn test_more_threads_than_bytes() {
        let p = Partition::new(3, 5, RemainderPolicy::Truncate);
        assert_eq!(p.block_size(), 0);
        assert!(p.spans().all(|s| s.is_empty()));
        assert_eq!(p.dropped_len(), 3);

        let p = Partition::new(3, 5, RemainderPolicy::ExtendLast);
        assert_eq!(p.span(4), 0..3);
        assert!((0..4).all(|id| p.span(id).is_empty()));
    }

    #[test]
    fn test_spans_tile_processed_prefix() {
        for len in 0..40 {
            for threads in 1..9 {
                for policy in [RemainderPolicy::Truncate, RemainderPolicy::ExtendLast] {
                    let p = Partition::new(len, threads, policy);
                    let mut next = 0;
                    for span in p.spans() {
                        assert_eq!(span.start, next);
                        next = span.end;
                    }
                    assert_eq!(next, p.processed_len());
                }
            }
        }
    }
}
