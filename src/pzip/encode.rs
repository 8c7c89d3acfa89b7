use super::error::{PzipError, Result};
use super::run::{ALPHABET_LEN, FrequencyTable, Run, letter_index};

/// Append the runs of `slice` to `out`, in order.
///
/// Single forward pass: extend the pending run while the byte repeats, emit
/// it on the first mismatch, and emit whatever is pending at the end. An
/// empty slice emits nothing.
pub fn encode_slice(slice: &[u8], out: &mut Vec<Run>) {
    let Some((&first, rest)) = slice.split_first() else {
        return;
    };

    let mut current = first;
    let mut length = 1usize;

    for &b in rest {
        if b == current {
            length += 1;
        } else {
            out.push(Run::new(current, length));
            current = b;
            length = 1;
        }
    }

    out.push(Run::new(current, length));
}

/// Per-letter totals for one worker's runs, built before the barrier so a
/// bad byte can be reported while nothing shared has been touched yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFrequency {
    counts: FrequencyTable,
}

impl LocalFrequency {
    /// Sum run lengths per letter. `base` is the absolute input offset of the
    /// first run, used only to locate an invalid byte in the error.
    pub fn from_runs(runs: &[Run], base: usize) -> Result<Self> {
        let mut counts = [0usize; ALPHABET_LEN];
        let mut pos = base;
        for run in runs {
            let idx = letter_index(run.character).ok_or(PzipError::InvalidByte {
                index: pos,
                byte: run.character,
            })?;
            counts[idx] += run.length;
            pos += run.length;
        }
        Ok(Self { counts })
    }

    #[inline]
    pub fn counts(&self) -> &FrequencyTable {
        &self.counts
    }

    /// Add these totals into `table`.
    #[inline]
    pub fn merge_into(&self, table: &mut FrequencyTable) {
        for (dst, &n) in table.iter_mut().zip(self.counts.iter()) {
            *dst += n;
        }
    }
}
