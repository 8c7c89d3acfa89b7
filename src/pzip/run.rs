/// Number of letters tracked by the frequency table (`a` through `z`).
pub const ALPHABET_LEN: usize = 26;

/// Per-letter occurrence totals, indexed by `byte - b'a'`.
pub type FrequencyTable = [usize; ALPHABET_LEN];

/// One run of identical characters.
///
/// A run never spans two worker slices: the same character straddling a
/// slice boundary shows up as two adjacent runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Run {
    pub character: u8,
    pub length: usize,
}

impl Run {
    #[inline]
    pub const fn new(character: u8, length: usize) -> Self {
        Self { character, length }
    }
}

/// Map a byte to its frequency-table slot, or `None` outside `a..=z`.
#[inline]
pub fn letter_index(byte: u8) -> Option<usize> {
    let idx = byte.wrapping_sub(b'a') as usize;
    if idx < ALPHABET_LEN { Some(idx) } else { None }
}
