//! Error types for the parallel encoder.

use std::io;

use thiserror::Error;

/// Result type alias for pzip operations
pub type Result<T> = std::result::Result<T, PzipError>;

/// Errors reported by [`pzip`](super::pzip) and friends.
///
/// Every variant is raised before any worker has touched the caller's
/// outputs, so an `Err` never comes with a half-written result.
#[derive(Error, Debug)]
pub enum PzipError {
    /// Thread count of zero
    #[error("thread count must be at least 1")]
    ZeroThreads,

    /// Output run buffer cannot hold the worst case for the processed input
    #[error("output buffer holds {capacity} runs but up to {required} may be emitted")]
    OutputTooSmall {
        /// Length of the caller's run buffer
        capacity: usize,
        /// Number of bytes the partition assigns to workers
        required: usize,
    },

    /// Input byte outside `a..=z`
    #[error("invalid byte 0x{byte:02x} at offset {index}: expected a lowercase letter")]
    InvalidByte {
        /// Absolute offset into the input
        index: usize,
        /// The offending byte
        byte: u8,
    },

    /// The OS refused to start a worker thread
    #[error("failed to spawn worker {id}: {source}")]
    Spawn {
        /// Worker id
        id: usize,
        #[source]
        source: io::Error,
    },

    /// A worker thread panicked
    #[error("worker {id} panicked")]
    WorkerPanicked {
        /// Worker id
        id: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_too_small_message() {
        let err = PzipError::OutputTooSmall { capacity: 3, required: 8 };
        let msg = err.to_string();
        assert!(msg.contains("holds 3 runs"));
        assert!(msg.contains("up to 8"));
    }

    #[test]
    fn test_invalid_byte_message() {
        let err = PzipError::InvalidByte { index: 7, byte: b'Z' };
        assert_eq!(
            err.to_string(),
            "invalid byte 0x5a at offset 7: expected a lowercase letter"
        );
    }

    #[test]
    fn test_spawn_keeps_source() {
        use std::error::Error as _;
        let err = PzipError::Spawn {
            id: 2,
            source: io::Error::new(io::ErrorKind::WouldBlock, "thread limit"),
        };
        assert!(err.to_string().starts_with("failed to spawn worker 2"));
        assert!(err.source().is_some());
    }
}
