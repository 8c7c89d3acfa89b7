pub mod barrier;
pub mod context;
pub mod core;
pub mod encode;
pub mod error;
pub mod output;
pub mod partition;
pub mod run;


pub use self::core::{Zipped, ZipOptions, default_threads, pzip, pzip_with, zip_to_vec};
pub use self::encode::encode_slice;
pub use self::error::{PzipError, Result};
pub use self::partition::{Partition, RemainderPolicy};
pub use self::run::{ALPHABET_LEN, FrequencyTable, Run};
