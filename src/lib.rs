/// Use mimalloc as the global allocator.
/// Every worker allocates a worst-case scratch run buffer per call, and
/// mimalloc's thread-local caching keeps those allocations off a shared heap lock.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

pub mod pzip;

pub use pzip::{
    FrequencyTable, PzipError, RemainderPolicy, Run, ZipOptions, Zipped, pzip, pzip_with,
    zip_to_vec,
};
