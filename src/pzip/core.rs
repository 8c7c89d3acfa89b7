use std::ops::Range;
use std::thread;

use log::{debug, error, trace, warn};

use super::barrier::PhaseBarrier;
use super::context::ZipContext;
use super::encode::{LocalFrequency, encode_slice};
use super::error::{PzipError, Result};
use super::partition::{Partition, RemainderPolicy};
use super::run::{ALPHABET_LEN, FrequencyTable, Run};

/// Configuration for a pzip call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZipOptions {
    /// Number of worker threads; must be at least 1.
    pub threads: usize,
    pub remainder: RemainderPolicy,
}

impl Default for ZipOptions {
    fn default() -> Self {
        Self {
            threads: default_threads(),
            remainder: RemainderPolicy::Truncate,
        }
    }
}

impl ZipOptions {
    pub fn with_threads(threads: usize) -> Self {
        Self {
            threads,
            remainder: RemainderPolicy::Truncate,
        }
    }
}

/// One thread per available core, or 4 if that can't be determined.
pub fn default_threads() -> usize {
    thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

/// Owned result of [`zip_to_vec`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zipped {
    pub runs: Vec<Run>,
    pub frequency: FrequencyTable,
}

impl Zipped {
    /// Number of input bytes the runs account for.
    pub fn processed_len(&self) -> usize {
        self.runs.iter().map(|r| r.length).sum()
    }
}

/// Immutable inputs of one worker.
#[derive(Debug, Clone)]
struct WorkerTask {
    id: usize,
    span: Range<usize>,
}

/// How a worker left, when it didn't fail itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WorkerExit {
    Merged,
    /// Another party aborted the barrier; nothing shared was touched.
    Aborted,
}

/// Aborts the barrier if the worker unwinds, so its peers don't wait forever.
pub(super) struct AbortOnUnwind<'b>(pub(super) &'b PhaseBarrier);

impl Drop for AbortOnUnwind<'_> {
    fn drop(&mut self) {
        if thread::panicking() {
            self.0.abort();
        }
    }
}

/// Run-length encode `input` on `threads` workers into caller-owned storage.
///
/// See [`pzip_with`]; this uses the default [`RemainderPolicy::Truncate`].
pub fn pzip(
    threads: usize,
    input: &[u8],
    runs: &mut [Run],
    run_count: &mut usize,
    frequency: &mut FrequencyTable,
) -> Result<()> {
    pzip_with(&ZipOptions::with_threads(threads), input, runs, run_count, frequency)
}

/// Run-length encode `input` in parallel.
///
/// The input is cut into `options.threads` contiguous slices. Each worker
/// encodes its slice into a private buffer, publishes its run count and waits
/// at a barrier; after it, every worker adds into the shared run count and
/// letter frequencies (each under its own lock) and copies its runs to the
/// offset given by the prefix sum of lower workers' counts. Runs are never
/// merged across slice boundaries.
///
/// `runs` must hold at least one slot per processed byte. On success
/// `runs[..*run_count]` holds the runs in input order and `frequency` the
/// per-letter totals (overwritten, not added to). On error `run_count` and
/// `frequency` are left as they were.
///
/// Per-call tables are sized by `options.threads`; a thread count too large
/// to allocate for panics with a capacity overflow rather than returning an error.
pub fn pzip_with(
    options: &ZipOptions,
    input: &[u8],
    runs: &mut [Run],
    run_count: &mut usize,
    frequency: &mut FrequencyTable,
) -> Result<()> {
    if options.threads == 0 {
        return Err(PzipError::ZeroThreads);
    }

    let partition = Partition::new(input.len(), options.threads, options.remainder);
    let required = partition.processed_len();
    if runs.len() < required {
        return Err(PzipError::OutputTooSmall {
            capacity: runs.len(),
            required,
        });
    }

    debug!(
        "pzip: {} bytes on {} threads, block size {}",
        input.len(),
        partition.threads(),
        partition.block_size()
    );
    if partition.dropped_len() > 0 {
        debug!(
            "pzip: {} trailing bytes not assigned to any worker",
            partition.dropped_len()
        );
    }

    let ctx = ZipContext::new(partition.threads(), runs);
    let mut failure: Option<PzipError> = None;

    thread::scope(|s| {
        let mut handles = Vec::with_capacity(partition.threads());

        for (id, span) in partition.spans().enumerate() {
            let task = WorkerTask { id, span };
            let ctx = &ctx;
            let spawned = thread::Builder::new()
                .name(format!("pzip-{id}"))
                .spawn_scoped(s, move || run_worker(ctx, task, input));
            match spawned {
                Ok(handle) => handles.push(handle),
                Err(source) => {
                    error!("pzip: failed to spawn worker {id}: {source}");
                    // Workers already parked at the barrier would never see
                    // the missing party.
                    ctx.barrier().abort();
                    failure = Some(PzipError::Spawn { id, source });
                    break;
                }
            }
        }
        trace!("pzip: {} workers spawned", handles.len());

        for (id, handle) in handles.into_iter().enumerate() {
            match handle.join() {
                Ok(Ok(WorkerExit::Merged)) => {}
                Ok(Ok(WorkerExit::Aborted)) => {
                    trace!("pzip: worker {id} released by aborted barrier");
                }
                Ok(Err(e)) => {
                    failure.get_or_insert(e);
                }
                Err(_) => {
                    error!("pzip: worker {id} panicked");
                    failure.get_or_insert(PzipError::WorkerPanicked { id });
                }
            }
        }
    });
    trace!("pzip: all workers joined");

    let (total, table) = ctx.into_totals();
    if let Some(e) = failure {
        return Err(e);
    }

    debug_assert!(total <= required);
    debug_assert_eq!(table.iter().sum::<usize>(), required);
    *run_count = total;
    *frequency = table;
    debug!("pzip: {total} runs from {required} bytes");
    Ok(())
}

/// Encode into freshly allocated storage, sized for the worst case and
/// trimmed to the runs actually emitted.
pub fn zip_to_vec(options: &ZipOptions, input: &[u8]) -> Result<Zipped> {
    let mut runs = vec![Run::default(); input.len()];
    let mut run_count = 0;
    let mut frequency = [0; ALPHABET_LEN];
    pzip_with(options, input, &mut runs, &mut run_count, &mut frequency)?;
    runs.truncate(run_count);
    Ok(Zipped { runs, frequency })
}

fn run_worker(ctx: &ZipContext<'_>, task: WorkerTask, input: &[u8]) -> Result<WorkerExit> {
    let _guard = AbortOnUnwind(ctx.barrier());
    let WorkerTask { id, span } = task;
    trace!("pzip worker {id}: encoding {}..{}", span.start, span.end);

    let mut local = Vec::with_capacity(span.len());
    encode_slice(&input[span.clone()], &mut local);

    let local_freq = match LocalFrequency::from_runs(&local, span.start) {
        Ok(f) => f,
        Err(e) => {
            warn!("pzip worker {id}: {e}");
            ctx.barrier().abort();
            return Err(e);
        }
    };

    ctx.publish_local_count(id, local.len());

    if ctx.barrier().wait().is_err() {
        return Ok(WorkerExit::Aborted);
    }
    trace!("pzip worker {id}: merging {} runs", local.len());

    ctx.add_run_count(local.len());
    ctx.merge_frequency(&local_freq);

    let offset = ctx.write_offset(id);
    // SAFETY: offset is this worker's prefix sum and `local.len()` is the
    // count it published; the windows of all workers tile [0, total).
    unsafe { ctx.write_runs(offset, &local) };

    Ok(WorkerExit::Merged)
}
