//! Concurrent exhaustive search for irreducible polynomials over GF(p).
//!
//! The candidate space of a given length is the set of all `p^length`
//! coefficient vectors. Index `i` in `[0, p^length)` is decoded into base-`p`
//! digits, which become the candidate's coefficients. The index range is
//! split into contiguous chunks, one per worker thread; every hit is sent
//! through a bounded channel to the consuming [`IrreducibleStream`].
//!
//! Delivery order is unspecified. The set of scanned indices does not depend
//! on the worker count.

use std::num::NonZeroUsize;
use std::ops::Range;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use num_bigint::BigUint;
use num_traits::ToPrimitive;
use tracing::{debug, trace, warn};

use crate::algebra::field::FiniteField;
use crate::error::GeneratorError;
use crate::structures::poly::Polynomial;
use crate::structures::prime::PrimeField;

/// Default capacity of the result channel.
pub const DEFAULT_QUEUE_CAPACITY: usize = 100;

/// Tuning knobs for [`generate_irreducible`].
///
/// ```
/// use polygf::GeneratorConfig;
///
/// let config = GeneratorConfig::default()
///     .with_workers(4)
///     .with_limit(14)
///     .with_queue_capacity(8);
/// assert_eq!((config.workers, config.limit, config.queue_capacity), (4, Some(14), 8));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Worker threads; 0 means one per available hardware thread.
    pub workers: usize,
    /// Maximum number of polynomials to emit; `None` for no cap.
    pub limit: Option<usize>,
    /// Capacity of the bounded result channel.
    pub queue_capacity: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            workers: 0,
            limit: None,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

impl GeneratorConfig {
    /// Set the worker count; 0 picks one per hardware thread.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Cap the number of emitted polynomials.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the capacity of the result channel.
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    /// Worker count after resolving 0 to the available parallelism.
    fn resolved_workers(&self) -> usize {
        if self.workers > 0 {
            return self.workers;
        }
        thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1)
    }
}

/// Number of candidates `prime^length`.
///
/// # Errors
///
/// `GeneratorError::UndefinedCombinations` for `0^0`,
/// `GeneratorError::TooLarge` if the count does not fit in a `u64`.
pub fn combination_count(prime: u64, length: usize) -> Result<u64, GeneratorError> {
    if prime == 0 && length == 0 {
        return Err(GeneratorError::UndefinedCombinations);
    }
    if prime < 2 {
        return Ok(if length == 0 { 1 } else { prime });
    }
    // 2^64 already overflows
    if length >= u64::BITS as usize {
        return Err(GeneratorError::TooLarge { prime, length });
    }

    BigUint::from(prime)
        .pow(length as u32)
        .to_u64()
        .ok_or(GeneratorError::TooLarge { prime, length })
}

/// [`combination_count`] for signed inputs.
///
/// # Errors
///
/// `GeneratorError::Negative` if either input is negative, otherwise as
/// [`combination_count`].
pub fn combination_count_signed(prime: i64, length: i64) -> Result<u64, GeneratorError> {
    if prime < 0 || length < 0 {
        return Err(GeneratorError::Negative { prime, length });
    }
    let length = usize::try_from(length).map_err(|_| GeneratorError::TooLarge {
        prime: prime as u64,
        length: usize::MAX,
    })?;
    combination_count(prime as u64, length)
}

/// Split `[0, total)` into `workers` contiguous chunks.
///
/// Chunk sizes differ by at most one; the first `total % workers` chunks get
/// the extra unit. Returns no chunks when `workers` is 0.
///
/// ```
/// use polygf::generator::partition;
///
/// assert_eq!(partition(10, 3), vec![0..4, 4..7, 7..10]);
/// ```
pub fn partition(total: u64, workers: usize) -> Vec<Range<u64>> {
    if workers == 0 {
        return Vec::new();
    }

    let w = workers as u64;
    let chunk = total / w;
    let extra = total % w;

    let mut start = 0u64;
    (0..w)
        .map(|i| {
            let size = chunk + u64::from(i < extra);
            let range = start..start + size;
            start += size;
            range
        })
        .collect()
}

/// Decode index `n` into `length` base-`prime` digits, most significant first.
///
/// # Errors
///
/// `GeneratorError::InvalidCombination` if `prime` or `length` is zero.
///
/// ```
/// use polygf::generator::nth_combination;
///
/// // 11 = 1*9 + 0*3 + 2
/// assert_eq!(nth_combination(11, 3, 3).unwrap(), vec![1, 0, 2]);
/// ```
pub fn nth_combination(n: u64, prime: u64, length: usize) -> Result<Vec<i64>, GeneratorError> {
    if prime == 0 || length == 0 {
        return Err(GeneratorError::InvalidCombination { prime, length });
    }

    let mut digits = vec![0i64; length];
    let mut current = n;
    for digit in digits.iter_mut().rev() {
        *digit = (current % prime) as i64;
        current /= prime;
    }
    Ok(digits)
}

/// State shared by every worker of one search.
struct Search {
    field: PrimeField,
    length: usize,
    /// Emissions left under the cap; `None` when uncapped.
    remaining: Option<AtomicI64>,
    cancelled: Arc<AtomicBool>,
}

impl Search {
    fn stopped(&self) -> bool {
        if self.cancelled.load(Ordering::Acquire) {
            return true;
        }
        self.remaining
            .as_ref()
            .is_some_and(|r| r.load(Ordering::Acquire) <= 0)
    }

    /// Decode index `i` and keep it if it is a candidate worth testing.
    fn candidate(&self, i: u64) -> Option<Polynomial> {
        let comb = match nth_combination(i, self.field.prime() as u64, self.length) {
            Ok(c) => c,
            Err(err) => {
                warn!(index = i, error = %err, "skipping undecodable candidate");
                return None;
            }
        };

        // monic, and no root at zero
        if comb[0] == 0 || comb[self.length - 1] != 1 {
            return None;
        }
        Some(Polynomial::new(comb))
    }

    /// Scan one chunk. Returns the number of polynomials sent.
    fn run(&self, range: Range<u64>, tx: &SyncSender<Polynomial>) -> usize {
        let mut sent = 0;
        for i in range {
            if self.stopped() {
                break;
            }

            let poly = match self.candidate(i) {
                Some(p) => p,
                None => continue,
            };
            if !self.field.is_irreducible(&poly) {
                continue;
            }

            if let Some(remaining) = &self.remaining {
                if remaining.fetch_sub(1, Ordering::AcqRel) - 1 < 0 {
                    break;
                }
            }

            trace!(poly = %poly, "found irreducible");
            if tx.send(poly).is_err() {
                // receiver gone
                break;
            }
            sent += 1;
        }
        sent
    }
}

/// Lazily consumed results of [`generate_irreducible`].
///
/// Dropping the stream cancels the search.
#[derive(Debug)]
pub struct IrreducibleStream {
    rx: Receiver<Polynomial>,
    cancelled: Arc<AtomicBool>,
    supervisor: Option<JoinHandle<()>>,
}

impl IrreducibleStream {
    fn from_values(values: Vec<Polynomial>) -> Self {
        let (tx, rx) = mpsc::sync_channel(values.len());
        for v in values {
            // capacity covers every value
            let _ = tx.send(v);
        }
        Self {
            rx,
            cancelled: Arc::new(AtomicBool::new(false)),
            supervisor: None,
        }
    }

    /// Ask all workers to stop after their current candidate.
    ///
    /// Results already queued can still be read.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Whether [`cancel`](Self::cancel) was called or the stream dropped.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Whether every worker has exited.
    pub fn is_finished(&self) -> bool {
        self.supervisor.as_ref().map_or(true, JoinHandle::is_finished)
    }
}

impl Iterator for IrreducibleStream {
    type Item = Polynomial;

    fn next(&mut self) -> Option<Polynomial> {
        self.rx.recv().ok()
    }
}

impl Drop for IrreducibleStream {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Search for irreducible polynomials with `length` coefficients over `field`.
///
/// Every candidate whose highest stored coefficient is 1 and whose constant
/// term is nonzero is tested.
/// Errors are reported before any thread starts.
///
/// # Example
///
/// ```
/// use polygf::generator::{generate_irreducible, GeneratorConfig};
/// use polygf::PrimeField;
///
/// let gf3 = PrimeField::new(3, false).unwrap();
/// let found: Vec<_> = generate_irreducible(&gf3, 5, GeneratorConfig::default())
///     .unwrap()
///     .collect();
///
/// // monic irreducible quartics over GF(3)
/// assert_eq!(found.len(), 18);
/// ```
pub fn generate_irreducible(
    field: &PrimeField,
    length: usize,
    config: GeneratorConfig,
) -> Result<IrreducibleStream, GeneratorError> {
    let prime = field.prime() as u64;
    let total = combination_count(prime, length)?;
    if total == 0 {
        return Ok(IrreducibleStream::from_values(Vec::new()));
    }
    if length == 0 {
        return Ok(IrreducibleStream::from_values(vec![Polynomial::zero()]));
    }

    let workers = usize::try_from(total)
        .map_or(config.resolved_workers(), |t| config.resolved_workers().min(t));
    debug!(
        prime,
        length,
        total,
        workers,
        limit = ?config.limit,
        "starting irreducible search"
    );

    let cancelled = Arc::new(AtomicBool::new(false));
    let search = Arc::new(Search {
        field: *field,
        length,
        remaining: config
            .limit
            .map(|n| AtomicI64::new(i64::try_from(n).unwrap_or(i64::MAX))),
        cancelled: Arc::clone(&cancelled),
    });

    let (tx, rx) = mpsc::sync_channel(config.queue_capacity);
    let mut handles = Vec::with_capacity(workers);
    for (w, range) in partition(total, workers).into_iter().enumerate() {
        let search = Arc::clone(&search);
        let tx = tx.clone();
        let spawned = thread::Builder::new()
            .name(format!("irreducible-worker-{w}"))
            .spawn(move || {
                debug!(worker = w, start = range.start, end = range.end, "worker started");
                let sent = search.run(range, &tx);
                debug!(worker = w, sent, "worker finished");
            });

        match spawned {
            Ok(handle) => handles.push(handle),
            Err(err) => {
                cancelled.store(true, Ordering::Release);
                return Err(GeneratorError::WorkerSpawn(err));
            }
        }
    }
    drop(tx);

    let supervisor = thread::Builder::new()
        .name("irreducible-supervisor".into())
        .spawn(move || {
            let mut panicked = 0usize;
            for handle in handles {
                if handle.join().is_err() {
                    panicked += 1;
                }
            }
            if panicked > 0 {
                warn!(panicked, "irreducible workers panicked");
            }
            debug!("irreducible search finished");
        });

    let supervisor = match supervisor {
        Ok(handle) => handle,
        Err(err) => {
            cancelled.store(true, Ordering::Release);
            return Err(GeneratorError::WorkerSpawn(err));
        }
    };

    Ok(IrreducibleStream {
        rx,
        cancelled,
        supervisor: Some(supervisor),
    })
}
