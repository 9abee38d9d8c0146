//! Parallelism configuration shared by predictors and sessions.

use std::num::NonZeroUsize;
use std::sync::Arc;

use crate::config::ConfigError;

// =============================================================================
// Parallelism
// =============================================================================

/// Whether parallel execution is allowed.
///
/// When `Parallel`, predictors may fan trees or rows out over rayon. When
/// `Sequential`, everything runs on the calling thread.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Parallelism {
    Sequential,
    Parallel,
}

impl Parallelism {
    /// Create from thread count semantics.
    ///
    /// - 0 = auto (parallel if rayon pool has multiple threads, sequential otherwise)
    /// - 1 = sequential
    /// - >1 = parallel
    #[inline]
    pub fn from_threads(n_threads: usize) -> Self {
        if n_threads == 1 || (n_threads == 0 && rayon::current_num_threads() == 1) {
            Parallelism::Sequential
        } else {
            Parallelism::Parallel
        }
    }

    /// Returns `true` if parallel execution is allowed.
    #[inline]
    pub fn is_parallel(self) -> bool {
        matches!(self, Parallelism::Parallel)
    }
}

// =============================================================================
// Execution
// =============================================================================

/// Where prediction work runs: the calling thread, rayon's global pool, or a
/// dedicated pool.
///
/// Cheap to clone; a dedicated pool is shared behind an `Arc`.
#[derive(Clone, Debug)]
pub struct Execution {
    parallelism: Parallelism,
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl Execution {
    /// Run everything on the calling thread.
    pub fn sequential() -> Self {
        Self {
            parallelism: Parallelism::Sequential,
            pool: None,
        }
    }

    /// Resolve a configured thread count.
    ///
    /// `None` uses the global rayon pool, `1` is sequential, and larger counts
    /// build a dedicated pool of that size.
    pub fn from_threads(n_threads: Option<NonZeroUsize>) -> Result<Self, ConfigError> {
        let requested = n_threads.map_or(0, NonZeroUsize::get);
        let parallelism = Parallelism::from_threads(requested);

        let pool = match (parallelism, requested) {
            (Parallelism::Parallel, n) if n > 1 => Some(Arc::new(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .thread_name(|i| format!("forest-vote-{i}"))
                    .build()?,
            )),
            _ => None,
        };

        Ok(Self { parallelism, pool })
    }

    #[inline]
    pub fn parallelism(&self) -> Parallelism {
        self.parallelism
    }

    /// Number of worker threads available to parallel work.
    pub fn n_threads(&self) -> usize {
        match (&self.pool, self.parallelism) {
            (_, Parallelism::Sequential) => 1,
            (Some(pool), _) => pool.current_num_threads(),
            (None, _) => rayon::current_num_threads(),
        }
    }

    /// Run `f` inside the dedicated pool if there is one.
    pub fn install<T: Send>(&self, f: impl FnOnce() -> T + Send) -> T {
        match &self.pool {
            Some(pool) => pool.install(f),
            None => f(),
        }
    }
}

impl Default for Execution {
    fn default() -> Self {
        Self {
            parallelism: Parallelism::from_threads(0),
            pool: None,
        }
    }
}
