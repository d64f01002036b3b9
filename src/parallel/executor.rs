use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::OnceLock;

use rayon::prelude::*;

use crate::foundation::error::{DrawingError, DrawingResult};

/// Environment variable consulted by [`ExecutorOpts::from_env`].
pub const THREADS_ENV: &str = "DRAWING_THREADS";

/// Worker configuration for an [`Executor`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ExecutorOpts {
    /// Dedicated worker count. `None` uses the global rayon pool (hardware parallelism).
    pub threads: Option<usize>,
}

impl ExecutorOpts {
    /// Return options with an explicit worker count.
    pub fn with_threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;
        self
    }

    /// Read [`THREADS_ENV`]. Missing, unparsable or zero values fall back to the default.
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(THREADS_ENV).ok().as_deref())
    }

    pub(crate) fn from_env_value(value: Option<&str>) -> Self {
        let Some(raw) = value else {
            return Self::default();
        };
        match raw.trim().parse::<usize>() {
            Ok(n) if n > 0 => Self { threads: Some(n) },
            _ => {
                tracing::warn!(value = raw, "ignoring invalid {THREADS_ENV}");
                Self::default()
            }
        }
    }
}

/// Fork-join executor for index-disjoint per-row and per-pixel work.
///
/// Every call blocks until all partitions are done. If a partition panics, rayon lets the sibling
/// partitions of each join finish before unwinding; the panic is then caught here and reported as
/// [`DrawingError::Partition`]. Buffers touched by a failed call hold unspecified contents.
pub struct Executor {
    pool: Option<rayon::ThreadPool>,
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor")
            .field("threads", &self.threads())
            .field("dedicated", &self.pool.is_some())
            .finish()
    }
}

impl Executor {
    /// Build an executor; `threads: Some(n)` creates a dedicated pool of `n` workers.
    pub fn new(opts: ExecutorOpts) -> DrawingResult<Self> {
        let pool = match opts.threads {
            None => None,
            Some(n) => Some(build_thread_pool(n)?),
        };
        Ok(Self { pool })
    }

    /// Executor backed by the global rayon pool.
    pub fn global() -> Self {
        Self { pool: None }
    }

    /// Number of workers partitions are spread across.
    pub fn threads(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }

    /// Run `f(i)` for every `i` in `[0, n)`, in unspecified order.
    pub fn for_each_index<F>(&self, n: usize, f: F) -> DrawingResult<()>
    where
        F: Fn(usize) + Sync + Send,
    {
        self.run(|| (0..n).into_par_iter().for_each(|i| f(i)))
    }

    /// Run `f(y, row)` over each `width`-long row of `data`.
    pub fn for_each_row<T, F>(&self, data: &mut [T], width: usize, f: F) -> DrawingResult<()>
    where
        T: Send,
        F: Fn(usize, &mut [T]) + Sync + Send,
    {
        if width == 0 {
            return Err(DrawingError::validation("row width must be > 0"));
        }
        self.run(|| {
            data.par_chunks_mut(width)
                .enumerate()
                .for_each(|(y, row)| f(y, row))
        })
    }

    /// Run `f(i, pixel)` over the flat element range of `data`.
    pub fn for_each_pixel<T, F>(&self, data: &mut [T], f: F) -> DrawingResult<()>
    where
        T: Send,
        F: Fn(usize, &mut T) + Sync + Send,
    {
        self.run(|| {
            data.par_iter_mut()
                .enumerate()
                .for_each(|(i, px)| f(i, px))
        })
    }

    /// Run `f(top, top_row, bottom_row, scratch)` for each mirrored pair of rows
    /// (`top` and `height - 1 - top`). The middle row of an odd height is not visited.
    /// `scratch` is a per-worker buffer reused across the pairs a worker handles.
    pub fn for_each_row_pair<T, F>(&self, data: &mut [T], width: usize, f: F) -> DrawingResult<()>
    where
        T: Send,
        F: Fn(usize, &mut [T], &mut [T], &mut Vec<T>) + Sync + Send,
    {
        if width == 0 {
            return Err(DrawingError::validation("row width must be > 0"));
        }
        if data.len() % width != 0 {
            return Err(DrawingError::invalid_buffer(
                "row pair iteration expects a whole number of rows",
            ));
        }
        let height = data.len() / width;
        let half = height / 2;
        let (upper, rest) = data.split_at_mut(half * width);
        let lower = &mut rest[(height % 2) * width..];

        self.run(|| {
            upper
                .par_chunks_mut(width)
                .zip(lower.par_chunks_mut(width).rev())
                .enumerate()
                .for_each_init(
                    || Vec::with_capacity(width),
                    |scratch, (top, (a, b))| f(top, a, b, scratch),
                )
        })
    }

    fn run<R, OP>(&self, op: OP) -> DrawingResult<R>
    where
        R: Send,
        OP: FnOnce() -> R + Send,
    {
        let out = catch_unwind(AssertUnwindSafe(|| match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }));
        out.map_err(|payload| DrawingError::partition(panic_message(payload.as_ref())))
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::global()
    }
}

/// Process-wide executor used by [`crate::Image`] and the compositing operations.
///
/// Built once from [`ExecutorOpts::from_env`]; a pool that fails to build falls back to the global
/// rayon pool.
pub fn default_executor() -> &'static Executor {
    static DEFAULT: OnceLock<Executor> = OnceLock::new();
    DEFAULT.get_or_init(|| {
        Executor::new(ExecutorOpts::from_env()).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to the global rayon pool");
            Executor::global()
        })
    })
}

fn build_thread_pool(threads: usize) -> DrawingResult<rayon::ThreadPool> {
    if threads == 0 {
        return Err(DrawingError::validation(
            "executor 'threads' must be >= 1 when set",
        ));
    }
    tracing::debug!(threads, "building dedicated pixel worker pool");
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("drawing-worker-{i}"))
        .build()
        .map_err(|e| DrawingError::validation(format!("failed to build rayon thread pool: {e}")))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/parallel/executor.rs"]
mod tests;
