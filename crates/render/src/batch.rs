//! Parallel rendering of many posts.

use crate::pipeline::{Pipeline, RenderedPost};
use rayon::prelude::*;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;

/// A single post to render.
#[derive(Debug, Clone)]
pub struct BatchInput {
    /// Caller-chosen identifier (post id or path).
    pub id: String,
    /// Markdown source.
    pub source: String,
}

/// Outcome for one input.
#[derive(Debug, Clone)]
pub struct BatchResult {
    /// Identifier matching the input.
    pub id: String,
    /// Rendered post (present on success).
    pub result: Option<RenderedPost>,
    /// Error message (present on failure).
    pub error: Option<String>,
}

/// Counters for a batch run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchStats {
    /// Number of inputs.
    pub total: u32,
    /// Inputs rendered successfully.
    pub succeeded: u32,
    /// Inputs that failed.
    pub failed: u32,
    /// Wall-clock time in milliseconds.
    pub processing_time_ms: f64,
}

/// Options for batch rendering.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Thread count; defaults to rayon's global pool.
    pub max_threads: Option<usize>,
    /// Keep going after a failure. When false, inputs are rendered one by
    /// one and processing stops after the first error.
    pub continue_on_error: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            max_threads: None,
            continue_on_error: true,
        }
    }
}

/// Results and statistics of a batch run.
#[derive(Debug, Clone)]
pub struct BatchOutput {
    /// One result per processed input, in input order.
    pub results: Vec<BatchResult>,
    /// Counters.
    pub stats: BatchStats,
}

impl Pipeline {
    /// Renders many posts, in parallel unless `continue_on_error` is false.
    pub fn render_batch(&self, inputs: Vec<BatchInput>, options: &BatchOptions) -> BatchOutput {
        let start = Instant::now();
        let total = inputs.len() as u32;
        let succeeded = AtomicU32::new(0);
        let failed = AtomicU32::new(0);

        let process_input = |input: BatchInput| -> BatchResult {
            match self.render(&input.source) {
                Ok(post) => {
                    succeeded.fetch_add(1, Ordering::Relaxed);
                    BatchResult {
                        id: input.id,
                        result: Some(post),
                        error: None,
                    }
                }
                Err(err) => {
                    failed.fetch_add(1, Ordering::Relaxed);
                    log::debug!("render of {} failed: {}", input.id, err);
                    BatchResult {
                        id: input.id,
                        result: None,
                        error: Some(err.to_string()),
                    }
                }
            }
        };

        let results: Vec<BatchResult> = if options.continue_on_error {
            let pool = options.max_threads.and_then(|threads| {
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|err| log::warn!("falling back to the global thread pool: {}", err))
                    .ok()
            });
            match pool {
                Some(pool) => pool.install(|| inputs.into_par_iter().map(process_input).collect()),
                None => inputs.into_par_iter().map(process_input).collect(),
            }
        } else {
            let mut results = Vec::with_capacity(inputs.len());
            for input in inputs {
                let result = process_input(input);
                let stop = result.error.is_some();
                results.push(result);
                if stop {
                    break;
                }
            }
            results
        };

        BatchOutput {
            results,
            stats: BatchStats {
                total,
                succeeded: succeeded.load(Ordering::Relaxed),
                failed: failed.load(Ordering::Relaxed),
                processing_time_ms: start.elapsed().as_secs_f64() * 1000.0,
            },
        }
    }
}
