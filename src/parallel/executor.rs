//! Batch executor for compiled expressions
//!
//! Uses Rayon for work-stealing parallelism with configurable limits.

use crate::error::{Error, EvalResult, Result};
use crate::parser::Expression;
use crate::runtime::{Environment, Value};
use rayon::prelude::*;

/// Configuration for batch evaluation
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Maximum number of worker threads (default: num_cpus)
    pub max_parallelism: usize,
    /// Batches smaller than this run on the calling thread (default: 2)
    pub sequential_threshold: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_parallelism: num_cpus::get(),
            sequential_threshold: 2,
        }
    }
}

/// Evaluates `expr` once per environment
///
/// Each environment is used by exactly one task, so operations may mutate
/// their own row freely. Results come back in input order, one per
/// environment, each carrying its own success or failure.
///
/// # Example
/// ```
/// use lispex::{compile, parallel::{evaluate_batch, BatchConfig}, Environment, Value};
///
/// let expr = compile("x").unwrap();
/// let mut rows: Vec<Environment> = (0..4).map(|i| Environment::from_iter([("x", i)])).collect();
///
/// let results = evaluate_batch(&expr, &mut rows, &BatchConfig::default()).unwrap();
/// assert_eq!(results[3], Ok(Value::Number(3.0)));
/// ```
pub fn evaluate_batch(
    expr: &Expression,
    envs: &mut [Environment],
    config: &BatchConfig,
) -> Result<Vec<EvalResult<Value>>> {
    if envs.len() < config.sequential_threshold.max(1) {
        return Ok(envs.iter_mut().map(|env| expr.eval(env)).collect());
    }

    let pool = build_pool(config, envs.len())?;
    tracing::debug!(
        rows = envs.len(),
        threads = pool.current_num_threads(),
        "evaluating batch"
    );

    Ok(pool.install(|| envs.par_iter_mut().map(|env| expr.eval(env)).collect()))
}

/// Like [`evaluate_batch`], but stops at the first failing environment
pub fn try_evaluate_batch(
    expr: &Expression,
    envs: &mut [Environment],
    config: &BatchConfig,
) -> Result<Vec<Value>> {
    if envs.len() < config.sequential_threshold.max(1) {
        return envs
            .iter_mut()
            .map(|env| expr.eval(env).map_err(Error::from))
            .collect();
    }

    let pool = build_pool(config, envs.len())?;
    tracing::debug!(
        rows = envs.len(),
        threads = pool.current_num_threads(),
        "evaluating batch, fail fast"
    );

    pool.install(|| {
        envs.par_iter_mut()
            .map(|env| expr.eval(env).map_err(Error::from))
            .collect::<Result<Vec<Value>>>()
    })
}

fn build_pool(config: &BatchConfig, rows: usize) -> Result<rayon::ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(config.max_parallelism.clamp(1, rows))
        .build()
        .map_err(|e| Error::ThreadPool(e.to_string()))
}
