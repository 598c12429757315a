//! Synthetic workload generation.
//!
//! Generates Bernoulli arrival streams: on every tick a job arrives with
//! probability `p_arrival`. Each job is short with probability `p_short`
//! and long otherwise; cores and memory are drawn uniformly.
//!
//! Generation is seeded, so a seed always reproduces the same workload.

use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::{JobSpec, Ticks};

/// Parameters of a Bernoulli workload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkloadParams {
    /// Number of ticks over which jobs may arrive.
    pub ticks: Ticks,
    /// Per-tick arrival probability.
    pub p_arrival: f64,
    /// Probability that an arriving job is short.
    pub p_short: f64,
    /// Duration of short jobs.
    pub short_duration: Ticks,
    /// Duration of long jobs.
    pub long_duration: Ticks,
    /// Inclusive range of cores per job.
    pub cores: (u32, u32),
    /// Inclusive range of memory per job (GB).
    pub memory_gb: (u32, u32),
}

impl Default for WorkloadParams {
    fn default() -> Self {
        Self {
            ticks: 100,
            p_arrival: 0.3,
            p_short: 0.3,
            short_duration: 2,
            long_duration: 6,
            cores: (1, 16),
            memory_gb: (1, 32),
        }
    }
}

/// Generates job specs for the given parameters.
///
/// Invalid probabilities are clamped to `0.0..=1.0`, and reversed ranges
/// are swapped.
pub fn bernoulli_jobs(params: &WorkloadParams, seed: u64) -> Vec<JobSpec> {
    let mut rng = StdRng::seed_from_u64(seed);
    let p_arrival = params.p_arrival.clamp(0.0, 1.0);
    let p_short = params.p_short.clamp(0.0, 1.0);
    let (cores_lo, cores_hi) = ordered(params.cores);
    let (mem_lo, mem_hi) = ordered(params.memory_gb);

    let mut jobs = Vec::new();
    for t in 0..params.ticks {
        if rng.random::<f64>() >= p_arrival {
            continue;
        }
        let duration = if rng.random::<f64>() < p_short {
            params.short_duration
        } else {
            params.long_duration
        };
        jobs.push(JobSpec::new(
            to_i64(t),
            i64::from(rng.random_range(cores_lo..=cores_hi)),
            i64::from(rng.random_range(mem_lo..=mem_hi)),
            to_i64(duration),
        ));
    }
    jobs
}

fn ordered((a, b): (u32, u32)) -> (u32, u32) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

fn to_i64(value: Ticks) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
