//! Error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::{JobId, NodeId, Ticks};

/// Errors raised by the simulation engine.
#[derive(Debug, Error)]
pub enum SimError {
    #[error(
        "job {job_id} needs {cores} cores / {memory_gb} GB but the largest node offers \
         {max_cores} cores / {max_memory_gb} GB"
    )]
    UnsatisfiableJob {
        job_id: JobId,
        cores: u32,
        memory_gb: u32,
        max_cores: u32,
        max_memory_gb: u32,
    },

    #[error("node pool is empty but {pending} jobs are pending")]
    EmptyNodePool { pending: usize },

    #[error("placement policy {policy} chose node index {index} which cannot accommodate job {job_id}")]
    InfeasiblePlacement {
        policy: &'static str,
        job_id: JobId,
        index: usize,
    },

    #[error("step budget of {max_steps} exhausted at time {clock} with {pending} jobs pending")]
    StepBudgetExhausted {
        max_steps: u64,
        clock: Ticks,
        pending: usize,
    },

    #[error("simulated time limit {limit} exceeded with {pending} jobs pending")]
    TimeLimitExceeded { limit: Ticks, pending: usize },
}

/// Errors raised while loading a run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Errors raised while reading scripted input.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("expected {expected}, got end of input")]
    MissingValue { expected: String },

    #[error("expected an integer for {expected}, got {token:?}")]
    NotAnInteger { expected: String, token: String },

    #[error("job count must not be negative, got {0}")]
    NegativeJobCount(i64),
}

/// Errors raised while writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write report {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write report row for node {node_id}: {source}")]
    Row {
        node_id: NodeId,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}
