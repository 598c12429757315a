//! Job model.
//!
//! A job is a unit of batch work: it arrives at a known simulated time,
//! demands a fixed number of cores and amount of memory, and runs for a
//! fixed duration once placed on a node.
//!
//! Raw input arrives as [`JobSpec`] (signed, unchecked values). Use
//! [`crate::validation::build_jobs`] to turn specs into [`Job`]s.

use serde::{Deserialize, Serialize};

/// Job identifier (1-based, assigned in input order).
pub type JobId = u32;

/// Simulated time unit.
pub type Ticks = u64;

/// Unvalidated job parameters as read from an input collaborator.
///
/// Fields are signed so that negative or zero values can be reported
/// by validation instead of being silently wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSpec {
    /// Arrival time (simulated time units).
    pub arrival_time: i64,
    /// Cores required.
    pub cores: i64,
    /// Memory required (GB).
    pub memory_gb: i64,
    /// Execution duration (simulated time units).
    pub duration: i64,
}

impl JobSpec {
    /// Creates a job spec in the input order: arrival, cores, memory, duration.
    pub fn new(arrival_time: i64, cores: i64, memory_gb: i64, duration: i64) -> Self {
        Self {
            arrival_time,
            cores,
            memory_gb,
            duration,
        }
    }
}

/// An immutable job demand descriptor.
///
/// Fields are private: once constructed a job never changes. A job is
/// either pending (owned by the simulator's queue) or placed, in which case
/// its footprint lives on as an occupant of the node it runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Job {
    id: JobId,
    arrival_time: Ticks,
    cores: u32,
    memory_gb: u32,
    duration: Ticks,
}

impl Job {
    /// Creates a job.
    ///
    /// Callers are expected to pass positive `cores`, `memory_gb` and
    /// `duration`; [`crate::validation::build_jobs`] enforces this for
    /// external input.
    pub fn new(id: JobId, arrival_time: Ticks, cores: u32, memory_gb: u32, duration: Ticks) -> Self {
        debug_assert!(cores > 0 && memory_gb > 0 && duration > 0);
        Self {
            id,
            arrival_time,
            cores,
            memory_gb,
            duration,
        }
    }

    /// Unique job identifier.
    #[inline]
    pub fn id(&self) -> JobId {
        self.id
    }

    /// Time at which the job becomes eligible for placement.
    #[inline]
    pub fn arrival_time(&self) -> Ticks {
        self.arrival_time
    }

    /// Cores required.
    #[inline]
    pub fn cores(&self) -> u32 {
        self.cores
    }

    /// Memory required (GB).
    #[inline]
    pub fn memory_gb(&self) -> u32 {
        self.memory_gb
    }

    /// Execution duration.
    #[inline]
    pub fn duration(&self) -> Ticks {
        self.duration
    }

    /// Gross value: `duration × cores × memory`.
    ///
    /// Only meaningful as an ordering key for smallest-job-first.
    pub fn gross_value(&self) -> u64 {
        self.duration
            .saturating_mul(u64::from(self.cores))
            .saturating_mul(u64::from(self.memory_gb))
    }

    /// Whether the job has arrived by `now`.
    #[inline]
    pub fn has_arrived(&self, now: Ticks) -> bool {
        self.arrival_time <= now
    }
}
