//! Built-in queue policies.
//!
//! - **FCFS**: arrival time
//! - **SJF**: gross value (duration × cores × memory)
//! - **SDF**: execution duration
//!
//! # Score Convention
//! All rules return lower scores for jobs that should be admitted first.

use super::{QueuePolicy, RuleScore};
use crate::models::Job;

/// First Come First Served.
///
/// Orders jobs by arrival time.
#[derive(Debug, Clone, Copy)]
pub struct Fcfs;

impl QueuePolicy for Fcfs {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn evaluate(&self, job: &Job) -> RuleScore {
        job.arrival_time()
    }

    fn description(&self) -> &'static str {
        "First Come First Served"
    }
}

/// Smallest Job First.
///
/// Orders jobs by their total footprint, `duration × cores × memory`.
/// Small jobs pack into fragmented nodes and leave quickly.
#[derive(Debug, Clone, Copy)]
pub struct SmallestJobFirst;

impl QueuePolicy for SmallestJobFirst {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn evaluate(&self, job: &Job) -> RuleScore {
        job.gross_value()
    }

    fn description(&self) -> &'static str {
        "Smallest Job First"
    }
}

/// Short Duration First.
///
/// Orders jobs by execution duration, regardless of size.
///
/// # Reference
/// Smith (1956), SPT minimizes mean flow time on a single machine.
#[derive(Debug, Clone, Copy)]
pub struct ShortDurationFirst;

impl QueuePolicy for ShortDurationFirst {
    fn name(&self) -> &'static str {
        "SDF"
    }

    fn evaluate(&self, job: &Job) -> RuleScore {
        job.duration()
    }

    fn description(&self) -> &'static str {
        "Short Duration First"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering;

    #[test]
    fn test_fcfs() {
        let early = Job::new(1, 2, 8, 8, 8);
        let late = Job::new(2, 9, 1, 1, 1);
        assert!(Fcfs.evaluate(&early) < Fcfs.evaluate(&late));
    }

    #[test]
    fn test_sjf() {
        // 5 * 4 * 8 = 160 vs 2 * 10 * 10 = 200
        let small = Job::new(1, 0, 4, 8, 5);
        let big = Job::new(2, 0, 10, 10, 2);
        assert_eq!(SmallestJobFirst.evaluate(&small), 160);
        assert!(SmallestJobFirst.evaluate(&small) < SmallestJobFirst.evaluate(&big));
    }

    #[test]
    fn test_sdf() {
        let short = Job::new(1, 5, 20, 60, 1);
        let long = Job::new(2, 0, 1, 1, 7);
        assert!(ShortDurationFirst.evaluate(&short) < ShortDurationFirst.evaluate(&long));
    }

    #[test]
    fn test_compare_equal_scores() {
        let a = Job::new(1, 3, 1, 1, 1);
        let b = Job::new(2, 3, 9, 9, 9);
        assert_eq!(Fcfs.compare(&a, &b), Ordering::Equal);
    }

    #[test]
    fn test_names() {
        assert_eq!(Fcfs.name(), "FCFS");
        assert_eq!(SmallestJobFirst.description(), "Smallest Job First");
        assert_eq!(ShortDurationFirst.name(), "SDF");
    }
}
