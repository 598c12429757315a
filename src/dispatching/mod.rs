//! Queue ordering policies.
//!
//! A queue policy imposes a total order over pending jobs. The order is
//! computed once, before the simulation starts, and decides the sequence in
//! which the admission pass tries to place jobs.
//!
//! # Usage
//!
//! ```
//! use u_batchsim::dispatching::{QueueOrder, rules};
//! use u_batchsim::models::Job;
//!
//! let jobs = vec![
//!     Job::new(1, 0, 4, 8, 10),
//!     Job::new(2, 0, 2, 2, 3),
//! ];
//! let order = QueueOrder::new(rules::ShortDurationFirst);
//! let sorted = order.sort(jobs);
//! assert_eq!(sorted[0].id(), 2);
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! - Feitelson et al. (2004), "Parallel Job Scheduling — A Status Report"

mod engine;
pub mod rules;
mod selector;

pub use engine::{QueueOrder, TieBreaker};
pub use selector::QueuePolicyKind;

use crate::models::Job;
use std::cmp::Ordering;
use std::fmt::Debug;

/// Sort key returned by a queue policy.
///
/// Lower scores = admitted earlier.
pub type RuleScore = u64;

/// A queue discipline that ranks pending jobs.
///
/// # Score Convention
/// **Lower score = earlier in the queue.** Equal scores are left to the
/// [`QueueOrder`] tie-breaking chain, which ends in input order.
pub trait QueuePolicy: Send + Sync + Debug {
    /// Policy name (e.g., "FCFS", "SJF").
    fn name(&self) -> &'static str;

    /// Scores a job.
    fn evaluate(&self, job: &Job) -> RuleScore;

    /// Compares two jobs by score.
    fn compare(&self, a: &Job, b: &Job) -> Ordering {
        self.evaluate(a).cmp(&self.evaluate(b))
    }

    /// Policy description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
