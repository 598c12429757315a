//! Queue ordering engine.
//!
//! Composes a primary queue policy with tie-breaking policies and a final
//! deterministic tie-breaker.
//!
//! # Reference
//! Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

use std::cmp::Ordering;
use std::sync::Arc;

use super::QueuePolicy;
use crate::models::Job;

/// How ties are broken after all policies are exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieBreaker {
    /// Keep the original input order (stable sort).
    #[default]
    InputOrder,
    /// Ascending job id.
    ById,
}

/// A queue order: primary policy, then tie-breakers in sequence.
///
/// Sorting is stable, so with [`TieBreaker::InputOrder`] jobs that every
/// policy scores equally keep their relative input order.
///
/// # Example
/// ```
/// use u_batchsim::dispatching::{QueueOrder, rules};
///
/// let order = QueueOrder::new(rules::Fcfs).with_tie_breaker(rules::ShortDurationFirst);
/// assert_eq!(order.names(), vec!["FCFS", "SDF"]);
/// ```
#[derive(Clone)]
pub struct QueueOrder {
    policies: Vec<Arc<dyn QueuePolicy>>,
    tie_breaker: TieBreaker,
}

impl QueueOrder {
    /// Creates an order driven by a single policy.
    pub fn new<P: QueuePolicy + 'static>(policy: P) -> Self {
        Self {
            policies: vec![Arc::new(policy)],
            tie_breaker: TieBreaker::InputOrder,
        }
    }

    /// Adds a tie-breaking policy, consulted only when earlier ones tie.
    pub fn with_tie_breaker<P: QueuePolicy + 'static>(mut self, policy: P) -> Self {
        self.policies.push(Arc::new(policy));
        self
    }

    /// Sets the final tie-breaking strategy.
    pub fn with_final_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Policy names in evaluation order.
    pub fn names(&self) -> Vec<&'static str> {
        self.policies.iter().map(|p| p.name()).collect()
    }

    /// Compares two jobs under this order.
    pub fn compare(&self, a: &Job, b: &Job) -> Ordering {
        for policy in &self.policies {
            let ord = policy.compare(a, b);
            if ord != Ordering::Equal {
                return ord;
            }
        }

        match self.tie_breaker {
            TieBreaker::InputOrder => Ordering::Equal,
            TieBreaker::ById => a.id().cmp(&b.id()),
        }
    }

    /// Returns indices into `jobs`, in admission order.
    pub fn sort_indices(&self, jobs: &[Job]) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..jobs.len()).collect();
        indices.sort_by(|&a, &b| self.compare(&jobs[a], &jobs[b]));
        indices
    }

    /// Sorts jobs into admission order.
    pub fn sort(&self, mut jobs: Vec<Job>) -> Vec<Job> {
        jobs.sort_by(|a, b| self.compare(a, b));
        jobs
    }
}

impl std::fmt::Debug for QueueOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueueOrder")
            .field("policies", &self.names())
            .field("tie_breaker", &self.tie_breaker)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatching::rules;

    fn ids(jobs: &[Job]) -> Vec<u32> {
        jobs.iter().map(|j| j.id()).collect()
    }

    #[test]
    fn test_fcfs_ordering() {
        let jobs = vec![
            Job::new(1, 5, 1, 1, 1),
            Job::new(2, 0, 1, 1, 1),
            Job::new(3, 3, 1, 1, 1),
        ];
        let sorted = QueueOrder::new(rules::Fcfs).sort(jobs);
        assert_eq!(ids(&sorted), vec![2, 3, 1]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let jobs = vec![
            Job::new(4, 0, 1, 1, 2),
            Job::new(2, 0, 1, 1, 2),
            Job::new(9, 0, 1, 1, 2),
            Job::new(1, 0, 1, 1, 1),
        ];
        let sorted = QueueOrder::new(rules::ShortDurationFirst).sort(jobs);
        assert_eq!(ids(&sorted), vec![1, 4, 2, 9]);
    }

    #[test]
    fn test_final_tie_breaker_by_id() {
        let jobs = vec![Job::new(4, 0, 1, 1, 2), Job::new(2, 0, 1, 1, 2)];
        let sorted = QueueOrder::new(rules::Fcfs)
            .with_final_tie_breaker(TieBreaker::ById)
            .sort(jobs);
        assert_eq!(ids(&sorted), vec![2, 4]);
    }

    #[test]
    fn test_tie_breaker_policy() {
        // Same arrival; SDF breaks the tie.
        let jobs = vec![Job::new(1, 0, 1, 1, 9), Job::new(2, 0, 1, 1, 3)];
        let order = QueueOrder::new(rules::Fcfs).with_tie_breaker(rules::ShortDurationFirst);
        assert_eq!(ids(&order.sort(jobs)), vec![2, 1]);
    }

    #[test]
    fn test_sort_indices_matches_sort() {
        let jobs = vec![
            Job::new(1, 0, 10, 10, 10),
            Job::new(2, 0, 1, 1, 1),
            Job::new(3, 0, 5, 5, 5),
        ];
        let order = QueueOrder::new(rules::SmallestJobFirst);
        let indices = order.sort_indices(&jobs);
        assert_eq!(indices, vec![1, 2, 0]);
        let sorted = order.sort(jobs.clone());
        let via_indices: Vec<Job> = indices.iter().map(|&i| jobs[i]).collect();
        assert_eq!(sorted, via_indices);
    }

    #[test]
    fn test_sort_is_deterministic() {
        let jobs: Vec<Job> = (1..=20)
            .map(|i| Job::new(i, u64::from(i % 3), 1 + i % 4, 1 + i % 5, u64::from(1 + i % 2)))
            .collect();
        let order = QueueOrder::new(rules::SmallestJobFirst);
        let first = order.sort(jobs.clone());
        for _ in 0..5 {
            assert_eq!(order.sort(jobs.clone()), first);
        }
    }

    #[test]
    fn test_empty() {
        let order = QueueOrder::new(rules::Fcfs);
        assert!(order.sort(Vec::new()).is_empty());
        assert!(order.sort_indices(&[]).is_empty());
    }
}
