//! Simulation engine.
//!
//! Advances a simulated clock over a pending job queue and a fixed node
//! pool, releasing finished jobs and greedily placing queued ones.
//!
//! # Concurrency Model
//!
//! The simulation is a sequential computation. Nodes "run" jobs in parallel
//! only in simulated time; all state is owned by [`Simulator`] and updated
//! from a single control flow.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling", Ch. 4: Priority Dispatching
//! - Feitelson & Rudolph (1995), "Parallel Job Scheduling: Issues and Approaches"

mod engine;

pub use engine::{Simulator, StepOutcome};

use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::dispatching::QueuePolicyKind;
use crate::error::SimError;
use crate::models::{Job, SimulationOutcome, Ticks, WorkerNode};
use crate::placement::PlacementPolicyKind;

/// Default step budget for [`Simulator::run`].
pub const DEFAULT_MAX_STEPS: u64 = 10_000_000;

/// Bounds on a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimLimits {
    /// Maximum number of engine steps.
    pub max_steps: u64,
    /// Maximum simulated time. `None` = unbounded.
    pub max_time: Option<Ticks>,
}

impl SimLimits {
    /// Sets the step budget.
    pub fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Sets the simulated-time ceiling.
    pub fn with_max_time(mut self, max_time: Ticks) -> Self {
        self.max_time = Some(max_time);
        self
    }
}

impl Default for SimLimits {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            max_time: None,
        }
    }
}

/// Runs a complete simulation with built-in policies.
pub fn simulate(
    jobs: Vec<Job>,
    nodes: Vec<WorkerNode>,
    queue: QueuePolicyKind,
    placement: PlacementPolicyKind,
    limits: &SimLimits,
) -> Result<SimulationOutcome, SimError> {
    Simulator::new(jobs, nodes, &queue.order(), placement.policy())?.run(limits)
}

/// Runs a simulation on the pool, policies and limits described by `config`.
pub fn run_simulation(jobs: Vec<Job>, config: &SimConfig) -> Result<SimulationOutcome, SimError> {
    simulate(
        jobs,
        config.node_pool(),
        config.queue_policy(),
        config.placement_policy(),
        &config.limits(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NodeCapacity, TenancyMode};

    #[test]
    fn test_default_limits() {
        let limits = SimLimits::default();
        assert_eq!(limits.max_steps, DEFAULT_MAX_STEPS);
        assert_eq!(limits.max_time, None);
    }

    #[test]
    fn test_simulate_convenience() {
        let nodes = WorkerNode::pool(2, NodeCapacity::default(), TenancyMode::Shared);
        let outcome = simulate(
            vec![Job::new(1, 0, 4, 8, 5), Job::new(2, 0, 4, 8, 5)],
            nodes,
            QueuePolicyKind::Fcfs,
            PlacementPolicyKind::WorstFit,
            &SimLimits::default(),
        )
        .unwrap();
        // Worst-fit spreads: node 1 has 20 free after job 1, node 2 has 24.
        assert_eq!(outcome.assignment_for_job(2).unwrap().node_id, 2);
    }

    #[test]
    fn test_run_simulation_from_config() {
        let mut config = SimConfig::default();
        config.cluster.nodes = 1;
        config.cluster.tenancy = TenancyMode::Exclusive;
        let outcome = run_simulation(
            vec![Job::new(1, 0, 2, 2, 4), Job::new(2, 0, 2, 2, 4)],
            &config,
        )
        .unwrap();
        // Exclusive nodes host one job at a time.
        assert_eq!(outcome.assignment_for_job(2).unwrap().time, 4);
        assert_eq!(outcome.nodes.len(), 1);
    }
}
