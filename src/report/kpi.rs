//! Simulation quality metrics (KPIs).
//!
//! Computes standard batch scheduling indicators from a completed run and
//! its input jobs.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan | Latest job end time |
//! | Wait time | Placement time − arrival time |
//! | Busy core-time | Σ cores × duration per node |
//! | Avg Core Utilization | Busy core-time / (pool cores × makespan) |
//!
//! # Reference
//! Feitelson (2015), "Workload Modeling for Computer Systems Performance Evaluation", Ch. 8

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::models::{Job, JobId, NodeId, SimulationOutcome, Ticks};

/// Run performance indicators.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationKpi {
    /// Latest job end time.
    pub makespan: Ticks,
    /// Number of placed jobs.
    pub jobs_placed: usize,
    /// Sum of wait times.
    pub total_wait: Ticks,
    /// Mean wait time.
    pub avg_wait: f64,
    /// Longest single wait.
    pub max_wait: Ticks,
    /// Nodes that received at least one job.
    pub nodes_used: usize,
    /// Busy core-time per node, in node id order.
    pub busy_core_time_by_node: BTreeMap<NodeId, u64>,
    /// Pool-wide core utilization over the makespan (0.0..=1.0).
    pub avg_core_utilization: f64,
    /// Sum of available cores in the final snapshot.
    pub final_available_cores: u64,
    /// Sum of available memory in the final snapshot (GB).
    pub final_available_memory_gb: u64,
}

impl SimulationKpi {
    /// Computes KPIs from an outcome and its input jobs.
    ///
    /// # Arguments
    /// * `outcome` - The completed run.
    /// * `jobs` - The input jobs (for arrival times).
    pub fn calculate(outcome: &SimulationOutcome, jobs: &[Job]) -> Self {
        let arrivals: HashMap<JobId, Ticks> =
            jobs.iter().map(|j| (j.id(), j.arrival_time())).collect();

        let mut total_wait: Ticks = 0;
        let mut max_wait: Ticks = 0;
        let mut jobs_placed = 0;
        let mut busy: BTreeMap<NodeId, u64> = BTreeMap::new();
        let mut busy_total = 0.0_f64;

        for a in outcome.assignments() {
            jobs_placed += 1;

            let arrival = arrivals.get(&a.job_id).copied().unwrap_or(a.time);
            let wait = a.time.saturating_sub(arrival);
            total_wait = total_wait.saturating_add(wait);
            max_wait = max_wait.max(wait);

            let core_time = busy.entry(a.node_id).or_insert(0);
            *core_time = core_time.saturating_add(u64::from(a.cores).saturating_mul(a.duration()));
            busy_total += f64::from(a.cores) * a.duration() as f64;
        }

        let makespan = outcome.makespan();
        let pool_cores: u64 = outcome
            .nodes
            .iter()
            .map(|n| u64::from(n.capacity().cores))
            .sum();

        let avg_core_utilization = if makespan == 0 || pool_cores == 0 {
            0.0
        } else {
            busy_total / (pool_cores as f64 * makespan as f64)
        };

        let avg_wait = if jobs_placed == 0 {
            0.0
        } else {
            total_wait as f64 / jobs_placed as f64
        };

        Self {
            makespan,
            jobs_placed,
            total_wait,
            avg_wait,
            max_wait,
            nodes_used: busy.len(),
            busy_core_time_by_node: busy,
            avg_core_utilization,
            final_available_cores: outcome
                .nodes
                .iter()
                .map(|n| u64::from(n.available_cores()))
                .sum(),
            final_available_memory_gb: outcome
                .nodes
                .iter()
                .map(|n| u64::from(n.available_memory_gb()))
                .sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatching::QueuePolicyKind;
    use crate::models::{NodeCapacity, TenancyMode, WorkerNode};
    use crate::placement::PlacementPolicyKind;
    use crate::simulation::{simulate, SimLimits};

    fn run(jobs: &[Job], nodes: u32) -> SimulationOutcome {
        simulate(
            jobs.to_vec(),
            WorkerNode::pool(nodes, NodeCapacity::default(), TenancyMode::Shared),
            QueuePolicyKind::Fcfs,
            PlacementPolicyKind::FirstFit,
            &SimLimits::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_wait_times() {
        // Job 2 waits 5 ticks for job 1 to finish.
        let jobs = [Job::new(1, 0, 20, 8, 5), Job::new(2, 0, 20, 8, 3)];
        let kpi = SimulationKpi::calculate(&run(&jobs, 1), &jobs);

        assert_eq!(kpi.jobs_placed, 2);
        assert_eq!(kpi.total_wait, 5);
        assert_eq!(kpi.max_wait, 5);
        assert!((kpi.avg_wait - 2.5).abs() < 1e-10);
        assert_eq!(kpi.makespan, 8);
    }

    #[test]
    fn test_utilization() {
        // 12 cores × 4 ticks on a 24-core pool over makespan 4 → 0.5
        let jobs = [Job::new(1, 0, 12, 8, 4)];
        let kpi = SimulationKpi::calculate(&run(&jobs, 1), &jobs);

        assert!((kpi.avg_core_utilization - 0.5).abs() < 1e-10);
        assert_eq!(kpi.busy_core_time_by_node[&1], 48);
        assert_eq!(kpi.nodes_used, 1);
        assert_eq!(kpi.max_wait, 0);
    }

    #[test]
    fn test_huge_durations_saturate() {
        let half = u64::MAX / 2;
        let jobs = [
            Job::new(1, 0, 24, 64, half),
            Job::new(2, 0, 24, 64, half),
            Job::new(3, 0, 1, 1, 1),
        ];
        let kpi = SimulationKpi::calculate(&run(&jobs, 1), &jobs);

        assert_eq!(kpi.jobs_placed, 3);
        assert_eq!(kpi.busy_core_time_by_node[&1], u64::MAX);
        assert_eq!(kpi.max_wait, 2 * half);
        assert_eq!(kpi.total_wait, u64::MAX);
        assert!((kpi.avg_core_utilization - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_final_totals() {
        let jobs = [Job::new(1, 0, 4, 8, 5)];
        let kpi = SimulationKpi::calculate(&run(&jobs, 2), &jobs);
        assert_eq!(kpi.final_available_cores, 44);
        assert_eq!(kpi.final_available_memory_gb, 120);
    }

    #[test]
    fn test_empty_run() {
        let kpi = SimulationKpi::calculate(&run(&[], 2), &[]);
        assert_eq!(kpi.makespan, 0);
        assert_eq!(kpi.jobs_placed, 0);
        assert_eq!(kpi.avg_wait, 0.0);
        assert_eq!(kpi.avg_core_utilization, 0.0);
        assert_eq!(kpi.nodes_used, 0);
    }

    #[test]
    fn test_serializes() {
        let jobs = [Job::new(1, 0, 4, 8, 5)];
        let kpi = SimulationKpi::calculate(&run(&jobs, 1), &jobs);
        let json = serde_json::to_value(&kpi).unwrap();
        assert_eq!(json["makespan"], 5);
        assert_eq!(json["busy_core_time_by_node"]["1"], 20);
    }
}
