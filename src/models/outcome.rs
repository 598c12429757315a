//! Simulation outcome model.
//!
//! The outcome of a run is the ordered event timeline (assignments and
//! releases, in causal order) plus the final snapshot of every node.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{JobId, NodeId, Ticks, WorkerNode};

/// A job placed on a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentEvent {
    /// Placed job.
    pub job_id: JobId,
    /// Receiving node.
    pub node_id: NodeId,
    /// Simulated clock at placement.
    pub time: Ticks,
    /// Simulated time at which the job will finish.
    pub end_time: Ticks,
    /// Cores debited.
    pub cores: u32,
    /// Memory debited (GB).
    pub memory_gb: u32,
}

impl AssignmentEvent {
    /// Time the job occupies the node.
    #[inline]
    pub fn duration(&self) -> Ticks {
        self.end_time - self.time
    }
}

impl fmt::Display for AssignmentEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Job ID {} assigned to Node ID {} at time {}",
            self.job_id, self.node_id, self.time
        )
    }
}

/// One entry of the simulation timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimEvent {
    /// A pending job was placed.
    Assigned(AssignmentEvent),
    /// A finished job returned its resources.
    Released {
        /// Finished job.
        job_id: JobId,
        /// Node the job ran on.
        node_id: NodeId,
        /// Simulated clock at release.
        time: Ticks,
    },
}

impl SimEvent {
    /// Simulated time of the event.
    pub fn time(&self) -> Ticks {
        match self {
            Self::Assigned(a) => a.time,
            Self::Released { time, .. } => *time,
        }
    }
}

/// Result of a completed simulation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationOutcome {
    /// Timeline in causal order (clock, then admission-scan order).
    pub events: Vec<SimEvent>,
    /// Final node snapshot in pool order.
    pub nodes: Vec<WorkerNode>,
    /// Clock value when the pending set became empty.
    pub final_time: Ticks,
    /// Engine steps taken.
    pub steps: u64,
}

impl SimulationOutcome {
    /// Assignment events in order.
    pub fn assignments(&self) -> impl Iterator<Item = &AssignmentEvent> {
        self.events.iter().filter_map(|e| match e {
            SimEvent::Assigned(a) => Some(a),
            SimEvent::Released { .. } => None,
        })
    }

    /// Number of assignments.
    pub fn assignment_count(&self) -> usize {
        self.assignments().count()
    }

    /// Finds the assignment for a job.
    pub fn assignment_for_job(&self, job_id: JobId) -> Option<&AssignmentEvent> {
        self.assignments().find(|a| a.job_id == job_id)
    }

    /// All assignments made to a node.
    pub fn assignments_for_node(&self, node_id: NodeId) -> Vec<&AssignmentEvent> {
        self.assignments().filter(|a| a.node_id == node_id).collect()
    }

    /// Latest end time across all assignments.
    pub fn makespan(&self) -> Ticks {
        self.assignments().map(|a| a.end_time).max().unwrap_or(0)
    }

    /// Looks up a node in the final snapshot.
    pub fn node(&self, node_id: NodeId) -> Option<&WorkerNode> {
        self.nodes.iter().find(|n| n.id() == node_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NodeCapacity;

    fn assigned(job_id: JobId, node_id: NodeId, time: Ticks, end_time: Ticks) -> SimEvent {
        SimEvent::Assigned(AssignmentEvent {
            job_id,
            node_id,
            time,
            end_time,
            cores: 1,
            memory_gb: 1,
        })
    }

    fn sample_outcome() -> SimulationOutcome {
        SimulationOutcome {
            events: vec![
                assigned(1, 1, 0, 5),
                assigned(2, 2, 0, 3),
                SimEvent::Released {
                    job_id: 2,
                    node_id: 2,
                    time: 3,
                },
                assigned(3, 2, 3, 10),
            ],
            nodes: vec![
                WorkerNode::new(1, NodeCapacity::default()),
                WorkerNode::new(2, NodeCapacity::default()),
            ],
            final_time: 3,
            steps: 4,
        }
    }

    #[test]
    fn test_display_line() {
        let event = AssignmentEvent {
            job_id: 1,
            node_id: 7,
            time: 12,
            end_time: 17,
            cores: 4,
            memory_gb: 8,
        };
        assert_eq!(event.to_string(), "Job ID 1 assigned to Node ID 7 at time 12");
        assert_eq!(event.duration(), 5);
    }

    #[test]
    fn test_assignments_skip_releases() {
        let outcome = sample_outcome();
        assert_eq!(outcome.assignment_count(), 3);
        let ids: Vec<JobId> = outcome.assignments().map(|a| a.job_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_lookup_helpers() {
        let outcome = sample_outcome();
        assert_eq!(outcome.assignment_for_job(3).unwrap().node_id, 2);
        assert!(outcome.assignment_for_job(99).is_none());
        assert_eq!(outcome.assignments_for_node(2).len(), 2);
        assert_eq!(outcome.node(2).unwrap().id(), 2);
        assert!(outcome.node(9).is_none());
    }

    #[test]
    fn test_makespan() {
        assert_eq!(sample_outcome().makespan(), 10);
        assert_eq!(SimulationOutcome::default().makespan(), 0);
    }

    #[test]
    fn test_event_time() {
        let outcome = sample_outcome();
        let times: Vec<Ticks> = outcome.events.iter().map(|e| e.time()).collect();
        assert_eq!(times, vec![0, 0, 3, 3]);
    }
}
