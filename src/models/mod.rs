//! Batch simulation domain models.
//!
//! Provides the data types for describing a workload and the cluster it
//! runs on, and for recording what the simulator did with it.
//!
//! # Domain Mappings
//!
//! | u-batchsim | HPC cluster | Cloud | Render farm |
//! |------------|-------------|-------|-------------|
//! | Job | Batch job | Pod/Task | Frame batch |
//! | WorkerNode | Compute node | VM/Host | Render blade |
//! | Occupant | Running job | Bound pod | Active render |
//! | SimulationOutcome | Accounting log | Placement audit | Farm report |

mod job;
mod node;
mod outcome;

pub use job::{Job, JobId, JobSpec, Ticks};
pub use node::{
    NodeCapacity, NodeId, Occupant, TenancyMode, WorkerNode, DEFAULT_NODE_CORES,
    DEFAULT_NODE_MEMORY_GB,
};
pub use outcome::{AssignmentEvent, SimEvent, SimulationOutcome};
