//! Node placement policies.
//!
//! A placement policy picks at most one feasible node for a job from the
//! current pool, or reports that none qualifies. Policies only read node
//! state; the simulator applies the chosen placement.
//!
//! # Usage
//!
//! ```
//! use u_batchsim::models::{Job, NodeCapacity, TenancyMode, WorkerNode};
//! use u_batchsim::placement::{BestFit, PlacementPolicy};
//!
//! let mut nodes = WorkerNode::pool(2, NodeCapacity::default(), TenancyMode::Shared);
//! nodes[1].assign(&Job::new(1, 0, 16, 16, 10), 0);
//!
//! let job = Job::new(2, 0, 4, 4, 1);
//! assert_eq!(BestFit.select(&nodes, &job), Some(1));
//! ```
//!
//! # References
//!
//! - Coffman, Garey & Johnson (1996), "Approximation Algorithms for Bin Packing: A Survey"

mod fit;
mod selector;

pub use fit::{BestFit, FirstFit, WorstFit};
pub use selector::PlacementPolicyKind;

use crate::models::{Job, WorkerNode};
use std::fmt::Debug;

/// A rule that chooses which node receives a job.
pub trait PlacementPolicy: Send + Sync + Debug {
    /// Policy name (e.g., "first-fit").
    fn name(&self) -> &'static str;

    /// Returns the index (into `nodes`) of the chosen node, or `None` when
    /// no node can accommodate the job.
    fn select(&self, nodes: &[WorkerNode], job: &Job) -> Option<usize>;

    /// Policy description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
