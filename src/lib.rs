//! Discrete-event simulator for batch job scheduling on a node pool.
//!
//! Jobs arrive over simulated time, wait in a queue ordered by a queue
//! policy, and are placed onto worker nodes by a placement policy. Each
//! node shares its cores and memory among the jobs it hosts until they
//! finish. The final node snapshot is written as a CSV report.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Job`, `WorkerNode`, `AssignmentEvent`, `SimulationOutcome`
//! - **`dispatching`**: Queue ordering policies (FCFS, SJF, SDF) and `QueueOrder`
//! - **`placement`**: Node selection policies (first-fit, best-fit, worst-fit)
//! - **`simulation`**: The clock-driven engine (`Simulator`, `simulate`)
//! - **`validation`**: Input integrity checks on raw job parameters
//! - **`report`**: CSV utilization report and run KPIs
//! - **`input`**: Scripted and interactive input reading
//! - **`workload`**: Seeded synthetic workloads
//! - **`config`**: TOML run configuration
//! - **`error`**: Error types
//!
//! # Example
//!
//! ```
//! use u_batchsim::{
//!     build_jobs, render_csv, simulate, JobSpec, NodeCapacity, PlacementPolicyKind,
//!     QueuePolicyKind, SimLimits, TenancyMode, WorkerNode,
//! };
//!
//! let jobs = build_jobs(&[JobSpec::new(0, 4, 8, 5)]).unwrap();
//! let nodes = WorkerNode::pool(2, NodeCapacity::default(), TenancyMode::Shared);
//! let outcome = simulate(
//!     jobs,
//!     nodes,
//!     QueuePolicyKind::Fcfs,
//!     PlacementPolicyKind::FirstFit,
//!     &SimLimits::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(outcome.assignment_count(), 1);
//! assert!(render_csv(&outcome.nodes).contains("1,20,56,5"));
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Feitelson & Rudolph (1995), "Parallel Job Scheduling: Issues and Approaches"

pub mod config;
pub mod dispatching;
pub mod error;
pub mod input;
pub mod models;
pub mod placement;
pub mod report;
pub mod simulation;
pub mod validation;
pub mod workload;

pub use config::SimConfig;
pub use dispatching::{QueueOrder, QueuePolicy, QueuePolicyKind};
pub use error::{ConfigError, InputError, ReportError, SimError};
pub use models::{
    AssignmentEvent, Job, JobId, JobSpec, NodeCapacity, NodeId, SimEvent, SimulationOutcome,
    TenancyMode, Ticks, WorkerNode,
};
pub use placement::{PlacementPolicy, PlacementPolicyKind};
pub use report::{render_csv, CsvReportSink, ReportSink, SimulationKpi};
pub use simulation::{run_simulation, simulate, SimLimits, Simulator};
pub use validation::{build_jobs, validate_jobs};
