//! Worker node model.
//!
//! A worker node is a fixed-capacity pool of cores and memory. Placing a job
//! debits the job's demand and records it as an [`Occupant`]; releasing the
//! occupant credits back exactly what was debited.
//!
//! # Tenancy
//!
//! With [`TenancyMode::Shared`] a node accepts any job whose demand fits its
//! remaining resources, so several jobs may co-locate. With
//! [`TenancyMode::Exclusive`] a node additionally has to be empty.

use serde::{Deserialize, Serialize};

use super::{Job, JobId, Ticks};

/// Node identifier (1-based, pool order).
pub type NodeId = u32;

/// Default cores per node.
pub const DEFAULT_NODE_CORES: u32 = 24;

/// Default memory per node (GB).
pub const DEFAULT_NODE_MEMORY_GB: u32 = 64;

/// Total (fixed) resources of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeCapacity {
    /// Total cores.
    pub cores: u32,
    /// Total memory (GB).
    pub memory_gb: u32,
}

impl NodeCapacity {
    /// Creates a capacity.
    pub fn new(cores: u32, memory_gb: u32) -> Self {
        Self { cores, memory_gb }
    }

    /// Whether a job's demand fits within this capacity at all.
    pub fn fits(&self, job: &Job) -> bool {
        self.cores >= job.cores() && self.memory_gb >= job.memory_gb()
    }
}

impl Default for NodeCapacity {
    fn default() -> Self {
        Self::new(DEFAULT_NODE_CORES, DEFAULT_NODE_MEMORY_GB)
    }
}

/// Whether a node may host more than one job at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TenancyMode {
    /// Jobs co-locate as long as resources allow.
    #[default]
    Shared,
    /// At most one job per node.
    Exclusive,
}

/// A job currently running on a node, with the exact amounts it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupant {
    /// The running job.
    pub job_id: JobId,
    /// Cores held.
    pub cores: u32,
    /// Memory held (GB).
    pub memory_gb: u32,
    /// Simulated time at which the job finishes.
    pub end_time: Ticks,
}

/// A worker node and its current resource state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerNode {
    id: NodeId,
    capacity: NodeCapacity,
    tenancy: TenancyMode,
    available_cores: u32,
    available_memory_gb: u32,
    job_end_time: Ticks,
    occupants: Vec<Occupant>,
}

impl WorkerNode {
    /// Creates an idle shared node with the given capacity.
    pub fn new(id: NodeId, capacity: NodeCapacity) -> Self {
        Self {
            id,
            capacity,
            tenancy: TenancyMode::Shared,
            available_cores: capacity.cores,
            available_memory_gb: capacity.memory_gb,
            job_end_time: 0,
            occupants: Vec::new(),
        }
    }

    /// Sets the tenancy mode.
    pub fn with_tenancy(mut self, tenancy: TenancyMode) -> Self {
        self.tenancy = tenancy;
        self
    }

    /// Creates `count` identical idle nodes with ids `1..=count`.
    pub fn pool(count: u32, capacity: NodeCapacity, tenancy: TenancyMode) -> Vec<Self> {
        (1..=count)
            .map(|id| Self::new(id, capacity).with_tenancy(tenancy))
            .collect()
    }

    /// Node identifier.
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Total capacity.
    #[inline]
    pub fn capacity(&self) -> NodeCapacity {
        self.capacity
    }

    /// Tenancy mode.
    #[inline]
    pub fn tenancy(&self) -> TenancyMode {
        self.tenancy
    }

    /// Cores not held by any occupant.
    #[inline]
    pub fn available_cores(&self) -> u32 {
        self.available_cores
    }

    /// Memory not held by any occupant (GB).
    #[inline]
    pub fn available_memory_gb(&self) -> u32 {
        self.available_memory_gb
    }

    /// Latest end time assigned to this node (0 if it never ran a job).
    ///
    /// Each assignment keeps the maximum rather than overwriting, so with
    /// co-located jobs a short job placed beside a long one does not hide
    /// the long one's end. Not reset on release, so it reads as "busy until"
    /// in the report's `Job End Time` column.
    #[inline]
    pub fn job_end_time(&self) -> Ticks {
        self.job_end_time
    }

    /// Jobs currently running on this node.
    pub fn occupants(&self) -> &[Occupant] {
        &self.occupants
    }

    /// Whether no job is running on this node.
    pub fn is_idle(&self) -> bool {
        self.occupants.is_empty()
    }

    /// Cores held by occupants.
    pub fn held_cores(&self) -> u32 {
        self.occupants.iter().map(|o| o.cores).sum()
    }

    /// Memory held by occupants (GB).
    pub fn held_memory_gb(&self) -> u32 {
        self.occupants.iter().map(|o| o.memory_gb).sum()
    }

    /// Feasibility predicate: whether the job fits right now.
    pub fn can_accommodate(&self, job: &Job) -> bool {
        if self.tenancy == TenancyMode::Exclusive && !self.is_idle() {
            return false;
        }
        self.available_cores >= job.cores() && self.available_memory_gb >= job.memory_gb()
    }

    /// Whether the job would fit on this node when fully idle.
    pub fn could_ever_accommodate(&self, job: &Job) -> bool {
        self.capacity.fits(job)
    }

    /// Places a job at `now`, debiting its demand.
    ///
    /// The caller must have checked [`can_accommodate`](Self::can_accommodate).
    pub fn assign(&mut self, job: &Job, now: Ticks) -> Occupant {
        debug_assert!(self.can_accommodate(job), "node {} overcommitted", self.id);

        let occupant = Occupant {
            job_id: job.id(),
            cores: job.cores(),
            memory_gb: job.memory_gb(),
            end_time: now.saturating_add(job.duration()),
        };
        self.available_cores -= occupant.cores;
        self.available_memory_gb -= occupant.memory_gb;
        self.job_end_time = self.job_end_time.max(occupant.end_time);
        self.occupants.push(occupant);
        occupant
    }

    /// Releases every occupant whose end time is at or before `now`.
    ///
    /// Returns the released occupants in placement order.
    pub fn release_finished(&mut self, now: Ticks) -> Vec<Occupant> {
        let mut released = Vec::new();
        let mut i = 0;
        while i < self.occupants.len() {
            if self.occupants[i].end_time <= now {
                let occupant = self.occupants.remove(i);
                self.credit(&occupant);
                released.push(occupant);
            } else {
                i += 1;
            }
        }
        released
    }

    /// Releases a specific job regardless of its end time.
    pub fn release_job(&mut self, job_id: JobId) -> Option<Occupant> {
        let pos = self.occupants.iter().position(|o| o.job_id == job_id)?;
        let occupant = self.occupants.remove(pos);
        self.credit(&occupant);
        Some(occupant)
    }

    /// Earliest end time among current occupants.
    pub fn next_release_time(&self) -> Option<Ticks> {
        self.occupants.iter().map(|o| o.end_time).min()
    }

    /// Fraction of cores currently held (0.0..=1.0).
    pub fn core_utilization(&self) -> f64 {
        if self.capacity.cores == 0 {
            return 0.0;
        }
        f64::from(self.held_cores()) / f64::from(self.capacity.cores)
    }

    fn credit(&mut self, occupant: &Occupant) {
        self.available_cores += occupant.cores;
        self.available_memory_gb += occupant.memory_gb;
        debug_assert!(self.available_cores <= self.capacity.cores);
        debug_assert!(self.available_memory_gb <= self.capacity.memory_gb);
    }
}
