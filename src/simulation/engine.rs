//! Time-stepping batch simulator.
//!
//! # Algorithm
//!
//! Each [`Simulator::step`] runs one cycle:
//! 1. Sync: `clock = max(clock, arrival of the job at the queue front)`.
//! 2. Release: every occupant with `end_time <= clock` returns its resources.
//! 3. Admit: scan the pending queue in order; each arrived job is offered
//!    to the placement policy and, on success, placed and removed.
//! 4. If nothing was placed, the clock advances to the next release or
//!    arrival (by one tick if there is neither).
//!
//! The run ends when the pending queue is empty. Jobs that could never fit
//! any node are rejected up front, and [`SimLimits`] bounds the loop.
//!
//! # Complexity
//! O(steps × (n × c)) where n = pending jobs, c = nodes.

use tracing::{debug, info};

use super::SimLimits;
use crate::dispatching::QueueOrder;
use crate::error::SimError;
use crate::models::{AssignmentEvent, Job, SimEvent, SimulationOutcome, Ticks, WorkerNode};
use crate::placement::PlacementPolicy;

/// Result of a single simulation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The admission pass placed this many jobs; the clock did not move.
    Placed(usize),
    /// Nothing could be placed; the clock advanced to `next_time`.
    Waiting {
        /// Clock after the advance.
        next_time: Ticks,
    },
    /// The pending queue is empty.
    Finished,
}

/// Discrete-event simulator over a fixed node pool.
///
/// Owns the pending queue and the node pool; the placement policy only
/// reads node state.
///
/// # Example
///
/// ```
/// use u_batchsim::dispatching::QueuePolicyKind;
/// use u_batchsim::models::{Job, NodeCapacity, TenancyMode, WorkerNode};
/// use u_batchsim::placement::FirstFit;
/// use u_batchsim::simulation::{SimLimits, Simulator};
///
/// let jobs = vec![Job::new(1, 0, 4, 8, 5)];
/// let nodes = WorkerNode::pool(2, NodeCapacity::default(), TenancyMode::Shared);
/// let order = QueuePolicyKind::Fcfs.order();
///
/// let sim = Simulator::new(jobs, nodes, &order, &FirstFit).unwrap();
/// let outcome = sim.run(&SimLimits::default()).unwrap();
///
/// let a = outcome.assignment_for_job(1).unwrap();
/// assert_eq!((a.node_id, a.time), (1, 0));
/// assert_eq!(outcome.nodes[0].available_cores(), 20);
/// ```
#[derive(Debug)]
pub struct Simulator<'p> {
    pending: Vec<Job>,
    nodes: Vec<WorkerNode>,
    placement: &'p dyn PlacementPolicy,
    clock: Ticks,
    events: Vec<SimEvent>,
    steps: u64,
}

impl<'p> Simulator<'p> {
    /// Creates a simulator, ordering `jobs` once with `order`.
    ///
    /// # Errors
    /// - [`SimError::EmptyNodePool`] if there are jobs but no nodes.
    /// - [`SimError::UnsatisfiableJob`] if a job exceeds every node's total
    ///   capacity and would therefore never be placed.
    pub fn new(
        jobs: Vec<Job>,
        nodes: Vec<WorkerNode>,
        order: &QueueOrder,
        placement: &'p dyn PlacementPolicy,
    ) -> Result<Self, SimError> {
        if nodes.is_empty() && !jobs.is_empty() {
            return Err(SimError::EmptyNodePool {
                pending: jobs.len(),
            });
        }

        for job in &jobs {
            if !nodes.iter().any(|n| n.could_ever_accommodate(job)) {
                return Err(SimError::UnsatisfiableJob {
                    job_id: job.id(),
                    cores: job.cores(),
                    memory_gb: job.memory_gb(),
                    max_cores: nodes.iter().map(|n| n.capacity().cores).max().unwrap_or(0),
                    max_memory_gb: nodes
                        .iter()
                        .map(|n| n.capacity().memory_gb)
                        .max()
                        .unwrap_or(0),
                });
            }
        }

        let pending = order.sort(jobs);
        info!(
            jobs = pending.len(),
            nodes = nodes.len(),
            queue = ?order.names(),
            placement = placement.name(),
            "simulation ready"
        );

        Ok(Self {
            pending,
            nodes,
            placement,
            clock: 0,
            events: Vec::new(),
            steps: 0,
        })
    }

    /// Current simulated time.
    pub fn clock(&self) -> Ticks {
        self.clock
    }

    /// Jobs not yet placed, in admission order.
    pub fn pending(&self) -> &[Job] {
        &self.pending
    }

    /// Current node states.
    pub fn nodes(&self) -> &[WorkerNode] {
        &self.nodes
    }

    /// Events recorded so far.
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    /// Steps taken so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Whether every job has been placed.
    pub fn is_finished(&self) -> bool {
        self.pending.is_empty()
    }

    /// Runs one sync/release/admit cycle.
    ///
    /// # Errors
    /// [`SimError::InfeasiblePlacement`] if the placement policy picks a node
    /// that cannot take the job.
    pub fn step(&mut self) -> Result<StepOutcome, SimError> {
        let Some(front) = self.pending.first() else {
            return Ok(StepOutcome::Finished);
        };
        self.steps += 1;

        self.clock = self.clock.max(front.arrival_time());
        self.release_finished();

        let placed = self.admit()?;
        if placed > 0 {
            return Ok(StepOutcome::Placed(placed));
        }

        // Node state only changes at a release or an arrival, so idle ticks
        // in between are skipped.
        self.clock = self
            .next_event_time()
            .unwrap_or_else(|| self.clock.saturating_add(1));
        Ok(StepOutcome::Waiting {
            next_time: self.clock,
        })
    }

    /// Earliest time after the clock at which an occupant ends or a pending
    /// job arrives.
    pub fn next_event_time(&self) -> Option<Ticks> {
        let now = self.clock;
        let next_release = self
            .nodes
            .iter()
            .filter_map(WorkerNode::next_release_time)
            .filter(|&t| t > now)
            .min();
        let next_arrival = self
            .pending
            .iter()
            .map(Job::arrival_time)
            .filter(|&t| t > now)
            .min();
        match (next_release, next_arrival) {
            (Some(r), Some(a)) => Some(r.min(a)),
            (r, a) => r.or(a),
        }
    }

    /// Steps until the pending queue is empty.
    ///
    /// # Errors
    /// [`SimError::StepBudgetExhausted`] or [`SimError::TimeLimitExceeded`]
    /// when `limits` are hit, plus anything [`step`](Self::step) returns.
    pub fn run(mut self, limits: &SimLimits) -> Result<SimulationOutcome, SimError> {
        while !self.is_finished() {
            if self.steps >= limits.max_steps {
                return Err(SimError::StepBudgetExhausted {
                    max_steps: limits.max_steps,
                    clock: self.clock,
                    pending: self.pending.len(),
                });
            }
            if let Some(limit) = limits.max_time {
                if self.clock > limit {
                    return Err(SimError::TimeLimitExceeded {
                        limit,
                        pending: self.pending.len(),
                    });
                }
            }
            self.step()?;
        }

        info!(
            assignments = self.events.iter().filter(|e| matches!(e, SimEvent::Assigned(_))).count(),
            final_time = self.clock,
            steps = self.steps,
            "simulation finished"
        );
        Ok(self.finish())
    }

    /// Advances the clock to the last running job's end time and releases
    /// everything that is still running. Pending jobs are left untouched.
    ///
    /// Returns the clock after draining.
    pub fn drain(&mut self) -> Ticks {
        let last_end = self
            .nodes
            .iter()
            .flat_map(|n| n.occupants().iter().map(|o| o.end_time))
            .max();
        if let Some(end) = last_end {
            self.clock = self.clock.max(end);
            self.release_finished();
        }
        self.clock
    }

    /// Consumes the simulator, returning the timeline and node snapshot.
    pub fn finish(self) -> SimulationOutcome {
        SimulationOutcome {
            events: self.events,
            nodes: self.nodes,
            final_time: self.clock,
            steps: self.steps,
        }
    }

    fn release_finished(&mut self) {
        let now = self.clock;
        for node in &mut self.nodes {
            for occupant in node.release_finished(now) {
                debug!(
                    job = occupant.job_id,
                    node = node.id(),
                    time = now,
                    cores = occupant.cores,
                    memory_gb = occupant.memory_gb,
                    "released"
                );
                self.events.push(SimEvent::Released {
                    job_id: occupant.job_id,
                    node_id: node.id(),
                    time: now,
                });
            }
        }
    }

    fn admit(&mut self) -> Result<usize, SimError> {
        let now = self.clock;
        let mut placed = 0;
        let mut i = 0;

        while i < self.pending.len() {
            let job = self.pending[i];
            if !job.has_arrived(now) {
                i += 1;
                continue;
            }

            let Some(index) = self.placement.select(&self.nodes, &job) else {
                i += 1;
                continue;
            };

            let node = match self.nodes.get_mut(index) {
                Some(node) if node.can_accommodate(&job) => node,
                _ => {
                    return Err(SimError::InfeasiblePlacement {
                        policy: self.placement.name(),
                        job_id: job.id(),
                        index,
                    })
                }
            };

            let occupant = node.assign(&job, now);
            let event = AssignmentEvent {
                job_id: job.id(),
                node_id: node.id(),
                time: now,
                end_time: occupant.end_time,
                cores: occupant.cores,
                memory_gb: occupant.memory_gb,
            };
            debug!(
                job = event.job_id,
                node = event.node_id,
                time = now,
                end_time = event.end_time,
                "assigned"
            );
            self.events.push(SimEvent::Assigned(event));
            self.pending.remove(i);
            placed += 1;
        }

        Ok(placed)
    }
}
