//! Bin-packing fit strategies.
//!
//! Each strategy scans the pool in order and `select`s among nodes for
//! which [`WorkerNode::can_accommodate`] holds. Ties go to the node seen
//! first.

use super::PlacementPolicy;
use crate::models::{Job, WorkerNode};

/// First feasible node in pool order.
#[derive(Debug, Clone, Copy)]
pub struct FirstFit;

impl PlacementPolicy for FirstFit {
    fn name(&self) -> &'static str {
        "first-fit"
    }

    fn select(&self, nodes: &[WorkerNode], job: &Job) -> Option<usize> {
        nodes.iter().position(|n| n.can_accommodate(job))
    }

    fn description(&self) -> &'static str {
        "First Fit"
    }
}

/// Feasible node with the fewest available cores (tightest fit).
#[derive(Debug, Clone, Copy)]
pub struct BestFit;

impl PlacementPolicy for BestFit {
    fn name(&self) -> &'static str {
        "best-fit"
    }

    fn select(&self, nodes: &[WorkerNode], job: &Job) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (i, node) in nodes.iter().enumerate() {
            if !node.can_accommodate(job) {
                continue;
            }
            match best {
                Some(b) if nodes[b].available_cores() <= node.available_cores() => {}
                _ => best = Some(i),
            }
        }
        best
    }

    fn description(&self) -> &'static str {
        "Best Fit"
    }
}

/// Feasible node with the most available cores (loosest fit).
#[derive(Debug, Clone, Copy)]
pub struct WorstFit;

impl PlacementPolicy for WorstFit {
    fn name(&self) -> &'static str {
        "worst-fit"
    }

    fn select(&self, nodes: &[WorkerNode], job: &Job) -> Option<usize> {
        let mut worst: Option<usize> = None;
        for (i, node) in nodes.iter().enumerate() {
            if !node.can_accommodate(job) {
                continue;
            }
            match worst {
                Some(w) if nodes[w].available_cores() >= node.available_cores() => {}
                _ => worst = Some(i),
            }
        }
        worst
    }

    fn description(&self) -> &'static str {
        "Worst Fit"
    }
}
