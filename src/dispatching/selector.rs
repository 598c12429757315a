//! Queue policy selection from user input.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

use super::{rules, QueueOrder};

/// The built-in queue disciplines.
///
/// Selected once per run. Unrecognized selectors fall back to
/// [`QueuePolicyKind::Fcfs`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QueuePolicyKind {
    /// First Come First Served (choice 1).
    #[default]
    Fcfs,
    /// Smallest Job First (choice 2).
    SmallestJobFirst,
    /// Short Duration First (choice 3).
    ShortDurationFirst,
}

impl QueuePolicyKind {
    /// All kinds, in menu order.
    pub const ALL: [Self; 3] = [Self::Fcfs, Self::SmallestJobFirst, Self::ShortDurationFirst];

    /// Maps a menu choice (1-3) to a kind, defaulting to FCFS.
    pub fn from_choice(choice: i64) -> Self {
        match choice {
            1 => Self::Fcfs,
            2 => Self::SmallestJobFirst,
            3 => Self::ShortDurationFirst,
            other => {
                warn!(choice = other, "unknown queue policy choice, using FCFS");
                Self::default()
            }
        }
    }

    /// Parses a menu number or a policy name, defaulting to FCFS.
    pub fn from_selector(selector: &str) -> Self {
        let s = selector.trim();
        if let Ok(choice) = s.parse::<i64>() {
            return Self::from_choice(choice);
        }
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "fcfs" | "fifo" | "first-come-first-served" => Self::Fcfs,
            "sjf" | "smallest-job-first" => Self::SmallestJobFirst,
            "sdf" | "spt" | "short-duration-first" | "shortest-duration-first" => {
                Self::ShortDurationFirst
            }
            _ => {
                warn!(selector = s, "unknown queue policy, using FCFS");
                Self::default()
            }
        }
    }

    /// Menu number of this kind.
    pub fn choice(&self) -> i64 {
        match self {
            Self::Fcfs => 1,
            Self::SmallestJobFirst => 2,
            Self::ShortDurationFirst => 3,
        }
    }

    /// Builds the queue order for this kind.
    pub fn order(&self) -> QueueOrder {
        match self {
            Self::Fcfs => QueueOrder::new(rules::Fcfs),
            Self::SmallestJobFirst => QueueOrder::new(rules::SmallestJobFirst),
            Self::ShortDurationFirst => QueueOrder::new(rules::ShortDurationFirst),
        }
    }

    /// Human-readable name, as shown in the selection menu.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Fcfs => "FCFS",
            Self::SmallestJobFirst => "Smallest Job First",
            Self::ShortDurationFirst => "Short Duration First",
        }
    }
}

impl fmt::Display for QueuePolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
