//! Placement policy selection from user input.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

use super::{BestFit, FirstFit, PlacementPolicy, WorstFit};

/// The built-in placement policies.
///
/// Unrecognized selectors fall back to [`PlacementPolicyKind::FirstFit`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlacementPolicyKind {
    /// First Fit (choice 1).
    #[default]
    FirstFit,
    /// Best Fit (choice 2).
    BestFit,
    /// Worst Fit (choice 3).
    WorstFit,
}

impl PlacementPolicyKind {
    /// All kinds, in menu order.
    pub const ALL: [Self; 3] = [Self::FirstFit, Self::BestFit, Self::WorstFit];

    /// Maps a menu choice (1-3) to a kind, defaulting to first-fit.
    pub fn from_choice(choice: i64) -> Self {
        match choice {
            1 => Self::FirstFit,
            2 => Self::BestFit,
            3 => Self::WorstFit,
            other => {
                warn!(choice = other, "unknown placement policy choice, using first-fit");
                Self::default()
            }
        }
    }

    /// Parses a menu number or a policy name, defaulting to first-fit.
    pub fn from_selector(selector: &str) -> Self {
        let s = selector.trim();
        if let Ok(choice) = s.parse::<i64>() {
            return Self::from_choice(choice);
        }
        match s.to_ascii_lowercase().replace(['_', ' '], "-").as_str() {
            "first-fit" | "firstfit" | "ff" => Self::FirstFit,
            "best-fit" | "bestfit" | "bf" => Self::BestFit,
            "worst-fit" | "worstfit" | "wf" => Self::WorstFit,
            _ => {
                warn!(selector = s, "unknown placement policy, using first-fit");
                Self::default()
            }
        }
    }

    /// Menu number of this kind.
    pub fn choice(&self) -> i64 {
        match self {
            Self::FirstFit => 1,
            Self::BestFit => 2,
            Self::WorstFit => 3,
        }
    }

    /// The policy implementation for this kind.
    pub fn policy(&self) -> &'static dyn PlacementPolicy {
        match self {
            Self::FirstFit => &FirstFit,
            Self::BestFit => &BestFit,
            Self::WorstFit => &WorstFit,
        }
    }

    /// Human-readable name, as shown in the selection menu.
    pub fn label(&self) -> &'static str {
        self.policy().description()
    }
}

impl fmt::Display for PlacementPolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_choice() {
        assert_eq!(PlacementPolicyKind::from_choice(1), PlacementPolicyKind::FirstFit);
        assert_eq!(PlacementPolicyKind::from_choice(2), PlacementPolicyKind::BestFit);
        assert_eq!(PlacementPolicyKind::from_choice(3), PlacementPolicyKind::WorstFit);
        assert_eq!(PlacementPolicyKind::from_choice(7), PlacementPolicyKind::FirstFit);
    }

    #[test]
    fn test_from_selector() {
        assert_eq!(PlacementPolicyKind::from_selector("best_fit"), PlacementPolicyKind::BestFit);
        assert_eq!(PlacementPolicyKind::from_selector("Worst Fit"), PlacementPolicyKind::WorstFit);
        assert_eq!(PlacementPolicyKind::from_selector("3"), PlacementPolicyKind::WorstFit);
        assert_eq!(PlacementPolicyKind::from_selector("random"), PlacementPolicyKind::FirstFit);
        assert_eq!(PlacementPolicyKind::from_selector(""), PlacementPolicyKind::FirstFit);
    }

    #[test]
    fn test_policy_names() {
        assert_eq!(PlacementPolicyKind::FirstFit.policy().name(), "first-fit");
        assert_eq!(PlacementPolicyKind::BestFit.policy().name(), "best-fit");
        assert_eq!(PlacementPolicyKind::WorstFit.policy().name(), "worst-fit");
        assert_eq!(PlacementPolicyKind::BestFit.to_string(), "Best Fit");
    }

    #[test]
    fn test_choice_round_trip() {
        for kind in PlacementPolicyKind::ALL {
            assert_eq!(PlacementPolicyKind::from_choice(kind.choice()), kind);
        }
    }
}
