//! Run configuration (TOML).
//!
//! ```toml
//! [cluster]
//! nodes = 128
//! cores_per_node = 24
//! memory_per_node_gb = 64
//! tenancy = "shared"
//!
//! [policy]
//! queue = "fcfs"
//! placement = "first-fit"
//!
//! [limits]
//! max_steps = 10000000
//!
//! [report]
//! path = "worker_node_utilization.csv"
//! ```
//!
//! Every section and field is optional.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::dispatching::QueuePolicyKind;
use crate::error::ConfigError;
use crate::models::{
    NodeCapacity, TenancyMode, Ticks, WorkerNode, DEFAULT_NODE_CORES, DEFAULT_NODE_MEMORY_GB,
};
use crate::placement::PlacementPolicyKind;
use crate::simulation::{SimLimits, DEFAULT_MAX_STEPS};

/// Default number of worker nodes.
pub const DEFAULT_NODE_COUNT: u32 = 128;

/// Default report file name.
pub const DEFAULT_REPORT_PATH: &str = "worker_node_utilization.csv";

/// Complete run configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Node pool shape.
    pub cluster: ClusterConfig,
    /// Queue and placement selectors.
    pub policy: PolicyConfig,
    /// Engine bounds.
    pub limits: LimitsConfig,
    /// Report output.
    pub report: ReportConfig,
}

/// `[cluster]`: a pool of identical worker nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Number of nodes (ids 1..=nodes).
    pub nodes: u32,
    /// Cores per node.
    pub cores_per_node: u32,
    /// Memory per node (GB).
    pub memory_per_node_gb: u32,
    /// Whether a node may host several jobs at once.
    pub tenancy: TenancyMode,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            nodes: DEFAULT_NODE_COUNT,
            cores_per_node: DEFAULT_NODE_CORES,
            memory_per_node_gb: DEFAULT_NODE_MEMORY_GB,
            tenancy: TenancyMode::Shared,
        }
    }
}

/// Policy selectors. Stored as strings so unknown values fall back to the
/// defaults instead of failing the whole config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Queue policy: `1`-`3`, `fcfs`, `sjf` or `sdf`.
    pub queue: String,
    /// Placement policy: `1`-`3`, `first-fit`, `best-fit` or `worst-fit`.
    pub placement: String,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            queue: "fcfs".to_string(),
            placement: "first-fit".to_string(),
        }
    }
}

/// `[limits]`: see [`SimLimits`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum number of engine steps.
    pub max_steps: u64,
    /// Simulated-time ceiling. Absent = unbounded.
    pub max_time: Option<Ticks>,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            max_time: None,
        }
    }
}

/// `[report]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// CSV report destination.
    pub path: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_REPORT_PATH),
        }
    }
}

impl SimConfig {
    /// Loads and validates a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Rejects pools that could never run anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cluster.nodes == 0 {
            return Err(ConfigError::Invalid {
                field: "cluster.nodes",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.cluster.cores_per_node == 0 {
            return Err(ConfigError::Invalid {
                field: "cluster.cores_per_node",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.cluster.memory_per_node_gb == 0 {
            return Err(ConfigError::Invalid {
                field: "cluster.memory_per_node_gb",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.limits.max_steps == 0 {
            return Err(ConfigError::Invalid {
                field: "limits.max_steps",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Per-node capacity.
    pub fn capacity(&self) -> NodeCapacity {
        NodeCapacity::new(self.cluster.cores_per_node, self.cluster.memory_per_node_gb)
    }

    /// Builds the idle node pool described by `[cluster]`.
    pub fn node_pool(&self) -> Vec<WorkerNode> {
        WorkerNode::pool(self.cluster.nodes, self.capacity(), self.cluster.tenancy)
    }

    /// Queue policy for `[policy].queue`, FCFS if unrecognized.
    pub fn queue_policy(&self) -> QueuePolicyKind {
        QueuePolicyKind::from_selector(&self.policy.queue)
    }

    /// Placement policy for `[policy].placement`, first-fit if unrecognized.
    pub fn placement_policy(&self) -> PlacementPolicyKind {
        PlacementPolicyKind::from_selector(&self.policy.placement)
    }

    /// Engine limits from `[limits]`.
    pub fn limits(&self) -> SimLimits {
        SimLimits {
            max_steps: self.limits.max_steps,
            max_time: self.limits.max_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimConfig::default();
        assert_eq!(config.cluster.nodes, 128);
        assert_eq!(config.capacity(), NodeCapacity::new(24, 64));
        assert_eq!(config.queue_policy(), QueuePolicyKind::Fcfs);
        assert_eq!(config.placement_policy(), PlacementPolicyKind::FirstFit);
        assert_eq!(config.report.path, PathBuf::from("worker_node_utilization.csv"));
        assert_eq!(config.node_pool().len(), 128);
    }

    #[test]
    fn test_parse_empty() {
        let config = SimConfig::from_toml_str("").unwrap();
        assert_eq!(config, SimConfig::default());
    }

    #[test]
    fn test_parse_partial() {
        let toml_str = r#"
[cluster]
nodes = 4
tenancy = "exclusive"

[policy]
placement = "best-fit"

[limits]
max_time = 500
"#;
        let config = SimConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.cluster.nodes, 4);
        assert_eq!(config.cluster.cores_per_node, 24);
        assert_eq!(config.cluster.tenancy, TenancyMode::Exclusive);
        assert_eq!(config.placement_policy(), PlacementPolicyKind::BestFit);
        assert_eq!(config.queue_policy(), QueuePolicyKind::Fcfs);
        assert_eq!(config.limits().max_time, Some(500));
        assert!(config
            .node_pool()
            .iter()
            .all(|n| n.tenancy() == TenancyMode::Exclusive));
    }

    #[test]
    fn test_unknown_policy_falls_back() {
        let config = SimConfig::from_toml_str("[policy]\nqueue = \"lottery\"\n").unwrap();
        assert_eq!(config.queue_policy(), QueuePolicyKind::Fcfs);
    }

    #[test]
    fn test_zero_nodes_rejected() {
        let err = SimConfig::from_toml_str("[cluster]\nnodes = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "cluster.nodes", .. }));
    }

    #[test]
    fn test_bad_toml_rejected() {
        assert!(matches!(
            SimConfig::from_toml_str("[cluster\nnodes = 1"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_round_trip() {
        let mut config = SimConfig::default();
        config.cluster.nodes = 8;
        config.policy.queue = "sjf".to_string();
        let toml_str = config.to_toml_string().unwrap();
        assert!(toml_str.contains("nodes = 8"));
        assert_eq!(SimConfig::from_toml_str(&toml_str).unwrap(), config);
    }

    #[test]
    fn test_from_missing_file() {
        let err = SimConfig::from_file(Path::new("/nonexistent/u-batchsim.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
