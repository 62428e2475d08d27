use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A cloud provider's GPU instance offerings.
///
/// Instances are keyed by instance-type name in a BTreeMap so iteration
/// order is deterministic across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudProvider {
    /// Display name (e.g., "Amazon Web Services")
    pub name: String,

    /// Instance-type name -> spec
    pub instances: BTreeMap<String, InstanceSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceSpec {
    /// GPU type string as listed by the provider (e.g., "A100", "H100")
    pub gpu: String,

    /// Number of GPUs in the instance
    pub gpu_count: u32,

    /// On-demand hourly rate in USD
    pub hourly_rate: f64,
}
