use serde::{Deserialize, Serialize};

/// Deployment-size bucket driving scale-dependent cost multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleTier {
    Small,
    Medium,
    Large,
}

impl ScaleTier {
    /// Small up to 4 GPUs, large from 17 GPUs, medium in between.
    pub fn from_gpu_count(count: u32) -> Self {
        if count <= 4 {
            ScaleTier::Small
        } else if count >= 17 {
            ScaleTier::Large
        } else {
            ScaleTier::Medium
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScaleTier::Small => "small",
            ScaleTier::Medium => "medium",
            ScaleTier::Large => "large",
        }
    }
}
