use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmModel {
    /// Stable identifier used in requests (e.g., "llama-3-70b")
    pub id: String,

    /// Display name
    pub name: String,

    /// Parameter count in billions
    pub parameters_b: f64,

    /// Model family/category (e.g., "open-source", "code")
    pub category: String,

    /// Required accelerator memory in GB, keyed by "{use_case}_{precision}"
    /// (e.g., "inference_fp16", "training_int8")
    pub memory_requirements: HashMap<String, f64>,

    #[serde(default)]
    pub description: String,
}
