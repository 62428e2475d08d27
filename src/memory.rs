use serde::{Deserialize, Serialize};

use crate::catalog::LlmModel;

/// What the deployment is for; drives which memory-table entries apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UseCase {
    Inference,
    Training,
}

impl UseCase {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "inference" => Ok(UseCase::Inference),
            "training" => Ok(UseCase::Training),
            _ => Err(format!("Unknown use case: {}", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UseCase::Inference => "inference",
            UseCase::Training => "training",
        }
    }
}

/// Numeric precision of the deployed weights
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quantization {
    Fp16,
    Int8,
    Int4,
}

impl Quantization {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "fp16" => Ok(Quantization::Fp16),
            "int8" => Ok(Quantization::Int8),
            "int4" => Ok(Quantization::Int4),
            _ => Err(format!("Unknown quantization: {}", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Quantization::Fp16 => "fp16",
            Quantization::Int8 => "int8",
            Quantization::Int4 => "int4",
        }
    }
}

/// Required accelerator memory in GB for a model at the given use case and
/// quantization.
///
/// Two-tier lookup: the exact "{use_case}_{quantization}" entry first, then
/// the fp16 entry for the same use case. Returns 0.0 when the table has no
/// entry for the use case at all; callers must treat 0.0 as "unknown", not
/// "free".
pub fn estimate_memory(model: &LlmModel, use_case: UseCase, quantization: Quantization) -> f64 {
    let exact = format!("{}_{}", use_case.as_str(), quantization.as_str());
    if let Some(&gb) = model.memory_requirements.get(&exact) {
        return gb;
    }
    let fallback = format!("{}_fp16", use_case.as_str());
    model
        .memory_requirements
        .get(&fallback)
        .copied()
        .unwrap_or(0.0)
}

/// True when the exact memory-table entry is missing and the estimate came
/// from the fp16 fallback (or no entry at all). Surfaced as a warning.
pub fn uses_fallback(model: &LlmModel, use_case: UseCase, quantization: Quantization) -> bool {
    let exact = format!("{}_{}", use_case.as_str(), quantization.as_str());
    !model.memory_requirements.contains_key(&exact)
}
