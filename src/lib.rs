pub mod calculator;
pub mod catalog;
pub mod compare;
pub mod memory;
pub mod selector;
pub mod system;
pub mod tco;
pub mod validation;

// Re-export key types
pub use calculator::{CalculationRequest, CalculationResult, Calculator, DeploymentType};
pub use catalog::Catalog;
pub use compare::{compare_deployments, DeploymentChoice, Recommendation};
pub use memory::{estimate_memory, Quantization, UseCase};
pub use selector::{select_gpus, GpuConfiguration};
pub use system::{recommend_system, SystemSpec};
pub use tco::cloud::{calculate_cloud_tco, CloudTco};
pub use tco::onprem::{calculate_onprem_tco, OnPremTco};
pub use tco::scale::ScaleTier;
