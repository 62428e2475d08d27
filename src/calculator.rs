use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, LlmModel};
use crate::compare::{compare_deployments, Recommendation};
use crate::memory::{estimate_memory, Quantization, UseCase};
use crate::selector::{select_gpus, GpuConfiguration};
use crate::system::{recommend_system, SystemSpec};
use crate::tco::cloud::{calculate_cloud_tco, CloudTco};
use crate::tco::onprem::{calculate_onprem_tco, OnPremTco};

/// Which deployment paths the caller cares about. Both paths are always
/// priced so the comparison can run; this only records intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeploymentType {
    OnPremises,
    CloudOnly,
    Hybrid,
}

impl DeploymentType {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "on-premises" | "on-prem" => Ok(DeploymentType::OnPremises),
            "cloud-only" | "cloud" => Ok(DeploymentType::CloudOnly),
            "hybrid" => Ok(DeploymentType::Hybrid),
            _ => Err(format!("Unknown deployment type: {}", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentType::OnPremises => "on-premises",
            DeploymentType::CloudOnly => "cloud-only",
            DeploymentType::Hybrid => "hybrid",
        }
    }
}

/// One calculation's validated inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    pub model_id: String,
    pub use_case: UseCase,
    pub quantization: Quantization,
    pub deployment_type: DeploymentType,
    pub time_horizon_months: u32,
    pub electricity_cost_per_kwh: f64,
    pub cloud_provider: String,
}

/// Everything one calculation produced. Constructed fresh per call and
/// owned by the caller; nothing is cached.
#[derive(Debug, Clone, Serialize)]
pub struct CalculationResult {
    pub model: LlmModel,
    pub required_memory_gb: f64,
    pub gpu_config: GpuConfiguration,
    pub onprem_tco: OnPremTco,
    pub cloud_tco: Option<CloudTco>,
    pub comparison: Recommendation,
    pub system: SystemSpec,
    pub quantization: Quantization,
    pub deployment_type: DeploymentType,
}

/// The calculation engine: a thin orchestrator over the pure component
/// functions, borrowing the read-only catalog.
pub struct Calculator<'a> {
    catalog: &'a Catalog,
}

impl<'a> Calculator<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Run the full chain: memory estimate, GPU selection, both TCO paths,
    /// comparison, and system recommendation.
    ///
    /// Unresolved model/provider ids and an empty GPU catalog are
    /// programmer errors (inputs are pre-validated upstream) and surface
    /// as Err rather than a degraded result.
    pub fn calculate(&self, request: &CalculationRequest) -> Result<CalculationResult, String> {
        let model = self
            .catalog
            .find_model(&request.model_id)
            .ok_or_else(|| format!("Unknown model id: {}", request.model_id))?;
        let provider = self
            .catalog
            .find_provider(&request.cloud_provider)
            .ok_or_else(|| format!("Unknown cloud provider: {}", request.cloud_provider))?;

        let required_memory_gb = estimate_memory(model, request.use_case, request.quantization);

        let gpu_config = select_gpus(required_memory_gb, &self.catalog.gpus)?;
        log::debug!(
            "{} needs {} GB; selected {}x {}",
            model.id,
            required_memory_gb,
            gpu_config.gpu_count,
            gpu_config.recommended.id
        );

        let onprem_tco = calculate_onprem_tco(
            &gpu_config,
            request.time_horizon_months,
            request.electricity_cost_per_kwh,
            self.catalog.onprem_costs.as_ref(),
        );

        let cloud_tco = calculate_cloud_tco(
            required_memory_gb,
            provider,
            request.time_horizon_months,
            self.catalog.cloud_costs.as_ref(),
        );

        let comparison =
            compare_deployments(&onprem_tco, cloud_tco.as_ref(), request.time_horizon_months);

        let system = recommend_system(&gpu_config, model);

        Ok(CalculationResult {
            model: model.clone(),
            required_memory_gb,
            gpu_config,
            onprem_tco,
            cloud_tco,
            comparison,
            system,
            quantization: request.quantization,
            deployment_type: request.deployment_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::DeploymentChoice;

    fn test_request(model_id: &str) -> CalculationRequest {
        CalculationRequest {
            model_id: model_id.to_string(),
            use_case: UseCase::Inference,
            quantization: Quantization::Fp16,
            deployment_type: DeploymentType::OnPremises,
            time_horizon_months: 36,
            electricity_cost_per_kwh: 0.12,
            cloud_provider: "testcloud".to_string(),
        }
    }

    #[test]
    fn test_full_calculation_chain() {
        let catalog = Catalog::test_default();
        let calculator = Calculator::new(&catalog);

        let result = calculator.calculate(&test_request("test-20b")).unwrap();

        assert_eq!(result.required_memory_gb, 40.0);
        assert_eq!(result.gpu_config.recommended.id, "big-80gb");
        assert_eq!(result.gpu_config.gpu_count, 1);
        assert!(result.cloud_tco.is_some());
        assert!(
            (result.onprem_tco.total
                - (result.onprem_tco.capex.total + result.onprem_tco.opex.total))
                .abs()
                < 1e-9
        );
        assert_eq!(result.system.cpu.cores, 8);
    }

    #[test]
    fn test_multi_gpu_chain() {
        let catalog = Catalog::test_default();
        let calculator = Calculator::new(&catalog);

        let result = calculator.calculate(&test_request("test-100b")).unwrap();

        assert_eq!(result.required_memory_gb, 200.0);
        assert!(result.gpu_config.multi_gpu);
        assert_eq!(result.gpu_config.gpu_count, 3);
        // 200GB fits the 8x A100 cloud instance
        assert!(result.cloud_tco.is_some());
    }

    #[test]
    fn test_unknown_model_is_error() {
        let catalog = Catalog::test_default();
        let calculator = Calculator::new(&catalog);

        let err = calculator.calculate(&test_request("missing")).unwrap_err();
        assert!(err.contains("Unknown model"));
    }

    #[test]
    fn test_unknown_provider_is_error() {
        let catalog = Catalog::test_default();
        let calculator = Calculator::new(&catalog);

        let mut request = test_request("test-20b");
        request.cloud_provider = "missing".to_string();
        let err = calculator.calculate(&request).unwrap_err();
        assert!(err.contains("Unknown cloud provider"));
    }

    #[test]
    fn test_breakeven_null_when_onprem_recommended() {
        let catalog = Catalog::test_default();
        let calculator = Calculator::new(&catalog);

        for model_id in ["test-20b", "test-100b"] {
            let result = calculator.calculate(&test_request(model_id)).unwrap();
            if result.comparison.recommendation == DeploymentChoice::OnPremises {
                assert!(result.comparison.breakeven_months.is_none());
            }
        }
    }

    #[test]
    fn test_result_serializes_to_json() {
        let catalog = Catalog::test_default();
        let calculator = Calculator::new(&catalog);

        let result = calculator.calculate(&test_request("test-20b")).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"required_memory_gb\":40.0"));
        assert!(json.contains("\"quantization\":\"fp16\""));
    }

    #[test]
    fn test_deployment_type_parsing() {
        assert_eq!(
            DeploymentType::from_str("on-premises").unwrap(),
            DeploymentType::OnPremises
        );
        assert_eq!(
            DeploymentType::from_str("cloud").unwrap(),
            DeploymentType::CloudOnly
        );
        assert_eq!(
            DeploymentType::from_str("Hybrid").unwrap(),
            DeploymentType::Hybrid
        );
        assert!(DeploymentType::from_str("colo").is_err());
    }
}
