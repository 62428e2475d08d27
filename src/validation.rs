use serde::Serialize;

use crate::calculator::{CalculationRequest, CalculationResult};
use crate::catalog::{Catalog, LlmModel};
use crate::compare::DeploymentChoice;
use crate::memory::{uses_fallback, Quantization, UseCase};

/// A rejected input field with a human-readable message.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Outcome of input validation: hard errors block the calculation, soft
/// warnings do not.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<FieldError>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate a calculation request against the catalog.
///
/// Failures come back as field-level messages, never as errors; the
/// calculation must not run while `is_valid()` is false.
pub fn validate_request(request: &CalculationRequest, catalog: &Catalog) -> ValidationReport {
    let mut report = ValidationReport::default();

    if request.model_id.is_empty() {
        report.errors.push(FieldError {
            field: "model",
            message: "Please select an LLM model".to_string(),
        });
    } else if catalog.find_model(&request.model_id).is_none() {
        report.errors.push(FieldError {
            field: "model",
            message: format!("Unknown model id: {}", request.model_id),
        });
    }

    if catalog.find_provider(&request.cloud_provider).is_none() {
        report.errors.push(FieldError {
            field: "provider",
            message: format!("Unknown cloud provider: {}", request.cloud_provider),
        });
    }

    if request.time_horizon_months < 1 {
        report.errors.push(FieldError {
            field: "months",
            message: "Time horizon must be at least 1 month".to_string(),
        });
    } else if request.time_horizon_months > 120 {
        report.errors.push(FieldError {
            field: "months",
            message: "Time horizon cannot exceed 120 months (10 years)".to_string(),
        });
    }

    if request.electricity_cost_per_kwh < 0.0 || !request.electricity_cost_per_kwh.is_finite() {
        report.errors.push(FieldError {
            field: "electricity_cost",
            message: "Electricity cost must be a non-negative number".to_string(),
        });
    } else if request.electricity_cost_per_kwh > 1.0 {
        // Soft upper bound; unusual but not impossible
        report.warnings.push(format!(
            "Electricity cost of ${:.2}/kWh seems unusually high",
            request.electricity_cost_per_kwh
        ));
    }

    report
}

/// Warnings about the model/use-case/quantization combination, produced
/// before the calculation runs.
pub fn compatibility_warnings(
    model: &LlmModel,
    use_case: UseCase,
    quantization: Quantization,
) -> Vec<String> {
    let mut warnings = Vec::new();

    if uses_fallback(model, use_case, quantization) {
        warnings.push(format!(
            "{} quantization may not be optimized for {}; using FP16 as fallback",
            quantization.as_str().to_uppercase(),
            model.name
        ));
    }

    if use_case == UseCase::Training && model.parameters_b > 30.0 {
        warnings.push(format!(
            "Training large models ({}B parameters) requires significant compute and time; consider fine-tuning instead",
            model.parameters_b
        ));
    }

    if use_case == UseCase::Inference && model.parameters_b > 100.0 {
        warnings.push(format!(
            "Very large models ({}B parameters) may have high latency; consider smaller models for real-time applications",
            model.parameters_b
        ));
    }

    warnings
}

/// Warnings derived from a finished calculation.
pub fn result_warnings(result: &CalculationResult) -> Vec<String> {
    let mut warnings = Vec::new();
    let config = &result.gpu_config;

    if config.multi_gpu {
        warnings.push(format!(
            "This configuration requires {} GPUs; consider quantization to reduce memory requirements",
            config.gpu_count
        ));
    }

    let total_power = config.total_gpu_power_watts();
    if total_power > 1000.0 {
        warnings.push(format!(
            "High power consumption ({:.0}W); ensure adequate power supply and cooling",
            total_power
        ));
    }

    if config.hardware_cost() > 50_000.0 {
        warnings.push(format!(
            "High hardware cost (${:.0}); consider cloud deployment for shorter projects",
            config.hardware_cost()
        ));
    }

    let utilization = result.required_memory_gb / config.total_vram_gb();
    if utilization < 0.5 {
        warnings.push(format!(
            "Low memory utilization ({:.1}%); consider a smaller GPU or running multiple models",
            utilization * 100.0
        ));
    }

    warnings
}

/// An actionable cost/configuration suggestion.
#[derive(Debug, Clone, Serialize)]
pub struct Suggestion {
    pub title: String,
    pub message: String,
}

/// Suggestions for reducing cost or improving the configuration.
pub fn optimization_suggestions(result: &CalculationResult) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    if result.required_memory_gb > 24.0 && result.quantization == Quantization::Fp16 {
        suggestions.push(Suggestion {
            title: "Consider quantization".to_string(),
            message: "INT8 or INT4 quantization could reduce memory requirements by 50-75% with minimal quality loss"
                .to_string(),
        });
    }

    if result.gpu_config.multi_gpu && result.gpu_config.gpu_count > 4 {
        suggestions.push(Suggestion {
            title: "Consider model sharding".to_string(),
            message: "Large multi-GPU deployments benefit from model sharding to optimize memory usage across GPUs"
                .to_string(),
        });
    }

    if result.comparison.recommendation == DeploymentChoice::Cloud {
        suggestions.push(Suggestion {
            title: "Cloud deployment recommended".to_string(),
            message: result.comparison.reason.clone(),
        });
    }

    if result.model.parameters_b > 20.0 {
        suggestions.push(Suggestion {
            title: "Consider smaller models".to_string(),
            message: "7B or 13B variants often provide most of the quality at a fraction of the resource cost"
                .to_string(),
        });
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::{Calculator, DeploymentType};

    fn valid_request() -> CalculationRequest {
        CalculationRequest {
            model_id: "test-20b".to_string(),
            use_case: UseCase::Inference,
            quantization: Quantization::Fp16,
            deployment_type: DeploymentType::OnPremises,
            time_horizon_months: 36,
            electricity_cost_per_kwh: 0.12,
            cloud_provider: "testcloud".to_string(),
        }
    }

    #[test]
    fn test_valid_request_passes() {
        let catalog = Catalog::test_default();
        let report = validate_request(&valid_request(), &catalog);
        assert!(report.is_valid());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_time_horizon_bounds() {
        let catalog = Catalog::test_default();
        let mut request = valid_request();

        for months in [1, 120] {
            request.time_horizon_months = months;
            assert!(validate_request(&request, &catalog).is_valid());
        }
        for months in [0, 121] {
            request.time_horizon_months = months;
            let report = validate_request(&request, &catalog);
            assert!(!report.is_valid());
            assert_eq!(report.errors[0].field, "months");
        }
    }

    #[test]
    fn test_electricity_cost_bounds() {
        let catalog = Catalog::test_default();
        let mut request = valid_request();

        request.electricity_cost_per_kwh = 0.0;
        assert!(validate_request(&request, &catalog).is_valid());

        request.electricity_cost_per_kwh = 1.0;
        let report = validate_request(&request, &catalog);
        assert!(report.is_valid());
        assert!(report.warnings.is_empty());

        // Above $1/kWh is a soft warning, not an error
        request.electricity_cost_per_kwh = 1.01;
        let report = validate_request(&request, &catalog);
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);

        request.electricity_cost_per_kwh = -0.01;
        assert!(!validate_request(&request, &catalog).is_valid());
    }

    #[test]
    fn test_unknown_ids_rejected() {
        let catalog = Catalog::test_default();
        let mut request = valid_request();
        request.model_id = "missing".to_string();
        request.cloud_provider = "missing".to_string();

        let report = validate_request(&request, &catalog);
        assert_eq!(report.errors.len(), 2);
    }

    #[test]
    fn test_fallback_warning() {
        let catalog = Catalog::test_default();
        let model = catalog.find_model("test-20b").unwrap();

        let warnings = compatibility_warnings(model, UseCase::Inference, Quantization::Int4);
        assert!(warnings.iter().any(|w| w.contains("fallback")));

        let warnings = compatibility_warnings(model, UseCase::Inference, Quantization::Int8);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_result_warnings_for_multi_gpu() {
        let catalog = Catalog::test_default();
        let calculator = Calculator::new(&catalog);
        let mut request = valid_request();
        request.model_id = "test-100b".to_string();

        let result = calculator.calculate(&request).unwrap();
        let warnings = result_warnings(&result);
        // 3 GPUs and 2100W of draw both warrant a warning
        assert!(warnings.iter().any(|w| w.contains("3 GPUs")));
        assert!(warnings.iter().any(|w| w.contains("power")));
    }

    #[test]
    fn test_suggestions_for_large_fp16_model() {
        let catalog = Catalog::test_default();
        let calculator = Calculator::new(&catalog);
        let result = calculator.calculate(&valid_request()).unwrap();

        let suggestions = optimization_suggestions(&result);
        assert!(suggestions
            .iter()
            .any(|s| s.title.contains("quantization")));
    }
}
