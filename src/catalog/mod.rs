pub mod cloud;
pub mod costs;
pub mod gpu;
pub mod model;

pub use cloud::{CloudProvider, InstanceSpec};
pub use costs::{CloudOpCostTables, OnPremCostTables};
pub use gpu::GpuSpec;
pub use model::LlmModel;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// All reference data the calculators run against.
///
/// Loaded once at startup and treated as read-only for the process
/// lifetime; every calculation borrows it immutably.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub models: Vec<LlmModel>,
    pub gpus: Vec<GpuSpec>,
    /// Provider id -> provider (e.g., "aws", "gcp")
    pub cloud_providers: BTreeMap<String, CloudProvider>,
    /// On-prem cost tables; without them the on-prem calculator runs in
    /// basic mode (power + maintenance only)
    #[serde(default)]
    pub onprem_costs: Option<OnPremCostTables>,
    /// Cloud operational cost tables; without them cloud TCO is compute-only
    #[serde(default)]
    pub cloud_costs: Option<CloudOpCostTables>,
}

impl Catalog {
    /// Load the catalog from a TOML file and validate it.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)?;
        let catalog: Catalog = toml::from_str(&contents)?;
        catalog.validate()?;
        log::debug!(
            "loaded catalog: {} models, {} GPUs, {} cloud providers",
            catalog.models.len(),
            catalog.gpus.len(),
            catalog.cloud_providers.len()
        );
        Ok(catalog)
    }

    /// An empty GPU or model list is a configuration error, not a condition
    /// the calculators can degrade around.
    fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        if self.gpus.is_empty() {
            return Err("catalog contains no GPUs".into());
        }
        if self.models.is_empty() {
            return Err("catalog contains no models".into());
        }
        for gpu in &self.gpus {
            if gpu.vram_gb <= 0.0 {
                return Err(format!("GPU {} has non-positive VRAM", gpu.id).into());
            }
        }
        Ok(())
    }

    pub fn find_model(&self, id: &str) -> Option<&LlmModel> {
        self.models.iter().find(|m| m.id == id)
    }

    pub fn find_provider(&self, id: &str) -> Option<&CloudProvider> {
        self.cloud_providers.get(id)
    }

    /// Get a default catalog for testing
    #[cfg(test)]
    pub fn test_default() -> Self {
        use costs::{
            CloudHiddenCosts, ComplianceCosts, DatacenterRates, LineScaling, OnPremHiddenCosts,
            OnPremOperational, OnPremStaffing, OperationalLine, SalariedRole, ScalingFactors,
        };
        use std::collections::HashMap;

        let mut mid_memory = HashMap::new();
        mid_memory.insert("inference_fp16".to_string(), 40.0);
        mid_memory.insert("inference_int8".to_string(), 20.0);
        mid_memory.insert("training_fp16".to_string(), 160.0);

        let mut large_memory = HashMap::new();
        large_memory.insert("inference_fp16".to_string(), 200.0);

        let models = vec![
            LlmModel {
                id: "test-20b".to_string(),
                name: "Test 20B".to_string(),
                parameters_b: 20.0,
                category: "open-source".to_string(),
                memory_requirements: mid_memory,
                description: String::new(),
            },
            LlmModel {
                id: "test-100b".to_string(),
                name: "Test 100B".to_string(),
                parameters_b: 100.0,
                category: "open-source".to_string(),
                memory_requirements: large_memory,
                description: String::new(),
            },
        ];

        let gpus = vec![
            GpuSpec {
                id: "big-80gb".to_string(),
                name: "Big 80GB".to_string(),
                vram_gb: 80.0,
                price_usd: 10_000.0,
                power_watts: 700.0,
                architecture: "TestArch".to_string(),
                memory_bandwidth_gbps: 3000.0,
                category: "datacenter".to_string(),
            },
            GpuSpec {
                id: "small-24gb".to_string(),
                name: "Small 24GB".to_string(),
                vram_gb: 24.0,
                price_usd: 1_500.0,
                power_watts: 350.0,
                architecture: "TestArch".to_string(),
                memory_bandwidth_gbps: 1000.0,
                category: "consumer".to_string(),
            },
        ];

        let mut instances = BTreeMap::new();
        instances.insert(
            "gpu.small".to_string(),
            InstanceSpec {
                gpu: "V100".to_string(),
                gpu_count: 1,
                hourly_rate: 3.0,
            },
        );
        instances.insert(
            "gpu.large".to_string(),
            InstanceSpec {
                gpu: "A100".to_string(),
                gpu_count: 8,
                hourly_rate: 30.0,
            },
        );

        let mut cloud_providers = BTreeMap::new();
        cloud_providers.insert(
            "testcloud".to_string(),
            CloudProvider {
                name: "Test Cloud".to_string(),
                instances,
            },
        );

        let onprem_costs = OnPremCostTables {
            datacenter: DatacenterRates {
                rack_space_monthly: 800.0,
                power_per_kw: 1200.0,
                cooling_per_kw: 900.0,
                network_base: 3000.0,
                network_per_port: 250.0,
            },
            staffing: OnPremStaffing {
                ml_engineer: SalariedRole {
                    annual_salary: 160_000.0,
                    benefits_pct: 0.30,
                },
                system_administrator: SalariedRole {
                    annual_salary: 95_000.0,
                    benefits_pct: 0.30,
                },
                network_engineer_allocation: 15_000.0,
                on_call_monthly: 2_500.0,
            },
            operational: OnPremOperational {
                power_facility_monthly: 1_500.0,
                backup_dr_pct: 0.05,
                monitoring_tooling_annual: 12_000.0,
                compliance_pct: 0.03,
            },
            hidden: OnPremHiddenCosts {
                hardware_refresh_pct: 0.10,
                downtime_redundancy_pct: 0.05,
                training_per_person: 5_000.0,
                vendor_support_pct: 0.08,
            },
            scaling: ScalingFactors::default(),
        };

        let mut cloud_staffing = BTreeMap::new();
        cloud_staffing.insert(
            "devops_engineer".to_string(),
            costs::AllocatedRole {
                annual_salary: 144_000.0,
                benefits_pct: 0.25,
                allocation_pct: 0.5,
            },
        );

        let cloud_costs = CloudOpCostTables {
            staffing: cloud_staffing,
            operational: vec![
                OperationalLine {
                    name: "monitoring".to_string(),
                    monthly_cost: 400.0,
                    scaling: LineScaling::PerGpu,
                },
                OperationalLine {
                    name: "logging".to_string(),
                    monthly_cost: 250.0,
                    scaling: LineScaling::Fixed,
                },
            ],
            compliance: ComplianceCosts {
                audit_annual: 15_000.0,
                legal_annual: 8_000.0,
                optimization_monthly: 1_200.0,
            },
            hidden: CloudHiddenCosts {
                data_transfer_pct: 0.08,
                scaling_inefficiency_pct: 0.12,
                vendor_lock_in_pct: 0.05,
            },
            scaling: ScalingFactors::default(),
        };

        Catalog {
            models,
            gpus,
            cloud_providers,
            onprem_costs: Some(onprem_costs),
            cloud_costs: Some(cloud_costs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_lookups() {
        let catalog = Catalog::test_default();
        assert!(catalog.find_model("test-20b").is_some());
        assert!(catalog.find_model("missing").is_none());
        assert!(catalog.find_provider("testcloud").is_some());
        assert!(catalog.find_provider("missing").is_none());
    }

    #[test]
    fn test_empty_gpu_catalog_rejected() {
        let mut catalog = Catalog::test_default();
        catalog.gpus.clear();
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_empty_model_catalog_rejected() {
        let mut catalog = Catalog::test_default();
        catalog.models.clear();
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_catalog_parses_from_toml() {
        let toml_src = r#"
            [[models]]
            id = "tiny-7b"
            name = "Tiny 7B"
            parameters_b = 7.0
            category = "open-source"
            description = "A small test model"

            [models.memory_requirements]
            inference_fp16 = 14.0
            inference_int8 = 7.0

            [[gpus]]
            id = "card-24gb"
            name = "Card 24GB"
            vram_gb = 24.0
            price_usd = 1600.0
            power_watts = 450.0
            architecture = "TestArch"
            memory_bandwidth_gbps = 1008.0
            category = "consumer"

            [cloud_providers.aws]
            name = "Amazon Web Services"

            [cloud_providers.aws.instances."p3.2xlarge"]
            gpu = "V100"
            gpu_count = 1
            hourly_rate = 3.06
        "#;

        let catalog: Catalog = toml::from_str(toml_src).unwrap();
        catalog.validate().unwrap();

        assert_eq!(catalog.models.len(), 1);
        assert_eq!(
            catalog.models[0].memory_requirements["inference_fp16"],
            14.0
        );
        assert_eq!(catalog.gpus[0].vram_gb, 24.0);
        let aws = catalog.find_provider("aws").unwrap();
        assert_eq!(aws.instances["p3.2xlarge"].gpu_count, 1);
        assert!(catalog.onprem_costs.is_none());
        assert!(catalog.cloud_costs.is_none());
    }

    #[test]
    fn test_catalog_round_trips_through_toml() {
        use costs::LineScaling;

        let catalog = Catalog::test_default();
        let serialized = toml::to_string(&catalog).unwrap();
        let parsed: Catalog = toml::from_str(&serialized).unwrap();
        parsed.validate().unwrap();

        assert_eq!(parsed.models.len(), 2);
        assert_eq!(
            parsed.models[0].memory_requirements["inference_fp16"],
            40.0
        );
        assert_eq!(parsed.gpus[1].vram_gb, 24.0);
        assert_eq!(
            parsed.cloud_providers["testcloud"].instances["gpu.large"].hourly_rate,
            30.0
        );

        let onprem = parsed.onprem_costs.as_ref().unwrap();
        assert_eq!(onprem.staffing.ml_engineer.annual_salary, 160_000.0);
        assert_eq!(onprem.datacenter.network_per_port, 250.0);

        let cloud = parsed.cloud_costs.as_ref().unwrap();
        assert_eq!(cloud.operational[0].scaling, LineScaling::PerGpu);
        assert_eq!(cloud.operational[1].scaling, LineScaling::Fixed);
        assert_eq!(cloud.compliance.audit_annual, 15_000.0);
    }

    #[test]
    fn test_shipped_catalog_loads() {
        use costs::LineScaling;

        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/catalog.toml");
        let catalog = Catalog::from_file(path).unwrap();

        assert!(catalog.find_model("llama-3-70b").is_some());
        assert!(catalog.find_provider("aws").is_some());

        let onprem = catalog.onprem_costs.as_ref().unwrap();
        assert_eq!(onprem.scaling.medium.staffing, 1.25);
        assert_eq!(onprem.staffing.on_call_monthly, 2_500.0);

        let cloud = catalog.cloud_costs.as_ref().unwrap();
        assert_eq!(cloud.scaling.large.compliance, 1.5);
        assert_eq!(cloud.operational[0].scaling, LineScaling::PerGpu);
    }
}
