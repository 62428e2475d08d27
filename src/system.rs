use serde::Serialize;

use crate::catalog::LlmModel;
use crate::selector::GpuConfiguration;

#[derive(Debug, Clone, Serialize)]
pub struct CpuRecommendation {
    pub cores: u32,
    pub recommendation: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MemoryRecommendation {
    pub total_gb: u32,
    pub kind: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StorageRecommendation {
    pub capacity_gb: u32,
    pub kind: String,
}

/// Companion host recommendations derived from the GPU configuration.
#[derive(Debug, Clone, Serialize)]
pub struct SystemSpec {
    pub cpu: CpuRecommendation,
    pub memory: MemoryRecommendation,
    pub storage: StorageRecommendation,
    pub networking: String,
    pub cooling: String,
}

/// Derive CPU/RAM/storage/networking/cooling recommendations for a GPU
/// configuration. Purely derived; no failure modes.
pub fn recommend_system(config: &GpuConfiguration, model: &LlmModel) -> SystemSpec {
    // At least 8 CPU cores per GPU
    let cores = 8.max(config.gpu_count * 8);
    let cpu_recommendation = if cores <= 16 {
        "Intel Xeon Silver or AMD EPYC 7003"
    } else {
        "Intel Xeon Gold or AMD EPYC 7004"
    };

    // At least 32GB of system RAM per GPU
    let total_gb = 64.max(config.gpu_count * 32);

    // 10GB per billion parameters, 1TB floor
    let capacity_gb = (model.parameters_b * 10.0).max(1000.0).ceil() as u32;

    let networking = if config.gpu_count > 1 {
        "InfiniBand or high-speed Ethernet for multi-GPU communication"
    } else {
        "Standard Gigabit Ethernet"
    };

    let cooling = if config.gpu_count > 2 {
        "Enhanced cooling solution required"
    } else {
        "Standard server cooling sufficient"
    };

    SystemSpec {
        cpu: CpuRecommendation {
            cores,
            recommendation: cpu_recommendation.to_string(),
        },
        memory: MemoryRecommendation {
            total_gb,
            kind: "DDR4-3200 or DDR5-4800 ECC".to_string(),
        },
        storage: StorageRecommendation {
            capacity_gb,
            kind: "NVMe SSD for model storage and fast I/O".to_string(),
        },
        networking: networking.to_string(),
        cooling: cooling.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::selector::select_gpus;

    #[test]
    fn test_single_gpu_system() {
        let catalog = Catalog::test_default();
        let config = select_gpus(40.0, &catalog.gpus).unwrap();
        let model = catalog.find_model("test-20b").unwrap();

        let spec = recommend_system(&config, model);
        assert_eq!(spec.cpu.cores, 8);
        assert!(spec.cpu.recommendation.contains("Silver"));
        assert_eq!(spec.memory.total_gb, 64);
        // 20B parameters -> 200GB, below the 1TB floor
        assert_eq!(spec.storage.capacity_gb, 1000);
        assert!(spec.networking.contains("Gigabit"));
        assert!(spec.cooling.contains("Standard"));
    }

    #[test]
    fn test_multi_gpu_system() {
        let catalog = Catalog::test_default();
        let config = select_gpus(200.0, &catalog.gpus).unwrap();
        assert_eq!(config.gpu_count, 3);
        let model = catalog.find_model("test-100b").unwrap();

        let spec = recommend_system(&config, model);
        // 3 GPUs: 24 cores crosses the 16-core tier boundary
        assert_eq!(spec.cpu.cores, 24);
        assert!(spec.cpu.recommendation.contains("Gold"));
        assert_eq!(spec.memory.total_gb, 96);
        assert!(spec.networking.contains("InfiniBand"));
        assert!(spec.cooling.contains("Enhanced"));
    }

    #[test]
    fn test_storage_scales_with_parameters() {
        let catalog = Catalog::test_default();
        let config = select_gpus(200.0, &catalog.gpus).unwrap();
        let model = catalog.find_model("test-100b").unwrap();

        let spec = recommend_system(&config, model);
        // 100B parameters * 10GB
        assert_eq!(spec.storage.capacity_gb, 1000);

        let mut big = model.clone();
        big.parameters_b = 180.0;
        let spec = recommend_system(&config, &big);
        assert_eq!(spec.storage.capacity_gb, 1800);
    }

    #[test]
    fn test_two_gpu_boundaries() {
        let catalog = Catalog::test_default();
        let mut config = select_gpus(40.0, &catalog.gpus).unwrap();
        config.gpu_count = 2;
        config.multi_gpu = true;
        let model = catalog.find_model("test-20b").unwrap();

        let spec = recommend_system(&config, model);
        // 16 cores stays in the lower CPU tier; 2 GPUs keep standard cooling
        assert_eq!(spec.cpu.cores, 16);
        assert!(spec.cpu.recommendation.contains("Silver"));
        assert!(spec.cooling.contains("Standard"));
        assert!(spec.networking.contains("InfiniBand"));
    }
}
