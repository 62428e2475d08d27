use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GpuSpec {
    /// Stable identifier (e.g., "a100-80gb")
    pub id: String,

    /// Display name
    pub name: String,

    /// VRAM capacity in GB
    pub vram_gb: f64,

    /// Unit price in USD
    pub price_usd: f64,

    /// Power draw in watts
    pub power_watts: f64,

    /// Architecture name (e.g., "Hopper")
    pub architecture: String,

    /// Memory bandwidth in GB/s
    pub memory_bandwidth_gbps: f64,

    /// Market segment (e.g., "datacenter", "consumer")
    pub category: String,
}

impl GpuSpec {
    /// Cost efficiency in USD per GB of VRAM, the GPU selection sort key
    pub fn price_per_gb(&self) -> f64 {
        self.price_usd / self.vram_gb
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_per_gb() {
        let gpu = GpuSpec {
            id: "test".to_string(),
            name: "Test GPU".to_string(),
            vram_gb: 80.0,
            price_usd: 16000.0,
            power_watts: 400.0,
            architecture: "Test".to_string(),
            memory_bandwidth_gbps: 2000.0,
            category: "datacenter".to_string(),
        };
        assert_eq!(gpu.price_per_gb(), 200.0);
    }
}
