use crate::catalog::GpuSpec;

/// Fixed 720-hour month; 24/7 operation is assumed throughout.
pub const HOURS_PER_MONTH: f64 = 24.0 * 30.0;

/// Node power draw in watts: GPUs plus system overhead.
///
/// The 200W base plus 100W per GPU covers CPU, memory, and cooling fans.
pub fn node_power_watts(gpu: &GpuSpec, count: u32) -> f64 {
    gpu.power_watts * count as f64 + 200.0 + 100.0 * count as f64
}

/// Monthly electricity cost for a GPU node running 24/7.
pub fn power_cost_monthly(gpu: &GpuSpec, count: u32, electricity_cost_per_kwh: f64) -> f64 {
    (node_power_watts(gpu, count) / 1000.0) * HOURS_PER_MONTH * electricity_cost_per_kwh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_power_cost_exact() {
        let catalog = Catalog::test_default();
        // 700W GPU, 1 unit, $0.12/kWh:
        // ((700 + 200 + 100) / 1000) * 720 * 0.12 = 86.40
        let gpu = &catalog.gpus[0];
        assert_eq!(gpu.power_watts, 700.0);

        let cost = power_cost_monthly(gpu, 1, 0.12);
        assert!((cost - 86.40).abs() < 1e-9);
    }

    #[test]
    fn test_overhead_scales_with_count() {
        let catalog = Catalog::test_default();
        let gpu = &catalog.gpus[0];

        // 4 GPUs: 700*4 + 200 + 100*4 = 3400W
        assert_eq!(node_power_watts(gpu, 4), 3400.0);
    }

    #[test]
    fn test_zero_electricity_cost() {
        let catalog = Catalog::test_default();
        assert_eq!(power_cost_monthly(&catalog.gpus[0], 2, 0.0), 0.0);
    }
}
