use serde::Serialize;
use std::cmp::Ordering;

use crate::catalog::GpuSpec;

/// Recommended GPU configuration for a memory requirement.
#[derive(Debug, Clone, Serialize)]
pub struct GpuConfiguration {
    pub recommended: GpuSpec,

    /// Up to 3 cost-ranked alternatives
    pub alternatives: Vec<GpuSpec>,

    /// Number of units of the recommended GPU; always >= 1
    pub gpu_count: u32,

    /// True when no single GPU covers the requirement
    pub multi_gpu: bool,
}

impl GpuConfiguration {
    pub fn total_vram_gb(&self) -> f64 {
        self.recommended.vram_gb * self.gpu_count as f64
    }

    /// Total GPU hardware cost (unit price times count)
    pub fn hardware_cost(&self) -> f64 {
        self.recommended.price_usd * self.gpu_count as f64
    }

    pub fn total_gpu_power_watts(&self) -> f64 {
        self.recommended.power_watts * self.gpu_count as f64
    }
}

/// Pick the best GPU configuration for a memory requirement.
///
/// If any single GPU covers the requirement, the cheapest per GB of VRAM
/// wins. Otherwise the highest-capacity GPU is stacked until the
/// requirement is covered. Sorts are stable, so catalog order breaks ties.
pub fn select_gpus(required_memory_gb: f64, gpus: &[GpuSpec]) -> Result<GpuConfiguration, String> {
    if gpus.is_empty() {
        return Err("cannot select a GPU from an empty catalog".to_string());
    }

    let mut sufficient: Vec<&GpuSpec> = gpus
        .iter()
        .filter(|gpu| gpu.vram_gb >= required_memory_gb)
        .collect();

    if !sufficient.is_empty() {
        sufficient.sort_by(|a, b| {
            a.price_per_gb()
                .partial_cmp(&b.price_per_gb())
                .unwrap_or(Ordering::Equal)
        });

        return Ok(GpuConfiguration {
            recommended: sufficient[0].clone(),
            alternatives: sufficient[1..].iter().take(3).map(|g| (*g).clone()).collect(),
            gpu_count: 1,
            multi_gpu: false,
        });
    }

    // No single unit is large enough; stack the highest-capacity GPU
    let mut by_vram: Vec<&GpuSpec> = gpus.iter().collect();
    by_vram.sort_by(|a, b| {
        b.vram_gb
            .partial_cmp(&a.vram_gb)
            .unwrap_or(Ordering::Equal)
    });

    let best = by_vram[0];
    let gpu_count = (required_memory_gb / best.vram_gb).ceil().max(1.0) as u32;

    Ok(GpuConfiguration {
        recommended: best.clone(),
        alternatives: by_vram[1..].iter().take(3).map(|g| (*g).clone()).collect(),
        gpu_count,
        multi_gpu: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_single_gpu_covers_requirement() {
        // 80GB at $10,000 and 24GB at $1,500; 40GB requirement excludes
        // the 24GB card entirely
        let catalog = Catalog::test_default();
        let config = select_gpus(40.0, &catalog.gpus).unwrap();

        assert_eq!(config.recommended.id, "big-80gb");
        assert_eq!(config.gpu_count, 1);
        assert!(!config.multi_gpu);
        assert!(config.recommended.vram_gb >= 40.0);
    }

    #[test]
    fn test_picks_best_price_per_gb() {
        let catalog = Catalog::test_default();
        // Both cards qualify at 20GB; the 24GB card wins on $/GB
        // (1500/24 = 62.5 vs 10000/80 = 125)
        let config = select_gpus(20.0, &catalog.gpus).unwrap();

        assert_eq!(config.recommended.id, "small-24gb");
        assert_eq!(config.gpu_count, 1);
        assert!(!config.multi_gpu);
        assert_eq!(config.alternatives.len(), 1);
        assert_eq!(config.alternatives[0].id, "big-80gb");
    }

    #[test]
    fn test_multi_gpu_when_nothing_fits() {
        let catalog = Catalog::test_default();
        // 200GB requirement, best single card is 80GB: ceil(200/80) = 3
        let config = select_gpus(200.0, &catalog.gpus).unwrap();

        assert_eq!(config.recommended.id, "big-80gb");
        assert_eq!(config.gpu_count, 3);
        assert!(config.multi_gpu);
        assert!(config.total_vram_gb() >= 200.0);
    }

    #[test]
    fn test_alternatives_capped_at_three() {
        let catalog = Catalog::test_default();
        let mut gpus = catalog.gpus.clone();
        for i in 0..5 {
            let mut extra = gpus[1].clone();
            extra.id = format!("extra-{}", i);
            extra.price_usd += 100.0 * i as f64;
            gpus.push(extra);
        }

        let config = select_gpus(20.0, &gpus).unwrap();
        assert_eq!(config.alternatives.len(), 3);
    }

    #[test]
    fn test_zero_requirement_still_yields_one_gpu() {
        let catalog = Catalog::test_default();
        let config = select_gpus(0.0, &catalog.gpus).unwrap();
        assert_eq!(config.gpu_count, 1);
    }

    #[test]
    fn test_empty_catalog_is_an_error() {
        assert!(select_gpus(40.0, &[]).is_err());
    }

    #[test]
    fn test_hardware_cost() {
        let catalog = Catalog::test_default();
        let config = select_gpus(200.0, &catalog.gpus).unwrap();
        // 3x $10,000
        assert_eq!(config.hardware_cost(), 30_000.0);
        assert_eq!(config.total_gpu_power_watts(), 2_100.0);
    }
}
