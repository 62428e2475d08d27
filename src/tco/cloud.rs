use serde::Serialize;
use std::cmp::Ordering;

use super::power::HOURS_PER_MONTH;
use super::scale::ScaleTier;
use crate::catalog::{CloudOpCostTables, CloudProvider, InstanceSpec};

/// Estimated VRAM per accelerator for the GPU type strings that show up in
/// cloud instance listings. Unknown types fall back to 32GB.
pub fn vram_for_gpu_type(gpu_type: &str) -> f64 {
    match gpu_type {
        "V100" => 32.0,
        "A100" => 80.0,
        "H100" => 80.0,
        "RTX 4090" => 24.0,
        "RTX 4080" => 16.0,
        "T4" => 16.0,
        "L4" => 24.0,
        "A10G" => 24.0,
        _ => 32.0,
    }
}

/// Operational overhead on top of raw compute, summed over the horizon.
///
/// All zero when no cloud cost tables are supplied.
#[derive(Debug, Clone, Serialize)]
pub struct CloudOperationalBreakdown {
    pub staffing: f64,
    pub operational: f64,
    pub compliance: f64,
    pub hidden: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CloudTco {
    pub provider: String,
    pub instance_type: String,
    pub gpu_type: String,
    pub gpu_count: u32,
    pub hourly_rate: f64,
    /// Raw compute cost per month at 24/7 operation
    pub base_compute_monthly: f64,
    pub operational: CloudOperationalBreakdown,
    pub monthly_cost: f64,
    pub total_cost: f64,
    pub scale_tier: ScaleTier,
    /// True when cost tables were supplied and operational overhead ran
    pub enhanced: bool,
}

fn instance_vram(instance: &InstanceSpec) -> f64 {
    vram_for_gpu_type(&instance.gpu) * instance.gpu_count as f64
}

/// Cloud total cost of ownership for a memory requirement.
///
/// Returns None when no instance type offers enough estimated VRAM; the
/// caller must treat that as "cloud unavailable", not as an error.
pub fn calculate_cloud_tco(
    required_memory_gb: f64,
    provider: &CloudProvider,
    months: u32,
    costs: Option<&CloudOpCostTables>,
) -> Option<CloudTco> {
    let mut suitable: Vec<(&String, &InstanceSpec)> = provider
        .instances
        .iter()
        .filter(|(_, instance)| instance_vram(instance) >= required_memory_gb)
        .collect();

    if suitable.is_empty() {
        return None;
    }

    suitable.sort_by(|a, b| {
        a.1.hourly_rate
            .partial_cmp(&b.1.hourly_rate)
            .unwrap_or(Ordering::Equal)
    });
    let (instance_type, instance) = suitable[0];

    let base_compute_monthly = instance.hourly_rate * HOURS_PER_MONTH;
    let tier = ScaleTier::from_gpu_count(instance.gpu_count);
    let horizon = months as f64;
    let years = horizon / 12.0;

    let operational = match costs {
        None => CloudOperationalBreakdown {
            staffing: 0.0,
            operational: 0.0,
            compliance: 0.0,
            hidden: 0.0,
            total: 0.0,
        },
        Some(tables) => {
            let mult = tables.scaling.for_tier(tier);

            let staffing_monthly: f64 =
                tables.staffing.values().map(|role| role.monthly_cost()).sum();
            let staffing = staffing_monthly * mult.staffing * horizon;

            let operational_monthly: f64 = tables
                .operational
                .iter()
                .map(|line| line.monthly_cost_for(instance.gpu_count))
                .sum();
            let operational = operational_monthly * mult.operational * horizon;

            let c = &tables.compliance;
            let compliance_annual =
                (c.audit_annual + c.legal_annual + c.optimization_monthly * 12.0) * mult.compliance;
            let compliance = compliance_annual * years;

            let h = &tables.hidden;
            let hidden_monthly =
                base_compute_monthly * (h.data_transfer_pct + h.scaling_inefficiency_pct);
            let hidden_annual = base_compute_monthly * 12.0 * h.vendor_lock_in_pct;
            let hidden = hidden_monthly * horizon + hidden_annual * years;

            let total = staffing + operational + compliance + hidden;
            CloudOperationalBreakdown {
                staffing,
                operational,
                compliance,
                hidden,
                total,
            }
        }
    };

    let total_cost = base_compute_monthly * horizon + operational.total;
    Some(CloudTco {
        provider: provider.name.clone(),
        instance_type: instance_type.clone(),
        gpu_type: instance.gpu.clone(),
        gpu_count: instance.gpu_count,
        hourly_rate: instance.hourly_rate,
        base_compute_monthly,
        operational,
        monthly_cost: total_cost / horizon,
        total_cost,
        scale_tier: tier,
        enhanced: costs.is_some(),
    })
}
