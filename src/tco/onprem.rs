use serde::Serialize;

use super::power::{node_power_watts, power_cost_monthly};
use super::scale::ScaleTier;
use crate::catalog::OnPremCostTables;
use crate::selector::GpuConfiguration;

/// One-time capital expenditure, broken down per line.
#[derive(Debug, Clone, Serialize)]
pub struct CapexBreakdown {
    pub gpu: f64,
    pub server: f64,
    pub networking: f64,
    /// Datacenter infrastructure; 0 in basic mode
    pub datacenter: f64,
    pub total: f64,
}

/// Recurring operating expenditure over the time horizon.
///
/// The staffing/operational/hidden lines are only non-zero in enhanced
/// mode; power and maintenance monthly figures are always populated.
#[derive(Debug, Clone, Serialize)]
pub struct OpexBreakdown {
    pub staffing: f64,
    pub operational: f64,
    pub hidden: f64,
    pub power_monthly: f64,
    pub maintenance_monthly: f64,
    pub total_monthly: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct OnPremTco {
    pub capex: CapexBreakdown,
    pub opex: OpexBreakdown,
    pub total: f64,
    pub monthly_average: f64,
    pub scale_tier: ScaleTier,
    /// True when cost tables were supplied and the full OpEx model ran
    pub enhanced: bool,
}

/// Base chassis plus a slot premium for every GPU beyond the first.
fn server_cost(gpu_count: u32) -> f64 {
    2000.0 + 500.0 * (gpu_count - 1) as f64
}

/// Intra-node networking; single-GPU boxes need none, small clusters get a
/// flat interconnect, larger ones pay per GPU on top of a switch.
fn networking_cost(gpu_count: u32) -> f64 {
    if gpu_count <= 1 {
        0.0
    } else if gpu_count <= 4 {
        1000.0
    } else {
        2000.0 + 200.0 * gpu_count as f64
    }
}

/// Total cost of ownership for an on-premises deployment.
///
/// Without cost tables, OpEx is power plus a 2%/year maintenance reserve
/// (basic mode). With cost tables, CapEx gains the datacenter
/// infrastructure term and OpEx is replaced by the staffing, operational,
/// and hidden-cost model, prorated to the time horizon.
pub fn calculate_onprem_tco(
    config: &GpuConfiguration,
    months: u32,
    electricity_cost_per_kwh: f64,
    costs: Option<&OnPremCostTables>,
) -> OnPremTco {
    let count = config.gpu_count;
    let tier = ScaleTier::from_gpu_count(count);
    let horizon = months as f64;
    let years = horizon / 12.0;

    let gpu_cost = config.hardware_cost();
    let server = server_cost(count);
    let networking = networking_cost(count);

    let datacenter = match costs {
        None => 0.0,
        Some(tables) => {
            let mult = tables.scaling.for_tier(tier).infrastructure;
            let total_kw = node_power_watts(&config.recommended, count) / 1000.0;

            // One rack per 8 GPUs, rack space paid over the whole horizon
            let racks = (count as f64 / 8.0).ceil();
            let rack_space = tables.datacenter.rack_space_monthly * racks * horizon;

            // Power and cooling build-out carry headroom factors of 1.5x
            // and 1.3x over the steady-state draw
            let power_infra = tables.datacenter.power_per_kw * total_kw * 1.5;
            let cooling_infra = tables.datacenter.cooling_per_kw * total_kw * 1.3;
            let network_infra =
                tables.datacenter.network_base + tables.datacenter.network_per_port * count as f64;

            (rack_space + power_infra + cooling_infra + network_infra) * mult
        }
    };

    let capex_total = gpu_cost + server + networking + datacenter;
    let capex = CapexBreakdown {
        gpu: gpu_cost,
        server,
        networking,
        datacenter,
        total: capex_total,
    };

    let power_monthly = power_cost_monthly(&config.recommended, count, electricity_cost_per_kwh);
    let maintenance_monthly = capex_total * 0.02 / 12.0;

    let opex = match costs {
        None => {
            let total_monthly = power_monthly + maintenance_monthly;
            OpexBreakdown {
                staffing: 0.0,
                operational: 0.0,
                hidden: 0.0,
                power_monthly,
                maintenance_monthly,
                total_monthly,
                total: total_monthly * horizon,
            }
        }
        Some(tables) => {
            let staffing_mult = tables.scaling.for_tier(tier).staffing;

            let s = &tables.staffing;
            let annual_staffing = s.ml_engineer.annual_cost()
                + s.system_administrator.annual_cost()
                + s.network_engineer_allocation
                + s.on_call_monthly * 12.0;
            let staffing = annual_staffing * staffing_mult * years;

            let o = &tables.operational;
            let annual_operational = o.power_facility_monthly * 12.0
                + gpu_cost * o.backup_dr_pct
                + o.monitoring_tooling_annual
                + capex_total * o.compliance_pct;
            let operational = annual_operational * years;

            let h = &tables.hidden;
            let annual_hidden = gpu_cost * h.hardware_refresh_pct
                + gpu_cost * h.downtime_redundancy_pct
                + h.training_per_person * 2.0
                + gpu_cost * h.vendor_support_pct;
            let hidden = annual_hidden * years;

            let total = staffing + operational + hidden;
            OpexBreakdown {
                staffing,
                operational,
                hidden,
                power_monthly,
                maintenance_monthly,
                total_monthly: total / horizon,
                total,
            }
        }
    };

    let total = capex.total + opex.total;
    OnPremTco {
        capex,
        opex,
        total,
        monthly_average: total / horizon,
        scale_tier: tier,
        enhanced: costs.is_some(),
    }
}
