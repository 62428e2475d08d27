use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::tco::scale::ScaleTier;

fn default_multiplier() -> f64 {
    1.0
}

/// Cost multipliers applied per deployment-size tier.
///
/// Each calculator only consults the multipliers relevant to it; missing
/// entries default to 1.0 (no adjustment).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierMultipliers {
    #[serde(default = "default_multiplier")]
    pub infrastructure: f64,
    #[serde(default = "default_multiplier")]
    pub staffing: f64,
    #[serde(default = "default_multiplier")]
    pub operational: f64,
    #[serde(default = "default_multiplier")]
    pub compliance: f64,
}

impl Default for TierMultipliers {
    fn default() -> Self {
        Self {
            infrastructure: 1.0,
            staffing: 1.0,
            operational: 1.0,
            compliance: 1.0,
        }
    }
}

/// Scaling multipliers keyed by deployment-size tier.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScalingFactors {
    #[serde(default)]
    pub small: TierMultipliers,
    #[serde(default)]
    pub medium: TierMultipliers,
    #[serde(default)]
    pub large: TierMultipliers,
}

impl ScalingFactors {
    pub fn for_tier(&self, tier: ScaleTier) -> &TierMultipliers {
        match tier {
            ScaleTier::Small => &self.small,
            ScaleTier::Medium => &self.medium,
            ScaleTier::Large => &self.large,
        }
    }
}

/// A staffing role costed as annual salary plus a benefits percentage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalariedRole {
    pub annual_salary: f64,
    /// Benefits as a fraction of salary (e.g., 0.30)
    pub benefits_pct: f64,
}

impl SalariedRole {
    /// Fully loaded annual cost (salary plus benefits)
    pub fn annual_cost(&self) -> f64 {
        self.annual_salary * (1.0 + self.benefits_pct)
    }
}

/// A staffing role only partially allocated to the deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocatedRole {
    pub annual_salary: f64,
    /// Benefits as a fraction of salary
    pub benefits_pct: f64,
    /// Fraction of the role's time spent on this deployment (e.g., 0.5)
    pub allocation_pct: f64,
}

impl AllocatedRole {
    /// Monthly cost of the allocated share of this role
    pub fn monthly_cost(&self) -> f64 {
        self.annual_salary * (1.0 + self.benefits_pct) * self.allocation_pct / 12.0
    }
}

// --- On-premises cost tables ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnPremCostTables {
    pub datacenter: DatacenterRates,
    pub staffing: OnPremStaffing,
    pub operational: OnPremOperational,
    pub hidden: OnPremHiddenCosts,
    #[serde(default)]
    pub scaling: ScalingFactors,
}

/// Datacenter infrastructure build-out and recurring rates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatacenterRates {
    /// Monthly cost of one rack; racks are provisioned at one per 8 GPUs
    pub rack_space_monthly: f64,
    /// Build-out cost per kW of provisioned power
    pub power_per_kw: f64,
    /// Build-out cost per kW of cooling capacity
    pub cooling_per_kw: f64,
    /// Base network infrastructure cost
    pub network_base: f64,
    /// Per-port cost, one port per GPU
    pub network_per_port: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnPremStaffing {
    pub ml_engineer: SalariedRole,
    pub system_administrator: SalariedRole,
    /// Flat annual allocation for shared network engineering
    pub network_engineer_allocation: f64,
    /// Monthly on-call rotation cost
    pub on_call_monthly: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnPremOperational {
    /// Power and facility overhead per month
    pub power_facility_monthly: f64,
    /// Backup and disaster recovery, fraction of GPU hardware cost per year
    pub backup_dr_pct: f64,
    /// Fixed monitoring tooling cost per year
    pub monitoring_tooling_annual: f64,
    /// Compliance, fraction of total CapEx per year
    pub compliance_pct: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnPremHiddenCosts {
    /// Hardware refresh reserve, fraction of GPU hardware cost per year
    pub hardware_refresh_pct: f64,
    /// Downtime/redundancy provision, fraction of GPU hardware cost per year
    pub downtime_redundancy_pct: f64,
    /// Annual training cost per person, budgeted for two people
    pub training_per_person: f64,
    /// Vendor support contracts, fraction of GPU hardware cost per year
    pub vendor_support_pct: f64,
}

// --- Cloud operational cost tables ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudOpCostTables {
    /// Role name -> allocated staffing cost
    pub staffing: BTreeMap<String, AllocatedRole>,
    pub operational: Vec<OperationalLine>,
    pub compliance: ComplianceCosts,
    pub hidden: CloudHiddenCosts,
    #[serde(default)]
    pub scaling: ScalingFactors,
}

/// A recurring cloud operational cost line, either fixed or scaled by the
/// number of GPUs in the selected instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationalLine {
    pub name: String,
    pub monthly_cost: f64,
    #[serde(default)]
    pub scaling: LineScaling,
}

impl OperationalLine {
    pub fn monthly_cost_for(&self, gpu_count: u32) -> f64 {
        match self.scaling {
            LineScaling::Fixed => self.monthly_cost,
            LineScaling::PerGpu => self.monthly_cost * gpu_count as f64,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineScaling {
    #[default]
    Fixed,
    PerGpu,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceCosts {
    pub audit_annual: f64,
    pub legal_annual: f64,
    /// Recurring cost-optimization effort per month
    pub optimization_monthly: f64,
}

/// Hidden cloud costs expressed as fractions of the base compute cost.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudHiddenCosts {
    /// Data transfer/egress, applied to monthly compute
    pub data_transfer_pct: f64,
    /// Over-provisioning and scaling inefficiency, applied to monthly compute
    pub scaling_inefficiency_pct: f64,
    /// Vendor lock-in / migration reserve, applied to annual compute
    pub vendor_lock_in_pct: f64,
}
