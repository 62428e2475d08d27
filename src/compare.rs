use serde::Serialize;

use crate::tco::cloud::CloudTco;
use crate::tco::onprem::OnPremTco;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeploymentChoice {
    OnPremises,
    Cloud,
}

impl DeploymentChoice {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentChoice::OnPremises => "on-premises",
            DeploymentChoice::Cloud => "cloud",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub recommendation: DeploymentChoice,
    pub reason: String,
    /// Absolute cost difference between the two paths over the horizon
    pub savings: f64,
    pub savings_pct: f64,
    /// Month at which cumulative on-prem cost drops below cumulative cloud
    /// cost; None when on-prem wins outright or never catches up
    pub breakeven_months: Option<u32>,
    pub onprem_total: f64,
    pub cloud_total: Option<f64>,
}

/// Compare on-prem and cloud TCO totals and recommend the cheaper path.
///
/// The break-even point amortizes on-prem CapEx against the monthly-cost
/// gap. When cloud's monthly cost does not exceed on-prem monthly OpEx the
/// gap never closes, and break-even is reported as None rather than a
/// division by a non-positive number.
pub fn compare_deployments(
    onprem: &OnPremTco,
    cloud: Option<&CloudTco>,
    months: u32,
) -> Recommendation {
    let cloud = match cloud {
        Some(cloud) => cloud,
        None => {
            return Recommendation {
                recommendation: DeploymentChoice::OnPremises,
                reason: "No suitable cloud instances found".to_string(),
                savings: 0.0,
                savings_pct: 0.0,
                breakeven_months: None,
                onprem_total: onprem.total,
                cloud_total: None,
            }
        }
    };

    let savings = (onprem.total - cloud.total_cost).abs();
    let max_total = onprem.total.max(cloud.total_cost);
    // Both totals can be zero (free hardware, free power); avoid 0/0
    let savings_pct = if max_total > 0.0 {
        savings / max_total * 100.0
    } else {
        0.0
    };

    if onprem.total < cloud.total_cost {
        return Recommendation {
            recommendation: DeploymentChoice::OnPremises,
            reason: format!(
                "On-premises is {:.1}% cheaper over {} months",
                savings_pct, months
            ),
            savings,
            savings_pct,
            breakeven_months: None,
            onprem_total: onprem.total,
            cloud_total: Some(cloud.total_cost),
        };
    }

    let monthly_gap = cloud.monthly_cost - onprem.opex.total_monthly;
    let breakeven_months = if monthly_gap > 0.0 {
        Some((onprem.capex.total / monthly_gap).round() as u32)
    } else {
        None
    };

    let reason = match breakeven_months {
        Some(breakeven) => format!(
            "Cloud is {:.1}% cheaper over {} months; on-premises would break even after {} months",
            savings_pct, months, breakeven
        ),
        None => format!(
            "Cloud is {:.1}% cheaper over {} months with no finite break-even point",
            savings_pct, months
        ),
    };

    Recommendation {
        recommendation: DeploymentChoice::Cloud,
        reason,
        savings,
        savings_pct,
        breakeven_months,
        onprem_total: onprem.total,
        cloud_total: Some(cloud.total_cost),
    }
}
