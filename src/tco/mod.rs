pub mod cloud;
pub mod onprem;
pub mod power;
pub mod scale;

pub use cloud::{calculate_cloud_tco, CloudTco};
pub use onprem::{calculate_onprem_tco, OnPremTco};
pub use power::{power_cost_monthly, HOURS_PER_MONTH};
pub use scale::ScaleTier;
