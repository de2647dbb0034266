//! Engine configuration

use serde::{Deserialize, Serialize};

use crate::types::{GstError, GstResult};

/// What to do when the buyer's state cannot be determined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuyerStatePolicy {
    /// Treat the supply as intrastate (CGST + SGST)
    #[default]
    AssumeIntrastate,
    /// Refuse to pick a tax treatment
    Reject,
}

/// Tunable parameters of the GST engine
///
/// The defaults follow the statutory schedule in force; an alternate
/// configuration can be loaded with [`GstConfig::from_json`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GstConfig {
    /// Decimal places tax amounts are rounded to
    pub money_scale: i64,
    /// Day of the following month GSTR-1 is due
    pub gstr1_due_day: u32,
    /// Day of the following month GSTR-3B is due
    pub gstr3b_due_day: u32,
    /// Earliest year accepted in a return period
    pub min_period_year: i32,
    /// Latest year accepted in a return period
    pub max_period_year: i32,
    pub buyer_state_policy: BuyerStatePolicy,
}

impl Default for GstConfig {
    fn default() -> Self {
        Self {
            money_scale: 2,
            gstr1_due_day: 11,
            gstr3b_due_day: 20,
            min_period_year: 2017,
            max_period_year: 2099,
            buyer_state_policy: BuyerStatePolicy::AssumeIntrastate,
        }
    }
}

impl GstConfig {
    /// Parse a configuration from JSON and validate it. Missing fields take defaults.
    pub fn from_json(json: &str) -> GstResult<Self> {
        let config: GstConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> GstResult<()> {
        if !(0..=4).contains(&self.money_scale) {
            return Err(GstError::Configuration(format!(
                "money_scale must be between 0 and 4, got {}",
                self.money_scale
            )));
        }

        for (name, day) in [
            ("gstr1_due_day", self.gstr1_due_day),
            ("gstr3b_due_day", self.gstr3b_due_day),
        ] {
            // 28 is the last day every month has
            if !(1..=28).contains(&day) {
                return Err(GstError::Configuration(format!(
                    "{} must be between 1 and 28, got {}",
                    name, day
                )));
            }
        }

        if self.min_period_year > self.max_period_year {
            return Err(GstError::Configuration(format!(
                "min_period_year {} is after max_period_year {}",
                self.min_period_year, self.max_period_year
            )));
        }

        Ok(())
    }
}
