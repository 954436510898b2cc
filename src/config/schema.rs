use crate::scoring::FeeSchedule;
use serde::{Deserialize, Serialize};

/// User configuration, all optional.
///
/// Example YAML:
/// ```yaml
/// fees:
///   min: 1500
///   max: 10000
/// currency: "$"
/// theme: dark
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Fee anchor overrides. The score-to-fee slope is re-derived from
    /// these, so the extremes always land exactly on min and max.
    #[serde(default)]
    pub fees: Option<FeeConfig>,

    /// Currency symbol prefixed to the fee (default: "$")
    #[serde(default)]
    pub currency: Option<String>,

    /// TUI theme: "auto", "dark" or "light" (default: auto)
    #[serde(default)]
    pub theme: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FeeConfig {
    /// Fee at the lowest possible score (all ratings at 1)
    pub min: f64,
    /// Fee at the highest possible score (all ratings at 5)
    pub max: f64,
}

impl Config {
    pub fn fee_schedule(&self) -> FeeSchedule {
        match &self.fees {
            Some(fees) => FeeSchedule {
                min_fee: fees.min,
                max_fee: fees.max,
            },
            None => FeeSchedule::default(),
        }
    }

    pub fn currency(&self) -> &str {
        self.currency.as_deref().unwrap_or("$")
    }
}
