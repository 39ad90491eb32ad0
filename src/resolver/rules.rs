//! Literal-threshold rules that override the model's class decision.
//!
//! Rules are evaluated in [`CANONICAL_RULES`] order; the first match wins.

use crate::config::RulesConfig;
use crate::input::{AreaType, RawInput, SurfaceCondition};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Severe,
    NotSevere,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverrideRule {
    /// Frost/ice, snow or flood, or speed limit above the high-speed limit.
    HazardousSurfaceOrHighSpeed,
    /// Dry road, daylight, speed limit at or below the safe limit.
    SafeDaylightDrySlow,
    /// Urban area, speed limit at or below the safe limit.
    SafeUrbanSlow,
}

pub const CANONICAL_RULES: [OverrideRule; 3] = [
    OverrideRule::HazardousSurfaceOrHighSpeed,
    OverrideRule::SafeDaylightDrySlow,
    OverrideRule::SafeUrbanSlow,
];

impl OverrideRule {
    pub fn verdict(self) -> Verdict {
        match self {
            Self::HazardousSurfaceOrHighSpeed => Verdict::Severe,
            Self::SafeDaylightDrySlow | Self::SafeUrbanSlow => Verdict::NotSevere,
        }
    }

    pub fn matches(self, raw: &RawInput, limits: &RulesConfig) -> bool {
        match self {
            Self::HazardousSurfaceOrHighSpeed => {
                raw.surface_condition.is_hazardous() || raw.speed_limit > limits.high_speed_limit
            }
            Self::SafeDaylightDrySlow => {
                raw.surface_condition == SurfaceCondition::Dry
                    && raw.light_condition.is_daylight()
                    && raw.speed_limit <= limits.safe_speed_limit
            }
            Self::SafeUrbanSlow => {
                raw.area_type == AreaType::Urban && raw.speed_limit <= limits.safe_speed_limit
            }
        }
    }
}

/// First rule in canonical order that matches `raw`, if overrides are enabled.
pub fn first_match(raw: &RawInput, config: &RulesConfig) -> Option<OverrideRule> {
    if !config.enabled {
        return None;
    }
    CANONICAL_RULES.into_iter().find(|r| r.matches(raw, config))
}
