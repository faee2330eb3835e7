use serde::{Deserialize, Serialize};

/// Goal used when no body weight is on file.
pub const DEFAULT_GOAL_OZ: i32 = 64;

const BASE_OZ_PER_LB: f64 = 0.67;
const MALE_ADJUSTMENT: f64 = 1.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "male" => Some(Self::Male),
            "female" => Some(Self::Female),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    VeryActive,
    ExtremelyActive,
}

impl ActivityLevel {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "sedentary" => Some(Self::Sedentary),
            "lightly_active" => Some(Self::LightlyActive),
            "moderately_active" => Some(Self::ModeratelyActive),
            "very_active" => Some(Self::VeryActive),
            "extremely_active" => Some(Self::ExtremelyActive),
            _ => None,
        }
    }

    pub fn multiplier(self) -> f64 {
        match self {
            Self::Sedentary => 1.0,
            Self::LightlyActive => 1.1,
            Self::ModeratelyActive => 1.2,
            Self::VeryActive => 1.3,
            Self::ExtremelyActive => 1.4,
        }
    }
}

/// Personalized daily goal in whole ounces.
///
/// Every input is optional: without a usable weight the fixed default
/// applies, and an unset sex or activity level leaves its multiplier at 1.0.
pub fn daily_goal_oz(
    weight_lbs: Option<f64>,
    sex: Option<Sex>,
    activity: Option<ActivityLevel>,
) -> i32 {
    let Some(weight) = weight_lbs.filter(|w| w.is_finite() && *w > 0.0) else {
        return DEFAULT_GOAL_OZ;
    };

    let mut oz = weight * BASE_OZ_PER_LB;
    if sex == Some(Sex::Male) {
        oz *= MALE_ADJUSTMENT;
    }
    oz *= activity.map_or(1.0, ActivityLevel::multiplier);
    oz.round() as i32
}
