//! Rating system configuration

use crate::rating::{
    ExtendedTrueSkillConfig, ExtendedWengLinConfig, RatingCalculator, TrueSkillRatingCalculator,
    WengLinRatingCalculator,
};
use serde::{Deserialize, Serialize};

/// Which skill update the engine replays matches through
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum RatingAlgorithm {
    #[default]
    #[serde(rename = "trueskill")]
    #[value(name = "trueskill")]
    TrueSkill,
    #[serde(rename = "weng_lin")]
    #[value(name = "weng_lin")]
    WengLin,
}

impl std::fmt::Display for RatingAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RatingAlgorithm::TrueSkill => write!(f, "trueskill"),
            RatingAlgorithm::WengLin => write!(f, "weng_lin"),
        }
    }
}

impl std::str::FromStr for RatingAlgorithm {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "trueskill" => Ok(RatingAlgorithm::TrueSkill),
            "weng_lin" | "wenglin" | "openskill" => Ok(RatingAlgorithm::WengLin),
            other => Err(anyhow::anyhow!("Unknown rating algorithm: {}", other)),
        }
    }
}

/// Rating algorithm selection and parameters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    pub algorithm: RatingAlgorithm,
    pub trueskill: ExtendedTrueSkillConfig,
    pub weng_lin: ExtendedWengLinConfig,
}

impl RatingConfig {
    /// Validate the parameters of the selected algorithm
    pub fn validate(&self) -> crate::error::Result<()> {
        match self.algorithm {
            RatingAlgorithm::TrueSkill => self.trueskill.validate(),
            RatingAlgorithm::WengLin => self.weng_lin.validate(),
        }
    }

    /// Build the calculator for the selected algorithm
    pub fn build_calculator(&self) -> crate::error::Result<Box<dyn RatingCalculator>> {
        Ok(match self.algorithm {
            RatingAlgorithm::TrueSkill => {
                Box::new(TrueSkillRatingCalculator::new(self.trueskill.clone())?)
            }
            RatingAlgorithm::WengLin => {
                Box::new(WengLinRatingCalculator::new(self.weng_lin.clone())?)
            }
        })
    }
}
