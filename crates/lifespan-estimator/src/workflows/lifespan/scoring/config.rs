use super::super::domain::Gender;
use serde::{Deserialize, Serialize};

/// Base expectancies and display thresholds used by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub male_base_lifespan: f64,
    pub female_base_lifespan: f64,
    pub other_base_lifespan: f64,
    /// Dimensions scoring below this produce a recommendation.
    pub recommendation_threshold: u8,
    pub excellent_from: u8,
    pub good_from: u8,
}

impl ScoringConfig {
    pub fn standard() -> Self {
        Self {
            male_base_lifespan: 76.1,
            female_base_lifespan: 81.1,
            other_base_lifespan: 78.6,
            recommendation_threshold: 60,
            excellent_from: 80,
            good_from: 60,
        }
    }

    /// Undeclared gender falls back to the `other` base.
    pub fn base_lifespan(&self, gender: Option<Gender>) -> f64 {
        match gender {
            Some(Gender::Male) => self.male_base_lifespan,
            Some(Gender::Female) => self.female_base_lifespan,
            Some(Gender::Other) | None => self.other_base_lifespan,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self::standard()
    }
}
