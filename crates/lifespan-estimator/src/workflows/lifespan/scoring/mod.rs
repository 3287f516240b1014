mod config;
mod dimensions;
mod rules;

pub use config::ScoringConfig;
pub use dimensions::{DimensionScore, HealthDimension, Priority, Recommendation, ScoreBand};
pub use rules::{Adjustment, AdjustmentFactor, BmiBand};

use super::answers::AnswerSet;
use super::domain::EstimationMode;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Stateless evaluator mapping an answer set to a lifespan estimate.
#[derive(Debug, Clone, Default)]
pub struct LifespanEngine {
    config: ScoringConfig,
}

impl LifespanEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Scores `answers` as of `today`. Never mutates the answers.
    pub fn estimate(&self, answers: &AnswerSet, today: NaiveDate) -> LifespanResult {
        let base = self.config.base_lifespan(answers.gender);
        let starting_lifespan = match answers.estimation_type {
            EstimationMode::User => answers
                .user_estimated_lifespan
                .map(f64::from)
                .unwrap_or(base),
            EstimationMode::System => base,
        };

        let age = answers.age_on(today).unwrap_or(0);
        let bmi = answers.bmi();
        let (adjustments, total_adjustment) = rules::score_answers(answers, bmi);
        let remaining_years = starting_lifespan - f64::from(age) + total_adjustment;

        let outlook = Outlook::from_remaining(remaining_years, today.year());
        let dimension_scores = dimensions::dimension_scores(answers);
        let overall_score = dimensions::overall_score(&dimension_scores);
        let recommendations = dimensions::recommendations(&dimension_scores, &self.config);

        debug!(
            mode = answers.estimation_type.as_str(),
            starting_lifespan,
            age,
            total_adjustment,
            remaining_years,
            overall_score,
            "lifespan estimated"
        );

        LifespanResult {
            estimation_mode: answers.estimation_type,
            starting_lifespan,
            age,
            bmi,
            bmi_band: bmi.map(BmiBand::classify),
            total_adjustment,
            remaining_years,
            estimated_total_lifespan: f64::from(age) + remaining_years,
            projected_year: outlook.projected_year(),
            summary_text: outlook.summary_text(),
            outlook,
            adjustments,
            dimension_scores,
            overall_score,
            rating: ScoreBand::for_score(overall_score, &self.config),
            recommendations,
        }
    }
}

/// Whether any remaining years are projected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outlook {
    Projected { years: i64, until_year: i32 },
    ReachedAverage { current_year: i32 },
}

impl Outlook {
    pub fn from_remaining(remaining_years: f64, current_year: i32) -> Self {
        if remaining_years > 0.0 {
            let years = remaining_years.round().max(0.0) as i64;
            Self::Projected {
                years,
                until_year: current_year.saturating_add(years as i32),
            }
        } else {
            Self::ReachedAverage { current_year }
        }
    }

    pub fn projected_year(&self) -> i32 {
        match *self {
            Self::Projected { until_year, .. } => until_year,
            Self::ReachedAverage { current_year } => current_year,
        }
    }

    pub fn summary_text(&self) -> String {
        match self {
            Self::Projected { years, until_year } => format!(
                "Based on your current age and selected factors, your remaining estimated lifespan is approximately {years} years (until around {until_year})."
            ),
            Self::ReachedAverage { .. } => "Based on your selected factors, you have reached or exceeded the average estimated lifespan for someone with your profile.".to_string(),
        }
    }
}

/// Immutable output of one scoring run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifespanResult {
    pub estimation_mode: EstimationMode,
    pub starting_lifespan: f64,
    pub age: u32,
    pub bmi: Option<f64>,
    pub bmi_band: Option<BmiBand>,
    pub total_adjustment: f64,
    pub remaining_years: f64,
    pub estimated_total_lifespan: f64,
    pub projected_year: i32,
    pub summary_text: String,
    pub outlook: Outlook,
    pub adjustments: Vec<Adjustment>,
    pub dimension_scores: Vec<DimensionScore>,
    pub overall_score: u8,
    pub rating: ScoreBand,
    pub recommendations: Vec<Recommendation>,
}

impl LifespanResult {
    pub fn rounded_remaining_years(&self) -> i64 {
        self.remaining_years.round() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_positive_remainder_still_projects() {
        let outlook = Outlook::from_remaining(0.3, 2024);
        assert_eq!(
            outlook,
            Outlook::Projected {
                years: 0,
                until_year: 2024
            }
        );
        assert!(outlook.summary_text().contains("approximately 0 years"));
    }

    #[test]
    fn non_positive_remainder_reports_reached_average() {
        let outlook = Outlook::from_remaining(-12.4, 2024);
        assert_eq!(outlook.projected_year(), 2024);
        assert!(outlook.summary_text().contains("reached or exceeded"));
    }

    #[test]
    fn user_mode_without_target_falls_back_to_base() {
        let engine = LifespanEngine::default();
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).expect("date");
        let result = engine.estimate(&AnswerSet::default(), today);
        assert_eq!(result.estimation_mode, EstimationMode::User);
        assert_eq!(result.starting_lifespan, 78.6);
        assert_eq!(result.age, 0);
        assert_eq!(result.bmi, None);
    }
}
