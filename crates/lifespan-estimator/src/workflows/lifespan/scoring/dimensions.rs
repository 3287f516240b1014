use super::super::answers::AnswerSet;
use super::super::domain::{
    DietType, ExerciseFrequency, MedicalCondition, MentalHealth, SleepPattern,
    SocialRelationships,
};
use super::config::ScoringConfig;
use serde::{Deserialize, Serialize};

const UNRATED: u8 = 70;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthDimension {
    Physical,
    Mental,
    Nutrition,
    Sleep,
    Social,
    Medical,
}

impl HealthDimension {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Physical,
            Self::Mental,
            Self::Nutrition,
            Self::Sleep,
            Self::Social,
            Self::Medical,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Physical => "Physical",
            Self::Mental => "Mental",
            Self::Nutrition => "Nutrition",
            Self::Sleep => "Sleep",
            Self::Social => "Social",
            Self::Medical => "Medical",
        }
    }

    fn score(self, answers: &AnswerSet) -> u8 {
        let rated = match self {
            Self::Physical => answers.exercise_frequency.map(|value| match value {
                ExerciseFrequency::Daily => 95,
                ExerciseFrequency::Weekly => 80,
                ExerciseFrequency::Occasionally => 50,
                ExerciseFrequency::Never => 30,
            }),
            Self::Mental => answers.mental_health.map(|value| match value {
                MentalHealth::Good => 90,
                MentalHealth::Other => 75,
                MentalHealth::Burnout => 60,
                MentalHealth::Anxiety | MentalHealth::Depression => 40,
            }),
            Self::Nutrition => answers.diet_type.map(|value| match value {
                DietType::Balanced | DietType::Mediterranean => 90,
                DietType::Vegetarian => 85,
                DietType::Processed => 40,
                DietType::Keto | DietType::Vegan | DietType::HighSugar => UNRATED,
            }),
            Self::Sleep => answers.sleep_patterns.map(|value| match value {
                SleepPattern::Good => 85,
                SleepPattern::Other => 55,
                SleepPattern::Insomnia => 35,
            }),
            Self::Social => answers.social_relationships.map(|value| match value {
                SocialRelationships::Strong => 90,
                SocialRelationships::Moderate => 70,
                SocialRelationships::Weak => 45,
            }),
            Self::Medical => answers.medical_condition.map(|value| match value {
                MedicalCondition::Good => 80,
                MedicalCondition::Bad => 40,
            }),
        };
        rated.unwrap_or(UNRATED)
    }

    const fn advice(self) -> (&'static str, &'static str, Priority) {
        match self {
            Self::Physical => (
                "Increase Physical Activity",
                "Aim for at least 150 minutes of moderate exercise weekly",
                Priority::High,
            ),
            Self::Mental => (
                "Mental Health Support",
                "Consider stress management techniques or professional support",
                Priority::High,
            ),
            Self::Nutrition => (
                "Improve Diet Quality",
                "Focus on whole foods, fruits, vegetables, and lean proteins",
                Priority::Medium,
            ),
            Self::Sleep => (
                "Optimize Sleep Habits",
                "Establish consistent sleep schedule and improve sleep hygiene",
                Priority::High,
            ),
            Self::Social => (
                "Strengthen Social Connections",
                "Cultivate meaningful relationships and social activities",
                Priority::Medium,
            ),
            Self::Medical => (
                "Medical Attention Needed",
                "Consult healthcare providers for regular check-ups",
                Priority::High,
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
}

impl Priority {
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High Priority",
            Self::Medium => "Medium Priority",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Excellent,
    Good,
    NeedsImprovement,
}

impl ScoreBand {
    pub fn for_score(score: u8, config: &ScoringConfig) -> Self {
        if score >= config.excellent_from {
            Self::Excellent
        } else if score >= config.good_from {
            Self::Good
        } else {
            Self::NeedsImprovement
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::NeedsImprovement => "Needs Improvement",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionScore {
    pub dimension: HealthDimension,
    pub name: String,
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub dimension: HealthDimension,
    pub title: String,
    pub description: String,
    pub priority: Priority,
}

pub(crate) fn dimension_scores(answers: &AnswerSet) -> Vec<DimensionScore> {
    HealthDimension::ordered()
        .into_iter()
        .map(|dimension| DimensionScore {
            dimension,
            name: dimension.label().to_string(),
            score: dimension.score(answers),
        })
        .collect()
}

pub(crate) fn overall_score(scores: &[DimensionScore]) -> u8 {
    if scores.is_empty() {
        return 0;
    }
    let sum: u32 = scores.iter().map(|entry| u32::from(entry.score)).sum();
    (f64::from(sum) / scores.len() as f64).round() as u8
}

pub(crate) fn recommendations(
    scores: &[DimensionScore],
    config: &ScoringConfig,
) -> Vec<Recommendation> {
    scores
        .iter()
        .filter(|entry| entry.score < config.recommendation_threshold)
        .map(|entry| {
            let (title, description, priority) = entry.dimension.advice();
            Recommendation {
                dimension: entry.dimension,
                title: title.to_string(),
                description: description.to_string(),
                priority,
            }
        })
        .collect()
}
