use super::domain::{
    AlcoholConsumption, ChronicCondition, Collection, CurrentSituation, DietType,
    EnvironmentalFactor, EstimationMode, ExerciseFrequency, FamilyHistoryFactor, Field, Gender,
    HealthcareAccess, HydrationLevel, LifestyleHabit, Location, MedicalCondition, MentalHealth,
    ScreenTime, Selection, SleepPattern, SocialRelationships, StressManagement, SunExposure,
    UnknownChoice,
};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Rejected write to a single answer field. The field keeps its previous value.
#[derive(Debug, Error)]
pub enum FieldError {
    #[error(transparent)]
    Choice(#[from] UnknownChoice),
    #[error("{field} expects a number, got '{value}'")]
    Number { field: Field, value: String },
    #[error("{field} expects a YYYY-MM-DD date, got '{value}'")]
    Date {
        field: Field,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// The questionnaire answers for one calculation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnswerSet {
    pub name: Option<String>,
    pub email: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub mobile: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub location: Option<Location>,
    pub medical_condition: Option<MedicalCondition>,
    pub current_situation: Option<CurrentSituation>,
    pub chronic_conditions: Selection<ChronicCondition>,
    pub family_history: Selection<FamilyHistoryFactor>,
    pub lifestyle_habits: Selection<LifestyleHabit>,
    pub smoking_years: Option<u32>,
    pub mental_health: Option<MentalHealth>,
    pub sleep_patterns: Option<SleepPattern>,
    pub environmental_factors: Option<EnvironmentalFactor>,
    pub social_relationships: Option<SocialRelationships>,
    pub access_healthcare: Option<HealthcareAccess>,
    pub exercise_frequency: Option<ExerciseFrequency>,
    pub stress_management: Option<StressManagement>,
    pub hydration_level: Option<HydrationLevel>,
    pub sun_exposure: Option<SunExposure>,
    pub diet_type: Option<DietType>,
    pub alcohol_consumption: Option<AlcoholConsumption>,
    pub screen_time: Option<ScreenTime>,
    pub estimation_type: EstimationMode,
    pub user_estimated_lifespan: Option<u32>,
}

fn choice<T>(raw: &str) -> Result<Option<T>, FieldError>
where
    T: std::str::FromStr<Err = UnknownChoice>,
{
    Ok(Some(raw.parse::<T>()?))
}

fn number<T: std::str::FromStr>(field: Field, raw: &str) -> Result<Option<T>, FieldError> {
    raw.parse::<T>()
        .map(Some)
        .map_err(|_| FieldError::Number {
            field,
            value: raw.to_string(),
        })
}

fn measurement(field: Field, raw: &str) -> Result<Option<f64>, FieldError> {
    match number::<f64>(field, raw)? {
        Some(value) if !value.is_finite() => Err(FieldError::Number {
            field,
            value: raw.to_string(),
        }),
        parsed => Ok(parsed),
    }
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a raw form value into `field`; a blank value clears it.
    pub fn set_field(&mut self, field: Field, raw: &str) -> Result<(), FieldError> {
        let raw = raw.trim();
        if raw.is_empty() {
            self.clear_field(field);
            return Ok(());
        }

        match field {
            Field::Name => self.name = Some(raw.to_string()),
            Field::Email => self.email = Some(raw.to_string()),
            Field::Mobile => self.mobile = Some(raw.to_string()),
            Field::DateOfBirth => {
                let date = NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|source| {
                    FieldError::Date {
                        field,
                        value: raw.to_string(),
                        source,
                    }
                })?;
                self.date_of_birth = Some(date);
            }
            Field::Gender => self.gender = choice(raw)?,
            Field::Height => self.height = measurement(field, raw)?,
            Field::Weight => self.weight = measurement(field, raw)?,
            Field::Location => self.location = choice(raw)?,
            Field::MedicalCondition => self.medical_condition = choice(raw)?,
            Field::CurrentSituation => self.current_situation = choice(raw)?,
            Field::SmokingYears => self.smoking_years = number(field, raw)?,
            Field::MentalHealth => self.mental_health = choice(raw)?,
            Field::SleepPatterns => self.sleep_patterns = choice(raw)?,
            Field::EnvironmentalFactors => self.environmental_factors = choice(raw)?,
            Field::SocialRelationships => self.social_relationships = choice(raw)?,
            Field::AccessHealthcare => self.access_healthcare = choice(raw)?,
            Field::ExerciseFrequency => self.exercise_frequency = choice(raw)?,
            Field::StressManagement => self.stress_management = choice(raw)?,
            Field::HydrationLevel => self.hydration_level = choice(raw)?,
            Field::SunExposure => self.sun_exposure = choice(raw)?,
            Field::DietType => self.diet_type = choice(raw)?,
            Field::AlcoholConsumption => self.alcohol_consumption = choice(raw)?,
            Field::ScreenTime => self.screen_time = choice(raw)?,
            Field::EstimationType => self.estimation_type = raw.parse()?,
            Field::UserEstimatedLifespan => self.user_estimated_lifespan = number(field, raw)?,
        }

        Ok(())
    }

    pub fn clear_field(&mut self, field: Field) {
        match field {
            Field::Name => self.name = None,
            Field::Email => self.email = None,
            Field::Mobile => self.mobile = None,
            Field::DateOfBirth => self.date_of_birth = None,
            Field::Gender => self.gender = None,
            Field::Height => self.height = None,
            Field::Weight => self.weight = None,
            Field::Location => self.location = None,
            Field::MedicalCondition => self.medical_condition = None,
            Field::CurrentSituation => self.current_situation = None,
            Field::SmokingYears => self.smoking_years = None,
            Field::MentalHealth => self.mental_health = None,
            Field::SleepPatterns => self.sleep_patterns = None,
            Field::EnvironmentalFactors => self.environmental_factors = None,
            Field::SocialRelationships => self.social_relationships = None,
            Field::AccessHealthcare => self.access_healthcare = None,
            Field::ExerciseFrequency => self.exercise_frequency = None,
            Field::StressManagement => self.stress_management = None,
            Field::HydrationLevel => self.hydration_level = None,
            Field::SunExposure => self.sun_exposure = None,
            Field::DietType => self.diet_type = None,
            Field::AlcoholConsumption => self.alcohol_consumption = None,
            Field::ScreenTime => self.screen_time = None,
            Field::EstimationType => self.estimation_type = EstimationMode::default(),
            Field::UserEstimatedLifespan => self.user_estimated_lifespan = None,
        }
    }

    /// Parses `raw` as a member of `collection` and toggles it; returns whether it is now present.
    pub fn toggle_member(&mut self, collection: Collection, raw: &str) -> Result<bool, FieldError> {
        let present = match collection {
            Collection::LifestyleHabits => self.lifestyle_habits.toggle(raw.parse()?),
            Collection::ChronicConditions => self.chronic_conditions.toggle(raw.parse()?),
            Collection::FamilyHistory => self.family_history.toggle(raw.parse()?),
        };
        Ok(present)
    }

    /// Body mass index, defined only for finite positive height and weight.
    pub fn bmi(&self) -> Option<f64> {
        let height = self.height.filter(|h| h.is_finite() && *h > 0.0)?;
        let weight = self.weight.filter(|w| w.is_finite() && *w > 0.0)?;
        let metres = height / 100.0;
        Some(weight / (metres * metres))
    }

    /// Whole years between the date of birth and `today`.
    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        let born = self.date_of_birth?;
        if born > today {
            return None;
        }
        let mut years = today.year() - born.year();
        if (today.month(), today.day()) < (born.month(), born.day()) {
            years -= 1;
        }
        u32::try_from(years).ok()
    }

    pub fn is_answered(&self, field: Field) -> bool {
        fn text(value: &Option<String>) -> bool {
            value.as_deref().is_some_and(|s| !s.trim().is_empty())
        }

        match field {
            Field::Name => text(&self.name),
            Field::Email => text(&self.email),
            Field::Mobile => text(&self.mobile),
            Field::DateOfBirth => self.date_of_birth.is_some(),
            Field::Gender => self.gender.is_some(),
            Field::Height => self.height.is_some(),
            Field::Weight => self.weight.is_some(),
            Field::Location => self.location.is_some(),
            Field::MedicalCondition => self.medical_condition.is_some(),
            Field::CurrentSituation => self.current_situation.is_some(),
            Field::SmokingYears => self.smoking_years.is_some(),
            Field::MentalHealth => self.mental_health.is_some(),
            Field::SleepPatterns => self.sleep_patterns.is_some(),
            Field::EnvironmentalFactors => self.environmental_factors.is_some(),
            Field::SocialRelationships => self.social_relationships.is_some(),
            Field::AccessHealthcare => self.access_healthcare.is_some(),
            Field::ExerciseFrequency => self.exercise_frequency.is_some(),
            Field::StressManagement => self.stress_management.is_some(),
            Field::HydrationLevel => self.hydration_level.is_some(),
            Field::SunExposure => self.sun_exposure.is_some(),
            Field::DietType => self.diet_type.is_some(),
            Field::AlcoholConsumption => self.alcohol_consumption.is_some(),
            Field::ScreenTime => self.screen_time.is_some(),
            Field::EstimationType => true,
            Field::UserEstimatedLifespan => self.user_estimated_lifespan.is_some(),
        }
    }

    pub fn is_smoker(&self) -> bool {
        self.lifestyle_habits.contains(&LifestyleHabit::Smoking)
    }
}
