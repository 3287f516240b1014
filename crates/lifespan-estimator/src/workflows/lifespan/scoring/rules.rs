use super::super::answers::AnswerSet;
use super::super::domain::{
    AlcoholConsumption, ChronicCondition, CurrentSituation, DietType, EnvironmentalFactor,
    ExerciseFrequency, FamilyHistoryFactor, HealthcareAccess, HydrationLevel, LifestyleHabit,
    Location, MedicalCondition, MentalHealth, ScreenTime, SleepPattern, SocialRelationships,
    StressManagement,
};
use serde::{Deserialize, Serialize};

/// Source of one additive contribution to the remaining years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentFactor {
    Bmi,
    MedicalCondition,
    CurrentSituation,
    Location,
    MentalHealth,
    SleepPatterns,
    EnvironmentalFactors,
    SocialRelationships,
    AccessHealthcare,
    ExerciseFrequency,
    StressManagement,
    DietType,
    AlcoholConsumption,
    HydrationLevel,
    ScreenTime,
    Smoking,
    AlcoholHabit,
    DietHabit,
    ExerciseHabit,
    StressHabit,
    ChronicCondition,
    FamilyHistory,
}

impl AdjustmentFactor {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bmi => "BMI",
            Self::MedicalCondition => "Medical Condition",
            Self::CurrentSituation => "Current Situation",
            Self::Location => "Location",
            Self::MentalHealth => "Mental Health",
            Self::SleepPatterns => "Sleep Patterns",
            Self::EnvironmentalFactors => "Environmental Factors",
            Self::SocialRelationships => "Social Relationships",
            Self::AccessHealthcare => "Access to Healthcare",
            Self::ExerciseFrequency => "Exercise Frequency",
            Self::StressManagement => "Stress Management",
            Self::DietType => "Diet Type",
            Self::AlcoholConsumption => "Alcohol Consumption",
            Self::HydrationLevel => "Hydration Level",
            Self::ScreenTime => "Screen Time",
            Self::Smoking => "Smoking",
            Self::AlcoholHabit => "Regular Alcohol",
            Self::DietHabit => "Poor Diet",
            Self::ExerciseHabit => "Regular Exercise",
            Self::StressHabit => "High Stress",
            Self::ChronicCondition => "Chronic Condition",
            Self::FamilyHistory => "Family History",
        }
    }
}

/// Audit entry for a non-zero contribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adjustment {
    pub factor: AdjustmentFactor,
    pub delta: f64,
    pub note: String,
}

/// Weight bands keyed on the BMI boundaries 18.5, 25, 30 and 35.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiBand {
    Underweight,
    Normal,
    Overweight,
    Obese,
    SeverelyObese,
}

impl BmiBand {
    pub fn classify(bmi: f64) -> Self {
        if bmi < 18.5 {
            Self::Underweight
        } else if bmi < 25.0 {
            Self::Normal
        } else if bmi < 30.0 {
            Self::Overweight
        } else if bmi < 35.0 {
            Self::Obese
        } else {
            Self::SeverelyObese
        }
    }

    pub const fn delta(self) -> f64 {
        match self {
            Self::Underweight => -2.0,
            Self::Normal => 0.0,
            Self::Overweight => -3.0,
            Self::Obese => -5.0,
            Self::SeverelyObese => -8.0,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Underweight => "Underweight",
            Self::Normal => "Normal",
            Self::Overweight => "Overweight",
            Self::Obese => "Obese",
            Self::SeverelyObese => "Severely Obese",
        }
    }
}

fn medical_condition(value: MedicalCondition) -> f64 {
    match value {
        MedicalCondition::Bad => -6.0,
        MedicalCondition::Good => 0.0,
    }
}

fn current_situation(value: CurrentSituation) -> f64 {
    match value {
        CurrentSituation::Unhealthy => -4.0,
        CurrentSituation::Healthy => 0.0,
    }
}

fn location(value: Location) -> f64 {
    match value {
        Location::Urban => -2.0,
        Location::Rural => 1.0,
        Location::Suburban | Location::Unspecified => 0.0,
    }
}

fn mental_health(value: MentalHealth) -> f64 {
    match value {
        MentalHealth::Anxiety | MentalHealth::Depression => -6.0,
        MentalHealth::Burnout => -4.0,
        MentalHealth::Other => -2.0,
        MentalHealth::Good => 0.0,
    }
}

fn sleep_patterns(value: SleepPattern) -> f64 {
    match value {
        SleepPattern::Insomnia => -5.0,
        SleepPattern::Other => -2.0,
        SleepPattern::Good => 0.0,
    }
}

fn environmental_factors(value: EnvironmentalFactor) -> f64 {
    match value {
        EnvironmentalFactor::Pollution => -3.0,
        EnvironmentalFactor::AirQuality => 2.0,
        EnvironmentalFactor::GreenSpaces => 1.0,
        EnvironmentalFactor::NaturalDisasters => -5.0,
    }
}

fn social_relationships(value: SocialRelationships) -> f64 {
    match value {
        SocialRelationships::Weak => -3.0,
        SocialRelationships::Strong => 2.0,
        SocialRelationships::Moderate => 0.0,
    }
}

fn access_healthcare(value: HealthcareAccess) -> f64 {
    match value {
        HealthcareAccess::EmergencyOnly => -5.0,
        HealthcareAccess::NoAccess => -8.0,
        HealthcareAccess::RegularCheckups => 3.0,
    }
}

fn exercise_frequency(value: ExerciseFrequency) -> f64 {
    match value {
        ExerciseFrequency::Daily => 3.0,
        ExerciseFrequency::Never => -6.0,
        ExerciseFrequency::Weekly | ExerciseFrequency::Occasionally => 0.0,
    }
}

fn stress_management(value: StressManagement) -> f64 {
    match value {
        StressManagement::NoPractice => -3.0,
        StressManagement::Meditation | StressManagement::Yoga => 2.0,
        StressManagement::Therapy | StressManagement::Exercise => 0.0,
    }
}

fn diet_type(value: DietType) -> f64 {
    match value {
        DietType::Balanced => 3.0,
        DietType::Mediterranean => 2.0,
        _ => 0.0,
    }
}

fn alcohol_consumption(value: AlcoholConsumption) -> f64 {
    match value {
        AlcoholConsumption::Abstinent => 2.0,
        AlcoholConsumption::Heavy => -5.0,
        AlcoholConsumption::Occasional | AlcoholConsumption::Moderate => 0.0,
    }
}

fn hydration_level(value: HydrationLevel) -> f64 {
    match value {
        HydrationLevel::VeryLow => -3.0,
        HydrationLevel::VeryHigh => 2.0,
        _ => 0.0,
    }
}

fn screen_time(value: ScreenTime) -> f64 {
    match value {
        ScreenTime::OverSixHours => -5.0,
        _ => 0.0,
    }
}

pub(crate) fn smoking_delta(smoking_years: Option<u32>) -> f64 {
    match smoking_years {
        Some(years) if years > 0 => -(4.0 + 0.2 * f64::from(years)),
        _ => -8.0,
    }
}

fn chronic_condition(value: ChronicCondition) -> f64 {
    match value {
        ChronicCondition::Diabetes => -7.0,
        ChronicCondition::Hypertension => -5.0,
        ChronicCondition::HeartDisease => -8.0,
        ChronicCondition::Cancer => -10.0,
        ChronicCondition::Respiratory => -6.0,
    }
}

fn family_history(value: FamilyHistoryFactor) -> f64 {
    match value {
        FamilyHistoryFactor::Longevity => 4.0,
        FamilyHistoryFactor::HeartDisease => -3.0,
        FamilyHistoryFactor::Cancer => -2.0,
        FamilyHistoryFactor::Diabetes => -2.0,
    }
}

struct Ledger {
    adjustments: Vec<Adjustment>,
    total: f64,
}

impl Ledger {
    fn record(&mut self, factor: AdjustmentFactor, delta: f64, note: impl FnOnce() -> String) {
        if delta != 0.0 {
            self.total += delta;
            self.adjustments.push(Adjustment {
                factor,
                delta,
                note: note(),
            });
        }
    }

    fn choice<T: Copy>(
        &mut self,
        factor: AdjustmentFactor,
        value: Option<T>,
        rule: fn(T) -> f64,
        label: fn(T) -> &'static str,
    ) {
        if let Some(value) = value {
            self.record(factor, rule(value), || label(value).to_string());
        }
    }
}

/// Applies every rule to the answers; returns the audit trail and the summed delta.
pub(crate) fn score_answers(answers: &AnswerSet, bmi: Option<f64>) -> (Vec<Adjustment>, f64) {
    let mut ledger = Ledger {
        adjustments: Vec::new(),
        total: 0.0,
    };

    if let Some(bmi) = bmi {
        let band = BmiBand::classify(bmi);
        ledger.record(AdjustmentFactor::Bmi, band.delta(), || {
            format!("BMI {bmi:.1} ({})", band.label())
        });
    }

    use AdjustmentFactor as F;
    ledger.choice(
        F::MedicalCondition,
        answers.medical_condition,
        medical_condition,
        MedicalCondition::label,
    );
    ledger.choice(
        F::CurrentSituation,
        answers.current_situation,
        current_situation,
        CurrentSituation::label,
    );
    ledger.choice(F::Location, answers.location, location, Location::label);
    ledger.choice(
        F::MentalHealth,
        answers.mental_health,
        mental_health,
        MentalHealth::label,
    );
    ledger.choice(
        F::SleepPatterns,
        answers.sleep_patterns,
        sleep_patterns,
        SleepPattern::label,
    );
    ledger.choice(
        F::EnvironmentalFactors,
        answers.environmental_factors,
        environmental_factors,
        EnvironmentalFactor::label,
    );
    ledger.choice(
        F::SocialRelationships,
        answers.social_relationships,
        social_relationships,
        SocialRelationships::label,
    );
    ledger.choice(
        F::AccessHealthcare,
        answers.access_healthcare,
        access_healthcare,
        HealthcareAccess::label,
    );
    ledger.choice(
        F::ExerciseFrequency,
        answers.exercise_frequency,
        exercise_frequency,
        ExerciseFrequency::label,
    );
    ledger.choice(
        F::StressManagement,
        answers.stress_management,
        stress_management,
        StressManagement::label,
    );
    ledger.choice(F::DietType, answers.diet_type, diet_type, DietType::label);
    ledger.choice(
        F::AlcoholConsumption,
        answers.alcohol_consumption,
        alcohol_consumption,
        AlcoholConsumption::label,
    );
    ledger.choice(
        F::HydrationLevel,
        answers.hydration_level,
        hydration_level,
        HydrationLevel::label,
    );
    ledger.choice(
        F::ScreenTime,
        answers.screen_time,
        screen_time,
        ScreenTime::label,
    );

    // Habits stack on top of the related single-choice answers.
    for habit in &answers.lifestyle_habits {
        match habit {
            LifestyleHabit::Smoking => {
                ledger.record(F::Smoking, smoking_delta(answers.smoking_years), || {
                    match answers.smoking_years {
                        Some(years) if years > 0 => format!("smoking for {years} years"),
                        _ => "smoking, duration not given".to_string(),
                    }
                })
            }
            LifestyleHabit::Alcohol => {
                ledger.record(F::AlcoholHabit, -3.0, || habit.label().to_string())
            }
            LifestyleHabit::Diet => ledger.record(F::DietHabit, -2.0, || habit.label().to_string()),
            LifestyleHabit::Exercise => {
                ledger.record(F::ExerciseHabit, 4.0, || habit.label().to_string())
            }
            LifestyleHabit::Stress => {
                ledger.record(F::StressHabit, -4.0, || habit.label().to_string())
            }
        }
    }

    for condition in &answers.chronic_conditions {
        ledger.record(F::ChronicCondition, chronic_condition(*condition), || {
            condition.label().to_string()
        });
    }

    for factor in &answers.family_history {
        ledger.record(F::FamilyHistory, family_history(*factor), || {
            format!("family history: {}", factor.label())
        });
    }

    (ledger.adjustments, ledger.total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bmi_boundaries() {
        assert_eq!(BmiBand::classify(18.49), BmiBand::Underweight);
        assert_eq!(BmiBand::classify(18.5), BmiBand::Normal);
        assert_eq!(BmiBand::classify(25.0), BmiBand::Overweight);
        assert_eq!(BmiBand::classify(30.0), BmiBand::Obese);
        assert_eq!(BmiBand::classify(35.0), BmiBand::SeverelyObese);
    }

    #[test]
    fn smoking_scales_with_years() {
        assert!((smoking_delta(Some(10)) + 6.0).abs() < 1e-9);
        assert_eq!(smoking_delta(Some(0)), -8.0);
        assert_eq!(smoking_delta(None), -8.0);
    }

    #[test]
    fn neutral_answers_leave_no_trail() {
        let answers = AnswerSet {
            medical_condition: Some(MedicalCondition::Good),
            location: Some(Location::Suburban),
            exercise_frequency: Some(ExerciseFrequency::Weekly),
            ..AnswerSet::default()
        };
        let (adjustments, total) = score_answers(&answers, Some(22.0));
        assert!(adjustments.is_empty());
        assert_eq!(total, 0.0);
    }

    #[test]
    fn single_choice_and_habit_both_count() {
        let answers = AnswerSet {
            exercise_frequency: Some(ExerciseFrequency::Daily),
            lifestyle_habits: [LifestyleHabit::Exercise].into_iter().collect(),
            ..AnswerSet::default()
        };
        let (adjustments, total) = score_answers(&answers, None);
        assert_eq!(adjustments.len(), 2);
        assert_eq!(total, 7.0);
    }

    #[test]
    fn trail_sums_to_total() {
        let answers = AnswerSet {
            mental_health: Some(MentalHealth::Burnout),
            screen_time: Some(ScreenTime::OverSixHours),
            chronic_conditions: [ChronicCondition::Diabetes, ChronicCondition::Respiratory]
                .into_iter()
                .collect(),
            family_history: [FamilyHistoryFactor::Longevity].into_iter().collect(),
            ..AnswerSet::default()
        };
        let (adjustments, total) = score_answers(&answers, Some(31.0));
        let summed: f64 = adjustments.iter().map(|a| a.delta).sum();
        assert_eq!(summed, total);
        assert_eq!(total, -4.0 - 5.0 - 7.0 - 6.0 + 4.0 - 5.0);
    }
}
