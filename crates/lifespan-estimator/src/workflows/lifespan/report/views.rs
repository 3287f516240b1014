use super::super::answers::AnswerSet;
use super::super::domain::{Selection, WizardSection};
use serde::Serialize;

const NOT_PROVIDED: &str = "Not provided";
const NOT_CALCULATED: &str = "Not calculated";
const NONE: &str = "None";
const NOT_APPLICABLE: &str = "Not applicable";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetRow {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetSection {
    pub title: &'static str,
    pub rows: Vec<SheetRow>,
}

/// Answers grouped for display under the six result headings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerSheet {
    pub sections: Vec<SheetSection>,
}

fn row(label: &'static str, value: impl Into<String>) -> SheetRow {
    SheetRow {
        label,
        value: value.into(),
    }
}

fn text(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(NOT_PROVIDED)
        .to_string()
}

fn choice<T: Copy>(value: Option<T>, label: fn(T) -> &'static str) -> String {
    value.map(label).unwrap_or(NOT_PROVIDED).to_string()
}

fn members<T: Copy>(selection: &Selection<T>, label: fn(T) -> &'static str) -> String {
    if selection.is_empty() {
        NONE.to_string()
    } else {
        selection
            .iter()
            .map(|member| label(*member))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn measurement(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) if v > 0.0 => format!("{v} {unit}"),
        _ => NOT_PROVIDED.to_string(),
    }
}

impl AnswerSheet {
    pub fn from_answers(answers: &AnswerSet) -> Self {
        use super::super::domain::*;

        let personal = SheetSection {
            title: "Personal Information",
            rows: vec![
                row("Name", text(answers.name.as_deref())),
                row("Gender", choice(answers.gender, Gender::label)),
                row(
                    "Date of Birth",
                    answers
                        .date_of_birth
                        .map(|date| date.format("%B %-d, %Y").to_string())
                        .unwrap_or_else(|| NOT_PROVIDED.to_string()),
                ),
                row("Mobile", text(answers.mobile.as_deref())),
                row("Email", text(answers.email.as_deref())),
                row("Location", choice(answers.location, Location::label)),
                row("Height", measurement(answers.height, "cm")),
                row("Weight", measurement(answers.weight, "kg")),
                row(
                    "BMI",
                    answers
                        .bmi()
                        .map(|bmi| format!("{bmi:.1}"))
                        .unwrap_or_else(|| NOT_CALCULATED.to_string()),
                ),
            ],
        };

        let health = SheetSection {
            title: "Health Information",
            rows: vec![
                row(
                    "Medical Condition",
                    choice(answers.medical_condition, MedicalCondition::label),
                ),
                row(
                    "Current Situation",
                    choice(answers.current_situation, CurrentSituation::label),
                ),
                row(
                    "Chronic Conditions",
                    members(&answers.chronic_conditions, ChronicCondition::label),
                ),
                row(
                    "Family History",
                    members(&answers.family_history, FamilyHistoryFactor::label),
                ),
            ],
        };

        let lifestyle = SheetSection {
            title: "Lifestyle Information",
            rows: vec![
                row(
                    "Lifestyle Habits",
                    members(&answers.lifestyle_habits, LifestyleHabit::label),
                ),
                row(
                    "Smoking Years",
                    match answers.smoking_years {
                        Some(years) if years > 0 && answers.is_smoker() => years.to_string(),
                        _ => NOT_APPLICABLE.to_string(),
                    },
                ),
                row(
                    "Mental Health",
                    choice(answers.mental_health, MentalHealth::label),
                ),
                row(
                    "Sleep Patterns",
                    choice(answers.sleep_patterns, SleepPattern::label),
                ),
                row(
                    "Environmental Factors",
                    choice(answers.environmental_factors, EnvironmentalFactor::label),
                ),
                row(
                    "Social Relationships",
                    choice(answers.social_relationships, SocialRelationships::label),
                ),
                row(
                    "Access to Healthcare",
                    choice(answers.access_healthcare, HealthcareAccess::label),
                ),
            ],
        };

        let activity = SheetSection {
            title: "Activity Information",
            rows: vec![
                row(
                    "Exercise Frequency",
                    choice(answers.exercise_frequency, ExerciseFrequency::label),
                ),
                row(
                    "Stress Management",
                    choice(answers.stress_management, StressManagement::label),
                ),
                row(
                    "Hydration Level",
                    choice(answers.hydration_level, HydrationLevel::label),
                ),
                row(
                    "Sun Exposure",
                    choice(answers.sun_exposure, SunExposure::label),
                ),
            ],
        };

        let diet = SheetSection {
            title: "Diet Information",
            rows: vec![row("Diet Type", choice(answers.diet_type, DietType::label))],
        };

        let habits = SheetSection {
            title: "Habit Information",
            rows: vec![
                row(
                    "Alcohol Consumption",
                    choice(answers.alcohol_consumption, AlcoholConsumption::label),
                ),
                row("Screen Time", choice(answers.screen_time, ScreenTime::label)),
            ],
        };

        Self {
            sections: vec![personal, health, lifestyle, activity, diet, habits],
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = (&'static str, &SheetRow)> {
        self.sections
            .iter()
            .flat_map(|section| section.rows.iter().map(move |row| (section.title, row)))
    }
}

/// One wizard section with its fields and their allowed values.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionnaireSectionView {
    pub section: WizardSection,
    pub section_label: &'static str,
    pub fields: Vec<QuestionView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub field: &'static str,
    pub label: &'static str,
    pub multiple: bool,
    pub choices: Vec<&'static str>,
}

/// Form layout: every section in wizard order with its questions.
pub fn questionnaire_outline() -> Vec<QuestionnaireSectionView> {
    use super::super::domain::{Collection, Field};

    WizardSection::ordered()
        .into_iter()
        .map(|section| {
            let scalar = Field::ALL
                .iter()
                .filter(|field| field.section() == section)
                .map(|field| QuestionView {
                    field: field.as_str(),
                    label: field.label(),
                    multiple: false,
                    choices: field.choices(),
                });
            let multi = Collection::ALL
                .iter()
                .filter(|collection| collection.section() == section)
                .map(|collection| QuestionView {
                    field: collection.as_str(),
                    label: collection.label(),
                    multiple: true,
                    choices: collection.choices(),
                });
            QuestionnaireSectionView {
                section,
                section_label: section.label(),
                fields: scalar.chain(multi).collect(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::lifespan::domain::{ChronicCondition, LifestyleHabit};

    fn value<'a>(sheet: &'a AnswerSheet, label: &str) -> &'a str {
        sheet
            .rows()
            .find(|(_, row)| row.label == label)
            .map(|(_, row)| row.value.as_str())
            .expect("row present")
    }

    #[test]
    fn empty_answers_use_fallbacks() {
        let sheet = AnswerSheet::from_answers(&AnswerSet::default());
        assert_eq!(sheet.sections.len(), 6);
        assert_eq!(value(&sheet, "Height"), "Not provided");
        assert_eq!(value(&sheet, "BMI"), "Not calculated");
        assert_eq!(value(&sheet, "Chronic Conditions"), "None");
        assert_eq!(value(&sheet, "Smoking Years"), "Not applicable");
    }

    #[test]
    fn renders_labels_and_bmi() {
        let answers = AnswerSet {
            height: Some(180.0),
            weight: Some(81.0),
            chronic_conditions: [ChronicCondition::HeartDisease, ChronicCondition::Cancer]
                .into_iter()
                .collect(),
            lifestyle_habits: [LifestyleHabit::Smoking].into_iter().collect(),
            smoking_years: Some(12),
            date_of_birth: chrono::NaiveDate::from_ymd_opt(1990, 4, 9),
            ..AnswerSet::default()
        };
        let sheet = AnswerSheet::from_answers(&answers);
        assert_eq!(value(&sheet, "Height"), "180 cm");
        assert_eq!(value(&sheet, "BMI"), "25.0");
        assert_eq!(value(&sheet, "Chronic Conditions"), "Heart Disease, Cancer");
        assert_eq!(value(&sheet, "Smoking Years"), "12");
        assert_eq!(value(&sheet, "Date of Birth"), "April 9, 1990");
    }

    #[test]
    fn outline_covers_every_field_once() {
        let outline = questionnaire_outline();
        assert_eq!(outline.len(), 6);
        let total: usize = outline.iter().map(|section| section.fields.len()).sum();
        assert_eq!(total, 25 + 3);
        assert!(outline[1].fields.iter().any(|q| q.field == "chronicConditions" && q.multiple));
    }
}
