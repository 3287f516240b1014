use super::answers::{AnswerSet, FieldError};
use super::domain::{Collection, EstimationMode, Field, WizardSection};
use super::scoring::{LifespanEngine, LifespanResult};
use super::validation::{ValidationError, ValidationPolicy, ValidationReport};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

/// Snapshot of the answers together with the result computed from them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Estimate {
    pub calculated_on: NaiveDate,
    pub answers: AnswerSet,
    pub result: LifespanResult,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionProgress {
    pub section: WizardSection,
    pub section_label: &'static str,
    pub answered: usize,
    pub required: usize,
}

impl SectionProgress {
    pub fn is_complete(&self) -> bool {
        self.answered == self.required
    }
}

/// Owns the answers for one run and the position within the six wizard sections.
#[derive(Debug, Clone)]
pub struct Questionnaire {
    policy: ValidationPolicy,
    answers: AnswerSet,
    section: WizardSection,
    estimate: Option<Estimate>,
}

impl Questionnaire {
    pub fn new(policy: ValidationPolicy) -> Self {
        Self {
            policy,
            answers: AnswerSet::default(),
            section: WizardSection::default(),
            estimate: None,
        }
    }

    pub fn with_answers(policy: ValidationPolicy, answers: AnswerSet) -> Self {
        Self {
            answers,
            ..Self::new(policy)
        }
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn section(&self) -> WizardSection {
        self.section
    }

    pub fn estimate(&self) -> Option<&Estimate> {
        self.estimate.as_ref()
    }

    pub fn set_field(&mut self, field: Field, raw: &str) -> Result<(), FieldError> {
        self.answers.set_field(field, raw)
    }

    pub fn toggle_member(&mut self, collection: Collection, raw: &str) -> Result<bool, FieldError> {
        self.answers.toggle_member(collection, raw)
    }

    /// Moves one section forward; stays put on the last section.
    pub fn advance(&mut self) -> WizardSection {
        if let Some(next) = self.section.next() {
            self.section = next;
        }
        self.section
    }

    /// Moves one section back; stays put on the first section.
    pub fn retreat(&mut self) -> WizardSection {
        if let Some(previous) = self.section.previous() {
            self.section = previous;
        }
        self.section
    }

    pub fn jump_to(&mut self, section: WizardSection) {
        self.section = section;
    }

    pub fn section_progress(&self) -> Vec<SectionProgress> {
        WizardSection::ordered()
            .into_iter()
            .map(|section| {
                let required: Vec<Field> = self
                    .required_fields()
                    .into_iter()
                    .filter(|field| field.section() == section)
                    .collect();
                SectionProgress {
                    section,
                    section_label: section.label(),
                    answered: required
                        .iter()
                        .filter(|field| self.answers.is_answered(**field))
                        .count(),
                    required: required.len(),
                }
            })
            .collect()
    }

    fn required_fields(&self) -> Vec<Field> {
        let mut fields = vec![
            Field::Name,
            Field::Email,
            Field::Mobile,
            Field::Gender,
            Field::DateOfBirth,
        ];
        fields.extend(Field::required_choices());
        if self.answers.estimation_type == EstimationMode::User {
            fields.push(Field::UserEstimatedLifespan);
        }
        fields
    }

    pub fn validate_for_calculation(&self, today: NaiveDate) -> ValidationReport {
        self.policy.validate(&self.answers, today)
    }

    /// Gates, freezes and scores the current answers, replacing any earlier estimate.
    pub fn calculate(
        &mut self,
        engine: &LifespanEngine,
        today: NaiveDate,
    ) -> Result<&Estimate, ValidationError> {
        if let Err(error) = self.validate_for_calculation(today).into_result() {
            info!(issues = error.issues.len(), "calculation rejected");
            return Err(error);
        }

        let answers = self.answers.clone();
        let result = engine.estimate(&answers, today);
        let estimate = self.estimate.insert(Estimate {
            calculated_on: today,
            answers,
            result,
        });
        Ok(&*estimate)
    }

    pub fn reset(&mut self) {
        self.answers = AnswerSet::default();
        self.section = WizardSection::default();
        self.estimate = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn questionnaire() -> Questionnaire {
        Questionnaire::new(ValidationPolicy::standard().expect("policy"))
    }

    #[test]
    fn navigation_is_bounded() {
        let mut wizard = questionnaire();
        assert_eq!(wizard.retreat(), WizardSection::Personal);
        for _ in 0..10 {
            wizard.advance();
        }
        assert_eq!(wizard.section(), WizardSection::Calculate);
        assert_eq!(wizard.retreat(), WizardSection::Diet);
        wizard.jump_to(WizardSection::Health);
        assert_eq!(wizard.section(), WizardSection::Health);
    }

    #[test]
    fn progress_counts_required_answers() {
        let mut wizard = questionnaire();
        wizard.set_field(Field::Name, "Asha").expect("text");
        wizard
            .set_field(Field::MedicalCondition, "good")
            .expect("known");
        let progress = wizard.section_progress();
        assert_eq!(progress[0].answered, 1);
        assert_eq!(progress[0].required, 6);
        assert!(!progress[1].is_complete());
        assert_eq!(progress[5].required, 1);

        wizard
            .set_field(Field::EstimationType, "system")
            .expect("known");
        assert!(wizard.section_progress()[5].is_complete());
    }

    #[test]
    fn rejected_calculation_keeps_state() {
        let mut wizard = questionnaire();
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).expect("date");
        let err = wizard
            .calculate(&LifespanEngine::default(), today)
            .expect_err("empty answers");
        assert!(!err.issues.is_empty());
        assert!(wizard.estimate().is_none());
    }

    #[test]
    fn reset_returns_to_start() {
        let mut wizard = questionnaire();
        wizard.set_field(Field::Email, "a@b.io").expect("text");
        wizard.advance();
        wizard.reset();
        assert_eq!(wizard.section(), WizardSection::Personal);
        assert!(!wizard.answers().is_answered(Field::Email));
    }
}
