//! Integration specifications for the six-section questionnaire: answer capture, the
//! calculation gate, frozen estimates and the downstream report.

mod common {
    use chrono::NaiveDate;
    use lifespan_estimator::workflows::lifespan::{Field, Questionnaire, ValidationPolicy};

    pub(super) fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date")
    }

    pub(super) fn questionnaire() -> Questionnaire {
        Questionnaire::new(ValidationPolicy::standard().expect("standard policy"))
    }

    pub(super) fn fill_personal(wizard: &mut Questionnaire) {
        for (field, raw) in [
            (Field::Name, "Arjun Rao"),
            (Field::Email, "arjun.rao@example.in"),
            (Field::Mobile, "+919876543210"),
            (Field::Gender, "male"),
            (Field::DateOfBirth, "1984-03-10"),
            (Field::Height, "175"),
            (Field::Weight, "82"),
            (Field::Location, "urban"),
        ] {
            wizard.set_field(field, raw).expect("personal answer accepted");
        }
    }

    pub(super) fn fill_remaining(wizard: &mut Questionnaire) {
        for (field, raw) in [
            (Field::MedicalCondition, "good"),
            (Field::CurrentSituation, "healthy"),
            (Field::MentalHealth, "burnout"),
            (Field::SleepPatterns, "good"),
            (Field::EnvironmentalFactors, "pollution"),
            (Field::SocialRelationships, "strong"),
            (Field::AccessHealthcare, "regular_checkups"),
            (Field::ExerciseFrequency, "weekly"),
            (Field::StressManagement, "yoga"),
            (Field::HydrationLevel, "moderate"),
            (Field::SunExposure, "moderate"),
            (Field::DietType, "balanced"),
            (Field::AlcoholConsumption, "occasional"),
            (Field::ScreenTime, "5-6"),
            (Field::EstimationType, "system"),
        ] {
            wizard.set_field(field, raw).expect("answer accepted");
        }
    }
}

use common::*;
use lifespan_estimator::workflows::lifespan::report::ExportFormat;
use lifespan_estimator::workflows::lifespan::{
    Collection, Field, FieldError, LifespanEngine, LifespanReport, WizardSection,
};

#[test]
fn personal_section_alone_lists_every_later_field() {
    let mut wizard = questionnaire();
    fill_personal(&mut wizard);

    let report = wizard.validate_for_calculation(today());

    assert!(!report.is_valid());
    assert!(report.invalid_fields().is_empty());
    assert_eq!(
        report.missing_fields(),
        vec![
            Field::MedicalCondition,
            Field::CurrentSituation,
            Field::MentalHealth,
            Field::SleepPatterns,
            Field::EnvironmentalFactors,
            Field::SocialRelationships,
            Field::AccessHealthcare,
            Field::ExerciseFrequency,
            Field::StressManagement,
            Field::HydrationLevel,
            Field::SunExposure,
            Field::DietType,
            Field::AlcoholConsumption,
            Field::ScreenTime,
            Field::UserEstimatedLifespan,
        ]
    );

    let error = wizard
        .calculate(&LifespanEngine::default(), today())
        .expect_err("gate rejects partial answers");
    let message = error.to_string();
    assert!(message.starts_with("Please fill all required fields"));
    assert!(message.contains("Medical Condition"));
    assert!(wizard.estimate().is_none());
}

#[test]
fn navigation_is_bounded_and_free() {
    let mut wizard = questionnaire();
    assert_eq!(wizard.retreat(), WizardSection::Personal);

    for _ in 0..10 {
        wizard.advance();
    }
    assert_eq!(wizard.section(), WizardSection::Calculate);

    wizard.jump_to(WizardSection::Activity);
    assert_eq!(wizard.retreat(), WizardSection::Lifestyle);
}

#[test]
fn section_progress_tracks_required_answers() {
    let mut wizard = questionnaire();
    fill_personal(&mut wizard);

    let progress = wizard.section_progress();
    let personal = progress
        .iter()
        .find(|entry| entry.section == WizardSection::Personal)
        .expect("personal section listed");
    assert!(personal.is_complete());

    let diet = progress
        .iter()
        .find(|entry| entry.section == WizardSection::Diet)
        .expect("diet section listed");
    assert_eq!((diet.answered, diet.required), (0, 3));
}

#[test]
fn last_write_wins_and_estimates_are_frozen() {
    let engine = LifespanEngine::default();
    let mut wizard = questionnaire();
    fill_personal(&mut wizard);
    fill_remaining(&mut wizard);

    wizard
        .set_field(Field::ExerciseFrequency, "never")
        .expect("answer accepted");
    wizard
        .set_field(Field::ExerciseFrequency, "daily")
        .expect("answer accepted");

    let first = wizard
        .calculate(&engine, today())
        .expect("complete answers pass the gate")
        .clone();
    // 76.1 - 40, overweight -3, urban -2, burnout -4, pollution -3, strong +2,
    // check-ups +3, daily +3, yoga +2, balanced +3
    assert_eq!(first.result.age, 40);
    assert!((first.result.remaining_years - 37.1).abs() < 1e-9);

    wizard
        .set_field(Field::ExerciseFrequency, "never")
        .expect("answer accepted");
    let held = wizard.estimate().expect("estimate kept");
    assert_eq!(held, &first);

    let second = wizard
        .calculate(&engine, today())
        .expect("still complete")
        .clone();
    assert!((first.result.remaining_years - second.result.remaining_years - 9.0).abs() < 1e-9);

    wizard.reset();
    assert!(wizard.estimate().is_none());
    assert_eq!(wizard.section(), WizardSection::Personal);
    assert!(wizard.answers().name.is_none());
}

#[test]
fn toggled_habits_feed_the_score() {
    let engine = LifespanEngine::default();
    let mut wizard = questionnaire();
    fill_personal(&mut wizard);
    fill_remaining(&mut wizard);

    let baseline = wizard
        .calculate(&engine, today())
        .expect("complete")
        .result
        .remaining_years;

    assert!(wizard
        .toggle_member(Collection::LifestyleHabits, "smoking")
        .expect("known habit"));
    wizard
        .set_field(Field::SmokingYears, "10")
        .expect("number accepted");
    let smoker = wizard
        .calculate(&engine, today())
        .expect("complete")
        .result
        .remaining_years;
    assert!((baseline - smoker - 6.0).abs() < 1e-9);

    assert!(!wizard
        .toggle_member(Collection::LifestyleHabits, "smoking")
        .expect("known habit"));
    assert!(matches!(
        wizard.toggle_member(Collection::ChronicConditions, "gout"),
        Err(FieldError::Choice(_))
    ));
}

#[test]
fn malformed_contacts_are_reported_together() {
    let mut wizard = questionnaire();
    fill_personal(&mut wizard);
    fill_remaining(&mut wizard);
    wizard
        .set_field(Field::Email, "arjun.example.in")
        .expect("stored verbatim");
    wizard
        .set_field(Field::Mobile, "9876543210")
        .expect("stored verbatim");

    let report = wizard.validate_for_calculation(today());
    assert!(report.missing_fields().is_empty());
    assert_eq!(report.invalid_fields(), vec![Field::Email, Field::Mobile]);
}

#[test]
fn report_carries_sheet_precautions_and_exports() {
    let mut wizard = questionnaire();
    fill_personal(&mut wizard);
    fill_remaining(&mut wizard);
    let estimate = wizard
        .calculate(&LifespanEngine::default(), today())
        .expect("complete")
        .clone();

    let report = LifespanReport::from_estimate(&estimate);

    let categories: Vec<&str> = report
        .precautions
        .iter()
        .map(|precaution| precaution.category)
        .collect();
    // age 40, BMI 26.8, burnout, pollution
    assert_eq!(categories.first(), Some(&"Age-Related Health"));
    assert!(categories.contains(&"Weight Management"));
    assert!(categories.contains(&"Mental Health Support"));
    assert_eq!(categories.last(), Some(&"Preventive Care"));

    let text = report.export(ExportFormat::Text).expect("text export");
    assert!(text.body.contains("Arjun Rao"));
    assert!(text.body.contains(&estimate.result.summary_text));
}
