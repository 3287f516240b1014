use crate::infra::{load_answers, parse_chat_mode, parse_date, parse_export_format};
use chrono::{Local, NaiveDate};
use clap::Args;
use lifespan_estimator::config::AppConfig;
use lifespan_estimator::error::AppError;
use lifespan_estimator::workflows::lifespan::report::{KEEP_AVAILABLE, SEEK_IMMEDIATE_CARE};
use lifespan_estimator::workflows::lifespan::{
    ChatMode, Collection, Estimate, ExportFormat, FaqResponder, Field, HealthAssistant,
    LifespanEngine, LifespanReport, Questionnaire, ScoringConfig, ValidationPolicy,
    WizardSection,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct EstimateArgs {
    /// JSON answer document (camelCase keys, as posted to /api/v1/lifespan/estimate)
    #[arg(long)]
    pub(crate) answers: PathBuf,
    /// Calculation date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Output format: text, html (Word), csv or json
    #[arg(long, value_parser = parse_export_format, default_value = "text")]
    pub(crate) format: ExportFormat,
}

#[derive(Args, Debug)]
pub(crate) struct ValidateArgs {
    /// JSON answer document to check
    #[arg(long)]
    pub(crate) answers: PathBuf,
    /// Reference date for the date-of-birth checks (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct ChatArgs {
    /// Question to ask
    pub(crate) message: String,
    /// Answer document used to personalize coach replies
    #[arg(long)]
    pub(crate) answers: Option<PathBuf>,
    /// faq or coach
    #[arg(long, value_parser = parse_chat_mode, default_value = "faq")]
    pub(crate) mode: ChatMode,
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Calculation date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Also print the results in this export format
    #[arg(long, value_parser = parse_export_format)]
    pub(crate) export: Option<ExportFormat>,
}

fn configured_policy() -> Result<ValidationPolicy, AppError> {
    let config = AppConfig::load()?;
    Ok(config.estimator.validation_policy()?)
}

fn engine() -> LifespanEngine {
    LifespanEngine::new(ScoringConfig::standard())
}

pub(crate) fn run_estimate(args: EstimateArgs) -> Result<(), AppError> {
    let EstimateArgs {
        answers,
        today,
        format,
    } = args;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let answers = load_answers(&answers)?;
    let mut wizard = Questionnaire::with_answers(configured_policy()?, answers);
    let estimate = wizard.calculate(&engine(), today)?;
    let document = LifespanReport::from_estimate(estimate).export(format)?;
    println!("{}", document.body);
    Ok(())
}

pub(crate) fn run_validate(args: ValidateArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let answers = load_answers(&args.answers)?;
    let report = configured_policy()?.validate(&answers, today);

    if report.is_valid() {
        println!("All required answers are present and well formed.");
        return Ok(());
    }

    println!("{} issue(s) block the calculation:", report.issues.len());
    for issue in &report.issues {
        println!(
            "- [{}] {}: {}",
            issue.section.label(),
            issue.label,
            issue.message
        );
    }
    report.into_result()?;
    Ok(())
}

pub(crate) fn run_chat(args: ChatArgs) -> Result<(), AppError> {
    let ChatArgs {
        message,
        answers,
        mode,
        today,
    } = args;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let answers = answers.as_deref().map(load_answers).transpose()?;
    let coach = HealthAssistant;

    let reply = match mode {
        ChatMode::Faq => FaqResponder.reply(&message).to_string(),
        ChatMode::Coach => coach.reply(&message, answers.as_ref(), today),
    };
    println!("{reply}");

    let suggestions = coach.suggestions(answers.as_ref());
    if !suggestions.is_empty() {
        println!("\nYou could also ask:");
        for suggestion in suggestions {
            println!("  - {suggestion}");
        }
    }
    Ok(())
}

const SAMPLE_RESPONDENT: &[(Field, &str)] = &[
    (Field::Name, "Kavya Menon"),
    (Field::Email, "kavya.menon@example.in"),
    (Field::Mobile, "+919845012345"),
    (Field::Gender, "female"),
    (Field::DateOfBirth, "1979-08-22"),
    (Field::Height, "160"),
    (Field::Weight, "68"),
    (Field::Location, "urban"),
    (Field::MedicalCondition, "good"),
    (Field::CurrentSituation, "healthy"),
    (Field::SmokingYears, "6"),
    (Field::MentalHealth, "anxiety"),
    (Field::SleepPatterns, "irregular"),
    (Field::EnvironmentalFactors, "pollution"),
    (Field::SocialRelationships, "moderate"),
    (Field::AccessHealthcare, "regular_checkups"),
    (Field::ExerciseFrequency, "occasionally"),
    (Field::StressManagement, "meditation"),
    (Field::HydrationLevel, "low"),
    (Field::SunExposure, "minimal"),
    (Field::DietType, "vegetarian"),
    (Field::AlcoholConsumption, "occasional"),
    (Field::ScreenTime, "6+"),
    (Field::EstimationType, "system"),
];

const SAMPLE_MEMBERS: &[(Collection, &str)] = &[
    (Collection::FamilyHistory, "diabetes"),
    (Collection::ChronicConditions, "hypertension"),
    (Collection::LifestyleHabits, "smoking"),
];

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let mut wizard = Questionnaire::new(configured_policy()?);

    println!("Lifespan estimator demo");
    loop {
        let section = wizard.section();
        for (field, raw) in SAMPLE_RESPONDENT
            .iter()
            .filter(|(field, _)| field.section() == section)
        {
            wizard.set_field(*field, raw)?;
        }
        for (collection, raw) in SAMPLE_MEMBERS
            .iter()
            .filter(|(collection, _)| collection.section() == section)
        {
            wizard.toggle_member(*collection, raw)?;
        }

        if let Some(progress) = wizard
            .section_progress()
            .into_iter()
            .find(|entry| entry.section == section)
        {
            println!(
                "- {}: {}/{} required answers",
                progress.section_label, progress.answered, progress.required
            );
        }

        if section == WizardSection::Calculate {
            break;
        }
        wizard.advance();
    }

    let estimate = wizard.calculate(&engine(), today)?.clone();
    render_estimate(&estimate);

    let coach = HealthAssistant;
    let question = "How can I manage stress better?";
    println!("\nCoach: {question}");
    println!("{}", coach.reply(question, Some(&estimate.answers), today));

    if let Some(format) = args.export {
        let document = LifespanReport::from_estimate(&estimate).export(format)?;
        println!("\n--- {} ---\n{}", document.file_name(), document.body);
    }
    Ok(())
}

fn render_estimate(estimate: &Estimate) {
    let result = &estimate.result;
    let report = LifespanReport::from_estimate(estimate);

    println!("\n{}", result.summary_text);
    println!(
        "Starting lifespan {:.1} | age {} | adjustments {:+.1} | remaining {:.1}",
        result.starting_lifespan, result.age, result.total_adjustment, result.remaining_years
    );
    for adjustment in &result.adjustments {
        println!(
            "  {:+.1} {} ({})",
            adjustment.delta,
            adjustment.factor.label(),
            adjustment.note
        );
    }

    println!(
        "\nOverall health score {} ({})",
        result.overall_score,
        result.rating.label()
    );
    for dimension in &result.dimension_scores {
        println!("  {}: {}", dimension.name, dimension.score);
    }
    for recommendation in &result.recommendations {
        println!(
            "  [{}] {}: {}",
            recommendation.priority.label(),
            recommendation.title,
            recommendation.description
        );
    }

    println!("\nPrecautions");
    for precaution in &report.precautions {
        println!("  {} ({})", precaution.category, precaution.priority_label);
        for item in precaution.items {
            println!("    - {item}");
        }
    }
    println!("  Keep available: {}", KEEP_AVAILABLE.join(", "));
    println!("  Seek immediate care for: {}", SEEK_IMMEDIATE_CARE.join(", "));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_respondent_passes_the_gate() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).expect("date");
        let mut wizard = Questionnaire::new(ValidationPolicy::standard().expect("policy"));
        for (field, raw) in SAMPLE_RESPONDENT {
            wizard.set_field(*field, raw).expect("sample answer accepted");
        }
        for (collection, raw) in SAMPLE_MEMBERS {
            wizard
                .toggle_member(*collection, raw)
                .expect("sample member accepted");
        }

        let estimate = wizard.calculate(&engine(), today).expect("sample is complete");
        assert_eq!(estimate.result.age, 44);
        assert!(estimate.result.remaining_years > 0.0);
    }
}
