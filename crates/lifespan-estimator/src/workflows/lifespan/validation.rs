use super::answers::AnswerSet;
use super::domain::{EstimationMode, Field, WizardSection};
use chrono::{Months, NaiveDate};
use regex::Regex;
use serde::Serialize;
use std::ops::RangeInclusive;
use thiserror::Error;

const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

pub const DEFAULT_COUNTRY_CODE: &str = "91";
pub const MAX_AGE_YEARS: u32 = 120;
pub const MIN_NAME_CHARS: usize = 2;
pub const TARGET_LIFESPAN_RANGE: RangeInclusive<u32> = 20..=120;

/// Which rule an answer broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    Missing,
    Malformed,
    OutOfRange,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub field: Field,
    pub label: &'static str,
    pub section: WizardSection,
    pub kind: IssueKind,
    pub message: String,
}

/// Every problem found in one pass over the answers, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    fn from_issues(mut issues: Vec<ValidationIssue>) -> Self {
        issues.sort_by_key(|issue| (issue.section.position(), issue.field));
        Self {
            valid: issues.is_empty(),
            issues,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn missing_fields(&self) -> Vec<Field> {
        self.fields_with(IssueKind::Missing)
    }

    pub fn invalid_fields(&self) -> Vec<Field> {
        self.issues
            .iter()
            .filter(|issue| issue.kind != IssueKind::Missing)
            .map(|issue| issue.field)
            .collect()
    }

    fn fields_with(&self, kind: IssueKind) -> Vec<Field> {
        self.issues
            .iter()
            .filter(|issue| issue.kind == kind)
            .map(|issue| issue.field)
            .collect()
    }

    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.valid {
            Ok(())
        } else {
            Err(ValidationError {
                issues: self.issues,
            })
        }
    }
}

/// Consolidated rejection listing every offending field at once.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", consolidated_message(.issues))]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

fn consolidated_message(issues: &[ValidationIssue]) -> String {
    let missing: Vec<&str> = issues
        .iter()
        .filter(|issue| issue.kind == IssueKind::Missing)
        .map(|issue| issue.label)
        .collect();
    let invalid: Vec<&str> = issues
        .iter()
        .filter(|issue| issue.kind != IssueKind::Missing)
        .map(|issue| issue.message.as_str())
        .collect();

    let mut parts = Vec::new();
    if !missing.is_empty() {
        parts.push(format!(
            "Please fill all required fields to calculate your lifespan estimation: {}",
            missing.join(", ")
        ));
    }
    if !invalid.is_empty() {
        parts.push(invalid.join("; "));
    }
    parts.join(". ")
}

/// Gate applied before scoring.
#[derive(Debug, Clone)]
pub struct ValidationPolicy {
    country_code: String,
    mobile: Regex,
    email: Regex,
}

impl ValidationPolicy {
    pub fn new(country_code: &str) -> Result<Self, regex::Error> {
        let mobile = Regex::new(&format!(r"^\+{}[0-9]{{10}}$", regex::escape(country_code)))?;
        let email = Regex::new(EMAIL_PATTERN)?;
        Ok(Self {
            country_code: country_code.to_string(),
            mobile,
            email,
        })
    }

    pub fn standard() -> Result<Self, regex::Error> {
        Self::new(DEFAULT_COUNTRY_CODE)
    }

    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    pub fn is_valid_email(&self, email: &str) -> bool {
        self.email.is_match(email.trim())
    }

    pub fn is_valid_mobile(&self, mobile: &str) -> bool {
        self.mobile.is_match(mobile.trim())
    }

    pub fn validate(&self, answers: &AnswerSet, today: NaiveDate) -> ValidationReport {
        let mut issues = Vec::new();

        for field in [Field::Name, Field::Email, Field::Mobile, Field::Gender, Field::DateOfBirth]
            .into_iter()
            .chain(Field::required_choices())
        {
            if !answers.is_answered(field) {
                issues.push(missing(field));
            }
        }

        if let Some(name) = answers.name.as_deref() {
            let trimmed = name.trim();
            if !trimmed.is_empty() && trimmed.chars().count() < MIN_NAME_CHARS {
                issues.push(issue(
                    Field::Name,
                    IssueKind::Malformed,
                    "Please enter your name (at least 2 characters)".to_string(),
                ));
            }
        }

        if let Some(email) = answers.email.as_deref() {
            if !email.trim().is_empty() && !self.is_valid_email(email) {
                issues.push(issue(
                    Field::Email,
                    IssueKind::Malformed,
                    "Please provide a valid email address.".to_string(),
                ));
            }
        }

        if let Some(mobile) = answers.mobile.as_deref() {
            if !mobile.trim().is_empty() && !self.is_valid_mobile(mobile) {
                issues.push(issue(
                    Field::Mobile,
                    IssueKind::Malformed,
                    format!(
                        "Please provide a valid mobile number starting with +{} followed by 10 digits.",
                        self.country_code
                    ),
                ));
            }
        }

        if let Some(born) = answers.date_of_birth {
            let earliest = today.checked_sub_months(Months::new(MAX_AGE_YEARS * 12));
            if born > today {
                issues.push(issue(
                    Field::DateOfBirth,
                    IssueKind::OutOfRange,
                    "Date of birth cannot be in the future".to_string(),
                ));
            } else if earliest.is_some_and(|limit| born < limit) {
                issues.push(issue(
                    Field::DateOfBirth,
                    IssueKind::OutOfRange,
                    format!("Date of birth implies an age over {MAX_AGE_YEARS} years"),
                ));
            }
        }

        for (field, value) in [(Field::Height, answers.height), (Field::Weight, answers.weight)] {
            if value.is_some_and(|v| !(v.is_finite() && v > 0.0)) {
                issues.push(issue(
                    field,
                    IssueKind::OutOfRange,
                    format!("Please enter a valid {}", field.label().to_lowercase()),
                ));
            }
        }

        if answers.estimation_type == EstimationMode::User {
            match answers.user_estimated_lifespan {
                None => issues.push(issue(
                    Field::UserEstimatedLifespan,
                    IssueKind::Missing,
                    "Please enter your estimated lifespan in years.".to_string(),
                )),
                Some(years) if !TARGET_LIFESPAN_RANGE.contains(&years) => issues.push(issue(
                    Field::UserEstimatedLifespan,
                    IssueKind::OutOfRange,
                    format!(
                        "Estimated lifespan must be between {} and {} years",
                        TARGET_LIFESPAN_RANGE.start(),
                        TARGET_LIFESPAN_RANGE.end()
                    ),
                )),
                Some(_) => {}
            }
        }

        ValidationReport::from_issues(issues)
    }
}

fn missing(field: Field) -> ValidationIssue {
    issue(field, IssueKind::Missing, format!("{} is required", field.label()))
}

fn issue(field: Field, kind: IssueKind, message: String) -> ValidationIssue {
    ValidationIssue {
        field,
        label: field.label(),
        section: field.section(),
        kind,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date")
    }

    fn policy() -> ValidationPolicy {
        ValidationPolicy::standard().expect("standard policy compiles")
    }

    #[test]
    fn mobile_requires_prefix_and_ten_digits() {
        let policy = policy();
        assert!(policy.is_valid_mobile("+919876543210"));
        assert!(!policy.is_valid_mobile("9876543210"));
        assert!(!policy.is_valid_mobile("+91987654321"));
        assert!(!policy.is_valid_mobile("+4498765432100"));
        assert!(!policy.is_valid_mobile("+91०१२३४५६७८९"));

        let uk = ValidationPolicy::new("44").expect("compiles");
        assert!(uk.is_valid_mobile("+449876543210"));
    }

    #[test]
    fn email_shape() {
        let policy = policy();
        assert!(policy.is_valid_email("asha@example.org"));
        assert!(!policy.is_valid_email("asha@example"));
        assert!(!policy.is_valid_email("asha example.org"));
    }

    #[test]
    fn empty_answers_list_every_required_field_in_form_order() {
        let report = policy().validate(&AnswerSet::default(), today());
        assert!(!report.is_valid());
        let missing = report.missing_fields();
        assert_eq!(missing.first(), Some(&Field::Name));
        assert_eq!(missing.last(), Some(&Field::UserEstimatedLifespan));
        assert_eq!(missing.len(), 5 + 15 + 1);
    }

    #[test]
    fn date_of_birth_bounds() {
        let mut answers = AnswerSet {
            date_of_birth: NaiveDate::from_ymd_opt(2025, 1, 1),
            ..AnswerSet::default()
        };
        let report = policy().validate(&answers, today());
        assert!(report.invalid_fields().contains(&Field::DateOfBirth));

        answers.date_of_birth = NaiveDate::from_ymd_opt(1900, 1, 1);
        let report = policy().validate(&answers, today());
        assert!(report.invalid_fields().contains(&Field::DateOfBirth));

        answers.date_of_birth = NaiveDate::from_ymd_opt(1904, 5, 1);
        let report = policy().validate(&answers, today());
        assert!(!report.invalid_fields().contains(&Field::DateOfBirth));
    }

    #[test]
    fn target_lifespan_only_checked_in_user_mode() {
        let mut answers = AnswerSet {
            estimation_type: EstimationMode::System,
            ..AnswerSet::default()
        };
        let report = policy().validate(&answers, today());
        assert!(!report
            .missing_fields()
            .contains(&Field::UserEstimatedLifespan));

        answers.estimation_type = EstimationMode::User;
        answers.user_estimated_lifespan = Some(150);
        let report = policy().validate(&answers, today());
        assert!(report
            .invalid_fields()
            .contains(&Field::UserEstimatedLifespan));
    }

    #[test]
    fn consolidated_error_names_each_problem() {
        let answers = AnswerSet {
            email: Some("not-an-email".to_string()),
            estimation_type: EstimationMode::System,
            ..AnswerSet::default()
        };
        let err = policy()
            .validate(&answers, today())
            .into_result()
            .expect_err("incomplete answers");
        let message = err.to_string();
        assert!(message.contains("Name"));
        assert!(message.contains("Screen Time"));
        assert!(message.contains("valid email address"));
    }
}
