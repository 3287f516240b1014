mod export;
mod precautions;
pub mod views;

pub use export::{ExportError, ExportFormat, ExportedDocument};
pub use precautions::{
    precautions, Precaution, PrecautionPriority, KEEP_AVAILABLE, SEEK_IMMEDIATE_CARE,
};
pub use views::{questionnaire_outline, AnswerSheet, SheetRow, SheetSection};

use super::scoring::LifespanResult;
use super::wizard::Estimate;
use chrono::NaiveDate;
use serde::Serialize;

/// Everything the results page shows for one estimate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LifespanReport {
    pub calculated_on: NaiveDate,
    pub result: LifespanResult,
    pub answer_sheet: AnswerSheet,
    pub precautions: Vec<Precaution>,
}

impl LifespanReport {
    pub fn from_estimate(estimate: &Estimate) -> Self {
        Self {
            calculated_on: estimate.calculated_on,
            result: estimate.result.clone(),
            answer_sheet: AnswerSheet::from_answers(&estimate.answers),
            precautions: precautions(&estimate.answers, &estimate.result),
        }
    }

    pub fn export(&self, format: ExportFormat) -> Result<ExportedDocument, ExportError> {
        export::render(self, format)
    }
}
