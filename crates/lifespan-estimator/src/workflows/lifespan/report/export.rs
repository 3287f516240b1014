use super::LifespanReport;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Text,
    Html,
    Csv,
    Json,
}

impl ExportFormat {
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Text => "text/plain; charset=utf-8",
            Self::Html => "application/msword",
            Self::Csv => "text/csv; charset=utf-8",
            Self::Json => "application/json",
        }
    }

    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Text => "lifespan-estimation-results.txt",
            Self::Html => "lifespan-estimation-results.doc",
            Self::Csv => "lifespan-estimation-results.csv",
            Self::Json => "lifespan-estimation-results.json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "html" | "word" | "doc" => Ok(Self::Html),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("unsupported export format '{0}'")]
    UnknownFormat(String),
    #[error("failed to write csv export: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush csv export: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv export is not valid utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("failed to serialize json export: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDocument {
    pub format: ExportFormat,
    pub body: String,
}

impl ExportedDocument {
    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }

    pub fn file_name(&self) -> &'static str {
        self.format.file_name()
    }
}

pub(super) fn render(
    report: &LifespanReport,
    format: ExportFormat,
) -> Result<ExportedDocument, ExportError> {
    let body = match format {
        ExportFormat::Text => text(report),
        ExportFormat::Html => word_html(report),
        ExportFormat::Csv => csv_rows(report)?,
        ExportFormat::Json => serde_json::to_string_pretty(report)?,
    };
    Ok(ExportedDocument { format, body })
}

fn text(report: &LifespanReport) -> String {
    let result = &report.result;
    let mut out = String::new();
    let _ = writeln!(out, "Lifespan Estimation Results");
    let _ = writeln!(out, "===========================");
    let _ = writeln!(out, "{}", result.summary_text);
    let _ = writeln!(
        out,
        "Overall health score: {} ({})",
        result.overall_score,
        result.rating.label()
    );

    for section in &report.answer_sheet.sections {
        let _ = writeln!(out, "\n{}", section.title);
        for row in &section.rows {
            let _ = writeln!(out, "  {}: {}", row.label, row.value);
        }
    }

    let _ = writeln!(out, "\nHealth Dimensions");
    for dimension in &result.dimension_scores {
        let _ = writeln!(out, "  {}: {}", dimension.name, dimension.score);
    }

    if !result.recommendations.is_empty() {
        let _ = writeln!(out, "\nRecommendations");
        for recommendation in &result.recommendations {
            let _ = writeln!(
                out,
                "  [{}] {}: {}",
                recommendation.priority.label(),
                recommendation.title,
                recommendation.description
            );
        }
    }

    let _ = writeln!(out, "\nPrecautions");
    for precaution in &report.precautions {
        let _ = writeln!(
            out,
            "  {} ({})",
            precaution.category, precaution.priority_label
        );
        for item in precaution.items {
            let _ = writeln!(out, "    - {item}");
        }
    }

    out
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn word_html(report: &LifespanReport) -> String {
    let mut out = String::from(
        r#"<html xmlns:w="urn:schemas-microsoft-com:office:word">
<head>
<meta charset="utf-8">
<title>Lifespan Estimation Results</title>
<style>
  body { font-family: Arial, sans-serif; }
  h1 { color: #2a67b7; }
  h2 { color: #333; margin-top: 20px; }
  .result { font-size: 18px; margin: 20px 0; padding: 15px; background: #f5f5f5; border-left: 5px solid #2a67b7; }
  .category { margin-top: 25px; }
  .item { margin: 5px 0; }
  .label { font-weight: bold; }
</style>
</head>
<body>
<h1>Lifespan Estimation Results</h1>
"#,
    );

    let _ = writeln!(
        out,
        "<div class=\"result\">{}</div>",
        escape_html(&report.result.summary_text)
    );
    out.push_str("<h2>Selected Data</h2>\n");
    for section in &report.answer_sheet.sections {
        let _ = writeln!(
            out,
            "<div class=\"category\"><h3>{}</h3>",
            escape_html(section.title)
        );
        for row in &section.rows {
            let _ = writeln!(
                out,
                "<div class=\"item\"><span class=\"label\">{}:</span> {}</div>",
                escape_html(row.label),
                escape_html(&row.value)
            );
        }
        out.push_str("</div>\n");
    }
    out.push_str("</body></html>\n");
    out
}

fn csv_rows(report: &LifespanReport) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["section", "label", "value"])?;
    writer.write_record([
        "Result",
        "Summary",
        report.result.summary_text.as_str(),
    ])?;
    let remaining = report.result.rounded_remaining_years().to_string();
    writer.write_record(["Result", "Remaining Years", remaining.as_str()])?;
    let projected = report.result.projected_year.to_string();
    writer.write_record(["Result", "Projected Year", projected.as_str()])?;
    for (title, row) in report.answer_sheet.rows() {
        writer.write_record([title, row.label, row.value.as_str()])?;
    }
    for dimension in &report.result.dimension_scores {
        let score = dimension.score.to_string();
        writer.write_record(["Health Dimensions", dimension.name.as_str(), score.as_str()])?;
    }
    let bytes = writer.into_inner().map_err(|err| err.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::lifespan::answers::AnswerSet;
    use crate::workflows::lifespan::domain::Gender;
    use crate::workflows::lifespan::scoring::LifespanEngine;
    use crate::workflows::lifespan::wizard::Estimate;
    use chrono::NaiveDate;

    fn report() -> LifespanReport {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).expect("date");
        let answers = AnswerSet {
            name: Some("Ravi <admin>".to_string()),
            gender: Some(Gender::Male),
            ..AnswerSet::default()
        };
        let result = LifespanEngine::default().estimate(&answers, today);
        LifespanReport::from_estimate(&Estimate {
            calculated_on: today,
            answers,
            result,
        })
    }

    #[test]
    fn parses_format_names() {
        assert_eq!("Word".parse::<ExportFormat>().ok(), Some(ExportFormat::Html));
        assert!(matches!(
            "pdf".parse::<ExportFormat>(),
            Err(ExportError::UnknownFormat(_))
        ));
    }

    #[test]
    fn word_export_escapes_markup() {
        let document = report().export(ExportFormat::Html).expect("renders");
        assert_eq!(document.content_type(), "application/msword");
        assert!(document.body.contains("Ravi &lt;admin&gt;"));
        assert!(document.body.contains("<h3>Habit Information</h3>"));
    }

    #[test]
    fn csv_export_has_header_and_rows() {
        let document = report().export(ExportFormat::Csv).expect("renders");
        let mut reader = csv::Reader::from_reader(document.body.as_bytes());
        let headers = reader.headers().expect("header row").clone();
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            vec!["section", "label", "value"]
        );
        let rows: Vec<csv::StringRecord> = reader
            .records()
            .collect::<Result<_, _>>()
            .expect("rows parse");
        assert!(rows
            .iter()
            .any(|row| &row[1] == "Name" && &row[2] == "Ravi <admin>"));
    }

    #[test]
    fn text_export_lists_precautions() {
        let document = report().export(ExportFormat::Text).expect("renders");
        assert!(document.body.starts_with("Lifespan Estimation Results"));
        assert!(document.body.contains("Preventive Care (Recommended)"));
    }
}
