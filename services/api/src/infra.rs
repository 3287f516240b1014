use chrono::NaiveDate;
use lifespan_estimator::error::AppError;
use lifespan_estimator::workflows::lifespan::{AnswerSet, ChatMode, ExportFormat};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_export_format(raw: &str) -> Result<ExportFormat, String> {
    raw.parse::<ExportFormat>().map_err(|err| err.to_string())
}

pub(crate) fn parse_chat_mode(raw: &str) -> Result<ChatMode, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "faq" => Ok(ChatMode::Faq),
        "coach" | "assistant" => Ok(ChatMode::Coach),
        other => Err(format!("unknown chat mode '{other}' (expected faq or coach)")),
    }
}

/// Reads a camelCase answer document as posted to the HTTP API.
pub(crate) fn load_answers(path: &Path) -> Result<AnswerSet, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_dates_only() {
        assert_eq!(
            parse_date(" 2024-06-01 "),
            Ok(NaiveDate::from_ymd_opt(2024, 6, 1).expect("date"))
        );
        assert!(parse_date("01/06/2024").is_err());
    }

    #[test]
    fn chat_mode_aliases() {
        assert_eq!(parse_chat_mode("Coach"), Ok(ChatMode::Coach));
        assert_eq!(parse_chat_mode("assistant"), Ok(ChatMode::Coach));
        assert!(parse_chat_mode("oracle").is_err());
    }

    #[test]
    fn export_format_errors_name_the_value() {
        let err = parse_export_format("pdf").expect_err("unsupported");
        assert!(err.contains("pdf"));
    }
}
