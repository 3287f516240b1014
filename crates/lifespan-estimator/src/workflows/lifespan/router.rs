use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use super::answers::AnswerSet;
use super::assistant::{ChatMode, FaqResponder, HealthAssistant};
use super::report::{questionnaire_outline, ExportFormat, LifespanReport};
use super::scoring::LifespanEngine;
use super::validation::{ValidationError, ValidationPolicy};
use super::wizard::{Estimate, Questionnaire};
use crate::error::AppError;

/// Shared engine, gate and presentation settings for the HTTP surface.
#[derive(Debug, Clone)]
pub struct LifespanState {
    engine: LifespanEngine,
    policy: ValidationPolicy,
    processing_delay: Duration,
    fixed_today: Option<NaiveDate>,
}

impl LifespanState {
    pub fn new(engine: LifespanEngine, policy: ValidationPolicy) -> Self {
        Self {
            engine,
            policy,
            processing_delay: Duration::ZERO,
            fixed_today: None,
        }
    }

    pub fn with_processing_delay(mut self, delay: Duration) -> Self {
        self.processing_delay = delay;
        self
    }

    /// Pins "today" for age and projected-year arithmetic.
    pub fn with_fixed_date(mut self, today: NaiveDate) -> Self {
        self.fixed_today = Some(today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.fixed_today
            .unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn estimate(&self, answers: AnswerSet) -> Result<Estimate, ValidationError> {
        let mut questionnaire = Questionnaire::with_answers(self.policy.clone(), answers);
        questionnaire
            .calculate(&self.engine, self.today())
            .map(Estimate::clone)
    }

    async fn pause(&self) {
        if !self.processing_delay.is_zero() {
            tokio::time::sleep(self.processing_delay).await;
        }
    }
}

/// Router builder exposing the questionnaire, scoring, export and chat endpoints.
pub fn lifespan_router(state: Arc<LifespanState>) -> Router {
    Router::new()
        .route("/api/v1/lifespan/questionnaire", get(questionnaire_handler))
        .route("/api/v1/lifespan/validate", post(validate_handler))
        .route("/api/v1/lifespan/estimate", post(estimate_handler))
        .route("/api/v1/lifespan/export", post(export_handler))
        .route("/api/v1/assistant/chat", post(chat_handler))
        .with_state(state)
}

fn parse_answers(body: &[u8]) -> Result<AnswerSet, AppError> {
    Ok(serde_json::from_slice(body)?)
}

pub(crate) async fn questionnaire_handler() -> Response {
    let payload = json!({ "sections": questionnaire_outline() });
    (StatusCode::OK, Json(payload)).into_response()
}

pub(crate) async fn validate_handler(
    State(state): State<Arc<LifespanState>>,
    body: Bytes,
) -> Result<Response, AppError> {
    let answers = parse_answers(&body)?;
    let report = state.policy.validate(&answers, state.today());
    Ok((StatusCode::OK, Json(report)).into_response())
}

pub(crate) async fn estimate_handler(
    State(state): State<Arc<LifespanState>>,
    body: Bytes,
) -> Result<Response, AppError> {
    let answers = parse_answers(&body)?;
    state.pause().await;
    let estimate = state.estimate(answers)?;
    debug!(
        remaining_years = estimate.result.remaining_years,
        "estimate served"
    );
    let report = LifespanReport::from_estimate(&estimate);
    Ok((StatusCode::OK, Json(report)).into_response())
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub format: String,
}

pub(crate) async fn export_handler(
    State(state): State<Arc<LifespanState>>,
    Query(query): Query<ExportQuery>,
    body: Bytes,
) -> Result<Response, AppError> {
    let format = query.format.parse::<ExportFormat>()?;
    let answers = parse_answers(&body)?;
    let estimate = state.estimate(answers)?;
    let document = LifespanReport::from_estimate(&estimate).export(format)?;
    let disposition = format!("attachment; filename=\"{}\"", document.file_name());
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, document.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        document.body,
    )
        .into_response())
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub answers: Option<AnswerSet>,
    #[serde(default)]
    pub mode: ChatMode,
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub reply: String,
    pub suggestions: Vec<&'static str>,
}

pub(crate) async fn chat_handler(
    State(state): State<Arc<LifespanState>>,
    body: Bytes,
) -> Result<Response, AppError> {
    let request: ChatRequest = serde_json::from_slice(&body)?;
    let coach = HealthAssistant;
    let reply = match request.mode {
        ChatMode::Faq => FaqResponder.reply(&request.message).to_string(),
        ChatMode::Coach => coach.reply(&request.message, request.answers.as_ref(), state.today()),
    };
    let payload = ChatReply {
        reply,
        suggestions: coach.suggestions(request.answers.as_ref()),
    };
    Ok((StatusCode::OK, Json(payload)).into_response())
}
