//! Route handlers
//!
//! Bodies are parsed leniently: the Content-Type header is not enforced,
//! missing fields fall back to defaults and a `theme` that is not a string
//! resolves to `general`.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::analysis::{GapOutcome, TopicOutcome};
use crate::api::error::{ApiError, ApiResult};
use crate::api::AppState;
use crate::prompts::{deserialize_text, HistoryEntry};
use crate::themes::{DimensionMap, DEFAULT_THEME_ID};

/// Theme assumed by `/analyze` when the client sends none.
pub const DEFAULT_ANALYSIS_THEME: &str = "equipment_investment";

pub(crate) const INSUFFICIENT_HISTORY_MESSAGE: &str = "発言が不足しています";
const GAPS_SKIPPED_MESSAGE: &str = "まだ発言数が少ないため、分析できません";
const TOPICS_SKIPPED_MESSAGE: &str = "発言数が少ないため、トピック分類できません";

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default, deserialize_with = "deserialize_text")]
    pub transcript: String,
    #[serde(default = "default_analysis_theme", deserialize_with = "deserialize_theme")]
    pub theme: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryRequest {
    #[serde(default)]
    pub histories: Vec<HistoryEntry>,
    #[serde(default = "default_gap_theme", deserialize_with = "deserialize_theme")]
    pub theme: Option<String>,
}

fn default_analysis_theme() -> Option<String> {
    Some(DEFAULT_ANALYSIS_THEME.to_string())
}

fn default_gap_theme() -> Option<String> {
    Some(DEFAULT_THEME_ID.to_string())
}

fn deserialize_theme<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(theme) => Some(theme),
        _ => None,
    })
}

/// Theme id to resolve; a null or non-string theme means `general`.
fn requested_theme(theme: Option<&str>) -> &str {
    theme.unwrap_or(DEFAULT_THEME_ID)
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub analysis: String,
    pub theme_used: String,
    pub dimensions_used: DimensionMap,
}

#[derive(Debug, Serialize)]
pub struct DetectThemeResponse {
    pub success: bool,
    pub theme: String,
    pub theme_name: &'static str,
    pub dimensions: DimensionMap,
    pub description: &'static str,
    pub confidence: Value,
    pub reason: Value,
}

#[derive(Debug, Serialize)]
pub struct GapResponse {
    pub success: bool,
    pub has_gaps: bool,
    pub analysis: Value,
    pub theme_used: String,
    pub dimensions_used: DimensionMap,
}

#[derive(Debug, Serialize)]
pub struct ClassificationResponse {
    pub success: bool,
    pub classification: Value,
}

/// Reply for tasks skipped because of too little history.
#[derive(Debug, Serialize)]
pub struct SkippedResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_gaps: Option<bool>,
    pub message: &'static str,
}

/// POST /analyze
pub async fn analyze(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Json<AnalyzeResponse>> {
    let request: AnalyzeRequest = parse_body(body)?;

    let result = state
        .analyzer
        .analyze(&request.transcript, requested_theme(request.theme.as_deref()))
        .await?;

    Ok(Json(AnalyzeResponse {
        success: true,
        analysis: result.analysis,
        theme_used: result.theme_used,
        dimensions_used: result.theme.dimension_map(),
    }))
}

/// POST /detect-theme
pub async fn detect_theme(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Json<DetectThemeResponse>> {
    let request: HistoryRequest = parse_body(body)?;

    let detection = state.analyzer.detect_theme(&request.histories).await?;

    Ok(Json(DetectThemeResponse {
        success: true,
        theme: detection.theme_id,
        theme_name: detection.theme.display_name,
        dimensions: detection.theme.dimension_map(),
        description: detection.theme.description,
        confidence: detection.confidence,
        reason: detection.reason,
    }))
}

/// POST /analyze-gaps
pub async fn analyze_gaps(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Response> {
    let request: HistoryRequest = parse_body(body)?;

    let outcome = state
        .analyzer
        .analyze_gaps(&request.histories, requested_theme(request.theme.as_deref()))
        .await?;

    Ok(match outcome {
        GapOutcome::Skipped { .. } => Json(SkippedResponse {
            success: true,
            has_gaps: Some(false),
            message: GAPS_SKIPPED_MESSAGE,
        })
        .into_response(),
        GapOutcome::Analyzed(gaps) => Json(GapResponse {
            success: true,
            has_gaps: gaps.has_gaps,
            analysis: gaps.analysis,
            theme_used: gaps.theme_used,
            dimensions_used: gaps.theme.dimension_map(),
        })
        .into_response(),
    })
}

/// POST /classify-topics
pub async fn classify_topics(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Response> {
    let request: HistoryRequest = parse_body(body)?;

    let outcome = state.analyzer.classify_topics(&request.histories).await?;

    Ok(match outcome {
        TopicOutcome::Skipped { .. } => Json(SkippedResponse {
            success: false,
            has_gaps: None,
            message: TOPICS_SKIPPED_MESSAGE,
        })
        .into_response(),
        TopicOutcome::Classified(classification) => Json(ClassificationResponse {
            success: true,
            classification,
        })
        .into_response(),
    })
}

fn parse_body<T: DeserializeOwned>(body: Result<Bytes, BytesRejection>) -> ApiResult<T> {
    let body = body?;
    serde_json::from_slice(&body).map_err(|e| ApiError::BadRequest(e.to_string()))
}
