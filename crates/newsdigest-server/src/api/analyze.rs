use axum::{body::Bytes, extract::State, Extension, Json};
use newsdigest_core::Report;
use newsdigest_sentiment::AnalysisError;
use serde::Deserialize;
use serde_json::Value;

use crate::middleware::RequestId;

use super::{ApiError, AppState};

const COMPANY_REQUIRED: &str = "Company name is required";

#[derive(Debug, Deserialize)]
struct AnalyzeRequest {
    #[serde(default)]
    company_name: Option<Value>,
}

/// `POST /analyze-news`
///
/// Malformed JSON gets the same 400 as a missing company name.
pub(super) async fn analyze_news(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Bytes,
) -> Result<Json<Report>, ApiError> {
    let company = company_name(&body).ok_or_else(|| ApiError::bad_request(COMPANY_REQUIRED))?;

    let analyzer = state.analyzer.lock().await;
    tracing::info!(request_id = %req_id.0, company = %company, "analysis started");

    match analyzer.analyze(&company).await {
        Ok(report) => Ok(Json(report)),
        Err(AnalysisError::NoArticlesFound { .. }) => {
            tracing::info!(request_id = %req_id.0, company = %company, "no articles found");
            Err(ApiError::not_found("No articles found"))
        }
        Err(e) => {
            tracing::error!(
                request_id = %req_id.0,
                company = %company,
                error = %e,
                "analysis failed"
            );
            Err(ApiError::internal(e.to_string()))
        }
    }
}

/// The `company_name` string of a JSON object body, exactly as sent.
///
/// Blank names count as missing.
fn company_name(body: &[u8]) -> Option<String> {
    let request: AnalyzeRequest = serde_json::from_slice(body).ok()?;
    match request.company_name {
        Some(Value::String(name)) if !name.trim().is_empty() => Some(name),
        _ => None,
    }
}
