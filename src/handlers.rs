//! API Handlers

use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::{error, info};

use crate::domain::{Submission, SubmissionForm};
use crate::error::ApiError;
use crate::{payload, validator, AppState};

pub async fn health() -> &'static str {
    "OK"
}

/// Full server-side workflow: freeze the form into a submission, gate
/// it, then deliver. Validation failures return before any outbound
/// call is issued.
pub async fn submit_waiver(
    State(state): State<AppState>,
    Json(form): Json<SubmissionForm>,
) -> Result<Json<Value>, ApiError> {
    let submission = Submission::from_form(form)?;
    validator::can_submit(&submission, Utc::now().date_naive())?;

    state.orchestrator.deliver(&submission).await?;

    info!(id = %submission.id, "waiver delivered");
    Ok(Json(json!({ "success": true })))
}

/// Spreadsheet proxy: relay the JSON body verbatim, relay the reply.
pub async fn save_sheet(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let reply = state.sheets.forward(body).await.map_err(|e| {
        error!(error = %e, "sheet relay failed");
        ApiError::SheetRelay
    })?;
    Ok(Json(reply))
}

/// Email proxy: the participant copy is mandatory, admin copies are
/// dispatched after it and never fail the request.
pub async fn send_waiver_email(
    State(state): State<AppState>,
    Json(form): Json<SubmissionForm>,
) -> Result<Json<Value>, ApiError> {
    let submission = Submission::from_form(form)?;
    let payload = payload::build(&submission);

    state
        .orchestrator
        .send_waiver_emails(&submission, &payload.email_html)
        .await
        .map_err(|_| ApiError::EmailRelay)?;

    Ok(Json(json!({ "success": true })))
}
