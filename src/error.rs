//! HTTP Error Mapping
//!
//! Every failure leaves the service as a structured JSON body with a
//! fixed shape; provider internals stay in the logs.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::delivery::DeliveryError;
use crate::domain::FormError;
use crate::validator::ValidationError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or incomplete form payload
    #[error("{0}")]
    BadForm(#[from] FormError),
    /// Submission failed the eligibility gate
    #[error("{0}")]
    Validation(#[from] ValidationError),
    /// Participant copy undeliverable; the user is asked to retry
    #[error("Erro ao enviar o formulário. Por favor, tente novamente.")]
    Delivery(#[from] DeliveryError),
    /// Spreadsheet proxy failure, fixed shape per the form page
    #[error("Failed to save to Google Sheets")]
    SheetRelay,
    /// Email proxy failure, fixed shape per the form page
    #[error("Error sending email")]
    EmailRelay,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::BadForm(_) => StatusCode::BAD_REQUEST,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Delivery(_) => StatusCode::BAD_GATEWAY,
            Self::SheetRelay | Self::EmailRelay => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> Value {
        match self {
            // the form page expects a bare {"error": ...} from the email proxy
            Self::EmailRelay => json!({ "error": self.to_string() }),
            _ => json!({ "success": false, "error": self.to_string() }),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}
