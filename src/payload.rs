//! Delivery Payload Assembly
//!
//! Pure: turns a validated submission into the two outbound shapes, the
//! rendered waiver HTML and the flattened spreadsheet record. No
//! validation happens here.

use serde_json::{json, Value};

use crate::domain::Submission;
use crate::render;

/// Flattened row for the spreadsheet web-hook. The signature image stays
/// out of it; the email copy carries the raster and a multi-hundred-KB
/// text cell helps nobody.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRecord {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl SheetRecord {
    pub fn to_json(&self) -> Value {
        json!({
            "name": self.name,
            "email": self.email,
            "message": self.message,
        })
    }
}

#[derive(Debug, Clone)]
pub struct DeliveryPayload {
    pub email_html: String,
    pub sheet_record: SheetRecord,
}

pub fn build(submission: &Submission) -> DeliveryPayload {
    let mut message = format!(
        "Nascimento: {birth} | Documento: {doc} | Telefone de emergência: {phone}",
        birth = submission.birth_date.format("%d/%m/%Y"),
        doc = submission.id_document,
        phone = submission.emergency_phone,
    );
    if submission.register_minors {
        message.push_str(&format!(" | Filhos: {}", submission.minor_names));
    }
    message.push_str(&format!(" | Registro: {}", submission.id));

    DeliveryPayload {
        email_html: render::waiver_email_html(submission),
        sheet_record: SheetRecord {
            name: submission.full_name.clone(),
            email: submission.email.as_str().to_string(),
            message,
        },
    }
}
