//! Submission Record
//!
//! `SubmissionForm` is the untrusted wire shape posted by the form page;
//! `Submission` is the frozen record built from it. Unknown fields are
//! rejected at deserialization and field validation happens once, here,
//! so downstream components can trust their input.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use super::{EmailAddress, SignatureImage};

/// Raw form payload exactly as posted by the page.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SubmissionForm {
    pub full_name: String,
    pub email: String,
    /// ISO `YYYY-MM-DD`, as produced by a date input
    pub birth_date: String,
    pub id_document: String,
    pub emergency_phone: String,
    #[serde(default)]
    pub register_minors: bool,
    #[serde(default)]
    pub minor_names: String,
    #[serde(default)]
    pub accepts_terms: bool,
    #[serde(default)]
    pub signature_image: String,
}

/// Field-level rejection, surfaced verbatim as the inline form error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Campo obrigatório não preenchido: {0}.")]
    MissingField(&'static str),
    #[error("E-mail inválido.")]
    InvalidEmail,
    #[error("Data de nascimento inválida.")]
    InvalidBirthDate,
    #[error("Assinatura em formato inválido.")]
    InvalidSignature,
}

/// A validated submission, immutable once built. One is constructed per
/// attempt and dropped after delivery; nothing is retained in memory.
#[derive(Clone, Debug)]
pub struct Submission {
    pub id: Uuid,
    pub full_name: String,
    pub email: EmailAddress,
    pub birth_date: NaiveDate,
    pub id_document: String,
    pub emergency_phone: String,
    pub register_minors: bool,
    pub minor_names: String,
    pub accepts_terms: bool,
    pub signature: SignatureImage,
    pub submitted_at: DateTime<Utc>,
}

impl Submission {
    pub fn from_form(form: SubmissionForm) -> Result<Self, FormError> {
        let full_name = required(form.full_name, "nome completo")?;
        let email = EmailAddress::new(form.email).map_err(|_| FormError::InvalidEmail)?;
        let birth_date = NaiveDate::parse_from_str(form.birth_date.trim(), "%Y-%m-%d")
            .map_err(|_| FormError::InvalidBirthDate)?;
        let id_document = required(form.id_document, "documento de identificação")?;
        let emergency_phone = required(form.emergency_phone, "telefone para emergência")?;
        let signature = SignatureImage::parse(form.signature_image)
            .map_err(|_| FormError::InvalidSignature)?;

        Ok(Self {
            id: Uuid::new_v4(),
            full_name,
            email,
            birth_date,
            id_document,
            emergency_phone,
            register_minors: form.register_minors,
            minor_names: form.minor_names.trim().to_string(),
            accepts_terms: form.accepts_terms,
            signature,
            submitted_at: Utc::now(),
        })
    }
}

fn required(value: String, field: &'static str) -> Result<String, FormError> {
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(FormError::MissingField(field));
    }
    Ok(value)
}
