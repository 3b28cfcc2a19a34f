//! Dual-Channel Delivery
//!
//! One submission fans out to the spreadsheet web-hook and the Resend
//! email API. The orchestrator owns the failure policy: bookkeeping is
//! best-effort, the participant's copy is mandatory, admin copies are
//! fire-and-forget.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{error, warn};

use crate::domain::Submission;
use crate::payload;

const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";

const PARTICIPANT_SUBJECT: &str = "Seu Termo de Consentimento - Escalada Boulder";

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("spreadsheet store request failed: {0}")]
    SheetStore(String),
    #[error("mail send failed: {0}")]
    Mailer(String),
    #[error("participant email could not be delivered")]
    ParticipantEmail,
}

/// Spreadsheet-backed record store.
#[async_trait]
pub trait SheetStore: Send + Sync {
    /// Forward a JSON body to the web-hook and return its JSON reply.
    async fn forward(&self, body: Value) -> Result<Value, DeliveryError>;
}

/// Transactional email provider.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_html(&self, to: &str, subject: &str, html: &str) -> Result<(), DeliveryError>;
}

/// Google Apps Script web-hook client.
pub struct SheetsWebhook {
    url: String,
    client: reqwest::Client,
}

impl SheetsWebhook {
    pub fn new(url: String, client: reqwest::Client) -> Self {
        Self { url, client }
    }
}

#[async_trait]
impl SheetStore for SheetsWebhook {
    async fn forward(&self, body: Value) -> Result<Value, DeliveryError> {
        let response = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| DeliveryError::SheetStore(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DeliveryError::SheetStore(format!(
                "web-hook returned {}",
                response.status()
            )));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| DeliveryError::SheetStore(e.to_string()))
    }
}

/// Resend HTTP API client under a fixed sender identity.
pub struct ResendMailer {
    api_key: String,
    from: String,
    client: reqwest::Client,
}

impl ResendMailer {
    pub fn new(api_key: String, from: String, client: reqwest::Client) -> Self {
        Self {
            api_key,
            from,
            client,
        }
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send_html(&self, to: &str, subject: &str, html: &str) -> Result<(), DeliveryError> {
        let body = json!({
            "from": self.from,
            "to": [to],
            "subject": subject,
            "html": html,
        });

        let response = self
            .client
            .post(RESEND_ENDPOINT)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| DeliveryError::Mailer(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DeliveryError::Mailer(format!(
                "provider returned {}",
                response.status()
            )));
        }

        Ok(())
    }
}

/// Runs the outbound calls for one submission and decides which failures
/// reach the caller.
pub struct DeliveryOrchestrator {
    sheets: Arc<dyn SheetStore>,
    mailer: Arc<dyn Mailer>,
    admin_emails: Vec<String>,
}

impl DeliveryOrchestrator {
    pub fn new(
        sheets: Arc<dyn SheetStore>,
        mailer: Arc<dyn Mailer>,
        admin_emails: Vec<String>,
    ) -> Self {
        Self {
            sheets,
            mailer,
            admin_emails,
        }
    }

    /// Full delivery for one submission.
    ///
    /// 1. Spreadsheet record — non-fatal, waiver delivery is never
    ///    blocked by bookkeeping.
    /// 2. Participant email — fatal on failure, the caller prompts a
    ///    retry with the form intact.
    /// 3. Admin copies — concurrent, failures logged and swallowed.
    pub async fn deliver(&self, submission: &Submission) -> Result<(), DeliveryError> {
        let payload = payload::build(submission);

        if let Err(e) = self.sheets.forward(payload.sheet_record.to_json()).await {
            warn!(id = %submission.id, error = %e, "spreadsheet save failed, continuing");
        }

        self.send_waiver_emails(submission, &payload.email_html).await
    }

    /// Participant copy first (fatal), then the admin fan-out.
    pub async fn send_waiver_emails(
        &self,
        submission: &Submission,
        html: &str,
    ) -> Result<(), DeliveryError> {
        if let Err(e) = self
            .mailer
            .send_html(submission.email.as_str(), PARTICIPANT_SUBJECT, html)
            .await
        {
            error!(id = %submission.id, error = %e, "participant email failed");
            return Err(DeliveryError::ParticipantEmail);
        }

        self.notify_admins(submission, html).await;
        Ok(())
    }

    async fn notify_admins(&self, submission: &Submission, html: &str) {
        let subject = format!("Novo Termo de Consentimento - {}", submission.full_name);

        let mut handles = Vec::with_capacity(self.admin_emails.len());
        for admin in &self.admin_emails {
            let mailer = Arc::clone(&self.mailer);
            let admin = admin.clone();
            let subject = subject.clone();
            let html = html.to_string();
            handles.push(tokio::spawn(async move {
                let result = mailer.send_html(&admin, &subject, &html).await;
                (admin, result)
            }));
        }

        for handle in handles {
            match handle.await {
                Ok((_, Ok(()))) => {}
                Ok((admin, Err(e))) => {
                    warn!(admin = %admin, error = %e, "admin notification failed")
                }
                Err(e) => warn!(error = %e, "admin notification task panicked"),
            }
        }
    }
}
