//! Deployment Configuration
//!
//! Everything comes from the environment: provider credentials and the
//! web-hook URL have no sane defaults and abort startup when missing.

use tracing::warn;

pub struct Config {
    /// Listen address
    pub bind_addr: String,
    /// Resend API key
    pub resend_api_key: String,
    /// Sender identity for all outbound mail
    pub mail_from: String,
    /// Administrator notification addresses
    pub admin_emails: Vec<String>,
    /// Spreadsheet web-hook URL (Google Apps Script endpoint)
    pub sheets_webhook_url: String,
}

impl Config {
    pub fn load() -> Self {
        let admin_emails = parse_address_list(
            &std::env::var("ADMIN_EMAILS").unwrap_or_default(),
        );
        if admin_emails.is_empty() {
            warn!("ADMIN_EMAILS is empty, admin notifications are disabled");
        }

        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            resend_api_key: required("RESEND_API_KEY"),
            mail_from: std::env::var("MAIL_FROM")
                .unwrap_or_else(|_| "Form Boulder <noreply@formboulder.com>".into()),
            admin_emails,
            sheets_webhook_url: required("SHEETS_WEBHOOK_URL"),
        }
    }
}

fn required(key: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| panic!("{key} must be set"))
}

/// Split a comma-separated address list, dropping blanks.
fn parse_address_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
