//! Waiver API Backend
//!
//! Rust/Axum backend for the boulder wall consent form: validates
//! submissions, renders the signed waiver email, and delivers it to the
//! participant, the administrators, and the spreadsheet record store.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod delivery;
mod domain;
mod error;
mod handlers;
mod payload;
mod render;
mod validator;

use delivery::{DeliveryOrchestrator, ResendMailer, SheetStore, SheetsWebhook};

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<DeliveryOrchestrator>,
    pub sheets: Arc<dyn SheetStore>,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Full server-side submission workflow
        .route("/api/submissions", post(handlers::submit_waiver))
        // Raw proxies kept for the client-orchestrated form page
        .route("/api/sheets", post(handlers::save_sheet))
        .route("/api/send-email", post(handlers::send_waiver_email))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = config::Config::load();

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
        .expect("failed to build HTTP client");

    let sheets: Arc<dyn SheetStore> =
        Arc::new(SheetsWebhook::new(config.sheets_webhook_url, client.clone()));
    let mailer = Arc::new(ResendMailer::new(
        config.resend_api_key,
        config.mail_from,
        client,
    ));
    let orchestrator = Arc::new(DeliveryOrchestrator::new(
        Arc::clone(&sheets),
        mailer,
        config.admin_emails,
    ));

    let state = AppState {
        orchestrator,
        sheets,
    };

    tracing::info!("Waiver API listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("failed to bind listen address");
    axum::serve(listener, app(state)).await.expect("server error");
}
