//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with all handlers
//! - Wire up middleware (tracing, request timeout)
//! - Build shared state from process settings
//! - Bind server to listener with graceful shutdown
//!
//! # Design Decisions
//! - State holds the resolver and the gate behind Arc; handlers stay thin
//! - The form template is compiled in and registered once at startup
//! - Auth is checked inside the mutating handlers, not as a layer: GET
//!   and POST share paths but only POST is gated

use std::sync::Arc;
use std::time::Duration;

use axum::routing::get;
use axum::Router;
use handlebars::Handlebars;
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::auth::AuthGate;
use crate::http::{api, form};
use crate::records::{ConfigResolver, RecordStore};
use crate::settings::Settings;

const FORM_TEMPLATE: &str = include_str!("../../templates/config_form.hbs");
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<ConfigResolver>,
    pub auth: Arc<AuthGate>,
    pub templates: Arc<Handlebars<'static>>,
    pub default_customer_id: String,
}

/// HTTP server for the config dashboard.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Wire up state and routes from process settings.
    pub fn new(settings: &Settings) -> Result<Self, handlebars::TemplateError> {
        let store = RecordStore::new(&settings.store_path);
        let resolver = ConfigResolver::new(store, settings.default_customer_id.clone());
        let auth = AuthGate::new(settings.admin_token.clone());

        let mut templates = Handlebars::new();
        templates.set_strict_mode(true);
        templates.register_template_string("config_form", FORM_TEMPLATE)?;

        let state = AppState {
            resolver: Arc::new(resolver),
            auth: Arc::new(auth),
            templates: Arc::new(templates),
            default_customer_id: settings.default_customer_id.clone(),
        };

        Ok(Self {
            router: Self::build_router(state),
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/", get(form::root_redirect))
            .route("/config", get(form::show_form).post(form::submit_form))
            .route("/api/config", get(api::get_config).post(api::update_config))
            .with_state(state)
            .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
