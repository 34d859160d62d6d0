// Route exports
pub mod admin;
pub mod shopping;
pub mod storefront;

use actix_web::{error, http::StatusCode, web, HttpRequest, HttpResponse};
use crate::config::Settings;
use crate::core::SearchMatcher;
use crate::models::ErrorResponse;
use crate::services::{
    AssistantCache, AssistantError, AuthGate, CarAssistant, DisabledAssistant, Inventory,
    OpenAiCompatAssistant, SessionRegistry,
};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub inventory: Arc<Inventory>,
    pub sessions: Arc<SessionRegistry>,
    pub assistant: Arc<dyn CarAssistant>,
    pub cache: Arc<AssistantCache>,
    pub auth: Arc<AuthGate>,
    pub matcher: SearchMatcher,
    pub whatsapp_number: Option<String>,
}

impl AppState {
    /// Build the state from settings over the seeded inventory
    ///
    /// Without an API key the assistant is disabled and every AI feature
    /// takes its local fallback.
    pub fn from_settings(settings: &Settings) -> Result<Self, AssistantError> {
        let assistant: Arc<dyn CarAssistant> = match settings.assistant.api_key.as_deref() {
            Some(api_key) if !api_key.trim().is_empty() => {
                tracing::info!(
                    "Assistant enabled (model: {}, endpoint: {})",
                    settings.assistant.model,
                    settings.assistant.base_url
                );
                Arc::new(OpenAiCompatAssistant::new(
                    settings.assistant.base_url.clone(),
                    api_key.to_string(),
                    settings.assistant.model.clone(),
                    settings.assistant.timeout_secs,
                )?)
            }
            _ => {
                tracing::warn!("No assistant API key configured, AI features use local fallbacks");
                Arc::new(DisabledAssistant)
            }
        };

        if settings.auth.jwt_secret.is_none() {
            tracing::warn!("No JWT secret configured, admin routes will reject every request");
        }

        Ok(Self {
            inventory: Arc::new(Inventory::seeded()),
            sessions: Arc::new(SessionRegistry::with_limits(
                settings.sessions.max_sessions,
                settings.sessions.idle_timeout_secs,
            )),
            assistant,
            cache: Arc::new(AssistantCache::new(
                settings.assistant.cache_size,
                settings.assistant.cache_ttl_secs,
            )),
            auth: Arc::new(AuthGate::new(
                settings.auth.jwt_secret.as_deref(),
                settings.auth.admin_uids.clone(),
            )),
            matcher: SearchMatcher::new(settings.search.similar_limit),
            whatsapp_number: settings.contact.whatsapp_number.clone(),
        })
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(storefront::configure)
            .configure(shopping::configure)
            .configure(admin::configure),
    );
}

pub(crate) fn bad_request(error: &str, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new(error, message, 400))
}

pub(crate) fn not_found(error: &str, message: impl Into<String>) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(error, message, 404))
}

pub(crate) fn car_not_found(car_id: &str) -> HttpResponse {
    not_found("Car not found", format!("No car with id {}", car_id))
}

/// JSON error body for malformed payloads and query strings
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

/// Register shared state, payload error handlers and all routes
///
/// Used by the server and by integration tests so both see the same app.
pub fn configure_app(state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(web::Data::new(state))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .configure(configure_routes);
    }
}
