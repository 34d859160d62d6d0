use actix_web::{web, HttpRequest, HttpResponse, Responder};
use crate::models::{AdminOverviewResponse, ErrorResponse};
use crate::routes::AppState;
use crate::services::AuthError;

/// Configure the admin shell
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/admin/overview", web::get().to(overview));
}

/// Admin dashboard data
///
/// GET /api/v1/admin/overview
///
/// Requires a bearer token whose subject is listed in `auth.admin_uids`.
async fn overview(state: web::Data<AppState>, http_req: HttpRequest) -> impl Responder {
    let user_id = match state.auth.require_admin(&http_req) {
        Ok(user_id) => user_id,
        Err(e @ AuthError::Unauthenticated) => {
            return HttpResponse::Unauthorized().json(ErrorResponse::new(
                "Unauthenticated",
                e.to_string(),
                401,
            ));
        }
        Err(e @ AuthError::Forbidden) => {
            tracing::warn!("Non-admin user denied access to admin overview");
            return HttpResponse::Forbidden().json(ErrorResponse::new("Forbidden", e.to_string(), 403));
        }
    };

    let stats = state.inventory.stats().await;
    let active_sessions = state.sessions.len().await;
    let cached_recommendations = state.cache.stats().entries;

    tracing::info!("Admin overview requested by {}", user_id);

    HttpResponse::Ok().json(AdminOverviewResponse {
        user_id,
        stats,
        active_sessions,
        cached_recommendations,
    })
}
