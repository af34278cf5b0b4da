use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use utoipa::ToSchema;

use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::error::{method_not_allowed, preflight};

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResp {
    pub status: &'static str,
    /// Undecodable vote rows dropped from tallies since startup.
    pub rows_skipped: u64,
    pub tallies_served: u64,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses((status = 200, body = HealthResp))
)]
pub async fn health(State(ctx): State<AppContext>) -> Json<HealthResp> {
    let db_ok = ctx.vote_repo().ping().await.is_ok();
    let status = if db_ok { "ok" } else { "degraded" };
    let stats = ctx.tally_stats();
    Json(HealthResp {
        status,
        rows_skipped: stats.rows_skipped(),
        tallies_served: stats.tallies_served(),
    })
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route(
            "/health",
            get(health)
                .head(method_not_allowed)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .with_state(ctx)
}
