use axum::{
    Router,
    extract::{Query, State},
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::get,
};

use crate::application::use_cases::search::search_videos::SearchVideos;
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::error::{ApiError, method_not_allowed, preflight};

const DEFAULT_CONTENT_TYPE: &str = "application/json";

#[utoipa::path(get, path = "/search", tag = "Search",
    responses(
        (status = 200, description = "Upstream search response, relayed verbatim"),
        (status = 502, description = "Upstream unreachable"),
        (status = 503, description = "No search api key configured")
    ))]
pub async fn search(
    State(ctx): State<AppContext>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response, ApiError> {
    let port = ctx.video_search();
    let uc = SearchVideos {
        port: port.as_deref(),
    };
    let upstream = uc.execute(params).await?;
    let status = StatusCode::from_u16(upstream.status).map_err(|_| ApiError::Upstream)?;
    let content_type = upstream
        .content_type
        .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());
    Ok((status, [(CONTENT_TYPE, content_type)], upstream.body).into_response())
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route(
            "/search",
            get(search)
                .head(method_not_allowed)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .with_state(ctx)
}
