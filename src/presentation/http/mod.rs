use axum::Router;
use axum::extract::{DefaultBodyLimit, MatchedPath};
use http::header::{
    ACCEPT, ACCEPT_ENCODING, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE,
};
use http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::bootstrap::app_context::AppContext;

pub mod error;
pub mod health;
pub mod search;
pub mod votes;

const X_CSRF_TOKEN: HeaderName = HeaderName::from_static("x-csrf-token");
const ALLOW_METHODS_VALUE: &str = "POST, GET, OPTIONS, PUT, DELETE";
const ALLOW_HEADERS_VALUE: &str =
    "Accept, Content-Type, Content-Length, Accept-Encoding, X-CSRF-Token, Authorization";
const BODY_LIMIT_BYTES: usize = 64 * 1024;

#[derive(OpenApi)]
#[openapi(
    paths(
        votes::cast_vote,
        votes::show_tally,
        votes::show_user_tally,
        search::search,
        health::health,
    ),
    components(schemas(votes::VotePayload, votes::TallyResponse, health::HealthResp)),
    tags(
        (name = "Votes", description = "Tag voting and tallies"),
        (name = "Search", description = "Video search proxy"),
        (name = "Health", description = "System health checks")
    )
)]
pub struct ApiDoc;

/// Permissive CORS: any origin, and the allowed methods/headers stamped on
/// every response, not only on preflights.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::POST,
            Method::GET,
            Method::OPTIONS,
            Method::PUT,
            Method::DELETE,
        ])
        .allow_headers([
            ACCEPT,
            CONTENT_TYPE,
            CONTENT_LENGTH,
            ACCEPT_ENCODING,
            X_CSRF_TOKEN,
            AUTHORIZATION,
        ])
}

pub fn router(ctx: AppContext) -> Router {
    Router::new()
        .merge(votes::routes(ctx.clone()))
        .merge(search::routes(ctx.clone()))
        .merge(health::routes(ctx))
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(SetResponseHeaderLayer::if_not_present(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS_VALUE),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS_VALUE),
        ))
        .layer(cors_layer())
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        )
}
