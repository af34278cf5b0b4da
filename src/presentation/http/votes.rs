use std::collections::BTreeMap;

use async_trait::async_trait;
use axum::{
    Form, Json, Router,
    body::Bytes,
    extract::{FromRequest, Query, Request, State},
    http::{StatusCode, header::CONTENT_TYPE},
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::use_cases::votes::cast_vote::{CastVote, VoteInput};
use crate::application::use_cases::votes::get_tally::GetTally;
use crate::application::use_cases::votes::get_user_tally::GetUserTally;
use crate::bootstrap::app_context::AppContext;
use crate::domain::votes::tally::Tally;
use crate::domain::votes::vote::{FIELD_ARTIST, FIELD_USER_NAME, FIELD_VIDEO_ID};
use crate::presentation::http::error::{ApiError, method_not_allowed, preflight};

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VotePayload {
    pub artist: Option<String>,
    pub video_id: Option<String>,
    pub user_name: Option<String>,
    pub tag_id: Option<String>,
}

impl From<VotePayload> for VoteInput {
    fn from(p: VotePayload) -> Self {
        VoteInput {
            artist: p.artist,
            video_id: p.video_id,
            user_name: p.user_name,
            tag_id: p.tag_id,
        }
    }
}

/// Vote body, read as form fields when the request says so and as JSON otherwise.
pub struct VoteBody(pub VotePayload);

#[async_trait]
impl<S> FromRequest<S> for VoteBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.starts_with("application/x-www-form-urlencoded"))
            .unwrap_or(false);

        if is_form {
            let Form(payload) = Form::<VotePayload>::from_request(req, state)
                .await
                .map_err(|e| {
                    tracing::debug!(error = %e, "vote_form_rejected");
                    body_error(e.status())
                })?;
            return Ok(VoteBody(payload));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| body_error(e.status()))?;
        let payload = serde_json::from_slice(&bytes).map_err(|e| {
            tracing::debug!(error = %e, "vote_json_rejected");
            ApiError::MalformedPayload
        })?;
        Ok(VoteBody(payload))
    }
}

fn body_error(status: StatusCode) -> ApiError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge
    } else {
        ApiError::MalformedPayload
    }
}

/// Tally parameters. A repeated key keeps its first value.
#[derive(Debug, Default)]
pub struct TallyQuery {
    pub artist: Option<String>,
    pub video_id: Option<String>,
    pub user_name: Option<String>,
}

impl TallyQuery {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let first = |name: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.clone())
        };
        TallyQuery {
            artist: first(FIELD_ARTIST),
            video_id: first(FIELD_VIDEO_ID),
            user_name: first(FIELD_USER_NAME),
        }
    }
}

/// Tag to vote count.
#[derive(Debug, Serialize, ToSchema)]
pub struct TallyResponse(pub BTreeMap<String, u64>);

impl From<Tally> for TallyResponse {
    fn from(t: Tally) -> Self {
        TallyResponse(t.counts)
    }
}

#[utoipa::path(post, path = "/", tag = "Votes", request_body = VotePayload,
    responses(
        (status = 200, description = "Vote stored", body = String),
        (status = 400, description = "Missing field or malformed body"),
        (status = 500, description = "Store failure")
    ))]
pub async fn cast_vote(
    State(ctx): State<AppContext>,
    VoteBody(payload): VoteBody,
) -> Result<String, ApiError> {
    let repo = ctx.vote_repo();
    let uc = CastVote {
        repo: repo.as_ref(),
    };
    let record = uc.execute(payload.into()).await?;
    tracing::info!(
        vote_id = record.vote_id,
        artist = %record.artist,
        video_id = %record.video_id,
        tag_id = %record.tag_id,
        "vote_cast"
    );
    Ok(format!("Vote successfully cast for {}!\n", record.artist))
}

#[utoipa::path(get, path = "/", tag = "Votes",
    params(
        ("artist" = String, Query, description = "Artist or channel"),
        ("videoId" = String, Query, description = "Video identifier")
    ),
    responses(
        (status = 200, body = TallyResponse),
        (status = 400, description = "Missing parameter"),
        (status = 500, description = "Store failure")
    ))]
pub async fn show_tally(
    State(ctx): State<AppContext>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<TallyResponse>, ApiError> {
    let q = TallyQuery::from_pairs(&pairs);
    let repo = ctx.vote_repo();
    let uc = GetTally {
        repo: repo.as_ref(),
        stats: ctx.tally_stats(),
    };
    let tally = uc.execute(q.artist, q.video_id).await?;
    Ok(Json(tally.into()))
}

#[utoipa::path(get, path = "/user", tag = "Votes",
    params(
        ("artist" = String, Query, description = "Artist or channel"),
        ("videoId" = String, Query, description = "Video identifier"),
        ("userName" = String, Query, description = "Voter")
    ),
    responses(
        (status = 200, body = TallyResponse),
        (status = 400, description = "Missing parameter"),
        (status = 500, description = "Store failure")
    ))]
pub async fn show_user_tally(
    State(ctx): State<AppContext>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<TallyResponse>, ApiError> {
    let q = TallyQuery::from_pairs(&pairs);
    let repo = ctx.vote_repo();
    let uc = GetUserTally {
        repo: repo.as_ref(),
        stats: ctx.tally_stats(),
    };
    let tally = uc.execute(q.artist, q.video_id, q.user_name).await?;
    Ok(Json(tally.into()))
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route(
            "/",
            get(show_tally)
                .head(method_not_allowed)
                .post(cast_vote)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .route(
            "/user",
            get(show_user_tally)
                .head(method_not_allowed)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .with_state(ctx)
}
