#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use serde_json::Value;
use tower::util::ServiceExt;

use tagvote::application::ports::video_search_port::{UpstreamResponse, VideoSearchPort};
use tagvote::application::ports::vote_repository::VoteRepository;
use tagvote::bootstrap::app_context::{AppContext, AppServices};
use tagvote::domain::votes::tally::{RowDecodeError, TallyScope};
use tagvote::domain::votes::vote::{NewVote, VoteRecord};

/// In-memory vote store that counts how often it is touched.
#[derive(Default)]
pub struct MemoryVotes {
    rows: Mutex<Vec<VoteRecord>>,
    /// Rows whose tag cannot be decoded, keyed by (artist, video_id).
    corrupt: Mutex<Vec<(String, String)>>,
    pub reads: AtomicUsize,
    pub writes: AtomicUsize,
    pub failing: AtomicBool,
}

impl MemoryVotes {
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn add_corrupt_row(&self, artist: &str, video_id: &str) {
        self.corrupt
            .lock()
            .unwrap()
            .push((artist.to_string(), video_id.to_string()));
    }

    pub fn touches(&self) -> usize {
        self.reads.load(Ordering::SeqCst) + self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VoteRepository for MemoryVotes {
    async fn insert_vote(&self, vote: &NewVote) -> anyhow::Result<VoteRecord> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            anyhow::bail!("connection reset by peer");
        }
        let mut rows = self.rows.lock().unwrap();
        let record = VoteRecord {
            vote_id: rows.len() as i64 + 1,
            time_cast: chrono::Utc::now(),
            artist: vote.artist.clone(),
            video_id: vote.video_id.clone(),
            user_name: vote.user_name.clone(),
            tag_id: vote.tag_id.clone(),
        };
        rows.push(record.clone());
        Ok(record)
    }

    async fn scan_tags(
        &self,
        scope: &TallyScope,
    ) -> anyhow::Result<Vec<Result<String, RowDecodeError>>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            anyhow::bail!("connection reset by peer");
        }
        let mut out: Vec<Result<String, RowDecodeError>> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.artist == scope.artist && r.video_id == scope.video_id)
            .filter(|r| scope.user_name.as_ref().is_none_or(|u| &r.user_name == u))
            .map(|r| Ok(r.tag_id.clone()))
            .collect();
        if scope.user_name.is_none() {
            for (artist, video_id) in self.corrupt.lock().unwrap().iter() {
                if artist == &scope.artist && video_id == &scope.video_id {
                    out.push(Err(RowDecodeError {
                        reason: "unexpected null".into(),
                    }));
                }
            }
        }
        Ok(out)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            anyhow::bail!("connection reset by peer");
        }
        Ok(())
    }
}

/// Search api stand-in that records what it was asked and replies with a canned response.
pub struct CannedSearch {
    pub status: u16,
    pub content_type: Option<&'static str>,
    pub body: &'static str,
    pub seen: Mutex<Vec<(String, String)>>,
}

impl CannedSearch {
    pub fn new(status: u16, body: &'static str) -> Self {
        Self {
            status,
            content_type: None,
            body,
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn with_content_type(mut self, content_type: &'static str) -> Self {
        self.content_type = Some(content_type);
        self
    }
}

#[async_trait]
impl VideoSearchPort for CannedSearch {
    async fn search(&self, params: &[(String, String)]) -> anyhow::Result<UpstreamResponse> {
        let mut seen = params.to_vec();
        seen.push(("key".into(), "server-key".into()));
        *self.seen.lock().unwrap() = seen;
        Ok(UpstreamResponse {
            status: self.status,
            content_type: self.content_type.map(str::to_string),
            body: self.body.as_bytes().to_vec(),
        })
    }
}

pub fn setup_app(search: Option<Arc<CannedSearch>>) -> (Router, Arc<MemoryVotes>) {
    let votes = Arc::new(MemoryVotes::default());
    let search: Option<Arc<dyn VideoSearchPort>> = search.map(|s| s as Arc<dyn VideoSearchPort>);
    let ctx = AppContext::new(AppServices::new(votes.clone(), search));
    (tagvote::presentation::http::router(ctx), votes)
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    request("GET", uri)
}

pub fn request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn vote_json(artist: &str, video_id: &str, user_name: &str, tag_id: &str) -> Value {
    serde_json::json!({
        "artist": artist,
        "videoId": video_id,
        "userName": user_name,
        "tagId": tag_id,
    })
}

pub async fn cast(app: &Router, artist: &str, video_id: &str, user_name: &str, tag_id: &str) {
    let res = send(app, post_json("/", vote_json(artist, video_id, user_name, tag_id))).await;
    assert_eq!(res.status(), 200, "vote should be accepted");
}

pub async fn body_string(res: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("Should read body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

pub async fn body_json(res: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

pub async fn tally(app: &Router, uri: &str) -> Value {
    let res = send(app, get(uri)).await;
    assert_eq!(res.status(), 200);
    body_json(res).await
}
