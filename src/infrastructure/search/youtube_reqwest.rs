use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::video_search_port::{UpstreamResponse, VideoSearchPort};

pub struct ReqwestVideoSearch {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ReqwestVideoSearch {
    pub fn new(base_url: &str, api_key: String, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }
}

#[async_trait]
impl VideoSearchPort for ReqwestVideoSearch {
    async fn search(&self, params: &[(String, String)]) -> anyhow::Result<UpstreamResponse> {
        let url = format!("{}/search", self.base_url);
        tracing::debug!(%url, params = params.len(), "search_proxy_forward");
        let resp = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            // Strip the url from errors, it carries the api key.
            .map_err(|e| anyhow::anyhow!("request failed: {}", e.without_url()))?;
        let status = resp.status().as_u16();
        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = resp
            .bytes()
            .await
            .map_err(|e| anyhow::anyhow!("failed to read body: {}", e.without_url()))?;
        Ok(UpstreamResponse {
            status,
            content_type,
            body: body.to_vec(),
        })
    }
}
