use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: u16,
    /// Upstream `Content-Type`, when it sent one.
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

#[async_trait]
pub trait VideoSearchPort: Send + Sync {
    /// Forwards client query parameters to the upstream search API with the
    /// server-held credential attached.
    async fn search(&self, params: &[(String, String)]) -> anyhow::Result<UpstreamResponse>;
}
