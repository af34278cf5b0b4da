use crate::application::ports::video_search_port::{UpstreamResponse, VideoSearchPort};

#[derive(thiserror::Error, Debug)]
pub enum SearchError {
    #[error("search proxy is not configured")]
    NotConfigured,
    #[error("upstream search request failed")]
    Upstream(#[source] anyhow::Error),
}

pub struct SearchVideos<'a, P: VideoSearchPort + ?Sized> {
    pub port: Option<&'a P>,
}

impl<'a, P: VideoSearchPort + ?Sized> SearchVideos<'a, P> {
    pub async fn execute(
        &self,
        params: Vec<(String, String)>,
    ) -> Result<UpstreamResponse, SearchError> {
        let port = self.port.ok_or(SearchError::NotConfigured)?;
        // The credential is injected server-side; never let a client override it.
        let params: Vec<(String, String)> =
            params.into_iter().filter(|(k, _)| k != "key").collect();
        port.search(&params).await.map_err(SearchError::Upstream)
    }
}
