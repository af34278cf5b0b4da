use std::sync::Arc;

use crate::application::ports::video_search_port::VideoSearchPort;
use crate::application::ports::vote_repository::VoteRepository;
use crate::application::services::tally_stats::TallyStats;

#[derive(Clone)]
pub struct AppContext {
    services: Arc<AppServices>,
}

pub struct AppServices {
    vote_repo: Arc<dyn VoteRepository>,
    video_search: Option<Arc<dyn VideoSearchPort>>,
    tally_stats: TallyStats,
}

impl AppServices {
    pub fn new(
        vote_repo: Arc<dyn VoteRepository>,
        video_search: Option<Arc<dyn VideoSearchPort>>,
    ) -> Self {
        Self {
            vote_repo,
            video_search,
            tally_stats: TallyStats::default(),
        }
    }
}

impl AppContext {
    pub fn new(services: AppServices) -> Self {
        Self {
            services: Arc::new(services),
        }
    }

    pub fn vote_repo(&self) -> Arc<dyn VoteRepository> {
        self.services.vote_repo.clone()
    }

    /// `None` when no search API key was configured.
    pub fn video_search(&self) -> Option<Arc<dyn VideoSearchPort>> {
        self.services.video_search.clone()
    }

    pub fn tally_stats(&self) -> &TallyStats {
        &self.services.tally_stats
    }
}
