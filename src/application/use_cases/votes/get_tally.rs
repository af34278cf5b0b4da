use crate::application::ports::vote_repository::VoteRepository;
use crate::application::services::tally_stats::TallyStats;
use crate::domain::votes::tally::{Tally, TallyScope};
use crate::domain::votes::vote::ValidationError;

#[derive(thiserror::Error, Debug)]
pub enum TallyError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("failed to scan votes")]
    Storage(#[source] anyhow::Error),
}

/// Counts every vote cast on an (artist, video) pair.
pub struct GetTally<'a, R: VoteRepository + ?Sized> {
    pub repo: &'a R,
    pub stats: &'a TallyStats,
}

impl<'a, R: VoteRepository + ?Sized> GetTally<'a, R> {
    pub async fn execute(
        &self,
        artist: Option<String>,
        video_id: Option<String>,
    ) -> Result<Tally, TallyError> {
        let scope = TallyScope::video(artist, video_id)?;
        tally_scope(self.repo, self.stats, &scope).await
    }
}

/// Shared by the global and per-user readers. A scan either completes or
/// fails as a whole; only individual row decodes are tolerated.
pub(crate) async fn tally_scope<R: VoteRepository + ?Sized>(
    repo: &R,
    stats: &TallyStats,
    scope: &TallyScope,
) -> Result<Tally, TallyError> {
    let rows = repo.scan_tags(scope).await.map_err(TallyError::Storage)?;
    let tally = Tally::fold(rows);
    stats.record(tally.skipped);
    Ok(tally)
}
