use crate::application::ports::vote_repository::VoteRepository;
use crate::application::services::tally_stats::TallyStats;
use crate::application::use_cases::votes::get_tally::{TallyError, tally_scope};
use crate::domain::votes::tally::{Tally, TallyScope};

/// Counts only the votes one user cast on an (artist, video) pair.
pub struct GetUserTally<'a, R: VoteRepository + ?Sized> {
    pub repo: &'a R,
    pub stats: &'a TallyStats,
}

impl<'a, R: VoteRepository + ?Sized> GetUserTally<'a, R> {
    pub async fn execute(
        &self,
        artist: Option<String>,
        video_id: Option<String>,
        user_name: Option<String>,
    ) -> Result<Tally, TallyError> {
        let scope = TallyScope::user(artist, video_id, user_name)?;
        tally_scope(self.repo, self.stats, &scope).await
    }
}
