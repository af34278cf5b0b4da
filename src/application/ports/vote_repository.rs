use async_trait::async_trait;

use crate::domain::votes::tally::{RowDecodeError, TallyScope};
use crate::domain::votes::vote::{NewVote, VoteRecord};

#[async_trait]
pub trait VoteRepository: Send + Sync {
    /// Single-row atomic insert; the store assigns `vote_id` and `time_cast`.
    async fn insert_vote(&self, vote: &NewVote) -> anyhow::Result<VoteRecord>;

    /// One entry per vote row matching `scope`, decoded independently.
    async fn scan_tags(
        &self,
        scope: &TallyScope,
    ) -> anyhow::Result<Vec<Result<String, RowDecodeError>>>;

    async fn ping(&self) -> anyhow::Result<()>;
}
