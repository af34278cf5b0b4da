use crate::application::ports::vote_repository::VoteRepository;
use crate::domain::votes::vote::{NewVote, ValidationError, VoteRecord};

#[derive(thiserror::Error, Debug)]
pub enum CastVoteError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("failed to store vote")]
    Storage(#[source] anyhow::Error),
}

/// Raw, unvalidated vote fields as they arrived on the wire.
#[derive(Debug, Clone, Default)]
pub struct VoteInput {
    pub artist: Option<String>,
    pub video_id: Option<String>,
    pub user_name: Option<String>,
    pub tag_id: Option<String>,
}

pub struct CastVote<'a, R: VoteRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: VoteRepository + ?Sized> CastVote<'a, R> {
    pub async fn execute(&self, input: VoteInput) -> Result<VoteRecord, CastVoteError> {
        let vote = NewVote::new(input.artist, input.video_id, input.user_name, input.tag_id)?;
        // No retry here: a failed insert leaves nothing behind and the client resubmits.
        self.repo
            .insert_vote(&vote)
            .await
            .map_err(CastVoteError::Storage)
    }
}
