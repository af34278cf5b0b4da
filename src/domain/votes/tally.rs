use std::collections::BTreeMap;

use super::vote::{FIELD_ARTIST, FIELD_USER_NAME, FIELD_VIDEO_ID, ValidationError, required};

/// Which votes a tally counts: every vote on an (artist, video) pair, or only
/// the ones a single user cast on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TallyScope {
    pub artist: String,
    pub video_id: String,
    pub user_name: Option<String>,
}

impl TallyScope {
    pub fn video(artist: Option<String>, video_id: Option<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            artist: required(FIELD_ARTIST, artist)?,
            video_id: required(FIELD_VIDEO_ID, video_id)?,
            user_name: None,
        })
    }

    pub fn user(
        artist: Option<String>,
        video_id: Option<String>,
        user_name: Option<String>,
    ) -> Result<Self, ValidationError> {
        let mut scope = Self::video(artist, video_id)?;
        scope.user_name = Some(required(FIELD_USER_NAME, user_name)?);
        Ok(scope)
    }
}

/// A matching row whose tag column could not be read.
#[derive(thiserror::Error, Debug, Clone)]
#[error("undecodable tag row: {reason}")]
pub struct RowDecodeError {
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    pub counts: BTreeMap<String, u64>,
    /// Rows that matched the scope but were dropped because they failed to decode.
    pub skipped: u64,
}

impl Tally {
    /// Folds scanned rows into per-tag counts. Undecodable rows are skipped
    /// and counted instead of aborting the whole tally.
    pub fn fold<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = Result<String, RowDecodeError>>,
    {
        let mut tally = Tally::default();
        for row in rows {
            match row {
                Ok(tag) => *tally.counts.entry(tag).or_insert(0) += 1,
                Err(e) => {
                    tracing::warn!(error = %e, "tally_row_skipped");
                    tally.skipped += 1;
                }
            }
        }
        tally
    }

    pub fn count(&self, tag: &str) -> u64 {
        self.counts.get(tag).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }
}
