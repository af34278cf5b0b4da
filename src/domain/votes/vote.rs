/// Wire names of the four vote fields, as clients send them.
pub const FIELD_ARTIST: &str = "artist";
pub const FIELD_VIDEO_ID: &str = "videoId";
pub const FIELD_USER_NAME: &str = "userName";
pub const FIELD_TAG_ID: &str = "tagId";

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} property missing from request")]
    MissingField(&'static str),
}

/// A ballot that passed validation but has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVote {
    pub artist: String,
    pub video_id: String,
    pub user_name: String,
    pub tag_id: String,
}

impl NewVote {
    /// Fields are checked in wire order; the first missing one is reported.
    pub fn new(
        artist: Option<String>,
        video_id: Option<String>,
        user_name: Option<String>,
        tag_id: Option<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            artist: required(FIELD_ARTIST, artist)?,
            video_id: required(FIELD_VIDEO_ID, video_id)?,
            user_name: required(FIELD_USER_NAME, user_name)?,
            tag_id: required(FIELD_TAG_ID, tag_id)?,
        })
    }
}

/// A stored vote, with the identifiers the store assigned on insert.
#[derive(Debug, Clone)]
pub struct VoteRecord {
    pub vote_id: i64,
    pub time_cast: chrono::DateTime<chrono::Utc>,
    pub artist: String,
    pub video_id: String,
    pub user_name: String,
    pub tag_id: String,
}

pub(crate) fn required(
    field: &'static str,
    value: Option<String>,
) -> Result<String, ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ValidationError::MissingField(field)),
    }
}
