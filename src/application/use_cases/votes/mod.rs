pub mod cast_vote;
pub mod get_tally;
pub mod get_user_tally;
