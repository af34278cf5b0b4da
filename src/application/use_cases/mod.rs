pub mod search;
pub mod votes;
