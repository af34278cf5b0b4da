pub mod tally;
pub mod vote;
