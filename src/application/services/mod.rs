pub mod tally_stats;
