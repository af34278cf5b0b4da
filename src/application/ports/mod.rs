pub mod video_search_port;
pub mod vote_repository;
