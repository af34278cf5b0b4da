pub mod search_videos;
