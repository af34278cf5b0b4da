pub mod youtube_reqwest;
