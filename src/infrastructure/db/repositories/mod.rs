pub mod vote_repository_sqlx;
