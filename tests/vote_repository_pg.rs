//! Runs the real SQL against Postgres. Needs `DATABASE_URL`; run with
//! `cargo test -- --ignored`.

use sqlx::PgPool;

use tagvote::application::ports::vote_repository::VoteRepository;
use tagvote::domain::votes::tally::{Tally, TallyScope};
use tagvote::domain::votes::vote::NewVote;
use tagvote::infrastructure::db::repositories::vote_repository_sqlx::SqlxVoteRepository;

fn vote(artist: &str, video_id: &str, user_name: &str, tag_id: &str) -> NewVote {
    NewVote {
        artist: artist.into(),
        video_id: video_id.into(),
        user_name: user_name.into(),
        tag_id: tag_id.into(),
    }
}

async fn tally(repo: &SqlxVoteRepository, scope: TallyScope) -> Tally {
    Tally::fold(repo.scan_tags(&scope).await.unwrap())
}

#[sqlx::test]
#[ignore = "needs a Postgres DATABASE_URL"]
async fn scans_filter_by_video_and_user(pool: PgPool) {
    let repo = SqlxVoteRepository::new(pool);
    for v in [
        vote("bandA", "vid1", "alice", "calm"),
        vote("bandA", "vid1", "alice", "calm"),
        vote("bandA", "vid1", "bob", "sad"),
        vote("bandA", "vid2", "alice", "calm"),
        vote("bandB", "vid1", "alice", "calm"),
    ] {
        repo.insert_vote(&v).await.unwrap();
    }

    let global = tally(
        &repo,
        TallyScope::video(Some("bandA".into()), Some("vid1".into())).unwrap(),
    )
    .await;
    assert_eq!(global.count("calm"), 2);
    assert_eq!(global.count("sad"), 1);
    assert_eq!(global.skipped, 0);

    let alice = tally(
        &repo,
        TallyScope::user(
            Some("bandA".into()),
            Some("vid1".into()),
            Some("alice".into()),
        )
        .unwrap(),
    )
    .await;
    assert_eq!(alice.count("calm"), 2);
    assert_eq!(alice.count("sad"), 0);

    let nobody = tally(
        &repo,
        TallyScope::user(
            Some("bandA".into()),
            Some("vid1".into()),
            Some("carol".into()),
        )
        .unwrap(),
    )
    .await;
    assert!(nobody.counts.is_empty());
}

#[sqlx::test]
#[ignore = "needs a Postgres DATABASE_URL"]
async fn insert_assigns_increasing_ids(pool: PgPool) {
    let repo = SqlxVoteRepository::new(pool);
    let first = repo
        .insert_vote(&vote("bandA", "vid1", "alice", "calm"))
        .await
        .unwrap();
    let second = repo
        .insert_vote(&vote("bandA", "vid1", "alice", "calm"))
        .await
        .unwrap();
    assert!(second.vote_id > first.vote_id);
    assert!(second.time_cast >= first.time_cast);
}

#[sqlx::test]
#[ignore = "needs a Postgres DATABASE_URL"]
async fn schema_rejects_empty_fields(pool: PgPool) {
    let repo = SqlxVoteRepository::new(pool.clone());
    assert!(repo.insert_vote(&vote("bandA", "", "alice", "calm")).await.is_err());

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM votes")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 0);
}
