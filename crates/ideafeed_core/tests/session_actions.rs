use ideafeed_core::db::open_db_in_memory;
use ideafeed_core::{
    FeedAction, FeedService, FeedSession, IdeaGenerator, RepoError, SessionNotice,
    SqliteIdeaRepository, SupportOutcome,
};
use rusqlite::Connection;

const NOW_MS: i64 = 1_700_000_000_000;

fn seeded_session(conn: &Connection, count: usize) -> FeedSession<SqliteIdeaRepository<'_>> {
    let repo = SqliteIdeaRepository::try_new(conn).unwrap();
    let service = FeedService::new(repo);
    let mut generator = IdeaGenerator::new(42, NOW_MS);
    service.seed(&mut generator, count).unwrap();
    FeedSession::new(service)
}

#[test]
fn fresh_session_starts_on_first_page_with_blank_query() {
    let conn = open_db_in_memory().unwrap();
    let session = seeded_session(&conn, 30);

    assert_eq!(session.page_index(), 0);
    assert_eq!(session.search_query(), "");

    let view = session.view().unwrap();
    assert_eq!(view.total_matches, 30);
    assert_eq!(view.total_pages, 3);
    assert_eq!(view.ideas.len(), 10);
}

#[test]
fn set_query_filters_the_view() {
    let conn = open_db_in_memory().unwrap();
    let mut session = seeded_session(&conn, 200);

    let filtered = session.set_query("climate").unwrap();
    assert!(filtered.total_matches > 0);
    assert!(filtered.total_matches < 200);
    for idea in &filtered.ideas {
        assert_eq!(idea.tag, "Climate Tech");
    }
}

#[test]
fn next_page_advances_and_clamps_at_the_last_page() {
    let conn = open_db_in_memory().unwrap();
    let mut session = seeded_session(&conn, 25);

    let second = session.next_page().unwrap();
    assert_eq!(session.page_index(), 1);
    assert_eq!(second.ideas.len(), 10);

    let third = session.next_page().unwrap();
    assert_eq!(session.page_index(), 2);
    assert_eq!(third.ideas.len(), 5);

    // Already on the last page; the index must not move.
    session.next_page().unwrap();
    assert_eq!(session.page_index(), 2);
}

#[test]
fn prev_page_clamps_at_the_first_page() {
    let conn = open_db_in_memory().unwrap();
    let mut session = seeded_session(&conn, 25);

    session.prev_page().unwrap();
    assert_eq!(session.page_index(), 0);

    session.next_page().unwrap();
    session.prev_page().unwrap();
    assert_eq!(session.page_index(), 0);
}

#[test]
fn changing_the_query_preserves_the_page_index() {
    let conn = open_db_in_memory().unwrap();
    let mut session = seeded_session(&conn, 50);

    session.next_page().unwrap();
    session.next_page().unwrap();
    assert_eq!(session.page_index(), 2);

    // The new result set is smaller than three pages, so the preserved
    // index renders an empty slice instead of failing.
    let view = session.set_query("zz-no-such-idea").unwrap();
    assert_eq!(session.page_index(), 2);
    assert!(view.ideas.is_empty());
    assert_eq!(view.total_matches, 0);
    assert_eq!(view.total_pages, 1);
}

#[test]
fn support_maps_repeat_attempts_to_a_non_fatal_outcome() {
    let conn = open_db_in_memory().unwrap();
    let mut session = seeded_session(&conn, 30);

    let first = session.support(7).unwrap();
    assert!(matches!(first, SupportOutcome::Boosted { acceleration } if acceleration > 0.0));

    let second = session.support(7).unwrap();
    assert_eq!(second, SupportOutcome::AlreadySupported);
}

#[test]
fn support_still_fails_for_unknown_ids() {
    let conn = open_db_in_memory().unwrap();
    let mut session = seeded_session(&conn, 30);

    let err = session.support(9999).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(9999)));
}

#[test]
fn apply_dispatches_actions_and_carries_notices() {
    let conn = open_db_in_memory().unwrap();
    let mut session = seeded_session(&conn, 30);

    let update = session.apply(FeedAction::NextPage).unwrap();
    assert_eq!(update.page.page, 1);
    assert!(update.notice.is_none());

    // Every generated description contains "platform", so the filtered
    // view keeps the whole collection.
    let update = session.apply(FeedAction::SetQuery("platform".to_string())).unwrap();
    assert!(update.notice.is_none());
    assert_eq!(update.page.total_matches, 30);

    let update = session.apply(FeedAction::Support(3)).unwrap();
    assert!(update.notice.is_none());

    let update = session.apply(FeedAction::Support(3)).unwrap();
    assert_eq!(update.notice, Some(SessionNotice::AlreadySupported(3)));

    let update = session.apply(FeedAction::PrevPage).unwrap();
    assert_eq!(update.page.page, 0);
}

#[test]
fn sessions_over_the_same_store_get_distinct_ids() {
    let conn = open_db_in_memory().unwrap();
    let repo_a = SqliteIdeaRepository::try_new(&conn).unwrap();
    let repo_b = SqliteIdeaRepository::try_new(&conn).unwrap();

    let session_a = FeedSession::new(FeedService::new(repo_a));
    let session_b = FeedSession::new(FeedService::new(repo_b));

    assert_ne!(session_a.session_id(), session_b.session_id());
}
