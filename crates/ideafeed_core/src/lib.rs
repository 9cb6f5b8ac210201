//! Core domain logic for IdeaFeed.
//! This crate is the single source of truth for feed invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod session;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::generator::{IdeaGenerator, DEFAULT_IDEA_COUNT};
pub use model::idea::{Idea, IdeaId, IdeaValidationError};
pub use repo::idea_repo::{
    FeedQuery, IdeaRepository, RepoError, RepoResult, SqliteIdeaRepository,
};
pub use service::feed_service::{
    page_count, FeedPage, FeedService, IDEAS_PER_PAGE, SUPPORT_BOOST,
};
pub use session::{FeedAction, FeedSession, SessionNotice, SessionUpdate, SupportOutcome};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
