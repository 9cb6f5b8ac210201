//! Feed use-case service.
//!
//! # Responsibility
//! - Seed the startup collection into the store.
//! - Assemble filtered, ordered, paged feed views.
//! - Apply the fixed support boost through the repository guard.
//!
//! # Invariants
//! - Page size is fixed at `IDEAS_PER_PAGE`.
//! - A feed always reports at least one page, even with zero matches.
//! - Service APIs never bypass repository validation/persistence contracts.

use crate::model::generator::IdeaGenerator;
use crate::model::idea::{Idea, IdeaId};
use crate::repo::idea_repo::{FeedQuery, IdeaRepository, RepoResult};
use log::info;
use serde::Serialize;

/// Fixed number of ideas per feed page.
pub const IDEAS_PER_PAGE: u32 = 10;

/// Acceleration added the first time an idea is supported.
pub const SUPPORT_BOOST: f64 = 0.05;

/// One renderable slice of the filtered, ordered feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedPage {
    /// Ideas in `support DESC, id ASC` order; at most `IDEAS_PER_PAGE`.
    pub ideas: Vec<Idea>,
    /// Zero-based page index this slice was taken from.
    pub page: u32,
    /// Total pages for the current filter; never below 1.
    pub total_pages: u32,
    /// Total ideas matching the current filter.
    ///
    /// Callers should use this to distinguish an empty feed from an
    /// out-of-range page, since `total_pages` stays at 1 for zero matches.
    pub total_matches: u64,
}

/// Returns the page count for a match total: `ceil(total/page_size)`,
/// minimum one page even when nothing matched.
pub fn page_count(total_matches: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 1;
    }
    let pages = total_matches.div_ceil(u64::from(page_size)).max(1);
    pages.min(u64::from(u32::MAX)) as u32
}

/// Feed service facade over repository implementations.
pub struct FeedService<R: IdeaRepository> {
    repo: R,
}

impl<R: IdeaRepository> FeedService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Populates the store with `count` generated ideas.
    ///
    /// # Contract
    /// - Called once per session on an empty store; duplicate ids from a
    ///   repeat call surface as `DuplicateId`.
    /// - Returns the number of inserted ideas.
    pub fn seed(&self, generator: &mut IdeaGenerator, count: usize) -> RepoResult<usize> {
        let ideas = generator.generate(count);
        let inserted = self.repo.insert_ideas(&ideas)?;
        info!("event=feed_seeded module=service status=ok count={inserted}");
        Ok(inserted)
    }

    /// Assembles the feed page for a query and zero-based page index.
    ///
    /// # Contract
    /// - Blank query matches everything.
    /// - Slice is `[page * IDEAS_PER_PAGE, page * IDEAS_PER_PAGE + IDEAS_PER_PAGE)`.
    /// - An out-of-range page yields an empty slice, not an error.
    pub fn page(&self, search_text: &str, page: u32) -> RepoResult<FeedPage> {
        let total_matches = self.repo.count_matching(search_text)?;
        let total_pages = page_count(total_matches, IDEAS_PER_PAGE);

        let query = FeedQuery {
            text: search_text.to_string(),
            limit: Some(IDEAS_PER_PAGE),
            offset: page.saturating_mul(IDEAS_PER_PAGE),
        };
        let ideas = self.repo.list_matching(&query)?;

        Ok(FeedPage {
            ideas,
            page,
            total_pages,
            total_matches,
        })
    }

    /// Applies the fixed support boost to one idea.
    ///
    /// Returns the new acceleration; repository semantics (`NotFound`,
    /// `AlreadySupported`) pass through unchanged.
    pub fn support(&self, id: IdeaId) -> RepoResult<f64> {
        self.repo.support_idea(id, SUPPORT_BOOST)
    }

    /// Gets one idea by id.
    pub fn get_idea(&self, id: IdeaId) -> RepoResult<Option<Idea>> {
        self.repo.get_idea(id)
    }
}
