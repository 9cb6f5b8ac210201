//! Session context and interaction handlers.
//!
//! # Responsibility
//! - Hold all per-session view state (query text, page index) explicitly.
//! - Map each user action onto a state transition plus a fresh feed view.
//!
//! # Invariants
//! - The page index only moves within `[0, total_pages - 1]`.
//! - Changing the query preserves the page index; an out-of-range page
//!   renders as an empty slice.
//! - A repeat support attempt is a non-fatal notice, never an error.
//! - Session state dies with the session; nothing is persisted.

use crate::model::idea::IdeaId;
use crate::repo::idea_repo::{IdeaRepository, RepoError, RepoResult};
use crate::service::feed_service::{FeedPage, FeedService};
use log::{info, warn};
use uuid::Uuid;

/// One user interaction against the feed.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedAction {
    /// Replace the search query.
    SetQuery(String),
    /// Move one page forward, clamped to the last page.
    NextPage,
    /// Move one page back, clamped to the first page.
    PrevPage,
    /// Support one idea by id.
    Support(IdeaId),
}

/// Result of a support attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SupportOutcome {
    /// First support in this session; carries the new acceleration.
    Boosted { acceleration: f64 },
    /// The idea was already supported; nothing changed.
    AlreadySupported,
}

/// Non-fatal condition surfaced to the UI layer alongside a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionNotice {
    AlreadySupported(IdeaId),
}

/// Refreshed view returned by [`FeedSession::apply`].
#[derive(Debug, Clone, PartialEq)]
pub struct SessionUpdate {
    pub page: FeedPage,
    pub notice: Option<SessionNotice>,
}

/// Per-session feed context.
///
/// Owns the service, the current query and the current page index. Created
/// on session start and discarded on session end; the UI layer drives it
/// through [`FeedSession::apply`] or the individual handlers.
pub struct FeedSession<R: IdeaRepository> {
    service: FeedService<R>,
    session_id: Uuid,
    search_query: String,
    page: u32,
}

impl<R: IdeaRepository> FeedSession<R> {
    /// Creates a session over a seeded feed service.
    pub fn new(service: FeedService<R>) -> Self {
        let session_id = Uuid::new_v4();
        info!("event=session_start module=session status=ok session={session_id}");
        Self {
            service,
            session_id,
            search_query: String::new(),
            page: 0,
        }
    }

    /// Stable id for correlating this session's log events.
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Current search query text.
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Current zero-based page index.
    pub fn page_index(&self) -> u32 {
        self.page
    }

    /// Assembles the view for the current query and page.
    pub fn view(&self) -> RepoResult<FeedPage> {
        let page = self.service.page(&self.search_query, self.page)?;
        info!(
            "event=feed_view module=session status=ok session={} query_len={} page={} total_pages={} total_matches={}",
            self.session_id,
            self.search_query.len(),
            page.page,
            page.total_pages,
            page.total_matches
        );
        Ok(page)
    }

    /// Replaces the search query and returns the refreshed view.
    ///
    /// The page index is preserved; callers that want to jump back to the
    /// start of the new result set navigate explicitly.
    pub fn set_query(&mut self, text: impl Into<String>) -> RepoResult<FeedPage> {
        self.search_query = text.into();
        self.view()
    }

    /// Moves one page forward when another page exists.
    pub fn next_page(&mut self) -> RepoResult<FeedPage> {
        let current = self.view()?;
        if self.page + 1 < current.total_pages {
            self.page += 1;
            return self.view();
        }
        Ok(current)
    }

    /// Moves one page back when not already on the first page.
    pub fn prev_page(&mut self) -> RepoResult<FeedPage> {
        if self.page > 0 {
            self.page -= 1;
        }
        self.view()
    }

    /// Supports one idea, at most once per session.
    ///
    /// A repeat attempt maps to [`SupportOutcome::AlreadySupported`] instead
    /// of an error; unknown ids still fail with `NotFound`.
    pub fn support(&mut self, id: IdeaId) -> RepoResult<SupportOutcome> {
        match self.service.support(id) {
            Ok(acceleration) => {
                info!(
                    "event=idea_supported module=session status=ok session={} idea={id}",
                    self.session_id
                );
                Ok(SupportOutcome::Boosted { acceleration })
            }
            Err(RepoError::AlreadySupported(id)) => {
                warn!(
                    "event=idea_supported module=session status=warn reason=already_supported session={} idea={id}",
                    self.session_id
                );
                Ok(SupportOutcome::AlreadySupported)
            }
            Err(err) => Err(err),
        }
    }

    /// Single dispatch entry point for UI layers.
    ///
    /// Applies the action, then returns the refreshed view plus an optional
    /// non-fatal notice.
    pub fn apply(&mut self, action: FeedAction) -> RepoResult<SessionUpdate> {
        match action {
            FeedAction::SetQuery(text) => Ok(SessionUpdate {
                page: self.set_query(text)?,
                notice: None,
            }),
            FeedAction::NextPage => Ok(SessionUpdate {
                page: self.next_page()?,
                notice: None,
            }),
            FeedAction::PrevPage => Ok(SessionUpdate {
                page: self.prev_page()?,
                notice: None,
            }),
            FeedAction::Support(id) => {
                let notice = match self.support(id)? {
                    SupportOutcome::Boosted { .. } => None,
                    SupportOutcome::AlreadySupported => {
                        Some(SessionNotice::AlreadySupported(id))
                    }
                };
                Ok(SessionUpdate {
                    page: self.view()?,
                    notice,
                })
            }
        }
    }
}
