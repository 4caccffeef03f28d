//! Search session state and the controller that drives it.
//!
//! [`SearchSession`] is a plain value changed only through three transitions:
//! [`SearchSession::begin_submit`], [`SearchSession::begin_load_more`] and
//! [`SearchSession::complete`]. Each started fetch hands back a
//! [`PendingFetch`] stamped with the session generation; completing a ticket
//! from an older generation is a no-op, so a slow response can never
//! overwrite a newer search.

use crate::api_client::UserFetcher;
use crate::errors::{FetchError, SessionError};
use crate::models::{SearchResponse, UserSummary};
use crate::search_query::{RequestDescriptor, SearchFilters, SearchRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Loading,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    Submit,
    LoadMore,
}

/// Ticket for one outstanding fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFetch {
    generation: u64,
    kind: FetchKind,
    request: SearchRequest,
}

impl PendingFetch {
    pub fn kind(&self) -> FetchKind {
        self.kind
    }

    pub fn page(&self) -> u32 {
        self.request.page
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn descriptor(&self, base_url: &str) -> RequestDescriptor {
        self.request.to_descriptor(base_url)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    filters: SearchFilters,
    results: Vec<UserSummary>,
    current_page: u32,
    total_available: u32,
    is_loading: bool,
    last_error: Option<SessionError>,
    generation: u64,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filters(&self) -> &SearchFilters {
        &self.filters
    }

    pub fn results(&self) -> &[UserSummary] {
        &self.results
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_available(&self) -> u32 {
        self.total_available
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn last_error(&self) -> Option<SessionError> {
        self.last_error
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn has_more(&self) -> bool {
        self.total_available as usize > self.results.len()
    }

    /// Whether the load-more control should be offered.
    pub fn can_load_more(&self) -> bool {
        self.has_more() && !self.is_loading
    }

    pub fn state(&self) -> SessionState {
        if self.is_loading {
            SessionState::Loading
        } else if self.last_error.is_some() {
            SessionState::Error
        } else {
            SessionState::Idle
        }
    }

    /// Replace the session with a fresh search for `filters` and return the
    /// ticket for its first page. Always allowed, even while loading: the
    /// outstanding ticket becomes stale.
    pub fn begin_submit(&mut self, filters: SearchFilters) -> PendingFetch {
        let generation = self.generation + 1;
        *self = Self {
            filters: filters.clone(),
            results: Vec::new(),
            current_page: 1,
            total_available: 0,
            is_loading: true,
            last_error: None,
            generation,
        };

        PendingFetch {
            generation,
            kind: FetchKind::Submit,
            request: SearchRequest::new(filters, 1),
        }
    }

    /// Start fetching the next page. Returns `None` while a fetch is
    /// outstanding or when nothing more is available.
    pub fn begin_load_more(&mut self) -> Option<PendingFetch> {
        if !self.can_load_more() {
            return None;
        }
        self.is_loading = true;

        Some(PendingFetch {
            generation: self.generation,
            kind: FetchKind::LoadMore,
            request: SearchRequest::new(self.filters.clone(), self.current_page + 1),
        })
    }

    /// Fold a fetch outcome into the session. Returns `false` when the ticket
    /// belongs to a superseded search and the outcome was dropped.
    pub fn complete(
        &mut self,
        pending: PendingFetch,
        outcome: Result<SearchResponse, FetchError>,
    ) -> bool {
        if pending.generation != self.generation {
            tracing::debug!(
                stale = pending.generation,
                current = self.generation,
                page = pending.page(),
                "discarding response from superseded search"
            );
            return false;
        }

        match (pending.kind, outcome) {
            (FetchKind::Submit, Ok(page)) => {
                self.results = page.items;
                self.total_available = page.total_count;
            }
            (FetchKind::Submit, Err(err)) => {
                tracing::warn!(error = %err, "user search failed");
                self.last_error = Some(SessionError::SearchFailed);
            }
            (FetchKind::LoadMore, Ok(page)) => {
                self.results.extend(page.items);
                self.total_available = page.total_count;
                self.current_page = pending.request.page;
                self.last_error = None;
            }
            (FetchKind::LoadMore, Err(err)) => {
                tracing::warn!(error = %err, page = pending.request.page, "loading more users failed");
                self.last_error = Some(SessionError::LoadMoreFailed);
            }
        }
        self.is_loading = false;
        true
    }
}

type Observer = Box<dyn FnMut(&SearchSession) + Send>;

/// Owns a [`SearchSession`] and runs its fetches through a [`UserFetcher`].
pub struct SearchController<F> {
    fetcher: F,
    base_url: String,
    session: SearchSession,
    observer: Option<Observer>,
}

impl<F: UserFetcher> SearchController<F> {
    pub fn new(fetcher: F, base_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
            session: SearchSession::new(),
            observer: None,
        }
    }

    /// Called with the session after every state transition.
    pub fn with_observer(mut self, observer: impl FnMut(&SearchSession) + Send + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub async fn submit_search(&mut self, filters: SearchFilters) {
        let pending = self.session.begin_submit(filters);
        self.run(pending).await;
    }

    /// Returns `false` without touching the network when load-more is not
    /// currently allowed.
    pub async fn load_more(&mut self) -> bool {
        match self.session.begin_load_more() {
            Some(pending) => {
                self.run(pending).await;
                true
            }
            None => false,
        }
    }

    async fn run(&mut self, pending: PendingFetch) {
        self.notify();
        let descriptor = pending.descriptor(&self.base_url);
        let outcome = self.fetcher.fetch(&descriptor).await;
        if self.session.complete(pending, outcome) {
            self.notify();
        }
    }

    fn notify(&mut self) {
        if let Some(observer) = self.observer.as_mut() {
            observer(&self.session);
        }
    }
}
