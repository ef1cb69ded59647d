//! Turns a [`PageQuery`] into one backend request
//!
//! Every request is stamped with a ticket from a monotonically increasing
//! counter. When a response arrives its ticket is compared with the latest one
//! issued; anything older is stale and must not touch visible state.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::error::{DefaultErrorLogger, ErrorContext, ErrorLogger, FetchResult};
use crate::models::PageResult;
use crate::pagination::PageQuery;

/// Identity of the signed-in user, supplied by the auth collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorIdentity(String);

impl ActorIdentity {
    pub fn new(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ActorIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything a backend needs to serve one page
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    pub actor: ActorIdentity,
    pub query: PageQuery,
}

/// Source of paginated items
#[async_trait]
pub trait ListBackend: Send + Sync {
    type Item: Send;

    async fn fetch_page(&self, request: &PageRequest) -> FetchResult<PageResult<Self::Item>>;
}

/// Surface for short, transient user notifications
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Sequence stamp of an issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.0
    }
}

/// Issues list requests and decides which responses are still relevant
pub struct ListFetcher<T> {
    backend: Arc<dyn ListBackend<Item = T>>,
    actor: ActorIdentity,
    latest: AtomicU64,
    logger: Arc<dyn ErrorLogger>,
}

impl<T: Send> ListFetcher<T> {
    pub fn new(backend: Arc<dyn ListBackend<Item = T>>, actor: ActorIdentity) -> Self {
        Self {
            backend,
            actor,
            latest: AtomicU64::new(0),
            logger: Arc::new(DefaultErrorLogger),
        }
    }

    pub fn actor(&self) -> &ActorIdentity {
        &self.actor
    }

    /// Stamp a new request for `query`; it supersedes every earlier ticket
    pub fn issue(&self, query: &PageQuery) -> (FetchTicket, PageRequest) {
        let seq = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let request = PageRequest {
            actor: self.actor.clone(),
            query: query.clone(),
        };
        log::debug!(
            "issuing list request #{} page={} search='{}' sort={} {}",
            seq,
            query.page_number,
            query.search_key,
            query.sort_field,
            query.sort_direction
        );
        (FetchTicket(seq), request)
    }

    /// Perform the request. Errors are logged here and returned, never raised further.
    pub async fn execute(&self, ticket: FetchTicket, request: &PageRequest) -> FetchResult<PageResult<T>> {
        let result = self.backend.fetch_page(request).await;
        if let Err(ref error) = result {
            let context = ErrorContext::new("fetch_page")
                .with_request_seq(ticket.seq())
                .with_actor(self.actor.as_str());
            self.logger.log_error(error, &context);
        }
        result
    }

    /// Whether `ticket` is still the most recent request
    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Log and report a response whose ticket has been superseded
    pub fn discard_if_stale(&self, ticket: FetchTicket) -> bool {
        if self.is_current(ticket) {
            return false;
        }
        let context = ErrorContext::new("fetch_page")
            .with_request_seq(ticket.seq())
            .with_actor(self.actor.as_str());
        let message = format!("dropping stale list response (latest is #{})", self.latest_seq());
        self.logger.log_debug(&message, &context);
        true
    }

    pub fn latest_seq(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }
}
