//! One paginated list: controller, fetcher and view bound together
//!
//! State lives behind an async mutex that is released before the network call,
//! so a user can keep interacting while a request is in flight. Overlapping
//! requests are resolved by the fetcher's tickets: only the newest result is
//! applied.

use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::fetcher::{ActorIdentity, ListBackend, ListFetcher, Notifier};
use crate::pagination::{PageInfo, PageQuery, PaginationController};
use crate::types::{SortDirection, SortField, TypeFilter};
use crate::view::{ListView, ViewStatus};

/// How a session operation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The query did not change, nothing was requested
    Unchanged,
    /// The response was applied to the view
    Applied,
    /// A newer request was issued meanwhile; the response was dropped
    Stale,
    /// The request failed; previous items stay visible
    Failed,
}

enum Resolution {
    Applied { clamped: bool },
    Stale,
    Failed,
}

struct SessionState<T> {
    controller: PaginationController,
    view: ListView<T>,
}

/// Point-in-time copy of everything the list renderer needs
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot<T> {
    pub query: PageQuery,
    pub page_info: PageInfo,
    pub status: ViewStatus,
    pub fetching: bool,
    pub items: Vec<T>,
}

pub struct ListSession<T> {
    state: Mutex<SessionState<T>>,
    fetcher: ListFetcher<T>,
    notifier: Arc<dyn Notifier>,
}

impl<T: Clone + Send + 'static> ListSession<T> {
    pub fn new(
        query: PageQuery,
        backend: Arc<dyn ListBackend<Item = T>>,
        actor: ActorIdentity,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            state: Mutex::new(SessionState {
                controller: PaginationController::new(query),
                view: ListView::new(),
            }),
            fetcher: ListFetcher::new(backend, actor),
            notifier,
        }
    }

    /// Fetch the current query again
    pub async fn refresh(&self) -> FetchOutcome {
        let mut resolution = self.fetch_once().await;
        // The page moved because records disappeared; load the clamped page.
        if let Resolution::Applied { clamped: true } = resolution {
            resolution = self.fetch_once().await;
        }

        match resolution {
            Resolution::Applied { .. } => FetchOutcome::Applied,
            Resolution::Stale => FetchOutcome::Stale,
            Resolution::Failed => FetchOutcome::Failed,
        }
    }

    pub async fn search(&self, key: &str) -> FetchOutcome {
        let key = key.trim().to_string();
        self.mutate(move |c| c.set_search_key(key)).await
    }

    pub async fn sort(&self, field: SortField, direction: SortDirection) -> FetchOutcome {
        self.mutate(|c| {
            let field_changed = c.set_sort_field(field);
            let direction_changed = c.set_sort_direction(direction);
            field_changed || direction_changed
        })
        .await
    }

    pub async fn filter_type(&self, filter: TypeFilter) -> FetchOutcome {
        self.mutate(|c| c.set_type_filter(filter)).await
    }

    pub async fn next_page(&self) -> FetchOutcome {
        self.mutate(|c| c.on_next_click()).await
    }

    pub async fn prev_page(&self) -> FetchOutcome {
        self.mutate(|c| c.on_prev_click()).await
    }

    pub async fn snapshot(&self) -> SessionSnapshot<T> {
        let state = self.state.lock().await;
        SessionSnapshot {
            query: state.controller.query().clone(),
            page_info: state.controller.page_info(),
            status: state.view.status(),
            fetching: state.view.is_fetching(),
            items: state.view.items().to_vec(),
        }
    }

    pub fn actor(&self) -> &ActorIdentity {
        self.fetcher.actor()
    }

    /// Sequence number of the most recently issued request
    pub fn latest_request_seq(&self) -> u64 {
        self.fetcher.latest_seq()
    }

    async fn mutate(&self, change: impl FnOnce(&mut PaginationController) -> bool) -> FetchOutcome {
        let changed = {
            let mut state = self.state.lock().await;
            change(&mut state.controller)
        };
        if changed {
            self.refresh().await
        } else {
            FetchOutcome::Unchanged
        }
    }

    async fn fetch_once(&self) -> Resolution {
        let (ticket, request) = {
            let mut state = self.state.lock().await;
            state.view.begin_fetch();
            self.fetcher.issue(state.controller.query())
        };

        let result = self.fetcher.execute(ticket, &request).await;

        let mut state = self.state.lock().await;
        if self.fetcher.discard_if_stale(ticket) {
            return Resolution::Stale;
        }

        match result {
            Ok(page) => {
                state.controller.set_no_of_records(page.total_records);
                let clamped = state.controller.set_no_of_pages(page.total_pages);
                if !clamped {
                    state.view.show_page(page.items);
                }
                log::debug!(
                    "applied list request #{}: {} of {} records",
                    ticket.seq(),
                    state.view.items().len(),
                    page.total_records
                );
                Resolution::Applied { clamped }
            }
            Err(error) => {
                state.view.show_failure();
                self.notifier.notify(&error.user_message());
                Resolution::Failed
            }
        }
    }
}
