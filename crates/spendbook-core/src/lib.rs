//! Pagination, fetch coordination and export logic for the SpendBook front end

pub mod dashboard;
pub mod error;
pub mod export;
pub mod fetcher;
pub mod models;
pub mod pagination;
pub mod session;
pub mod types;
pub mod view;

use spendbook_config::Config;
use std::sync::Arc;

pub use dashboard::{DashboardSummary, DashboardSummarySource};
pub use error::{ErrorCode, ErrorSeverity, ExportError, FetchError, FetchResult};
pub use export::{CategoryExport, CategoryExportRow, CategoryTotalsSource};
pub use fetcher::{ActorIdentity, ListBackend, Notifier, PageRequest};
pub use models::{CategoryAmount, PageResult, Transaction};
pub use pagination::{PageInfo, PageQuery, PaginationController};
pub use session::{FetchOutcome, ListSession, SessionSnapshot};
pub use types::{SortDirection, SortField, TransactionType, TypeFilter};
pub use view::{ListView, ViewStatus};

/// Backend serving transaction pages
pub type TransactionBackendRef = Arc<dyn ListBackend<Item = Transaction>>;

// ==================== Session Construction ====================

/// Build the transaction list session for the configured actor
pub fn transaction_session(
    config: &Config,
    backend: TransactionBackendRef,
    notifier: Arc<dyn Notifier>,
) -> ListSession<Transaction> {
    let query = PageQuery::from_config(&config.pagination);
    let actor = ActorIdentity::new(config.session.actor_email.trim());
    log::info!(
        "transaction session for {} ({} per page, sorted by {} {})",
        actor,
        query.page_size,
        query.sort_field,
        query.sort_direction
    );
    ListSession::new(query, backend, actor, notifier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct NoTransactions;

    #[async_trait]
    impl ListBackend for NoTransactions {
        type Item = Transaction;

        async fn fetch_page(&self, request: &PageRequest) -> FetchResult<PageResult<Transaction>> {
            Ok(PageResult::new(vec![], 0, request.query.page_size))
        }
    }

    struct Silent;

    impl Notifier for Silent {
        fn notify(&self, _message: &str) {}
    }

    #[tokio::test]
    async fn test_transaction_session_uses_config() {
        let mut config = Config::default();
        config.session.actor_email = " jane@example.com ".to_string();
        config.pagination.records_per_page = 20;
        config.pagination.default_sort_field = "amount".to_string();

        let session = transaction_session(&config, Arc::new(NoTransactions), Arc::new(Silent));
        assert_eq!(session.actor().as_str(), "jane@example.com");

        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.query.page_size, 20);
        assert_eq!(snapshot.query.sort_field, SortField::Amount);
        assert_eq!(snapshot.status, ViewStatus::Loading);

        assert_eq!(session.refresh().await, FetchOutcome::Applied);
        assert_eq!(session.snapshot().await.status, ViewStatus::Empty);
    }
}
