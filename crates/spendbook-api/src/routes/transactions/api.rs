//! Transactions API endpoints - JSON API and HTMX partial responses
//!
//! Endpoints:
//! - api_transactions: Current list snapshot (JSON)
//! - htmx_transactions_list: Refetch the current page (HTML fragment)
//! - htmx_transactions_search: Replace the search key
//! - htmx_transactions_sort: Change sort column and direction
//! - htmx_transactions_filter: Restrict to one transaction type
//! - htmx_transactions_next / htmx_transactions_prev: Page navigation
//!
//! Every fragment endpoint mutates the session first and then renders the list
//! together with any pending toasts.

use crate::{ApiError, AppState};
use axum::extract::Query;
use axum::Json;
use spendbook_core::{FetchOutcome, SessionSnapshot, SortDirection, SortField, Transaction, TypeFilter};
use std::collections::HashMap;

use super::page::render_transactions_list;

/// Render the list fragment for the current session state
async fn list_fragment(state: &AppState) -> String {
    let snapshot = state.session.snapshot().await;
    let mut html = render_transactions_list(&snapshot, &state.config.currency);
    html.push_str(&state.toasts.render());
    html
}

fn log_outcome(operation: &str, outcome: FetchOutcome) {
    log::debug!(target: "spendbook::api", "{} -> {:?}", operation, outcome);
}

/// Current list snapshot (JSON API); `?refresh=true` refetches first
pub async fn api_transactions(
    state: axum::extract::State<AppState>,
    params: Query<HashMap<String, String>>,
) -> Json<SessionSnapshot<Transaction>> {
    if params.get("refresh").map(|v| v == "true").unwrap_or(false) {
        log_outcome("refresh", state.session.refresh().await);
    }
    Json(state.session.snapshot().await)
}

/// HTMX: Refetch the current page
pub async fn htmx_transactions_list(state: axum::extract::State<AppState>) -> String {
    log_outcome("refresh", state.session.refresh().await);
    list_fragment(&state).await
}

/// HTMX: Search by keyword (`?q=`)
pub async fn htmx_transactions_search(
    state: axum::extract::State<AppState>,
    params: Query<HashMap<String, String>>,
) -> String {
    let key = params.get("q").map(|s| s.as_str()).unwrap_or("");
    log_outcome("search", state.session.search(key).await);
    list_fragment(&state).await
}

/// HTMX: Sort by column (`?field=&direction=`)
///
/// Without a direction the active column flips and a new column starts descending.
pub async fn htmx_transactions_sort(
    state: axum::extract::State<AppState>,
    params: Query<HashMap<String, String>>,
) -> Result<String, ApiError> {
    let field: SortField = params
        .get("field")
        .ok_or_else(|| ApiError::bad_request("Missing sort field"))?
        .parse()
        .map_err(ApiError::bad_request)?;

    let direction = match params.get("direction").filter(|d| !d.is_empty()) {
        Some(d) => d.parse::<SortDirection>().map_err(ApiError::bad_request)?,
        None => {
            let current = state.session.snapshot().await.query;
            if current.sort_field == field {
                current.sort_direction.toggled()
            } else {
                SortDirection::default()
            }
        }
    };

    log_outcome("sort", state.session.sort(field, direction).await);
    Ok(list_fragment(&state).await)
}

/// HTMX: Filter by transaction type (`?type=expense|income`, empty for all)
pub async fn htmx_transactions_filter(
    state: axum::extract::State<AppState>,
    params: Query<HashMap<String, String>>,
) -> Result<String, ApiError> {
    let filter: TypeFilter = params
        .get("type")
        .map(|s| s.as_str())
        .unwrap_or("")
        .parse()
        .map_err(ApiError::bad_request)?;

    log_outcome("filter", state.session.filter_type(filter).await);
    Ok(list_fragment(&state).await)
}

/// HTMX: Next page
pub async fn htmx_transactions_next(state: axum::extract::State<AppState>) -> String {
    log_outcome("next", state.session.next_page().await);
    list_fragment(&state).await
}

/// HTMX: Previous page
pub async fn htmx_transactions_prev(state: axum::extract::State<AppState>) -> String {
    log_outcome("prev", state.session.prev_page().await);
    list_fragment(&state).await
}
