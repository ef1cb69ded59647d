//! Transaction routes - list, search, sort, type filter, pagination
//!
//! Structure:
//! - api.rs: JSON API and HTMX endpoints
//! - page.rs: Full page rendering

pub mod api;
pub mod page;

pub use api::{
    api_transactions,
    htmx_transactions_filter,
    htmx_transactions_list,
    htmx_transactions_next,
    htmx_transactions_prev,
    htmx_transactions_search,
    htmx_transactions_sort,
};

pub use page::{page_transactions, render_transactions_list};
