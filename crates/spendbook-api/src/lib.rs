//! HTTP front end with HTMX support
//!
//! Routes are organized into modules:
//! - routes::dashboard: Headline totals
//! - routes::transactions: Transaction list, search, sort, pagination
//! - routes::reports: Monthly expense summary and CSV export

pub mod error;
pub mod notifications;
pub mod routes;

use axum::{http::Method, routing::get, Router};
use spendbook_config::Config;
use spendbook_core::{
    CategoryTotalsSource, DashboardSummarySource, ListSession, Transaction, TransactionBackendRef,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

pub use error::ApiError;
pub use notifications::ToastQueue;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<ListSession<Transaction>>,
    pub reports: Arc<dyn CategoryTotalsSource>,
    pub dashboard: Arc<dyn DashboardSummarySource>,
    pub toasts: Arc<ToastQueue>,
    pub config: Config,
}

impl AppState {
    /// Wire the transaction session to a toast queue for the configured actor
    pub fn new(
        config: Config,
        transactions: TransactionBackendRef,
        reports: Arc<dyn CategoryTotalsSource>,
        dashboard: Arc<dyn DashboardSummarySource>,
    ) -> Self {
        let toasts = Arc::new(ToastQueue::new());
        let session = spendbook_core::transaction_session(&config, transactions, toasts.clone());
        Self {
            session: Arc::new(session),
            reports,
            dashboard,
            toasts,
            config,
        }
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::dashboard::page_dashboard;
    use routes::reports::{htmx_reports_summary, page_reports, reports_export};
    use routes::transactions::{
        api_transactions, htmx_transactions_filter, htmx_transactions_list, htmx_transactions_next,
        htmx_transactions_prev, htmx_transactions_search, htmx_transactions_sort, page_transactions,
    };

    let cors = CorsLayer::new().allow_origin(Any).allow_methods([Method::GET]);

    Router::new()
        // API endpoints
        .route("/api/health", get(health_check))
        .route("/api/transactions", get(api_transactions))
        // HTMX page routes
        .route("/", get(page_transactions))
        .route("/transactions", get(page_transactions))
        .route("/dashboard", get(page_dashboard))
        .route("/reports", get(page_reports))
        // HTMX partial routes
        .route("/transactions/list", get(htmx_transactions_list))
        .route("/transactions/search", get(htmx_transactions_search))
        .route("/transactions/sort", get(htmx_transactions_sort))
        .route("/transactions/filter", get(htmx_transactions_filter))
        .route("/transactions/next", get(htmx_transactions_next))
        .route("/transactions/prev", get(htmx_transactions_prev))
        .route("/reports/summary", get(htmx_reports_summary))
        // Downloads
        .route("/reports/export", get(reports_export))
        .layer(cors)
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - SpendBook</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
        .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
        .htmx-request .htmx-indicator {{ opacity: 1; }}
        .htmx-request.htmx-indicator {{ opacity: 1; }}
        button[disabled] {{ cursor: not-allowed; opacity: 0.5; }}
    </style>
</head>
<body class="bg-gray-50 text-gray-900">
    <div id='toasts' class='fixed top-4 right-4 z-50 space-y-2'></div>
    {}
    <script>
    // error fragments are meant to be shown
    document.body.addEventListener('htmx:beforeSwap', function(evt) {{
        if (evt.detail.xhr.status >= 400) {{
            evt.detail.shouldSwap = true;
            evt.detail.isError = false;
        }}
    }});
    document.body.addEventListener('htmx:oobAfterSwap', function(evt) {{
        if (evt.detail.target.id === 'toasts') {{
            evt.detail.target.querySelectorAll('.toast').forEach(function(toast) {{
                setTimeout(function() {{ toast.remove(); }}, 5000);
            }});
        }}
    }});
    </script>
</body>
</html>"#,
        title, content
    )
}

/// Navigation sidebar
pub fn nav_sidebar(current_path: &str) -> String {
    let links = [
        ("/dashboard", "Dashboard", "📊"),
        ("/transactions", "Transactions", "📋"),
        ("/reports", "Reports", "📈"),
    ];

    let mut nav = String::from("<div class='bg-white border-r h-screen flex flex-col'><div class='p-4 border-b'><h1 class='text-xl font-bold text-indigo-600'>SpendBook</h1></div><ul class='flex-1 py-2 space-y-1 px-2'>");

    for (path, label, icon) in &links {
        let is_active = current_path.starts_with(path) || (current_path == "/" && *path == "/transactions");
        let active_class = if is_active { "bg-indigo-50 text-indigo-600" } else { "text-gray-600 hover:bg-gray-50" };
        nav.push_str(&format!(
            r#"<li><a href='{}' class='flex items-center gap-2 px-3 py-2 rounded-lg {}'>{}<span>{}</span></a></li>"#,
            path, active_class, icon, label
        ));
    }
    nav.push_str("</ul></div>");
    nav
}

/// Check if request is from HTMX
pub(crate) fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}

/// Full page for normal navigation, just the content for HTMX requests
pub fn page_response(headers: &axum::http::HeaderMap, title: &str, current_path: &str, inner_content: &str) -> String {
    if is_htmx_request(headers) {
        format!(r#"<main class='flex-1 overflow-auto bg-gray-50 p-6'>{}</main>"#, inner_content)
    } else {
        base_html(title, &format!(r#"<div class='flex flex-col h-screen'>
    <div class='flex flex-1 overflow-hidden'>
        <aside class='w-64 flex-shrink-0'>{}</aside>
        <main class='flex-1 overflow-auto bg-gray-50 p-6'>{}</main>
    </div>
</div>"#,
            nav_sidebar(current_path), inner_content))
    }
}

/// Bind the configured address and serve until the server stops
pub async fn start_server(state: AppState) -> std::io::Result<()> {
    let addr = state.config.bind_address();
    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting SpendBook on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - /dashboard (Income, expense and cash in hand)");
    log::info!("  - /transactions (Transaction list)");
    log::info!("  - /reports (Expense summary and export)");
    log::info!("  - /api/* (JSON API endpoints)");

    axum::serve(listener, router).await?;
    log::info!("Server stopped gracefully");
    Ok(())
}
