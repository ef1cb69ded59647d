//! Dashboard page rendering

use crate::{ApiError, AppState};
use spendbook_config::CurrencyConfig;
use spendbook_core::DashboardSummary;
use spendbook_utils::{escape_html, format_amount, format_number};

/// Dashboard page - headline totals for the signed-in user
pub async fn page_dashboard(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    let cards = match state.dashboard.dashboard_summary(state.session.actor()).await {
        Ok(summary) => render_summary_cards(&summary, &state.config.currency),
        Err(e) => {
            let error = ApiError::upstream("dashboard summary", &e);
            log::warn!(target: "spendbook::api", "{}", error);
            format!(
                r#"<div class='p-4 rounded-lg border border-red-200 bg-red-50 text-red-700'>{}</div>"#,
                escape_html(&error.user_message())
            )
        }
    };

    let inner_content = format!(
        r#"<div class='flex items-center justify-between mb-6'>
            <h2 class='text-2xl font-bold'>Dashboard</h2>
            <span class='text-sm text-gray-500'>{}</span>
        </div>
        {}"#,
        escape_html(state.session.actor().as_str()),
        cards
    );

    axum::response::Html(crate::page_response(&headers, "Dashboard", "/dashboard", &inner_content))
}

/// Four stat cards; cash in hand turns red when negative
pub fn render_summary_cards(summary: &DashboardSummary, currency: &CurrencyConfig) -> String {
    let money = |amount| {
        format!(
            "{} {}",
            escape_html(&currency.symbol),
            format_amount(amount, currency.decimal_places)
        )
    };
    let cash_class = if summary.cash_in_hand.is_sign_negative() { "text-red-700" } else { "text-indigo-700" };

    format!(
        r#"<div class='grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-4'>
            <div class='bg-green-50 p-4 rounded-lg border border-green-200'><p class='text-sm text-green-600'>Income</p><p class='text-2xl font-bold text-green-700'>{}</p></div>
            <div class='bg-red-50 p-4 rounded-lg border border-red-200'><p class='text-sm text-red-600'>Expense</p><p class='text-2xl font-bold text-red-700'>{}</p></div>
            <div class='bg-indigo-50 p-4 rounded-lg border border-indigo-200'><p class='text-sm text-indigo-600'>Cash in Hand</p><p class='text-2xl font-bold {}'>{}</p></div>
            <div class='bg-gray-50 p-4 rounded-lg border border-gray-200'><p class='text-sm text-gray-600'>Transactions</p><p class='text-2xl font-bold text-gray-700'>{}</p></div>
        </div>"#,
        money(summary.total_income),
        money(summary.total_expense),
        cash_class,
        money(summary.cash_in_hand),
        format_number(summary.no_of_transactions)
    )
}
