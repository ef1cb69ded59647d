//! Transactions page rendering
//!
//! Endpoints:
//! - page_transactions: Main transactions page with search and type filter
//!
//! Helper functions:
//! - render_transactions_list: List fragment for a session snapshot

use crate::AppState;
use spendbook_config::CurrencyConfig;
use spendbook_core::{
    SessionSnapshot, SortDirection, SortField, Transaction, TransactionType, TypeFilter, ViewStatus,
};
use spendbook_utils::{escape_html, format_amount};

const LIST_TARGET: &str = "#transactions-content";

/// Transactions page - controls plus a list container that loads itself
pub async fn page_transactions(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    let snapshot = state.session.snapshot().await;
    let query = &snapshot.query;

    let filter_options = [
        (TypeFilter::All, "All types"),
        (TypeFilter::Only(TransactionType::Expense), "Expense"),
        (TypeFilter::Only(TransactionType::Income), "Income"),
    ]
    .iter()
    .map(|(filter, label)| {
        format!(
            "<option value='{}' {}>{}</option>",
            filter.as_param(),
            if *filter == query.type_filter { "selected" } else { "" },
            label
        )
    })
    .collect::<String>();

    let inner_content = format!(
        r#"<div class='flex items-center justify-between mb-4'>
            <h2 class='text-2xl font-bold'>Transactions</h2>
            <div class='flex gap-2'>
                <input type='search' name='q' placeholder='Search...' value='{}'
                    hx-get='/transactions/search' hx-target='{}' hx-trigger='keyup changed delay:500ms, search'
                    class='px-4 py-2 border rounded-lg w-56'>
                <select name='type' hx-get='/transactions/filter' hx-target='{}' hx-trigger='change'
                    class='px-4 py-2 border rounded-lg'>{}</select>
                <button hx-get='/transactions/list' hx-target='{}'
                    class='px-4 py-2 bg-gray-100 text-gray-700 rounded-lg hover:bg-gray-200'>Refresh</button>
            </div>
        </div>
        <div id='transactions-content' hx-get='/transactions/list' hx-trigger='load'>{}</div>"#,
        escape_html(&query.search_key),
        LIST_TARGET,
        LIST_TARGET,
        filter_options,
        LIST_TARGET,
        render_transactions_list(&snapshot, &state.config.currency)
    );

    axum::response::Html(crate::page_response(&headers, "Transactions", "/transactions", &inner_content))
}

/// Render the list area: loading, empty state or table plus pagination
pub fn render_transactions_list(snapshot: &SessionSnapshot<Transaction>, currency: &CurrencyConfig) -> String {
    match snapshot.status {
        ViewStatus::Loading => {
            return r#"<div class='text-center py-8 text-gray-500'>Loading...</div>"#.to_string();
        }
        ViewStatus::Empty => {
            return r#"<div class='text-center py-8 text-gray-500'>No transactions found!</div>"#.to_string();
        }
        ViewStatus::Ready => {}
    }

    let query = &snapshot.query;
    let mut html = String::from(
        "<div class='bg-white rounded-lg border overflow-hidden'><table class='w-full text-sm'><thead class='bg-gray-50 text-gray-600'><tr>",
    );
    for field in SortField::ALL {
        html.push_str(&sort_header(field, query.sort_field, query.sort_direction));
    }
    html.push_str("<th class='px-4 py-2 text-left'>Type</th></tr></thead><tbody>");

    for tx in &snapshot.items {
        let amount_class = if tx.is_expense() { "text-red-600" } else { "text-green-600" };
        html.push_str(&format!(
            r#"<tr class='border-t hover:bg-gray-50'>
                <td class='px-4 py-2 whitespace-nowrap'>{}</td>
                <td class='px-4 py-2 text-right font-mono {}'>{} {}</td>
                <td class='px-4 py-2'>{}</td>
                <td class='px-4 py-2'>{}</td>
                <td class='px-4 py-2 capitalize'>{}</td>
            </tr>"#,
            tx.date.format("%Y-%m-%d"),
            amount_class,
            escape_html(&currency.symbol),
            format_amount(tx.signed_amount(), currency.decimal_places),
            escape_html(&tx.description),
            escape_html(&tx.category_name),
            tx.transaction_type
        ));
    }
    html.push_str("</tbody></table></div>");

    let info = snapshot.page_info;
    html.push_str(&format!(
        r#"<div class='mt-4 flex items-center justify-between'>
            <span class='text-sm text-gray-500'>{}{}</span>
            <div class='flex items-center gap-2'>
                <button hx-get='/transactions/prev' hx-target='{}' {} class='px-3 py-1 border rounded hover:bg-gray-100'>Prev</button>
                <span class='text-sm text-gray-600'>Page {} of {}</span>
                <button hx-get='/transactions/next' hx-target='{}' {} class='px-3 py-1 border rounded hover:bg-gray-100'>Next</button>
            </div>
        </div>"#,
        info,
        if snapshot.fetching { " (updating...)" } else { "" },
        LIST_TARGET,
        if info.has_prev() { "" } else { "disabled" },
        info.current_page,
        info.total_pages.max(1),
        LIST_TARGET,
        if info.has_next() { "" } else { "disabled" },
    ));
    html
}

/// Column header that sorts by `field`, flipping the direction when already active
fn sort_header(field: SortField, active: SortField, direction: SortDirection) -> String {
    let (next_direction, arrow) = if field == active {
        let arrow = match direction {
            SortDirection::Ascending => " ▲",
            SortDirection::Descending => " ▼",
        };
        (direction.toggled(), arrow)
    } else {
        (SortDirection::default(), "")
    };
    let align = if field == SortField::Amount { "text-right" } else { "text-left" };

    format!(
        r#"<th class='px-4 py-2 {}'><a href='#' hx-get='/transactions/sort?field={}&direction={}' hx-target='{}' class='hover:text-indigo-600'>{}{}</a></th>"#,
        align,
        field,
        next_direction,
        LIST_TARGET,
        field.label(),
        arrow
    )
}
