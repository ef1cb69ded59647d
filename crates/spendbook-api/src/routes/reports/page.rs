//! Reports page rendering - monthly expense summary and export

use crate::AppState;
use chrono::Datelike;
use spendbook_core::CategoryExport;
use spendbook_utils::{escape_html, month_name};

/// Reports page - month picker, preview and CSV download
pub async fn page_reports(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    let today = chrono::Local::now().date_naive();
    let month_options = (1..=12u32)
        .map(|m| {
            format!(
                "<option value='{}' {}>{}</option>",
                m,
                if m == today.month() { "selected" } else { "" },
                month_name(m).unwrap_or_default()
            )
        })
        .collect::<String>();

    let inner_content = format!(
        r#"<div class='flex items-center justify-between mb-4'>
            <h2 class='text-2xl font-bold'>Reports</h2>
            <span class='text-sm text-gray-500'>{}</span>
        </div>
        <form id='report-form' action='/reports/export' method='get'
            class='flex items-end gap-3 mb-6 p-4 bg-white rounded-lg border'>
            <label class='text-sm text-gray-600'>Month
                <select name='month' class='block mt-1 px-3 py-2 border rounded-lg'>{}</select>
            </label>
            <label class='text-sm text-gray-600'>Year
                <input type='number' name='year' value='{}' min='1970' max='9999'
                    class='block mt-1 px-3 py-2 border rounded-lg w-28'>
            </label>
            <button type='button' hx-get='/reports/summary' hx-include='#report-form' hx-target='#report-content'
                class='px-4 py-2 bg-gray-100 text-gray-700 rounded-lg hover:bg-gray-200'>Preview</button>
            <button type='submit' hx-get='/reports/export' hx-include='#report-form' hx-target='#report-content'
                class='px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>Export CSV</button>
        </form>
        <div id='report-content' class='text-gray-500'>Pick a month to see expenses by category.</div>"#,
        escape_html(state.session.actor().as_str()),
        month_options,
        today.year()
    );

    axum::response::Html(crate::page_response(&headers, "Reports", "/reports", &inner_content))
}

/// Category table with amounts and shares of the month's total
pub fn render_category_summary(export: &CategoryExport) -> String {
    let mut html = String::from(
        r#"<div class='bg-white rounded-lg border overflow-hidden'><table class='w-full text-sm'><thead class='bg-gray-50 text-gray-600'><tr><th class='px-4 py-2 text-left'>Category</th><th class='px-4 py-2 text-right'>Amount</th><th class='px-4 py-2 text-right'>Percentage</th></tr></thead><tbody>"#,
    );
    for row in &export.rows {
        let row_class = if row.category == "TOTAL" { "border-t font-bold bg-gray-50" } else { "border-t" };
        html.push_str(&format!(
            r#"<tr class='{}'><td class='px-4 py-2'>{}</td><td class='px-4 py-2 text-right font-mono'>{}</td><td class='px-4 py-2 text-right'>{}</td></tr>"#,
            row_class,
            escape_html(&row.category),
            row.amount,
            row.percentage
        ));
    }
    html.push_str(&format!(
        "</tbody></table></div><p class='mt-2 text-xs text-gray-400'>Download name: {}</p>",
        escape_html(&export.file_name)
    ));
    html
}
