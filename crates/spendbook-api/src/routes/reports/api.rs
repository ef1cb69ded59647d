//! Reports API endpoints - expense summary preview and CSV download

use crate::{ApiError, AppState};
use axum::extract::Query;
use axum::http::{header, HeaderMap};
use axum::response::{Html, IntoResponse, Response};
use spendbook_core::CategoryExport;
use spendbook_utils::escape_html;
use std::collections::HashMap;

/// Read `month` (1-12) and `year` from the query string
fn parse_period(params: &HashMap<String, String>) -> Result<(u32, i32), ApiError> {
    let month = params
        .get("month")
        .ok_or_else(|| ApiError::bad_request("Missing month"))?
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|m| (1..=12).contains(m))
        .ok_or_else(|| ApiError::bad_request("Month must be a number between 1 and 12"))?;
    let year = params
        .get("year")
        .ok_or_else(|| ApiError::bad_request("Missing year"))?
        .trim()
        .parse::<i32>()
        .map_err(|_| ApiError::bad_request("Year must be a number"))?;
    Ok((month, year))
}

async fn load_export(state: &AppState, month: u32, year: i32) -> Result<CategoryExport, ApiError> {
    let actor = state.session.actor();
    let totals = state
        .reports
        .category_totals(actor, month, year)
        .await
        .map_err(|e| {
            log::warn!(target: "spendbook::api", "category totals for {}/{}: {}", month, year, e);
            ApiError::report_unavailable(&e)
        })?;
    Ok(CategoryExport::build(&totals, month, year)?)
}

/// HTMX: Category summary table for one month
pub async fn htmx_reports_summary(
    state: axum::extract::State<AppState>,
    params: Query<HashMap<String, String>>,
) -> Result<String, ApiError> {
    let (month, year) = parse_period(&params)?;
    let export = load_export(&state, month, year).await?;
    Ok(super::page::render_category_summary(&export))
}

/// CSV download of the category summary
///
/// An HTMX request only validates the export; success redirects the browser to
/// the plain download and failure is rendered into the report area.
pub async fn reports_export(
    state: axum::extract::State<AppState>,
    headers: HeaderMap,
    params: Query<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let (month, year) = parse_period(&params)?;
    let export = load_export(&state, month, year).await?;
    let body = export.to_csv()?;

    if crate::is_htmx_request(&headers) {
        let location = format!("/reports/export?month={}&year={}", month, year);
        let notice = format!(
            "<div class='text-gray-500'>Downloading {}...</div>",
            escape_html(&export.file_name)
        );
        return Ok(([("hx-redirect", location)], Html(notice)).into_response());
    }
    log::info!(target: "spendbook::api", "exported {} ({} rows)", export.file_name, export.rows.len());

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export.file_name),
            ),
        ],
        body,
    )
        .into_response())
}
