//! Error types for spendbook-api

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use spendbook_core::{ErrorSeverity, ExportError, FetchError};
use spendbook_utils::escape_html;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("Upstream error: {message}")]
    Upstream { message: String },

    #[error(transparent)]
    Export(#[from] ExportError),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest {
            message: message.into(),
        }
    }

    /// A failed backend lookup of `subject`; network detail is not shown
    pub fn upstream(subject: &str, error: &FetchError) -> Self {
        let message = match error {
            FetchError::Network { .. } => format!("Failed to fetch {}: Try again later!", subject),
            FetchError::Application { message, .. } => {
                format!("Failed to fetch {}: {}", subject, message.trim())
            }
        };
        ApiError::Upstream { message }
    }

    /// A failed report lookup, phrased for the export page
    pub fn report_unavailable(error: &FetchError) -> Self {
        Self::upstream("expense summary", error)
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            ApiError::Export(ExportError::Validation { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Export(ExportError::Write { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to put in front of the user
    pub fn user_message(&self) -> String {
        match self {
            ApiError::BadRequest { message } => message.clone(),
            ApiError::Upstream { message } => message.clone(),
            ApiError::Export(e) => e.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::Export(e) => match e.severity() {
                ErrorSeverity::Error => log::error!(target: "spendbook::api", "{}", e.to_details()),
                ErrorSeverity::Warning => log::warn!(target: "spendbook::api", "{}", e.to_details()),
                ErrorSeverity::Info => log::info!(target: "spendbook::api", "{}", e.to_details()),
            },
            _ if status.is_server_error() => log::error!(target: "spendbook::api", "{}", self),
            _ => log::warn!(target: "spendbook::api", "{}", self),
        }
        let body = format!(
            r#"<div class='p-4 rounded-lg border border-red-200 bg-red-50 text-red-700'>{}</div>"#,
            escape_html(&self.user_message())
        );
        (status, Html(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::bad_request("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::from(ExportError::validation("empty")).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::report_unavailable(&FetchError::network("down")).status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_report_unavailable_hides_network_detail() {
        let err = ApiError::report_unavailable(&FetchError::network("tcp connect error"));
        assert_eq!(err.user_message(), "Failed to fetch expense summary: Try again later!");

        let err = ApiError::report_unavailable(&FetchError::application(None, "Unknown user"));
        assert_eq!(err.user_message(), "Failed to fetch expense summary: Unknown user");

        let err = ApiError::upstream("dashboard summary", &FetchError::network("refused"));
        assert_eq!(err.user_message(), "Failed to fetch dashboard summary: Try again later!");
    }

    #[tokio::test]
    async fn test_export_error_renders_escaped_fragment() {
        let response = ApiError::from(ExportError::validation("Bad <row>")).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(body.contains("Bad &lt;row&gt;"));
    }
}
