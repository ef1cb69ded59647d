//! REST client for the SpendBook backend
//!
//! Every endpoint answers with an envelope `{ "status": ..., "response": ... }`.
//! `SUCCESS` carries the payload; anything else carries a message meant for the
//! user.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;

use spendbook_config::BackendConfig;
use spendbook_core::{
    ActorIdentity, CategoryAmount, CategoryTotalsSource, DashboardSummary, DashboardSummarySource,
    FetchError, FetchResult, ListBackend, PageRequest, PageResult, Transaction, TransactionType,
};

const TRANSACTIONS_PATH: &str = "/mywallet/transaction/getTransactionsByUser";
const EXPENSE_BY_CATEGORY_PATH: &str = "/mywallet/report/getExpenseByCategory";
const DASHBOARD_SUMMARY_PATH: &str = "/mywallet/report/getDashboardSummary";
const STATUS_SUCCESS: &str = "SUCCESS";

/// Client construction errors
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid backend URL: {url}")]
    InvalidBaseUrl { url: String },

    #[error("Failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

// ==================== Wire Format ====================

#[derive(Debug, Deserialize)]
struct Envelope {
    status: String,
    #[serde(default)]
    response: serde_json::Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionPage {
    #[serde(default)]
    data: Vec<TransactionRecord>,
    #[serde(default)]
    total_no_of_pages: u64,
    #[serde(default)]
    total_no_of_records: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionRecord {
    transaction_id: i64,
    date: String,
    #[serde(default)]
    description: String,
    amount: Decimal,
    #[serde(default, alias = "category")]
    category_name: String,
    transaction_type: TransactionTypeRecord,
}

/// The backend sends either the type name or its entity (1 = expense, 2 = income)
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TransactionTypeRecord {
    Name(String),
    #[serde(rename_all = "camelCase")]
    Entity { transaction_type_id: i64 },
}

impl TransactionTypeRecord {
    fn resolve(&self) -> Result<TransactionType, String> {
        match self {
            TransactionTypeRecord::Name(name) => name.parse(),
            TransactionTypeRecord::Entity { transaction_type_id: 1 } => Ok(TransactionType::Expense),
            TransactionTypeRecord::Entity { transaction_type_id: 2 } => Ok(TransactionType::Income),
            TransactionTypeRecord::Entity { transaction_type_id } => {
                Err(format!("Unknown transaction type id: {}", transaction_type_id))
            }
        }
    }
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = String;

    fn try_from(record: TransactionRecord) -> Result<Self, Self::Error> {
        // Dates may arrive as full timestamps
        let day = record.date.split('T').next().unwrap_or_default();
        let date = NaiveDate::parse_from_str(day, "%Y-%m-%d")
            .map_err(|e| format!("Invalid date '{}': {}", record.date, e))?;

        Ok(Transaction {
            transaction_id: record.transaction_id,
            date,
            description: record.description,
            amount: record.amount,
            category_name: record.category_name,
            transaction_type: record.transaction_type.resolve()?,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CategoryTotals {
    List(Vec<CategoryAmount>),
    Map(BTreeMap<String, Decimal>),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryRecord {
    #[serde(default)]
    total_income: Decimal,
    #[serde(default)]
    total_expense: Decimal,
    #[serde(default)]
    cash_in_hand: Option<Decimal>,
    #[serde(default)]
    no_of_transactions: u64,
}

// ==================== Decoding ====================

/// Unwrap the envelope, returning the payload of a successful response
fn open_envelope(status: u16, body: &str) -> FetchResult<serde_json::Value> {
    let envelope: Envelope = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(e) if (200..300).contains(&status) => {
            return Err(FetchError::application(Some(status), format!("Malformed response: {}", e)));
        }
        Err(_) => {
            return Err(FetchError::application(Some(status), body.trim().to_string()));
        }
    };

    if (200..300).contains(&status) && envelope.status == STATUS_SUCCESS {
        return Ok(envelope.response);
    }

    Err(FetchError::application(Some(status), envelope_message(&envelope)))
}

fn envelope_message(envelope: &Envelope) -> String {
    match &envelope.response {
        serde_json::Value::String(message) => message.clone(),
        serde_json::Value::Object(fields) => fields
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| envelope.status.clone()),
        _ => envelope.status.clone(),
    }
}

/// Decode a transactions page response
pub fn decode_page(status: u16, body: &str) -> FetchResult<PageResult<Transaction>> {
    let payload = open_envelope(status, body)?;
    let page: TransactionPage = serde_json::from_value(payload)
        .map_err(|e| FetchError::application(Some(status), format!("Malformed page: {}", e)))?;

    let items = page
        .data
        .into_iter()
        .map(Transaction::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| FetchError::application(Some(status), e))?;

    Ok(PageResult {
        items,
        total_records: page.total_no_of_records,
        total_pages: page.total_no_of_pages,
    })
}

/// Decode an expense-by-category response
pub fn decode_category_totals(status: u16, body: &str) -> FetchResult<Vec<CategoryAmount>> {
    let payload = open_envelope(status, body)?;
    if payload.is_null() {
        return Ok(Vec::new());
    }
    let totals: CategoryTotals = serde_json::from_value(payload)
        .map_err(|e| FetchError::application(Some(status), format!("Malformed category totals: {}", e)))?;

    Ok(match totals {
        CategoryTotals::List(list) => list,
        CategoryTotals::Map(map) => map
            .into_iter()
            .map(|(name, amount)| CategoryAmount { name, amount })
            .collect(),
    })
}

/// Decode a dashboard summary response
///
/// Cash in hand falls back to income minus expense when the backend omits it.
pub fn decode_dashboard_summary(status: u16, body: &str) -> FetchResult<DashboardSummary> {
    let payload = open_envelope(status, body)?;
    let record: SummaryRecord = serde_json::from_value(payload)
        .map_err(|e| FetchError::application(Some(status), format!("Malformed summary: {}", e)))?;

    let mut summary = DashboardSummary::new(record.total_income, record.total_expense, record.no_of_transactions);
    if let Some(cash) = record.cash_in_hand {
        summary.cash_in_hand = cash;
    }
    Ok(summary)
}

// ==================== HTTP Backend ====================

/// Backend reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &BackendConfig) -> Result<Self, ClientError> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::InvalidBaseUrl { url: base_url });
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get(&self, path: &str, params: &[(&str, String)]) -> FetchResult<(u16, String)> {
        let url = self.endpoint(path);
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| FetchError::network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::network(e.to_string()))?;
        Ok((status, body))
    }
}

/// Query parameters of a transactions page request
pub fn page_params(request: &PageRequest) -> Vec<(&'static str, String)> {
    let query = &request.query;
    vec![
        ("email", request.actor.as_str().to_string()),
        ("pageNumber", query.page_number.to_string()),
        ("pageSize", query.page_size.to_string()),
        ("searchKey", query.search_key.clone()),
        ("sortField", query.sort_field.to_string()),
        ("sortDirec", query.sort_direction.to_string()),
        ("transactionType", query.type_filter.as_param()),
    ]
}

#[async_trait]
impl ListBackend for HttpBackend {
    type Item = Transaction;

    async fn fetch_page(&self, request: &PageRequest) -> FetchResult<PageResult<Transaction>> {
        let (status, body) = self.get(TRANSACTIONS_PATH, &page_params(request)).await?;
        decode_page(status, &body)
    }
}

#[async_trait]
impl CategoryTotalsSource for HttpBackend {
    async fn category_totals(
        &self,
        actor: &ActorIdentity,
        month: u32,
        year: i32,
    ) -> FetchResult<Vec<CategoryAmount>> {
        let params = [
            ("email", actor.as_str().to_string()),
            ("month", month.to_string()),
            ("year", year.to_string()),
        ];
        let (status, body) = self.get(EXPENSE_BY_CATEGORY_PATH, &params).await?;
        decode_category_totals(status, &body)
    }
}

#[async_trait]
impl DashboardSummarySource for HttpBackend {
    async fn dashboard_summary(&self, actor: &ActorIdentity) -> FetchResult<DashboardSummary> {
        let params = [("email", actor.as_str().to_string())];
        let (status, body) = self.get(DASHBOARD_SUMMARY_PATH, &params).await?;
        decode_dashboard_summary(status, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::routing::get;
    use axum::Router;
    use spendbook_core::{PageQuery, SortDirection, SortField, TypeFilter};
    use std::collections::HashMap;
    use std::str::FromStr;

    const PAGE_BODY: &str = r#"{
        "status": "SUCCESS",
        "response": {
            "data": [
                {"transactionId": 7, "date": "2024-03-02T00:00:00", "description": "Groceries",
                 "amount": 42.5, "categoryName": "Food", "transactionType": "expense"},
                {"transactionId": 8, "date": "2024-03-01", "description": "Salary",
                 "amount": "1000", "categoryName": "Pay", "transactionType": {"transactionTypeId": 2}}
            ],
            "totalNoOfPages": 3,
            "totalNoOfRecords": 25
        }
    }"#;

    #[test]
    fn test_decode_page_success() {
        let page = decode_page(200, PAGE_BODY).unwrap();
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_records, 25);
        assert_eq!(page.items.len(), 2);

        let first = &page.items[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
        assert_eq!(first.amount, Decimal::from_str("42.5").unwrap());
        assert!(first.is_expense());
        assert_eq!(page.items[1].transaction_type, TransactionType::Income);
    }

    #[test]
    fn test_transaction_type_entity_ids() {
        let body = r#"{
            "status": "SUCCESS",
            "response": {
                "data": [
                    {"transactionId": 1, "date": "2024-03-01", "amount": 5,
                     "transactionType": {"transactionTypeId": 1}},
                    {"transactionId": 2, "date": "2024-03-01", "amount": 5,
                     "transactionType": {"transactionTypeId": 2}}
                ],
                "totalNoOfPages": 1,
                "totalNoOfRecords": 2
            }
        }"#;
        let page = decode_page(200, body).unwrap();
        assert_eq!(page.items[0].transaction_type, TransactionType::Expense);
        assert_eq!(page.items[1].transaction_type, TransactionType::Income);

        let unknown = body.replace(r#""transactionTypeId": 2"#, r#""transactionTypeId": 3"#);
        assert!(decode_page(200, &unknown).is_err());
    }

    #[test]
    fn test_decode_page_error_envelope() {
        let body = r#"{"status": "FAILED", "response": "User not found"}"#;
        let err = decode_page(200, body).unwrap_err();
        assert_eq!(err, FetchError::application(Some(200), "User not found"));
    }

    #[test]
    fn test_decode_page_error_status() {
        let body = r#"{"status": "FAILED", "response": {"message": "Bad sort field"}}"#;
        let err = decode_page(400, body).unwrap_err();
        assert_eq!(err, FetchError::application(Some(400), "Bad sort field"));

        let err = decode_page(502, "Bad Gateway").unwrap_err();
        assert_eq!(err, FetchError::application(Some(502), "Bad Gateway"));
    }

    #[test]
    fn test_decode_page_malformed_body() {
        let err = decode_page(200, "<html>").unwrap_err();
        assert!(matches!(err, FetchError::Application { .. }));
    }

    #[test]
    fn test_decode_category_totals_list_and_map() {
        let list = r#"{"status": "SUCCESS", "response": [{"category": "Food", "amount": 12}]}"#;
        let totals = decode_category_totals(200, list).unwrap();
        assert_eq!(totals[0].name, "Food");

        let map = r#"{"status": "SUCCESS", "response": {"Rent": 600, "Food": 300}}"#;
        let totals = decode_category_totals(200, map).unwrap();
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].name, "Food");

        let empty = r#"{"status": "SUCCESS", "response": null}"#;
        assert!(decode_category_totals(200, empty).unwrap().is_empty());
    }

    #[test]
    fn test_decode_dashboard_summary() {
        let body = r#"{"status": "SUCCESS", "response": {"totalIncome": 5000, "totalExpense": 1250.5, "noOfTransactions": 14}}"#;
        let summary = decode_dashboard_summary(200, body).unwrap();
        assert_eq!(summary.cash_in_hand, Decimal::from_str("3749.5").unwrap());
        assert_eq!(summary.no_of_transactions, 14);

        let body = r#"{"status": "SUCCESS", "response": {"totalIncome": 10, "totalExpense": 4, "cashInHand": 2, "noOfTransactions": 1}}"#;
        assert_eq!(decode_dashboard_summary(200, body).unwrap().cash_in_hand, Decimal::new(2, 0));

        let body = r#"{"status": "FAILED", "response": "User not found"}"#;
        assert_eq!(
            decode_dashboard_summary(200, body).unwrap_err(),
            FetchError::application(Some(200), "User not found")
        );
    }

    #[test]
    fn test_page_params() {
        let mut query = PageQuery::new(10);
        query.page_number = 2;
        query.search_key = "rent".to_string();
        query.sort_field = SortField::Amount;
        query.sort_direction = SortDirection::Ascending;
        query.type_filter = TypeFilter::Only(TransactionType::Expense);
        let request = PageRequest {
            actor: ActorIdentity::new("jane@example.com"),
            query,
        };

        let params: HashMap<_, _> = page_params(&request).into_iter().collect();
        assert_eq!(params["email"], "jane@example.com");
        assert_eq!(params["pageNumber"], "2");
        assert_eq!(params["sortField"], "amount");
        assert_eq!(params["sortDirec"], "asc");
        assert_eq!(params["transactionType"], "expense");
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        let config = BackendConfig {
            base_url: "localhost:8080".to_string(),
            timeout_secs: 5,
        };
        assert!(matches!(
            HttpBackend::new(&config),
            Err(ClientError::InvalidBaseUrl { .. })
        ));

        let backend = HttpBackend::new(&BackendConfig {
            base_url: " http://localhost:8080/ ".to_string(),
            timeout_secs: 5,
        })
        .unwrap();
        assert_eq!(backend.base_url(), "http://localhost:8080");
    }

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/", addr)
    }

    #[tokio::test]
    async fn test_fetch_page_over_http() {
        let router = Router::new().route(
            TRANSACTIONS_PATH,
            get(|Query(params): Query<HashMap<String, String>>| async move {
                assert_eq!(params.get("email").map(String::as_str), Some("jane@example.com"));
                assert_eq!(params.get("pageSize").map(String::as_str), Some("10"));
                PAGE_BODY
            }),
        );
        let base_url = serve(router).await;
        let backend = HttpBackend::new(&BackendConfig {
            base_url,
            timeout_secs: 5,
        })
        .unwrap();

        let request = PageRequest {
            actor: ActorIdentity::new("jane@example.com"),
            query: PageQuery::new(10),
        };
        let page = backend.fetch_page(&request).await.unwrap();
        assert_eq!(page.total_records, 25);
    }

    #[tokio::test]
    async fn test_dashboard_summary_over_http() {
        let router = Router::new().route(
            DASHBOARD_SUMMARY_PATH,
            get(|Query(params): Query<HashMap<String, String>>| async move {
                assert_eq!(params.get("email").map(String::as_str), Some("jane@example.com"));
                r#"{"status": "SUCCESS", "response": {"totalIncome": 900, "totalExpense": 300, "noOfTransactions": 6}}"#
            }),
        );
        let base_url = serve(router).await;
        let backend = HttpBackend::new(&BackendConfig {
            base_url,
            timeout_secs: 5,
        })
        .unwrap();

        let summary = backend
            .dashboard_summary(&ActorIdentity::new("jane@example.com"))
            .await
            .unwrap();
        assert_eq!(summary.cash_in_hand, Decimal::new(600, 0));
        assert_eq!(summary.no_of_transactions, 6);
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let backend = HttpBackend::new(&BackendConfig {
            base_url: format!("http://{}", addr),
            timeout_secs: 2,
        })
        .unwrap();
        let err = backend
            .category_totals(&ActorIdentity::new("jane@example.com"), 3, 2024)
            .await
            .unwrap_err();
        assert_eq!(err.code(), spendbook_core::ErrorCode::NetworkError);
    }
}
