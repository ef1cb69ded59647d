//! Headline figures for the dashboard

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::FetchResult;
use crate::fetcher::ActorIdentity;

/// Totals over all of the actor's transactions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub cash_in_hand: Decimal,
    pub no_of_transactions: u64,
}

impl DashboardSummary {
    /// Summary whose cash in hand is income minus expense
    pub fn new(total_income: Decimal, total_expense: Decimal, no_of_transactions: u64) -> Self {
        Self {
            total_income,
            total_expense,
            cash_in_hand: total_income.saturating_sub(total_expense),
            no_of_transactions,
        }
    }
}

/// Source of the dashboard summary
#[async_trait]
pub trait DashboardSummarySource: Send + Sync {
    async fn dashboard_summary(&self, actor: &ActorIdentity) -> FetchResult<DashboardSummary>;
}
