//! Core data models exchanged with the backend

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::TransactionType;

/// A single income or expense entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub transaction_id: i64,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: String,
    pub amount: Decimal,
    #[serde(default)]
    pub category_name: String,
    pub transaction_type: TransactionType,
}

impl Transaction {
    /// Check if this entry reduces the balance
    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }

    /// Amount with the sign the balance sees
    pub fn signed_amount(&self) -> Decimal {
        if self.is_expense() {
            -self.amount
        } else {
            self.amount
        }
    }
}

/// One page of items plus the totals reported by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub total_records: u64,
    pub total_pages: u64,
}

impl<T> PageResult<T> {
    /// Build a result whose page count is derived from the record count
    pub fn new(items: Vec<T>, total_records: u64, page_size: usize) -> Self {
        Self {
            items,
            total_records,
            total_pages: total_pages(total_records, page_size),
        }
    }
}

/// `ceil(total_records / page_size)`; zero when the page size is zero
pub fn total_pages(total_records: u64, page_size: usize) -> u64 {
    if page_size == 0 {
        return 0;
    }
    total_records.div_ceil(page_size as u64)
}

/// Summed amount for one spending category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAmount {
    #[serde(default, alias = "category")]
    pub name: String,
    pub amount: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(25, 10), 3);
    }

    #[test]
    fn test_total_pages_matches_ceil_for_many_sizes() {
        for page_size in 1..=12usize {
            for records in 0..=60u64 {
                let expected = (records as f64 / page_size as f64).ceil() as u64;
                assert_eq!(total_pages(records, page_size), expected, "{} / {}", records, page_size);
            }
        }
    }

    #[test]
    fn test_transaction_deserialize_backend_shape() {
        let json = serde_json::json!({
            "transactionId": 7,
            "date": "2024-03-05",
            "description": "Groceries",
            "amount": 1250.5,
            "categoryName": "Food",
            "transactionType": "expense"
        });
        let tx: Transaction = serde_json::from_value(json).unwrap();
        assert_eq!(tx.transaction_id, 7);
        assert!(tx.is_expense());
        assert_eq!(tx.signed_amount(), Decimal::new(-12505, 1));
    }

    #[test]
    fn test_category_amount_accepts_category_alias() {
        let json = serde_json::json!({ "category": "Rent", "amount": "900.00" });
        let row: CategoryAmount = serde_json::from_value(json).unwrap();
        assert_eq!(row.name, "Rent");
        assert_eq!(row.amount, Decimal::new(90000, 2));
    }
}
