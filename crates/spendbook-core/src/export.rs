//! Monthly expense-by-category export

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{ExportError, FetchResult};
use crate::fetcher::ActorIdentity;
use crate::models::CategoryAmount;

const UNCATEGORIZED: &str = "Uncategorized";
const TOTAL_LABEL: &str = "TOTAL";

/// Source of per-category expense totals for one month
#[async_trait]
pub trait CategoryTotalsSource: Send + Sync {
    async fn category_totals(
        &self,
        actor: &ActorIdentity,
        month: u32,
        year: i32,
    ) -> FetchResult<Vec<CategoryAmount>>;
}

/// One line of the export file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryExportRow {
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Amount")]
    pub amount: String,
    #[serde(rename = "Percentage")]
    pub percentage: String,
}

/// A ready-to-write export with its download name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryExport {
    pub file_name: String,
    pub rows: Vec<CategoryExportRow>,
}

impl CategoryExport {
    /// Build the export rows for `month` (1-12) of `year`
    pub fn build(categories: &[CategoryAmount], month: u32, year: i32) -> Result<Self, ExportError> {
        if categories.is_empty() {
            return Err(ExportError::validation("No category data available to export"));
        }
        let month_name = spendbook_utils::month_name(month)
            .ok_or_else(|| ExportError::validation(format!("Invalid month: {}", month)))?;

        let total = categories
            .iter()
            .try_fold(Decimal::ZERO, |sum, c| sum.checked_add(c.amount))
            .ok_or_else(too_large)?;
        let mut rows = categories
            .iter()
            .map(|c| {
                Ok(CategoryExportRow {
                    category: display_name(&c.name),
                    amount: format!("{:.2}", c.amount.round_dp(2)),
                    percentage: percentage_of(c.amount, total)?,
                })
            })
            .collect::<Result<Vec<_>, ExportError>>()?;

        if total > Decimal::ZERO {
            rows.push(CategoryExportRow {
                category: TOTAL_LABEL.to_string(),
                amount: format!("{:.2}", total.round_dp(2)),
                percentage: "100.00%".to_string(),
            });
        }

        Ok(Self {
            file_name: format!("expense_summary_{}_{}.csv", month_name.to_lowercase(), year),
            rows,
        })
    }

    /// Serialize the rows, header included
    pub fn to_csv(&self) -> Result<Vec<u8>, ExportError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for row in &self.rows {
            writer.serialize(row)?;
        }
        writer.into_inner().map_err(|e| ExportError::Write {
            message: e.to_string(),
        })
    }
}

fn display_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        UNCATEGORIZED.to_string()
    } else {
        trimmed.to_string()
    }
}

fn too_large() -> ExportError {
    ExportError::validation("Category amounts are too large to export")
}

/// Share of `total`; only a positive total yields a nonzero share
fn percentage_of(amount: Decimal, total: Decimal) -> Result<String, ExportError> {
    if total <= Decimal::ZERO {
        return Ok("0.00%".to_string());
    }
    let pct = amount
        .checked_div(total)
        .and_then(|share| share.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or_else(too_large)?;
    Ok(format!("{:.2}%", pct.round_dp(2)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn category(name: &str, amount: &str) -> CategoryAmount {
        CategoryAmount {
            name: name.to_string(),
            amount: Decimal::from_str(amount).unwrap(),
        }
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let err = CategoryExport::build(&[], 3, 2024).unwrap_err();
        assert_eq!(err.to_string(), "No category data available to export");
    }

    #[test]
    fn test_invalid_month_is_rejected() {
        let err = CategoryExport::build(&[category("Food", "10")], 13, 2024).unwrap_err();
        assert!(matches!(err, ExportError::Validation { .. }));
    }

    #[test]
    fn test_rows_percentages_and_total() {
        let export = CategoryExport::build(
            &[category("Food", "300"), category("Rent", "600"), category("", "100")],
            3,
            2024,
        )
        .unwrap();

        assert_eq!(export.file_name, "expense_summary_march_2024.csv");
        let summary: Vec<(&str, &str, &str)> = export
            .rows
            .iter()
            .map(|r| (r.category.as_str(), r.amount.as_str(), r.percentage.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Food", "300.00", "30.00%"),
                ("Rent", "600.00", "60.00%"),
                ("Uncategorized", "100.00", "10.00%"),
                ("TOTAL", "1000.00", "100.00%"),
            ]
        );
    }

    #[test]
    fn test_percentages_round_to_two_places() {
        let export = CategoryExport::build(
            &[category("A", "1"), category("B", "2")],
            1,
            2025,
        )
        .unwrap();
        assert_eq!(export.rows[0].percentage, "33.33%");
        assert_eq!(export.rows[1].percentage, "66.67%");
    }

    #[test]
    fn test_zero_total_has_no_total_row() {
        let export = CategoryExport::build(&[category("Food", "0")], 6, 2024).unwrap();
        assert_eq!(export.rows.len(), 1);
        assert_eq!(export.rows[0].percentage, "0.00%");
    }

    #[test]
    fn test_negative_total_yields_zero_percentages() {
        let export = CategoryExport::build(&[category("Food", "100"), category("Refund", "-150")], 4, 2024).unwrap();
        let percentages: Vec<&str> = export.rows.iter().map(|r| r.percentage.as_str()).collect();
        assert_eq!(percentages, vec!["0.00%", "0.00%"]);
    }

    #[test]
    fn test_overflowing_total_is_rejected() {
        let huge = CategoryAmount {
            name: "Rent".to_string(),
            amount: Decimal::MAX,
        };
        let err = CategoryExport::build(&[huge.clone(), huge], 4, 2024).unwrap_err();
        assert_eq!(err.to_string(), "Category amounts are too large to export");
    }

    #[test]
    fn test_csv_output_has_header() {
        let export = CategoryExport::build(&[category("Food", "12.5")], 12, 2023).unwrap();
        let csv = String::from_utf8(export.to_csv().unwrap()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("Category,Amount,Percentage"));
        assert_eq!(lines.next(), Some("Food,12.50,100.00%"));
        assert_eq!(lines.next(), Some("TOTAL,12.50,100.00%"));
        assert_eq!(export.file_name, "expense_summary_december_2023.csv");
    }
}
