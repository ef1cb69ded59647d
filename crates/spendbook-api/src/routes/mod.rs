//! Route modules for the web front end
//!
//! - dashboard: Income, expense and cash in hand totals
//! - transactions: Transaction list, search, sort, type filter, pagination
//! - reports: Monthly expense summary and CSV export
//!
//! Each module follows the same structure:
//! - mod.rs: Module declaration and exports
//! - api.rs: JSON API and HTMX endpoints
//! - page.rs: Page rendering

pub mod dashboard;
pub mod reports;
pub mod transactions;
