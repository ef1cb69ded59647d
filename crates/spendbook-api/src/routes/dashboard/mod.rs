//! Dashboard routes - income, expense, cash in hand and transaction count
//!
//! Structure:
//! - page.rs: Full page rendering

pub mod page;

pub use page::{page_dashboard, render_summary_cards};
