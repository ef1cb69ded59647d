//! Report routes - monthly expense summary by category
//!
//! Structure:
//! - api.rs: HTMX preview and CSV download
//! - page.rs: Full page rendering

pub mod api;
pub mod page;

pub use api::{htmx_reports_summary, reports_export};

pub use page::{page_reports, render_category_summary};
