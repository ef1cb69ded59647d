//! Pagination, search and sort state for one list
//!
//! The controller never performs I/O. Every mutating operation reports whether
//! the resulting [`PageQuery`] differs from the previous one, which is the
//! signal for the owner to issue a new fetch.

use serde::{Deserialize, Serialize};
use spendbook_config::PaginationConfig;

use crate::types::{SortDirection, SortField, TypeFilter};

/// Current pagination, sort and search parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    /// Zero-based page index
    pub page_number: u64,
    pub page_size: usize,
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
    pub search_key: String,
    pub type_filter: TypeFilter,
}

impl PageQuery {
    /// Query for the first page with default ordering
    pub fn new(page_size: usize) -> Self {
        Self {
            page_number: 0,
            page_size: page_size.max(1),
            sort_field: SortField::default(),
            sort_direction: SortDirection::default(),
            search_key: String::new(),
            type_filter: TypeFilter::All,
        }
    }

    /// Initial query built from the pagination settings
    pub fn from_config(config: &PaginationConfig) -> Self {
        let mut query = Self::new(config.records_per_page);
        match config.default_sort_field.parse() {
            Ok(field) => query.sort_field = field,
            Err(e) => log::warn!("{}, falling back to '{}'", e, query.sort_field),
        }
        match config.default_sort_direction.parse() {
            Ok(direction) => query.sort_direction = direction,
            Err(e) => log::warn!("{}, falling back to '{}'", e, query.sort_direction),
        }
        query
    }

    /// Number of records before the current page
    pub fn offset(&self) -> u64 {
        self.page_number * self.page_size as u64
    }
}

/// Summary of the visible range, e.g. "Showing 11-20 of 25"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// 1-based index of the first visible record, 0 when there are none
    pub from: u64,
    /// 1-based index of the last visible record
    pub to: u64,
    pub total_records: u64,
    /// 1-based page shown to the user
    pub current_page: u64,
    pub total_pages: u64,
}

impl PageInfo {
    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

impl std::fmt::Display for PageInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Showing {}-{} of {}", self.from, self.to, self.total_records)
    }
}

/// Owns the [`PageQuery`] and the totals reported by the last fetch
#[derive(Debug, Clone)]
pub struct PaginationController {
    query: PageQuery,
    /// Unknown until the first successful fetch
    no_of_pages: Option<u64>,
    no_of_records: u64,
}

impl PaginationController {
    pub fn new(query: PageQuery) -> Self {
        Self {
            query,
            no_of_pages: None,
            no_of_records: 0,
        }
    }

    pub fn query(&self) -> &PageQuery {
        &self.query
    }

    pub fn page_number(&self) -> u64 {
        self.query.page_number
    }

    pub fn no_of_pages(&self) -> Option<u64> {
        self.no_of_pages
    }

    pub fn no_of_records(&self) -> u64 {
        self.no_of_records
    }

    /// Replace the search key and go back to the first page
    pub fn set_search_key(&mut self, key: impl Into<String>) -> bool {
        let key = key.into();
        self.update(|q| q.search_key = key)
    }

    pub fn set_sort_field(&mut self, field: SortField) -> bool {
        self.update(|q| q.sort_field = field)
    }

    pub fn set_sort_direction(&mut self, direction: SortDirection) -> bool {
        self.update(|q| q.sort_direction = direction)
    }

    pub fn set_type_filter(&mut self, filter: TypeFilter) -> bool {
        self.update(|q| q.type_filter = filter)
    }

    /// Advance one page; silently ignored on the last page
    pub fn on_next_click(&mut self) -> bool {
        match self.no_of_pages {
            Some(pages) if self.query.page_number + 1 < pages => {
                self.query.page_number += 1;
                true
            }
            _ => false,
        }
    }

    /// Go back one page; silently ignored on the first page
    pub fn on_prev_click(&mut self) -> bool {
        if self.query.page_number > 0 {
            self.query.page_number -= 1;
            true
        } else {
            false
        }
    }

    /// Record the page count of the last fetch, clamping the current page into range.
    ///
    /// Returns `true` when the page number had to move.
    pub fn set_no_of_pages(&mut self, pages: u64) -> bool {
        self.no_of_pages = Some(pages);
        let last = pages.saturating_sub(1);
        if self.query.page_number > last {
            log::debug!(
                "page {} out of range for {} pages, clamping to {}",
                self.query.page_number,
                pages,
                last
            );
            self.query.page_number = last;
            true
        } else {
            false
        }
    }

    pub fn set_no_of_records(&mut self, records: u64) {
        self.no_of_records = records;
    }

    /// Visible range summary for the current page
    pub fn page_info(&self) -> PageInfo {
        let total = self.no_of_records;
        let size = self.query.page_size as u64;
        let start = self.query.offset();
        let (from, to) = if total == 0 || start >= total {
            (0, 0)
        } else {
            (start + 1, (start + size).min(total))
        };

        PageInfo {
            from,
            to,
            total_records: total,
            current_page: self.query.page_number + 1,
            total_pages: self.no_of_pages.unwrap_or(0),
        }
    }

    /// Apply a filter/sort change; any such change restarts from page 0
    fn update(&mut self, change: impl FnOnce(&mut PageQuery)) -> bool {
        let before = self.query.clone();
        change(&mut self.query);
        self.query.page_number = 0;
        self.query != before
    }
}
