//! Display state of a paginated list

use serde::{Deserialize, Serialize};

/// What the list area should show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewStatus {
    /// First fetch still outstanding, nothing to show yet
    Loading,
    /// A fetch completed and there is nothing to list
    Empty,
    /// Items are available (possibly stale while a refetch runs)
    Ready,
}

/// Items currently on screen plus fetch bookkeeping
#[derive(Debug, Clone)]
pub struct ListView<T> {
    items: Vec<T>,
    /// At least one fetch has finished, successfully or not
    settled: bool,
    fetching: bool,
}

impl<T> Default for ListView<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            settled: false,
            fetching: false,
        }
    }
}

impl<T> ListView<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_fetch(&mut self) {
        self.fetching = true;
    }

    /// Replace the visible items wholesale
    pub fn show_page(&mut self, items: Vec<T>) {
        self.items = items;
        self.settled = true;
        self.fetching = false;
    }

    /// Finish a failed fetch; whatever was visible stays visible
    pub fn show_failure(&mut self) {
        self.settled = true;
        self.fetching = false;
    }

    pub fn status(&self) -> ViewStatus {
        if !self.settled && self.items.is_empty() {
            ViewStatus::Loading
        } else if self.items.is_empty() {
            ViewStatus::Empty
        } else {
            ViewStatus::Ready
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_fetching(&self) -> bool {
        self.fetching
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_until_first_fetch_settles() {
        let mut view: ListView<u32> = ListView::new();
        assert_eq!(view.status(), ViewStatus::Loading);
        view.begin_fetch();
        assert_eq!(view.status(), ViewStatus::Loading);
        view.show_page(vec![]);
        assert_eq!(view.status(), ViewStatus::Empty);
        assert!(!view.is_fetching());
    }

    #[test]
    fn test_refetch_keeps_stale_items_visible() {
        let mut view = ListView::new();
        view.show_page(vec![1, 2, 3]);
        view.begin_fetch();
        assert_eq!(view.status(), ViewStatus::Ready);
        assert_eq!(view.items(), &[1, 2, 3]);
        assert!(view.is_fetching());
    }

    #[test]
    fn test_failure_retains_items() {
        let mut view = ListView::new();
        view.show_page(vec![1, 2]);
        view.begin_fetch();
        view.show_failure();
        assert_eq!(view.items(), &[1, 2]);
        assert_eq!(view.status(), ViewStatus::Ready);
    }

    #[test]
    fn test_failure_on_first_fetch_shows_empty() {
        let mut view: ListView<u32> = ListView::new();
        view.begin_fetch();
        view.show_failure();
        assert_eq!(view.status(), ViewStatus::Empty);
    }
}
