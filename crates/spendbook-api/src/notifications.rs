//! Transient toast notifications
//!
//! Messages queue up until the next rendered fragment drains them into an
//! out-of-band swap of the `#toasts` container.

use spendbook_core::Notifier;
use spendbook_utils::escape_html;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Upper bound on undelivered messages; the oldest are dropped first
const MAX_PENDING: usize = 20;

#[derive(Debug, Default)]
pub struct ToastQueue {
    pending: Mutex<VecDeque<String>>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, message: impl Into<String>) {
        let mut pending = self.pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if pending.len() == MAX_PENDING {
            pending.pop_front();
        }
        pending.push_back(message.into());
    }

    /// Take every pending message
    pub fn drain(&self) -> Vec<String> {
        let mut pending = self.pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        pending.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drain pending messages as an out-of-band `#toasts` fragment
    pub fn render(&self) -> String {
        render_toasts(&self.drain())
    }
}

impl Notifier for ToastQueue {
    fn notify(&self, message: &str) {
        log::info!(target: "spendbook::toast", "{}", message);
        self.push(message);
    }
}

/// Toast container with one entry per message; empty when there is nothing to show
pub fn render_toasts(messages: &[String]) -> String {
    if messages.is_empty() {
        return String::new();
    }
    let mut html = String::from(
        "<div id='toasts' hx-swap-oob='true' class='fixed top-4 right-4 z-50 space-y-2'>",
    );
    for message in messages {
        html.push_str(&format!(
            r#"<div class='toast px-4 py-3 rounded-lg shadow bg-red-600 text-white text-sm' role='alert'
                onclick='this.remove()'>{}</div>"#,
            escape_html(message)
        ));
    }
    html.push_str("</div>");
    html
}
