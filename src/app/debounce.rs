//! Last-write-wins debouncing for search input.
//!
//! Each submitted term replaces the pending one and restarts the delay. A tick
//! at or after the deadline hands back the most recent term exactly once.

use std::time::{Duration, Instant};

/// Default delay between the last keystroke and the search being applied.
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    delay: Duration,
    pending: Option<(String, Instant)>,
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DEBOUNCE)
    }
}

impl SearchDebouncer {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Records `term` as the pending search, due `delay` after `now`.
    pub fn submit(&mut self, term: impl Into<String>, now: Instant) {
        let deadline = now + self.delay;
        self.pending = Some((term.into(), deadline));
    }

    /// Takes the pending term if its deadline has passed.
    ///
    /// ```
    /// use catalog_console::app::debounce::SearchDebouncer;
    /// use std::time::{Duration, Instant};
    ///
    /// let start = Instant::now();
    /// let mut debouncer = SearchDebouncer::new(Duration::from_millis(300));
    /// debouncer.submit("sh", start);
    /// debouncer.submit("shirt", start + Duration::from_millis(100));
    ///
    /// assert_eq!(debouncer.take_due(start + Duration::from_millis(300)), None);
    /// assert_eq!(debouncer.take_due(start + Duration::from_millis(400)).as_deref(), Some("shirt"));
    /// assert_eq!(debouncer.take_due(start + Duration::from_millis(500)), None);
    /// ```
    pub fn take_due(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some((_, deadline)) if now >= *deadline => self.pending.take().map(|(term, _)| term),
            _ => None,
        }
    }

    /// Whether a term is waiting for its deadline.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drops the pending term without applying it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
