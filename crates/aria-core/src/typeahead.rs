#![forbid(unsafe_code)]

//! Typeahead search buffer.
//!
//! Characters typed within a delay window accumulate into a query string;
//! a keystroke after the window elapses restarts the buffer. Time is
//! injected explicitly (`now: Instant`) so the window is deterministic
//! under test. There is no background timer: an expired buffer is simply
//! treated as empty on the next read, so dropping the owning pattern
//! requires no cancellation.
//!
//! # Example
//!
//! ```
//! use aria_core::typeahead::TypeaheadBuffer;
//! use std::time::{Duration, Instant};
//!
//! let mut buffer = TypeaheadBuffer::new();
//! let delay = Duration::from_millis(500);
//! let t = Instant::now();
//!
//! assert_eq!(buffer.push('b', delay, t), "b");
//! assert_eq!(buffer.push('l', delay, t + Duration::from_millis(100)), "bl");
//! // Past the window: the buffer restarts with the new character.
//! assert_eq!(buffer.push('x', delay, t + Duration::from_secs(2)), "x");
//! ```

use std::time::{Duration, Instant};

/// Accumulates a typeahead query within a rolling delay window.
#[derive(Debug, Clone, Default)]
pub struct TypeaheadBuffer {
    query: String,
    last_keystroke: Option<Instant>,
}

impl TypeaheadBuffer {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one character.
    ///
    /// Appends when the previous keystroke is within `delay`, otherwise
    /// restarts the buffer with `c`. Returns the current query. A zero
    /// `delay` never accumulates: every keystroke restarts the buffer.
    pub fn push(&mut self, c: char, delay: Duration, now: Instant) -> &str {
        if self.is_expired(delay, now) {
            self.query.clear();
        }
        self.query.push(c);
        self.last_keystroke = Some(now);
        &self.query
    }

    /// Whether a fresh keystroke at `now` would restart the buffer.
    ///
    /// Also reports the state a search should assume: an expired buffer
    /// matches nothing.
    #[must_use]
    pub fn is_expired(&self, delay: Duration, now: Instant) -> bool {
        match self.last_keystroke {
            Some(last) => now.saturating_duration_since(last) >= delay,
            None => true,
        }
    }

    /// The query as of `now`: the accumulated characters, or `""` once
    /// the window has elapsed.
    #[must_use]
    pub fn query_at(&self, delay: Duration, now: Instant) -> &str {
        if self.is_expired(delay, now) {
            ""
        } else {
            &self.query
        }
    }

    /// Whether this push restarted the buffer (single fresh character).
    #[must_use]
    pub fn is_fresh(&self) -> bool {
        self.query.chars().count() <= 1
    }

    /// Discard the buffered query.
    pub fn reset(&mut self) {
        self.query.clear();
        self.last_keystroke = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_100: Duration = Duration::from_millis(100);
    const MS_500: Duration = Duration::from_millis(500);

    #[test]
    fn accumulates_within_window() {
        let mut buffer = TypeaheadBuffer::new();
        let t = Instant::now();

        assert_eq!(buffer.push('a', MS_500, t), "a");
        assert_eq!(buffer.push('b', MS_500, t + MS_100), "ab");
        assert_eq!(buffer.push('c', MS_500, t + MS_100 * 2), "abc");
    }

    #[test]
    fn restarts_after_window() {
        let mut buffer = TypeaheadBuffer::new();
        let t = Instant::now();

        buffer.push('a', MS_500, t);
        let query = buffer.push('z', MS_500, t + MS_500 * 2);
        assert_eq!(query, "z");
        assert!(buffer.is_fresh());
    }

    #[test]
    fn window_is_measured_from_last_keystroke() {
        let mut buffer = TypeaheadBuffer::new();
        let t = Instant::now();

        buffer.push('a', MS_500, t);
        buffer.push('b', MS_500, t + Duration::from_millis(400));
        // 700ms from the start but only 300ms from the last keystroke.
        let query = buffer.push('c', MS_500, t + Duration::from_millis(700));
        assert_eq!(query, "abc");
    }

    #[test]
    fn query_at_reports_empty_once_expired() {
        let mut buffer = TypeaheadBuffer::new();
        let t = Instant::now();

        buffer.push('a', MS_500, t);
        assert_eq!(buffer.query_at(MS_500, t + MS_100), "a");
        assert_eq!(buffer.query_at(MS_500, t + MS_500), "");
    }

    #[test]
    fn zero_delay_never_accumulates() {
        let mut buffer = TypeaheadBuffer::new();
        let t = Instant::now();

        buffer.push('a', Duration::ZERO, t);
        let query = buffer.push('b', Duration::ZERO, t);
        assert_eq!(query, "b");
    }

    #[test]
    fn fresh_buffer_is_expired() {
        let buffer = TypeaheadBuffer::new();
        assert!(buffer.is_expired(MS_500, Instant::now()));
    }

    #[test]
    fn reset_discards_query() {
        let mut buffer = TypeaheadBuffer::new();
        let t = Instant::now();

        buffer.push('a', MS_500, t);
        buffer.reset();
        assert_eq!(buffer.query_at(MS_500, t), "");
        assert!(buffer.is_expired(MS_500, t));
    }

    #[test]
    fn is_fresh_tracks_restart() {
        let mut buffer = TypeaheadBuffer::new();
        let t = Instant::now();

        buffer.push('a', MS_500, t);
        assert!(buffer.is_fresh());
        buffer.push('b', MS_500, t + MS_100);
        assert!(!buffer.is_fresh());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Keystrokes spaced inside the window always accumulate into
            /// one query, regardless of spacing pattern.
            #[test]
            fn within_window_accumulates_all(gaps in proptest::collection::vec(0u64..499, 1..8)) {
                let mut buffer = TypeaheadBuffer::new();
                let start = Instant::now();
                let mut at = start;
                buffer.push('x', MS_500, at);
                for gap in &gaps {
                    at += Duration::from_millis(*gap);
                    buffer.push('x', MS_500, at);
                }
                prop_assert_eq!(buffer.query_at(MS_500, at).len(), gaps.len() + 1);
            }

            /// A keystroke at or past the window boundary always restarts.
            #[test]
            fn past_window_restarts(gap in 500u64..5_000) {
                let mut buffer = TypeaheadBuffer::new();
                let t = Instant::now();
                buffer.push('a', MS_500, t);
                buffer.push('b', MS_500, t + Duration::from_millis(gap));
                prop_assert_eq!(buffer.query_at(MS_500, t + Duration::from_millis(gap)), "b");
            }
        }
    }
}
