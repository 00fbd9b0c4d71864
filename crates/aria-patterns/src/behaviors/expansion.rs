#![forbid(unsafe_code)]

//! Expansion behavior: open/closed state for one or more expandable items.
//!
//! State is a set of expanded ids held in a single [`Signal`], so the
//! single-expansion rule is atomic: `open` under `multi_expandable =
//! false` swaps the whole set in one mutation and no observer can see two
//! ids expanded at once.

use aria_core::signal::Signal;
use std::fmt;

/// Open/closed tracking keyed by an expansion id (typically an item's
/// value).
#[derive(Debug, Clone)]
pub struct ExpansionBehavior<K: Clone + PartialEq + fmt::Debug> {
    /// Currently expanded ids, in the order they were opened.
    pub expanded: Signal<Vec<K>>,
    /// Whether more than one id may be expanded at a time.
    pub multi_expandable: Signal<bool>,
}

impl<K: Clone + PartialEq + fmt::Debug> ExpansionBehavior<K> {
    /// Create with nothing expanded.
    #[must_use]
    pub fn new(multi_expandable: bool) -> Self {
        Self {
            expanded: Signal::new(Vec::new()),
            multi_expandable: Signal::new(multi_expandable),
        }
    }

    /// Create with an initial expanded set.
    ///
    /// A seed with several ids under `multi_expandable = false` is a host
    /// bug; it is reported by a debug assertion and truncated to its first
    /// id rather than rejected at runtime.
    #[must_use]
    pub fn with_expanded(multi_expandable: bool, seed: Vec<K>) -> Self {
        debug_assert!(
            multi_expandable || seed.len() <= 1,
            "single-expansion behavior seeded with {} expanded ids",
            seed.len()
        );
        let mut seed = seed;
        if !multi_expandable {
            seed.truncate(1);
        }
        Self {
            expanded: Signal::new(seed),
            multi_expandable: Signal::new(multi_expandable),
        }
    }

    /// Expand an id. Under single expansion every other id closes in the
    /// same mutation.
    pub fn open(&self, id: &K) {
        if self.is_expanded(id) {
            return;
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(id = ?id, "open");
        if self.multi_expandable.get() {
            self.expanded.update(|ids| ids.push(id.clone()));
        } else {
            self.expanded.set(vec![id.clone()]);
        }
    }

    /// Collapse an id.
    pub fn close(&self, id: &K) {
        self.expanded.update(|ids| ids.retain(|k| k != id));
    }

    /// Toggle an id between expanded and collapsed.
    pub fn toggle(&self, id: &K) {
        if self.is_expanded(id) {
            self.close(id);
        } else {
            self.open(id);
        }
    }

    /// Collapse everything.
    pub fn close_all(&self) {
        self.expanded.set(Vec::new());
    }

    /// Whether an id is expanded.
    #[must_use]
    pub fn is_expanded(&self, id: &K) -> bool {
        self.expanded.with(|ids| ids.contains(id))
    }

    /// Snapshot of the expanded ids.
    #[must_use]
    pub fn expanded_ids(&self) -> Vec<K> {
        self.expanded.get()
    }
}

/// Per-item handle gating expansion on the item's own capabilities.
///
/// A tree leaf, for example, carries a control with `expandable = false`
/// so open/close requests routed through it are no-ops.
#[derive(Debug, Clone)]
pub struct ExpansionControl<K: Clone + PartialEq + fmt::Debug> {
    id: K,
    /// Whether this item can be expanded at all.
    pub expandable: Signal<bool>,
    /// Whether this item currently refuses expansion changes.
    pub disabled: Signal<bool>,
    behavior: ExpansionBehavior<K>,
}

impl<K: Clone + PartialEq + fmt::Debug> ExpansionControl<K> {
    /// Create a control for `id` backed by the shared behavior.
    #[must_use]
    pub fn new(id: K, expandable: bool, behavior: &ExpansionBehavior<K>) -> Self {
        Self {
            id,
            expandable: Signal::new(expandable),
            disabled: Signal::new(false),
            behavior: behavior.clone(),
        }
    }

    /// This control's expansion id.
    #[must_use]
    pub fn id(&self) -> &K {
        &self.id
    }

    /// Expand, if permitted.
    pub fn open(&self) {
        if self.permitted() {
            self.behavior.open(&self.id);
        }
    }

    /// Collapse, if permitted.
    pub fn close(&self) {
        if self.permitted() {
            self.behavior.close(&self.id);
        }
    }

    /// Toggle, if permitted.
    pub fn toggle(&self) {
        if self.permitted() {
            self.behavior.toggle(&self.id);
        }
    }

    /// Whether this item is expanded.
    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.behavior.is_expanded(&self.id)
    }

    fn permitted(&self) -> bool {
        self.expandable.get() && !self.disabled.get()
    }
}
