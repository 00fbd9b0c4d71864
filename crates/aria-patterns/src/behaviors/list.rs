#![forbid(unsafe_code)]

//! List behavior: the active-item/selection engine shared by listbox,
//! tabs, toolbar, and tree.
//!
//! The engine tracks a single active item and a set of selected values
//! over an ordered item sequence supplied by the host. Navigation skips
//! disabled items and honors wrapping; selection follows focus or waits
//! for explicit action depending on the configured mode; typeahead jumps
//! to items by search-term prefix within a delay window.
//!
//! All state lives in [`Signal`] cells so per-item pattern handles can
//! observe active/selected state through shared cells instead of
//! back-references into the owning pattern.
//!
//! Malformed input (an empty sequence, a fully disabled sequence,
//! navigation with nothing focusable, selecting an absent value) is a
//! silent no-op throughout.

use std::fmt;
use std::time::{Duration, Instant};

use aria_core::event::ElementId;
use aria_core::signal::Signal;
use aria_core::typeahead::TypeaheadBuffer;

/// Capability surface of an item navigable by [`ListBehavior`].
pub trait ListItem: Clone {
    /// Identifying value, unique within the owning list.
    type Value: Clone + PartialEq + fmt::Debug + 'static;

    /// The item's identifying value.
    fn value(&self) -> Self::Value;

    /// Whether the item is disabled. Disabled items are skipped by
    /// navigation and excluded from selection.
    fn disabled(&self) -> bool {
        false
    }

    /// The term typeahead matches against (case-insensitive prefix).
    fn search_term(&self) -> String {
        String::new()
    }

    /// The host element this item is bound to.
    fn element(&self) -> ElementId;
}

/// Main navigation axis of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Up/Down arrows navigate (default).
    #[default]
    Vertical,
    /// Left/Right arrows navigate, swapped under RTL.
    Horizontal,
}

/// Horizontal text direction, relevant for horizontal lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextDirection {
    /// Left-to-right (default).
    #[default]
    Ltr,
    /// Right-to-left.
    Rtl,
}

/// How DOM focus is represented for the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusMode {
    /// The active item's element holds `tabindex="0"`, all others `-1`;
    /// the container itself is not a tab stop (default).
    #[default]
    RovingTabindex,
    /// The container stays the tab stop and exposes the active item via
    /// `aria-activedescendant`.
    ActiveDescendant,
}

/// When navigation also selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Selection mirrors the active item on selecting navigation
    /// (default).
    #[default]
    FollowFocus,
    /// Selection changes only on explicit action (Space/Enter/click).
    Explicit,
}

/// Construction-time inputs for a [`ListBehavior`].
///
/// Every field lands in a settable [`Signal`], so hosts can rebind any of
/// them after construction.
#[derive(Debug, Clone)]
pub struct ListInputs {
    /// Whether the whole list is disabled.
    pub disabled: bool,
    /// Multi-selection.
    pub multi: bool,
    /// Whether navigation wraps at the edges.
    pub wrap: bool,
    /// Main navigation axis.
    pub orientation: Orientation,
    /// Text direction (affects horizontal arrow resolution).
    pub text_direction: TextDirection,
    /// Focus strategy.
    pub focus_mode: FocusMode,
    /// Selection strategy.
    pub selection_mode: SelectionMode,
    /// Typeahead window; `Duration::ZERO` disables typeahead.
    pub typeahead_delay: Duration,
}

impl Default for ListInputs {
    fn default() -> Self {
        Self {
            disabled: false,
            multi: false,
            wrap: true,
            orientation: Orientation::default(),
            text_direction: TextDirection::default(),
            focus_mode: FocusMode::default(),
            selection_mode: SelectionMode::default(),
            typeahead_delay: Duration::from_millis(500),
        }
    }
}

/// Active-item/selection engine over an ordered item sequence.
#[derive(Debug, Clone)]
pub struct ListBehavior<T: ListItem> {
    /// The ordered item sequence. Replace via [`set_items`](Self::set_items)
    /// so stale active/selected values are pruned.
    pub items: Signal<Vec<T>>,
    /// The currently active (focused) value, if any.
    pub active: Signal<Option<T::Value>>,
    /// Selected values: zero, one, or many depending on the selection
    /// configuration.
    pub value: Signal<Vec<T::Value>>,
    /// Whether the whole list is disabled.
    pub disabled: Signal<bool>,
    /// Multi-selection.
    pub multi: Signal<bool>,
    /// Whether navigation wraps at the edges.
    pub wrap: Signal<bool>,
    /// Main navigation axis.
    pub orientation: Signal<Orientation>,
    /// Text direction.
    pub text_direction: Signal<TextDirection>,
    /// Focus strategy.
    pub focus_mode: Signal<FocusMode>,
    /// Selection strategy.
    pub selection_mode: Signal<SelectionMode>,
    /// Typeahead window.
    pub typeahead_delay: Signal<Duration>,

    /// Range anchor: the last explicitly selected value.
    anchor: Signal<Option<T::Value>>,
    typeahead: Signal<TypeaheadBuffer>,
    /// The active value when the current typeahead query began.
    search_anchor: Signal<Option<T::Value>>,
}

impl<T: ListItem> ListBehavior<T> {
    /// Create an empty list with the given inputs.
    #[must_use]
    pub fn new(inputs: ListInputs) -> Self {
        Self {
            items: Signal::new(Vec::new()),
            active: Signal::new(None),
            value: Signal::new(Vec::new()),
            disabled: Signal::new(inputs.disabled),
            multi: Signal::new(inputs.multi),
            wrap: Signal::new(inputs.wrap),
            orientation: Signal::new(inputs.orientation),
            text_direction: Signal::new(inputs.text_direction),
            focus_mode: Signal::new(inputs.focus_mode),
            selection_mode: Signal::new(inputs.selection_mode),
            typeahead_delay: Signal::new(inputs.typeahead_delay),
            anchor: Signal::new(None),
            typeahead: Signal::new(TypeaheadBuffer::new()),
            search_anchor: Signal::new(None),
        }
    }

    /// Replace the item sequence.
    ///
    /// Selected and active values that no longer resolve to an item are
    /// pruned so the invariants (`active` ∈ `items`, `value` ⊆ `items`)
    /// hold across rebinds.
    pub fn set_items(&self, items: Vec<T>) {
        #[cfg(debug_assertions)]
        for (i, a) in items.iter().enumerate() {
            for b in &items[i + 1..] {
                debug_assert!(
                    a.value() != b.value(),
                    "duplicate list item value {:?}",
                    a.value()
                );
            }
        }

        self.value
            .update(|selected| selected.retain(|v| items.iter().any(|it| &it.value() == v)));
        if let Some(active) = self.active.get()
            && !items.iter().any(|it| it.value() == active)
        {
            self.active.set(None);
        }
        self.items.set(items);
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.with(Vec::len)
    }

    /// Whether the list holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.with(Vec::is_empty)
    }

    /// The item carrying `value`, if present.
    #[must_use]
    pub fn item(&self, value: &T::Value) -> Option<T> {
        self.items
            .with(|items| items.iter().find(|it| &it.value() == value).cloned())
    }

    /// Position of `value` within the sequence.
    #[must_use]
    pub fn index_of(&self, value: &T::Value) -> Option<usize> {
        self.items
            .with(|items| items.iter().position(|it| &it.value() == value))
    }

    /// The item matching the given host element.
    #[must_use]
    pub fn item_by_element(&self, element: ElementId) -> Option<T> {
        self.items
            .with(|items| items.iter().find(|it| it.element() == element).cloned())
    }

    /// The active item, if any.
    #[must_use]
    pub fn active_item(&self) -> Option<T> {
        self.active.get().and_then(|v| self.item(&v))
    }

    /// Position of the active item.
    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        self.active.get().and_then(|v| self.index_of(&v))
    }

    /// Whether `value` is currently selected.
    #[must_use]
    pub fn is_selected(&self, value: &T::Value) -> bool {
        self.value.with(|selected| selected.contains(value))
    }

    /// Whether `value` resolves to a non-disabled item.
    #[must_use]
    pub fn is_focusable(&self, value: &T::Value) -> bool {
        self.item(value).is_some_and(|it| !it.disabled())
    }

    /// Move to the next focusable item. Returns whether the active item
    /// changed.
    pub fn next(&self, select: bool) -> bool {
        self.step(1, select)
    }

    /// Move to the previous focusable item. Returns whether the active
    /// item changed.
    pub fn prev(&self, select: bool) -> bool {
        self.step(-1, select)
    }

    /// Move to the first focusable item.
    pub fn first(&self, select: bool) -> bool {
        let items = self.items.get();
        match items.iter().position(|it| !it.disabled()) {
            Some(idx) => {
                self.activate(&items[idx], select);
                true
            }
            None => false,
        }
    }

    /// Move to the last focusable item.
    pub fn last(&self, select: bool) -> bool {
        let items = self.items.get();
        match items.iter().rposition(|it| !it.disabled()) {
            Some(idx) => {
                self.activate(&items[idx], select);
                true
            }
            None => false,
        }
    }

    /// Move to a specific item.
    ///
    /// With `select`, the item is also selected outright: toggled into the
    /// selection for multi lists, made the sole selection otherwise. Used
    /// by pointer interactions, which select regardless of the selection
    /// mode.
    pub fn goto(&self, value: &T::Value, select: bool) -> bool {
        let Some(item) = self.item(value) else {
            return false;
        };
        if item.disabled() {
            return false;
        }
        self.active.set(Some(item.value()));
        if select {
            if self.multi.get() {
                self.toggle(Some(value));
            } else {
                self.select(Some(value));
            }
        }
        true
    }

    /// Clear the active item.
    pub fn unfocus(&self) {
        self.active.set(None);
    }

    /// Select a value, or the active item when `None`.
    ///
    /// Multi lists toggle membership; single-selection lists replace the
    /// selection. Disabled or absent values are a no-op.
    pub fn select(&self, value: Option<&T::Value>) {
        let Some(v) = value.cloned().or_else(|| self.active.get()) else {
            return;
        };
        if !self.is_focusable(&v) {
            return;
        }
        if self.multi.get() {
            self.toggle(Some(&v));
        } else {
            #[cfg(feature = "tracing")]
            tracing::trace!(value = ?v, "select");
            self.value.set(vec![v.clone()]);
            self.anchor.set(Some(v));
        }
    }

    /// Toggle a value's selected state, or the active item's when `None`.
    pub fn toggle(&self, value: Option<&T::Value>) {
        let Some(v) = value.cloned().or_else(|| self.active.get()) else {
            return;
        };
        if !self.is_focusable(&v) {
            return;
        }
        if self.is_selected(&v) {
            self.deselect(&v);
        } else if self.multi.get() {
            self.value.update(|selected| selected.push(v.clone()));
            self.anchor.set(Some(v));
        } else {
            self.value.set(vec![v.clone()]);
            self.anchor.set(Some(v));
        }
    }

    /// Remove a value from the selection.
    pub fn deselect(&self, value: &T::Value) {
        self.value.update(|selected| selected.retain(|s| s != value));
    }

    /// Clear the selection.
    pub fn deselect_all(&self) {
        self.value.set(Vec::new());
    }

    /// Select every focusable item (multi lists only).
    pub fn select_all(&self) {
        if !self.multi.get() {
            return;
        }
        let all: Vec<T::Value> = self
            .items
            .get()
            .iter()
            .filter(|it| !it.disabled())
            .map(ListItem::value)
            .collect();
        self.value.set(all);
    }

    /// Replace the selection with the anchor→active span (multi lists
    /// only). Without an anchor the span collapses to the active item.
    pub fn select_range(&self) {
        if !self.multi.get() {
            return;
        }
        let items = self.items.get();
        let Some(active) = self.active.get().and_then(|v| index_of_in(&items, &v)) else {
            return;
        };
        let anchor = self
            .anchor
            .get()
            .and_then(|v| index_of_in(&items, &v))
            .unwrap_or(active);
        let (lo, hi) = if anchor <= active {
            (anchor, active)
        } else {
            (active, anchor)
        };
        let span: Vec<T::Value> = items[lo..=hi]
            .iter()
            .filter(|it| !it.disabled())
            .map(ListItem::value)
            .collect();
        self.value.set(span);
    }

    /// Activate the first selected focusable item, or else the first
    /// focusable item. Selection is left untouched.
    pub fn set_default_state(&self) -> bool {
        let items = self.items.get();
        let selected = self.value.get();
        let preferred = items
            .iter()
            .find(|it| !it.disabled() && selected.contains(&it.value()))
            .or_else(|| items.iter().find(|it| !it.disabled()));
        match preferred {
            Some(item) => {
                self.active.set(Some(item.value()));
                true
            }
            None => false,
        }
    }

    /// Feed a typeahead character at `now`.
    ///
    /// Moves the active item to the first focusable item whose search term
    /// starts (case-insensitively) with the accumulated query, searching
    /// one past the item that was active when the query began and
    /// wrapping. With `FollowFocus` selection the landed item is also
    /// selected. Returns whether the character was consumed (it is even
    /// when nothing matches).
    pub fn typeahead(&self, c: char, now: Instant) -> bool {
        let delay = self.typeahead_delay.get();
        if delay.is_zero() {
            return false;
        }
        let items = self.items.get();
        if items.is_empty() {
            return true;
        }

        let mut fresh = false;
        let mut query = String::new();
        self.typeahead.update(|buffer| {
            fresh = buffer.is_expired(delay, now);
            query = buffer.push(c, delay, now).to_string();
        });
        if fresh {
            self.search_anchor.set(self.active.get());
        }

        let start = self
            .search_anchor
            .get()
            .and_then(|v| index_of_in(&items, &v))
            .map_or(0, |i| i + 1);
        let needle = query.to_lowercase();
        let n = items.len();
        for k in 0..n {
            let item = &items[(start + k) % n];
            if item.disabled() {
                continue;
            }
            if item.search_term().to_lowercase().starts_with(&needle) {
                let select = self.selection_mode.get() == SelectionMode::FollowFocus;
                self.activate(item, select);
                break;
            }
        }
        true
    }

    /// Tabindex for the list container.
    #[must_use]
    pub fn tabindex(&self) -> i8 {
        match self.focus_mode.get() {
            FocusMode::RovingTabindex => -1,
            FocusMode::ActiveDescendant => 0,
        }
    }

    /// Tabindex for a specific item's element.
    ///
    /// Roving mode gives the active item 0 and everything else -1;
    /// activedescendant mode pins every item to -1.
    #[must_use]
    pub fn item_tabindex(&self, value: &T::Value) -> i8 {
        match self.focus_mode.get() {
            FocusMode::ActiveDescendant => -1,
            FocusMode::RovingTabindex => {
                if self.active.with(|a| a.as_ref() == Some(value)) {
                    0
                } else {
                    -1
                }
            }
        }
    }

    /// The element to reference from `aria-activedescendant`, when in
    /// activedescendant focus mode.
    #[must_use]
    pub fn activedescendant(&self) -> Option<ElementId> {
        match self.focus_mode.get() {
            FocusMode::RovingTabindex => None,
            FocusMode::ActiveDescendant => self.active_item().map(|it| it.element()),
        }
    }

    fn step(&self, delta: i32, select: bool) -> bool {
        let items = self.items.get();
        if items.is_empty() {
            return false;
        }
        let target = match self.active.get().and_then(|v| index_of_in(&items, &v)) {
            Some(start) => advance(&items, start, delta, self.wrap.get()),
            // No active item: enter the list at the near edge.
            None if delta > 0 => items.iter().position(|it| !it.disabled()),
            None => items.iter().rposition(|it| !it.disabled()),
        };
        match target {
            Some(idx) => {
                self.activate(&items[idx], select);
                true
            }
            None => false,
        }
    }

    /// Make `item` active; with `select`, mirror it into the selection
    /// when the list follows focus.
    fn activate(&self, item: &T, select: bool) {
        let v = item.value();
        #[cfg(feature = "tracing")]
        tracing::trace!(value = ?v, select, "activate");
        self.active.set(Some(v.clone()));
        if select && self.selection_mode.get() == SelectionMode::FollowFocus {
            if self.multi.get() {
                if !self.is_selected(&v) {
                    self.value.update(|selected| selected.push(v.clone()));
                }
            } else {
                self.value.set(vec![v.clone()]);
            }
            self.anchor.set(Some(v));
        }
    }
}

fn index_of_in<T: ListItem>(items: &[T], value: &T::Value) -> Option<usize> {
    items.iter().position(|it| &it.value() == value)
}

/// Next focusable index from `start` in direction `delta`, honoring wrap.
/// `None` means the active item should not move.
fn advance<T: ListItem>(items: &[T], start: usize, delta: i32, wrap: bool) -> Option<usize> {
    let n = items.len() as i64;
    let mut i = start as i64;
    loop {
        i += i64::from(delta);
        if wrap {
            i = i.rem_euclid(n);
        } else if i < 0 || i >= n {
            return None;
        }
        if i == start as i64 {
            return None;
        }
        if !items[i as usize].disabled() {
            return Some(i as usize);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    struct TestItem {
        value: &'static str,
        disabled: bool,
        element: u64,
    }

    impl TestItem {
        fn new(value: &'static str, element: u64) -> Self {
            Self {
                value,
                disabled: false,
                element,
            }
        }

        fn disabled(mut self) -> Self {
            self.disabled = true;
            self
        }
    }

    impl ListItem for TestItem {
        type Value = &'static str;

        fn value(&self) -> &'static str {
            self.value
        }

        fn disabled(&self) -> bool {
            self.disabled
        }

        fn search_term(&self) -> String {
            self.value.to_string()
        }

        fn element(&self) -> ElementId {
            ElementId::new(self.element)
        }
    }

    fn list_of(values: &[&'static str]) -> ListBehavior<TestItem> {
        let list = ListBehavior::new(ListInputs::default());
        list.set_items(
            values
                .iter()
                .enumerate()
                .map(|(i, v)| TestItem::new(v, i as u64))
                .collect(),
        );
        list
    }

    #[test]
    fn next_from_nothing_enters_at_first() {
        let list = list_of(&["a", "b", "c"]);
        assert!(list.next(false));
        assert_eq!(list.active.get(), Some("a"));
    }

    #[test]
    fn prev_from_nothing_enters_at_last() {
        let list = list_of(&["a", "b", "c"]);
        assert!(list.prev(false));
        assert_eq!(list.active.get(), Some("c"));
    }

    #[test]
    fn next_advances_and_wraps() {
        let list = list_of(&["a", "b", "c"]);
        list.first(false);
        list.next(false);
        assert_eq!(list.active.get(), Some("b"));
        list.next(false);
        list.next(false);
        assert_eq!(list.active.get(), Some("a"), "should wrap to the first");
    }

    #[test]
    fn next_without_wrap_stops_at_edge() {
        let list = list_of(&["a", "b", "c"]);
        list.wrap.set(false);
        list.last(false);
        assert!(!list.next(false));
        assert_eq!(list.active.get(), Some("c"));
    }

    #[test]
    fn navigation_skips_disabled() {
        let list = ListBehavior::new(ListInputs::default());
        list.set_items(vec![
            TestItem::new("a", 0),
            TestItem::new("b", 1).disabled(),
            TestItem::new("c", 2),
        ]);
        list.first(false);
        list.next(false);
        assert_eq!(list.active.get(), Some("c"));
        list.prev(false);
        assert_eq!(list.active.get(), Some("a"));
    }

    #[test]
    fn first_skips_leading_disabled() {
        let list = ListBehavior::new(ListInputs::default());
        list.set_items(vec![
            TestItem::new("a", 0).disabled(),
            TestItem::new("b", 1),
        ]);
        assert!(list.first(false));
        assert_eq!(list.active.get(), Some("b"));
    }

    #[test]
    fn empty_list_navigation_is_noop() {
        let list: ListBehavior<TestItem> = ListBehavior::new(ListInputs::default());
        assert!(!list.next(false));
        assert!(!list.prev(false));
        assert!(!list.first(false));
        assert!(!list.last(false));
        assert_eq!(list.active.get(), None);
    }

    #[test]
    fn fully_disabled_list_leaves_active_unset() {
        let list = ListBehavior::new(ListInputs::default());
        list.set_items(vec![
            TestItem::new("a", 0).disabled(),
            TestItem::new("b", 1).disabled(),
        ]);
        assert!(!list.next(false));
        assert!(!list.set_default_state());
        assert_eq!(list.active.get(), None);
    }

    #[test]
    fn follow_focus_selection_tracks_navigation() {
        let list = list_of(&["a", "b", "c"]);
        list.first(true);
        assert_eq!(list.value.get(), vec!["a"]);
        list.next(true);
        assert_eq!(list.value.get(), vec!["b"]);
    }

    #[test]
    fn explicit_mode_ignores_navigation_select() {
        let list = list_of(&["a", "b"]);
        list.selection_mode.set(SelectionMode::Explicit);
        list.first(true);
        assert_eq!(list.value.get(), Vec::<&str>::new());
        list.select(None);
        assert_eq!(list.value.get(), vec!["a"]);
    }

    #[test]
    fn multi_follow_focus_accumulates() {
        let list = list_of(&["a", "b"]);
        list.multi.set(true);
        list.first(true);
        list.next(true);
        assert_eq!(list.value.get(), vec!["a", "b"]);
    }

    #[test]
    fn single_selection_holds_at_most_one() {
        let list = list_of(&["a", "b", "c"]);
        list.select(Some(&"a"));
        list.select(Some(&"c"));
        list.select(Some(&"b"));
        assert_eq!(list.value.get(), vec!["b"]);
    }

    #[test]
    fn select_defaults_to_active() {
        let list = list_of(&["a", "b"]);
        list.goto(&"b", false);
        list.select(None);
        assert_eq!(list.value.get(), vec!["b"]);
    }

    #[test]
    fn select_with_no_active_is_noop() {
        let list = list_of(&["a", "b"]);
        list.select(None);
        assert_eq!(list.value.get(), Vec::<&str>::new());
    }

    #[test]
    fn select_disabled_is_noop() {
        let list = ListBehavior::new(ListInputs::default());
        list.set_items(vec![TestItem::new("a", 0).disabled()]);
        list.select(Some(&"a"));
        assert_eq!(list.value.get(), Vec::<&str>::new());
    }

    #[test]
    fn select_absent_value_is_noop() {
        let list = list_of(&["a"]);
        list.select(Some(&"zzz"));
        assert_eq!(list.value.get(), Vec::<&str>::new());
    }

    #[test]
    fn multi_select_toggles_membership() {
        let list = list_of(&["a", "b"]);
        list.multi.set(true);
        list.select(Some(&"a"));
        list.select(Some(&"b"));
        assert_eq!(list.value.get(), vec!["a", "b"]);
        list.select(Some(&"a"));
        assert_eq!(list.value.get(), vec!["b"]);
    }

    #[test]
    fn deselect_all_empties_both_modes() {
        let single = list_of(&["a", "b"]);
        single.select(Some(&"a"));
        single.deselect_all();
        assert_eq!(single.value.get(), Vec::<&str>::new());

        let multi = list_of(&["a", "b"]);
        multi.multi.set(true);
        multi.select(Some(&"a"));
        multi.select(Some(&"b"));
        multi.deselect_all();
        assert_eq!(multi.value.get(), Vec::<&str>::new());
    }

    #[test]
    fn select_all_multi_only() {
        let list = ListBehavior::new(ListInputs::default());
        list.set_items(vec![
            TestItem::new("a", 0),
            TestItem::new("b", 1).disabled(),
            TestItem::new("c", 2),
        ]);
        list.select_all();
        assert_eq!(list.value.get(), Vec::<&str>::new(), "single mode no-op");
        list.multi.set(true);
        list.select_all();
        assert_eq!(list.value.get(), vec!["a", "c"]);
    }

    #[test]
    fn select_range_spans_anchor_to_active() {
        let list = list_of(&["a", "b", "c", "d"]);
        list.multi.set(true);
        list.goto(&"b", true); // anchor at b
        list.goto(&"d", false);
        list.select_range();
        assert_eq!(list.value.get(), vec!["b", "c", "d"]);
    }

    #[test]
    fn select_range_backwards_and_skipping_disabled() {
        let list = ListBehavior::new(ListInputs::default());
        list.set_items(vec![
            TestItem::new("a", 0),
            TestItem::new("b", 1).disabled(),
            TestItem::new("c", 2),
        ]);
        list.multi.set(true);
        list.goto(&"c", true);
        list.goto(&"a", false);
        list.select_range();
        assert_eq!(list.value.get(), vec!["a", "c"]);
    }

    #[test]
    fn goto_selects_outright() {
        let list = list_of(&["a", "b"]);
        list.selection_mode.set(SelectionMode::Explicit);
        assert!(list.goto(&"b", true));
        assert_eq!(list.value.get(), vec!["b"], "pointer select bypasses mode");
    }

    #[test]
    fn goto_multi_toggles() {
        let list = list_of(&["a", "b"]);
        list.multi.set(true);
        list.goto(&"a", true);
        list.goto(&"a", true);
        assert_eq!(list.value.get(), Vec::<&str>::new());
    }

    #[test]
    fn goto_disabled_is_noop() {
        let list = ListBehavior::new(ListInputs::default());
        list.set_items(vec![TestItem::new("a", 0), TestItem::new("b", 1).disabled()]);
        list.first(false);
        assert!(!list.goto(&"b", false));
        assert_eq!(list.active.get(), Some("a"));
    }

    #[test]
    fn unfocus_clears_active() {
        let list = list_of(&["a"]);
        list.first(false);
        list.unfocus();
        assert_eq!(list.active.get(), None);
    }

    #[test]
    fn set_default_state_prefers_selected() {
        let list = list_of(&["a", "b", "c"]);
        list.select(Some(&"b"));
        list.unfocus();
        assert!(list.set_default_state());
        assert_eq!(list.active.get(), Some("b"));
        assert_eq!(list.value.get(), vec!["b"], "selection untouched");
    }

    #[test]
    fn set_default_state_falls_back_to_first_focusable() {
        let list = ListBehavior::new(ListInputs::default());
        list.set_items(vec![
            TestItem::new("a", 0).disabled(),
            TestItem::new("b", 1),
        ]);
        assert!(list.set_default_state());
        assert_eq!(list.active.get(), Some("b"));
    }

    #[test]
    fn set_items_prunes_stale_state() {
        let list = list_of(&["a", "b"]);
        list.goto(&"b", true);
        list.set_items(vec![TestItem::new("a", 0)]);
        assert_eq!(list.active.get(), None);
        assert_eq!(list.value.get(), Vec::<&str>::new());
    }

    #[test]
    fn tabindex_by_focus_mode() {
        let list = list_of(&["a", "b"]);
        list.first(false);

        assert_eq!(list.tabindex(), -1);
        assert_eq!(list.item_tabindex(&"a"), 0);
        assert_eq!(list.item_tabindex(&"b"), -1);

        list.focus_mode.set(FocusMode::ActiveDescendant);
        assert_eq!(list.tabindex(), 0);
        assert_eq!(list.item_tabindex(&"a"), -1);
    }

    #[test]
    fn activedescendant_only_in_activedescendant_mode() {
        let list = list_of(&["a", "b"]);
        list.first(false);
        assert_eq!(list.activedescendant(), None);

        list.focus_mode.set(FocusMode::ActiveDescendant);
        assert_eq!(list.activedescendant(), Some(ElementId::new(0)));
    }

    #[test]
    fn item_by_element_resolves() {
        let list = list_of(&["a", "b"]);
        let item = list.item_by_element(ElementId::new(1)).unwrap();
        assert_eq!(item.value(), "b");
        assert!(list.item_by_element(ElementId::new(99)).is_none());
    }

    // --- Typeahead ---

    fn typeahead_list() -> ListBehavior<TestItem> {
        list_of(&["alpha", "bravo", "brick", "rho"])
    }

    const STEP: Duration = Duration::from_millis(100);

    #[test]
    fn typeahead_jumps_to_prefix_match() {
        let list = typeahead_list();
        let t = Instant::now();
        list.typeahead('b', t);
        assert_eq!(list.active.get(), Some("bravo"));
    }

    #[test]
    fn typeahead_continued_query_refines_from_anchor() {
        let list = typeahead_list();
        let t = Instant::now();
        list.typeahead('b', t);
        list.typeahead('r', t + STEP);
        list.typeahead('i', t + STEP * 2);
        assert_eq!(list.active.get(), Some("brick"));
    }

    #[test]
    fn typeahead_reset_lands_elsewhere_than_continuation() {
        // Continued "br" from 'b' stays in the b-block; a fresh 'r' after
        // the window jumps to "rho".
        let list = typeahead_list();
        let t = Instant::now();
        list.typeahead('b', t);
        list.typeahead('r', t + STEP);
        assert_eq!(list.active.get(), Some("bravo"));

        let list = typeahead_list();
        let t = Instant::now();
        list.typeahead('b', t);
        list.typeahead('r', t + Duration::from_secs(2));
        assert_eq!(list.active.get(), Some("rho"));
    }

    #[test]
    fn typeahead_searches_after_active_and_wraps() {
        let list = list_of(&["ant", "apple", "axe"]);
        let t = Instant::now();
        list.goto(&"apple", false);
        list.typeahead('a', t);
        assert_eq!(list.active.get(), Some("axe"));
        let list2 = list_of(&["ant", "apple", "axe"]);
        list2.goto(&"axe", false);
        list2.typeahead('a', t);
        assert_eq!(list2.active.get(), Some("ant"), "search wraps");
    }

    #[test]
    fn typeahead_is_case_insensitive() {
        let list = list_of(&["Alpha", "Bravo"]);
        list.typeahead('b', Instant::now());
        assert_eq!(list.active.get(), Some("Bravo"));
    }

    #[test]
    fn typeahead_skips_disabled() {
        let list = ListBehavior::new(ListInputs::default());
        list.set_items(vec![
            TestItem::new("bat", 0).disabled(),
            TestItem::new("bee", 1),
        ]);
        list.typeahead('b', Instant::now());
        assert_eq!(list.active.get(), Some("bee"));
    }

    #[test]
    fn typeahead_no_match_keeps_active() {
        let list = typeahead_list();
        list.first(false);
        assert!(list.typeahead('z', Instant::now()));
        assert_eq!(list.active.get(), Some("alpha"));
    }

    #[test]
    fn typeahead_follows_focus_selection() {
        let list = typeahead_list();
        list.typeahead('r', Instant::now());
        assert_eq!(list.value.get(), vec!["rho"]);

        let explicit = typeahead_list();
        explicit.selection_mode.set(SelectionMode::Explicit);
        explicit.typeahead('r', Instant::now());
        assert_eq!(explicit.value.get(), Vec::<&str>::new());
    }

    #[test]
    fn zero_delay_disables_typeahead() {
        let list = typeahead_list();
        list.typeahead_delay.set(Duration::ZERO);
        assert!(!list.typeahead('b', Instant::now()));
        assert_eq!(list.active.get(), None);
    }

    // --- Properties ---

    /// Item fixture pool for property tests: values are indices.
    #[derive(Debug, Clone)]
    struct PropItem {
        index: usize,
        disabled: bool,
    }

    impl ListItem for PropItem {
        type Value = usize;

        fn value(&self) -> usize {
            self.index
        }

        fn disabled(&self) -> bool {
            self.disabled
        }

        fn element(&self) -> ElementId {
            ElementId::new(self.index as u64)
        }
    }

    fn prop_list(disabled: &[bool]) -> ListBehavior<PropItem> {
        let list = ListBehavior::new(ListInputs::default());
        list.set_items(
            disabled
                .iter()
                .enumerate()
                .map(|(index, &disabled)| PropItem { index, disabled })
                .collect(),
        );
        list
    }

    proptest! {
        /// With wrap, repeated `next` revisits the starting item.
        #[test]
        fn wrapping_next_cycles_back(flags in proptest::collection::vec(any::<bool>(), 1..12)) {
            prop_assume!(flags.iter().any(|d| !d));
            let list = prop_list(&flags);
            list.first(false);
            let start = list.active.get().unwrap();
            let n = flags.len();
            for _ in 0..n {
                list.next(false);
                if list.active.get() == Some(start) {
                    return Ok(());
                }
            }
            prop_assert_eq!(list.active.get(), Some(start));
        }

        /// Without wrap, `next` from the last focusable item is a no-op.
        #[test]
        fn next_at_tail_without_wrap_is_noop(flags in proptest::collection::vec(any::<bool>(), 1..12)) {
            prop_assume!(flags.iter().any(|d| !d));
            let list = prop_list(&flags);
            list.wrap.set(false);
            list.last(false);
            let at_tail = list.active.get();
            prop_assert!(!list.next(false));
            prop_assert_eq!(list.active.get(), at_tail);
        }

        /// Single-selection mode never holds more than one value.
        #[test]
        fn single_selection_cardinality(
            flags in proptest::collection::vec(any::<bool>(), 1..8),
            picks in proptest::collection::vec(any::<proptest::sample::Index>(), 0..16),
        ) {
            let list = prop_list(&flags);
            for pick in picks {
                list.select(Some(&pick.index(flags.len())));
                prop_assert!(list.value.with(Vec::len) <= 1);
            }
        }

        /// Selection followed by deselect_all is always empty.
        #[test]
        fn deselect_all_always_empties(
            flags in proptest::collection::vec(any::<bool>(), 1..8),
            multi in any::<bool>(),
            picks in proptest::collection::vec(any::<proptest::sample::Index>(), 0..8),
        ) {
            let list = prop_list(&flags);
            list.multi.set(multi);
            for pick in picks {
                list.select(Some(&pick.index(flags.len())));
            }
            list.deselect_all();
            prop_assert!(list.value.with(Vec::is_empty));
        }
    }
}
