#![forbid(unsafe_code)]

//! Listbox pattern: single- or multi-select option list.
//!
//! The listbox is the thinnest composite: a [`ListBehavior`] over
//! [`OptionPattern`] items plus the ARIA listbox key/pointer tables.
//! Options are lightweight handles sharing the listbox's active/selection
//! cells, so `option.active()`/`option.selected()` observe the engine
//! without back-references.

use std::time::Instant;

use aria_core::dispatch::{KeyDispatcher, KeyMatch, PointerDispatcher};
use aria_core::event::{
    ElementId, Key, KeyboardEvent, Modifiers, PointerButton, PointerEvent,
};
use aria_core::signal::Signal;

use crate::behaviors::label::LabelControl;
use crate::behaviors::list::{
    FocusMode, ListBehavior, ListInputs, ListItem, Orientation, TextDirection,
};

/// Host-supplied description of one option.
#[derive(Debug, Clone)]
pub struct OptionSpec<V> {
    /// Identifying value, unique within the listbox.
    pub value: V,
    /// Whether the option is disabled.
    pub disabled: bool,
    /// Typeahead search term.
    pub search_term: String,
    /// The option's host element.
    pub element: ElementId,
}

impl<V> OptionSpec<V> {
    /// Create an enabled option with an empty search term.
    #[must_use]
    pub fn new(value: V, element: ElementId) -> Self {
        Self {
            value,
            disabled: false,
            search_term: String::new(),
            element,
        }
    }

    /// Mark the option disabled.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Set the typeahead search term.
    #[must_use]
    pub fn search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }
}

/// Per-option handle exposing the state a host binds onto the option's
/// element.
#[derive(Debug, Clone)]
pub struct OptionPattern<V: Clone + PartialEq + std::fmt::Debug + 'static> {
    value: Signal<V>,
    disabled: Signal<bool>,
    search_term: Signal<String>,
    element: ElementId,
    /// Position within the option sequence at bind time.
    index: usize,
    // Shared cells of the owning listbox.
    active: Signal<Option<V>>,
    selection: Signal<Vec<V>>,
    focus_mode: Signal<FocusMode>,
    count: Signal<usize>,
}

impl<V: Clone + PartialEq + std::fmt::Debug + 'static> OptionPattern<V> {
    /// Whether this option is the listbox's active item.
    #[must_use]
    pub fn active(&self) -> bool {
        self.active.with(|a| a.as_ref() == Some(&self.value.get()))
    }

    /// Whether this option is selected.
    #[must_use]
    pub fn selected(&self) -> bool {
        self.selection.with(|s| s.contains(&self.value.get()))
    }

    /// Whether this option is disabled.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled.get()
    }

    /// The option's host element.
    #[must_use]
    pub fn id(&self) -> ElementId {
        self.element
    }

    /// 1-based position for `aria-posinset`.
    #[must_use]
    pub fn posinset(&self) -> usize {
        self.index + 1
    }

    /// Total option count for `aria-setsize`.
    #[must_use]
    pub fn setsize(&self) -> usize {
        self.count.get()
    }

    /// Tabindex for the option's element.
    #[must_use]
    pub fn tabindex(&self) -> i8 {
        match self.focus_mode.get() {
            FocusMode::ActiveDescendant => -1,
            FocusMode::RovingTabindex => {
                if self.active() {
                    0
                } else {
                    -1
                }
            }
        }
    }
}

impl<V: Clone + PartialEq + std::fmt::Debug + 'static> ListItem for OptionPattern<V> {
    type Value = V;

    fn value(&self) -> V {
        self.value.get()
    }

    fn disabled(&self) -> bool {
        self.disabled.get()
    }

    fn search_term(&self) -> String {
        self.search_term.get()
    }

    fn element(&self) -> ElementId {
        self.element
    }
}

/// Construction-time inputs for a [`ListboxPattern`].
#[derive(Debug, Clone)]
pub struct ListboxInputs {
    /// The listbox container element.
    pub element: ElementId,
    /// List engine configuration.
    pub list: ListInputs,
}

impl ListboxInputs {
    /// Inputs with default list configuration.
    #[must_use]
    pub fn new(element: ElementId) -> Self {
        Self {
            element,
            list: ListInputs::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyAction {
    Next,
    Prev,
    ExtendNext,
    ExtendPrev,
    First,
    Last,
    SelectAll,
    SelectActive,
    Typeahead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PointerAction {
    Goto,
    ExtendTo,
}

/// Listbox interaction pattern.
#[derive(Debug, Clone)]
pub struct ListboxPattern<V: Clone + PartialEq + std::fmt::Debug + 'static> {
    /// The underlying list engine (active item, selection, typeahead).
    pub list: ListBehavior<OptionPattern<V>>,
    /// Labelling for the container element.
    pub label: LabelControl,
    element: ElementId,
    count: Signal<usize>,
}

impl<V: Clone + PartialEq + std::fmt::Debug + 'static> ListboxPattern<V> {
    /// Create an empty listbox.
    #[must_use]
    pub fn new(inputs: ListboxInputs) -> Self {
        Self {
            list: ListBehavior::new(inputs.list),
            label: LabelControl::new(),
            element: inputs.element,
            count: Signal::new(0),
        }
    }

    /// Rebind the option sequence.
    pub fn set_options(&self, specs: impl IntoIterator<Item = OptionSpec<V>>) {
        let options: Vec<OptionPattern<V>> = specs
            .into_iter()
            .enumerate()
            .map(|(index, spec)| OptionPattern {
                value: Signal::new(spec.value),
                disabled: Signal::new(spec.disabled),
                search_term: Signal::new(spec.search_term),
                element: spec.element,
                index,
                active: self.list.active.clone(),
                selection: self.list.value.clone(),
                focus_mode: self.list.focus_mode.clone(),
                count: self.count.clone(),
            })
            .collect();
        self.count.set(options.len());
        self.list.set_items(options);
    }

    /// Handles to the current options.
    #[must_use]
    pub fn options(&self) -> Vec<OptionPattern<V>> {
        self.list.items.get()
    }

    /// Handle to the option carrying `value`.
    #[must_use]
    pub fn option(&self, value: &V) -> Option<OptionPattern<V>> {
        self.list.item(value)
    }

    /// The container element.
    #[must_use]
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Tabindex for the container element.
    #[must_use]
    pub fn tabindex(&self) -> i8 {
        self.list.tabindex()
    }

    /// `aria-activedescendant` reference for the container.
    #[must_use]
    pub fn activedescendant(&self) -> Option<ElementId> {
        self.list.activedescendant()
    }

    /// `aria-multiselectable` value for the container.
    #[must_use]
    pub fn multiselectable(&self) -> bool {
        self.list.multi.get()
    }

    /// Activate the first selected focusable option, else the first
    /// focusable option.
    pub fn set_default_state(&self) {
        self.list.set_default_state();
    }

    /// Forward a keydown event. Returns whether it was handled.
    pub fn on_keydown(&self, event: &KeyboardEvent) -> bool {
        self.on_keydown_at(event, Instant::now())
    }

    /// Forward a keydown event with an explicit timestamp (drives the
    /// typeahead window deterministically).
    pub fn on_keydown_at(&self, event: &KeyboardEvent, now: Instant) -> bool {
        if self.list.disabled.get() {
            return false;
        }
        let Some(action) = self.keydown_rules().handle(event) else {
            return false;
        };
        match action {
            KeyAction::Next => {
                self.list.next(true);
            }
            KeyAction::Prev => {
                self.list.prev(true);
            }
            KeyAction::ExtendNext => {
                if self.list.next(false) {
                    self.list.select_range();
                }
            }
            KeyAction::ExtendPrev => {
                if self.list.prev(false) {
                    self.list.select_range();
                }
            }
            KeyAction::First => {
                self.list.first(true);
            }
            KeyAction::Last => {
                self.list.last(true);
            }
            KeyAction::SelectAll => self.list.select_all(),
            KeyAction::SelectActive => self.list.select(None),
            KeyAction::Typeahead => {
                if let Some(c) = event.key.as_char() {
                    self.list.typeahead(c, now);
                }
            }
        }
        true
    }

    /// Forward a pointerdown event. Returns whether it was handled.
    pub fn on_pointerdown(&self, event: &PointerEvent) -> bool {
        if self.list.disabled.get() {
            return false;
        }
        let Some(target) = event.target else {
            return false;
        };
        let Some(option) = self.list.item_by_element(target) else {
            return false;
        };
        let Some(action) = self.pointer_rules().handle(event) else {
            return false;
        };
        let value = option.value();
        match action {
            PointerAction::Goto => {
                self.list.goto(&value, true);
            }
            PointerAction::ExtendTo => {
                if self.list.goto(&value, false) {
                    self.list.select_range();
                }
            }
        }
        true
    }

    fn keydown_rules(&self) -> KeyDispatcher<KeyAction> {
        let (next_key, prev_key) = navigation_keys(
            self.list.orientation.get(),
            self.list.text_direction.get(),
        );
        let multi = self.list.multi.get();

        let mut rules = KeyDispatcher::new();
        rules.on_key(next_key, KeyAction::Next);
        rules.on_key(prev_key, KeyAction::Prev);
        if multi {
            rules.on(Modifiers::SHIFT, KeyMatch::Key(next_key), KeyAction::ExtendNext);
            rules.on(Modifiers::SHIFT, KeyMatch::Key(prev_key), KeyAction::ExtendPrev);
            rules.on(
                Modifiers::CTRL,
                KeyMatch::Key(Key::Char('a')),
                KeyAction::SelectAll,
            );
        }
        rules.on_key(Key::Home, KeyAction::First);
        rules.on_key(Key::End, KeyAction::Last);
        rules.on_key(Key::Enter, KeyAction::SelectActive);
        // Space before the catch-all character rule so it selects rather
        // than feeding typeahead.
        rules.on_key(Key::Char(' '), KeyAction::SelectActive);
        if !self.list.typeahead_delay.get().is_zero() {
            rules.on(Modifiers::NONE, KeyMatch::AnyChar, KeyAction::Typeahead);
        }
        rules
    }

    fn pointer_rules(&self) -> PointerDispatcher<PointerAction> {
        let mut rules = PointerDispatcher::new();
        if self.list.multi.get() {
            rules.on(PointerButton::Primary, Modifiers::SHIFT, PointerAction::ExtendTo);
            rules.on(PointerButton::Primary, Modifiers::CTRL, PointerAction::Goto);
        }
        rules.on(PointerButton::Primary, Modifiers::NONE, PointerAction::Goto);
        rules
    }
}

/// Resolve the forward/backward navigation keys for the current axis and
/// direction.
pub(crate) fn navigation_keys(
    orientation: Orientation,
    direction: TextDirection,
) -> (Key, Key) {
    match (orientation, direction) {
        (Orientation::Vertical, _) => (Key::Down, Key::Up),
        (Orientation::Horizontal, TextDirection::Ltr) => (Key::Right, Key::Left),
        (Orientation::Horizontal, TextDirection::Rtl) => (Key::Left, Key::Right),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behaviors::list::SelectionMode;
    use std::time::Duration;

    fn listbox(values: &[&'static str]) -> ListboxPattern<&'static str> {
        let lb = ListboxPattern::new(ListboxInputs::new(ElementId::new(100)));
        lb.set_options(
            values
                .iter()
                .enumerate()
                .map(|(i, v)| OptionSpec::new(*v, ElementId::new(i as u64)).search_term(*v)),
        );
        lb
    }

    fn key(k: Key) -> KeyboardEvent {
        KeyboardEvent::new(k)
    }

    #[test]
    fn arrow_navigation_vertical() {
        let lb = listbox(&["a", "b", "c"]);
        lb.set_default_state();
        assert!(lb.on_keydown(&key(Key::Down)));
        assert_eq!(lb.list.active.get(), Some("b"));
        assert!(lb.on_keydown(&key(Key::Up)));
        assert_eq!(lb.list.active.get(), Some("a"));
    }

    #[test]
    fn horizontal_axis_follows_direction() {
        let lb = listbox(&["a", "b"]);
        lb.list.orientation.set(Orientation::Horizontal);
        lb.set_default_state();

        lb.on_keydown(&key(Key::Right));
        assert_eq!(lb.list.active.get(), Some("b"));

        lb.list.text_direction.set(TextDirection::Rtl);
        lb.on_keydown(&key(Key::Right));
        assert_eq!(lb.list.active.get(), Some("a"), "rtl swaps the arrows");

        // The vertical arrows are unbound on a horizontal listbox.
        assert!(!lb.on_keydown(&key(Key::Down)));
    }

    #[test]
    fn navigation_selects_when_following_focus() {
        let lb = listbox(&["a", "b"]);
        lb.set_default_state();
        lb.on_keydown(&key(Key::Down));
        assert_eq!(lb.list.value.get(), vec!["b"]);
    }

    #[test]
    fn navigation_leaves_selection_in_explicit_mode() {
        let lb = listbox(&["a", "b"]);
        lb.list.selection_mode.set(SelectionMode::Explicit);
        lb.set_default_state();
        lb.on_keydown(&key(Key::Down));
        assert_eq!(lb.list.value.get(), Vec::<&str>::new());
        lb.on_keydown(&key(Key::Enter));
        assert_eq!(lb.list.value.get(), vec!["b"]);
    }

    #[test]
    fn home_end_jump_to_edges() {
        let lb = listbox(&["a", "b", "c"]);
        lb.on_keydown(&key(Key::End));
        assert_eq!(lb.list.active.get(), Some("c"));
        lb.on_keydown(&key(Key::Home));
        assert_eq!(lb.list.active.get(), Some("a"));
    }

    #[test]
    fn space_selects_instead_of_typeahead() {
        let lb = listbox(&["a", "b"]);
        lb.list.selection_mode.set(SelectionMode::Explicit);
        lb.set_default_state();
        lb.on_keydown(&key(Key::Char(' ')));
        assert_eq!(lb.list.value.get(), vec!["a"]);
    }

    #[test]
    fn characters_feed_typeahead() {
        let lb = listbox(&["apple", "banana", "cherry"]);
        let t = Instant::now();
        lb.on_keydown_at(&key(Key::Char('c')), t);
        assert_eq!(lb.list.active.get(), Some("cherry"));
    }

    #[test]
    fn typeahead_window_resets_between_queries() {
        let lb = listbox(&["bat", "bar", "cat"]);
        let t = Instant::now();
        lb.on_keydown_at(&key(Key::Char('b')), t);
        lb.on_keydown_at(&key(Key::Char('a')), t + Duration::from_millis(100));
        lb.on_keydown_at(&key(Key::Char('r')), t + Duration::from_millis(200));
        assert_eq!(lb.list.active.get(), Some("bar"));

        lb.on_keydown_at(&key(Key::Char('c')), t + Duration::from_secs(3));
        assert_eq!(lb.list.active.get(), Some("cat"));
    }

    #[test]
    fn shift_arrow_extends_range_in_multi() {
        let lb = listbox(&["a", "b", "c"]);
        lb.list.multi.set(true);
        lb.set_default_state();
        lb.list.select(Some(&"a"));
        lb.on_keydown(&key(Key::Down).with_modifiers(Modifiers::SHIFT));
        lb.on_keydown(&key(Key::Down).with_modifiers(Modifiers::SHIFT));
        assert_eq!(lb.list.value.get(), vec!["a", "b", "c"]);
    }

    #[test]
    fn shift_arrow_unbound_in_single_mode() {
        let lb = listbox(&["a", "b"]);
        lb.set_default_state();
        assert!(!lb.on_keydown(&key(Key::Down).with_modifiers(Modifiers::SHIFT)));
    }

    #[test]
    fn ctrl_a_selects_all_in_multi() {
        let lb = listbox(&["a", "b", "c"]);
        lb.list.multi.set(true);
        lb.on_keydown(&key(Key::Char('a')).with_modifiers(Modifiers::CTRL));
        assert_eq!(lb.list.value.get(), vec!["a", "b", "c"]);
    }

    #[test]
    fn disabled_listbox_handles_nothing() {
        let lb = listbox(&["a"]);
        lb.list.disabled.set(true);
        assert!(!lb.on_keydown(&key(Key::Down)));
        assert!(!lb.on_pointerdown(&PointerEvent::primary(Some(ElementId::new(0)))));
        assert_eq!(lb.list.active.get(), None);
    }

    #[test]
    fn pointerdown_focuses_and_selects() {
        let lb = listbox(&["a", "b"]);
        let handled = lb.on_pointerdown(&PointerEvent::primary(Some(ElementId::new(1))));
        assert!(handled);
        assert_eq!(lb.list.active.get(), Some("b"));
        assert_eq!(lb.list.value.get(), vec!["b"]);
    }

    #[test]
    fn pointerdown_elsewhere_is_unhandled() {
        let lb = listbox(&["a"]);
        assert!(!lb.on_pointerdown(&PointerEvent::primary(None)));
        assert!(!lb.on_pointerdown(&PointerEvent::primary(Some(ElementId::new(999)))));
    }

    #[test]
    fn shift_click_selects_range() {
        let lb = listbox(&["a", "b", "c", "d"]);
        lb.list.multi.set(true);
        lb.on_pointerdown(&PointerEvent::primary(Some(ElementId::new(0))));
        let shift_click =
            PointerEvent::primary(Some(ElementId::new(2))).with_modifiers(Modifiers::SHIFT);
        lb.on_pointerdown(&shift_click);
        assert_eq!(lb.list.value.get(), vec!["a", "b", "c"]);
    }

    #[test]
    fn option_handles_observe_state() {
        let lb = listbox(&["a", "b"]);
        let a = lb.option(&"a").unwrap();
        let b = lb.option(&"b").unwrap();

        lb.set_default_state();
        assert!(a.active());
        assert!(!b.active());
        assert_eq!(a.tabindex(), 0);
        assert_eq!(b.tabindex(), -1);

        lb.on_keydown(&key(Key::Down));
        assert!(b.active());
        assert!(b.selected());
        assert_eq!(a.tabindex(), -1);
    }

    #[test]
    fn option_set_position() {
        let lb = listbox(&["a", "b", "c"]);
        let b = lb.option(&"b").unwrap();
        assert_eq!(b.posinset(), 2);
        assert_eq!(b.setsize(), 3);
    }

    #[test]
    fn activedescendant_mode_pins_option_tabindex() {
        let lb = listbox(&["a"]);
        lb.list.focus_mode.set(FocusMode::ActiveDescendant);
        lb.set_default_state();
        let a = lb.option(&"a").unwrap();
        assert_eq!(lb.tabindex(), 0);
        assert_eq!(a.tabindex(), -1);
        assert_eq!(lb.activedescendant(), Some(ElementId::new(0)));
    }

    #[test]
    fn unhandled_keys_fall_through() {
        let lb = listbox(&["a"]);
        assert!(!lb.on_keydown(&key(Key::Escape)));
        assert!(!lb.on_keydown(&key(Key::Tab)));
    }
}
