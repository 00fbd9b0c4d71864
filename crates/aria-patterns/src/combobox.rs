#![forbid(unsafe_code)]

//! Combobox pattern: a text input controlling a popup listbox or tree.
//!
//! The combobox never owns the popup's items; it coordinates open/close
//! and delegates navigation through the [`ComboboxPopup`] capability, so
//! the input element keeps real focus while the popup's active item
//! advances (`aria-activedescendant` wiring).
//!
//! Filtering is the host's concern: `on_input` records the search string
//! and opens the popup, and the host re-derives the popup's items
//! whenever [`ComboboxPattern::search_string`] changes. Closing never
//! clears the search string.

use aria_core::event::{ElementId, Key, KeyboardEvent, Modifiers, PointerButton, PointerEvent};
use aria_core::signal::Signal;

use crate::behaviors::label::LabelControl;
use crate::behaviors::list::ListItem;
use crate::listbox::ListboxPattern;

/// Navigation surface a popup exposes to its owning combobox.
///
/// Implemented by [`ListboxPattern`] and by the combobox tree; all
/// methods are driven by direct calls from the combobox rather than by
/// events reaching the popup itself.
pub trait ComboboxPopup {
    /// Move to the first focusable item. Returns whether anything moved.
    fn focus_first(&self) -> bool;
    /// Move to the last focusable item.
    fn focus_last(&self) -> bool;
    /// Move forward.
    fn focus_next(&self) -> bool;
    /// Move backward.
    fn focus_prev(&self) -> bool;
    /// Move to the first selected focusable item, else the first
    /// focusable item.
    fn focus_default(&self) -> bool;
    /// Clear the active item.
    fn clear_active(&self);
    /// Whether an item is active.
    fn has_active(&self) -> bool;
    /// Element of the active item, for `aria-activedescendant`.
    fn active_element(&self) -> Option<ElementId>;
    /// Commit the active item as the popup's selection.
    fn select_active(&self);
    /// Whether `element` belongs to this popup.
    fn contains(&self, element: ElementId) -> bool;
    /// Focus and select the item bound to `element`. Returns whether the
    /// element resolved to an item.
    fn commit_element(&self, element: ElementId) -> bool;

    /// Expand the active item (tree popups). `false` when unsupported or
    /// nothing changed.
    fn expand_active(&self) -> bool {
        false
    }

    /// Collapse the active item (tree popups).
    fn collapse_active(&self) -> bool {
        false
    }
}

/// When the combobox commits the popup's active item as its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionStrategy {
    /// Commit only on Enter or click (default).
    #[default]
    Manual,
    /// Additionally commit on every navigation step.
    AutoSelect,
}

/// Construction-time inputs for a [`ComboboxPattern`].
#[derive(Debug, Clone)]
pub struct ComboboxInputs {
    /// The text input element the combobox is anchored to.
    pub input_element: ElementId,
    /// Commit strategy.
    pub selection_strategy: SelectionStrategy,
}

impl ComboboxInputs {
    /// Manual-commit inputs.
    #[must_use]
    pub fn new(input_element: ElementId) -> Self {
        Self {
            input_element,
            selection_strategy: SelectionStrategy::default(),
        }
    }

    /// Use auto-select commits.
    #[must_use]
    pub fn auto_select(mut self) -> Self {
        self.selection_strategy = SelectionStrategy::AutoSelect;
        self
    }
}

/// Combobox interaction pattern over a popup `P`.
#[derive(Debug, Clone)]
pub struct ComboboxPattern<P: ComboboxPopup> {
    /// Whether the popup is open.
    pub expanded: Signal<bool>,
    /// The input element (externally owned).
    pub input_element: Signal<ElementId>,
    /// The current search text. Survives close.
    pub search_string: Signal<String>,
    /// Commit strategy.
    pub selection_strategy: Signal<SelectionStrategy>,
    /// Whether the combobox is disabled.
    pub disabled: Signal<bool>,
    /// Labelling for the input element.
    pub label: LabelControl,
    popup: P,
}

impl<P: ComboboxPopup> ComboboxPattern<P> {
    /// Create a closed combobox controlling `popup`.
    #[must_use]
    pub fn new(inputs: ComboboxInputs, popup: P) -> Self {
        Self {
            expanded: Signal::new(false),
            input_element: Signal::new(inputs.input_element),
            search_string: Signal::new(String::new()),
            selection_strategy: Signal::new(inputs.selection_strategy),
            disabled: Signal::new(false),
            label: LabelControl::new(),
            popup,
        }
    }

    /// The controlled popup.
    #[must_use]
    pub fn popup(&self) -> &P {
        &self.popup
    }

    /// Whether the popup is open.
    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.expanded.get()
    }

    /// `aria-activedescendant` reference for the input element.
    #[must_use]
    pub fn activedescendant(&self) -> Option<ElementId> {
        if self.expanded.get() {
            self.popup.active_element()
        } else {
            None
        }
    }

    /// Open the popup, focusing its default item.
    pub fn open(&self) {
        if self.disabled.get() || self.expanded.get() {
            return;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!("combobox open");
        self.expanded.set(true);
        if !self.popup.has_active() {
            self.popup.focus_default();
        }
        if self.selection_strategy.get() == SelectionStrategy::AutoSelect
            && self.popup.has_active()
        {
            self.popup.select_active();
        }
    }

    /// Close the popup. The search string is preserved.
    pub fn close(&self) {
        if !self.expanded.get() {
            return;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!("combobox close");
        self.expanded.set(false);
        self.popup.clear_active();
    }

    /// The host's input element received focus.
    pub fn on_focus(&self) {
        self.open();
    }

    /// The host's input text changed.
    ///
    /// Records the search string and opens the popup; re-filtering the
    /// popup's items against the new text is the host's job.
    pub fn on_input(&self, text: impl Into<String>) {
        if self.disabled.get() {
            return;
        }
        self.search_string.set(text.into());
        self.open();
    }

    /// Focus the popup's default item if it is open.
    pub fn set_default_state(&self) {
        if self.expanded.get() && !self.popup.has_active() {
            self.popup.focus_default();
        }
    }

    /// Forward a keydown from the input element. Returns whether the
    /// combobox claimed the key; unclaimed keys (characters, unhandled
    /// arrows) belong to the input element itself.
    pub fn on_keydown(&self, event: &KeyboardEvent) -> bool {
        if self.disabled.get() || event.modifiers != Modifiers::NONE {
            return false;
        }
        if !self.expanded.get() {
            return match event.key {
                Key::Down => {
                    self.open();
                    true
                }
                Key::Up => {
                    self.open();
                    self.navigate(|p| p.focus_last());
                    true
                }
                _ => false,
            };
        }
        match event.key {
            Key::Down => {
                self.navigate(|p| p.focus_next());
                true
            }
            Key::Up => {
                self.navigate(|p| p.focus_prev());
                true
            }
            Key::Home => {
                self.navigate(|p| p.focus_first());
                true
            }
            Key::End => {
                self.navigate(|p| p.focus_last());
                true
            }
            Key::Enter => {
                if self.popup.has_active() {
                    self.popup.select_active();
                }
                self.close();
                true
            }
            Key::Escape => {
                self.close();
                true
            }
            // The perpendicular axis drives tree popups; a listbox popup
            // reports no change and the key falls through to the input's
            // caret handling.
            Key::Right => self.popup.expand_active(),
            Key::Left => self.popup.collapse_active(),
            _ => false,
        }
    }

    /// Forward a pointerdown. An outside press closes the popup but is
    /// reported unhandled so other components still see it.
    pub fn on_pointerdown(&self, event: &PointerEvent) -> bool {
        if self.disabled.get() || event.button != PointerButton::Primary {
            return false;
        }
        match event.target {
            Some(target) if target == self.input_element.get() => {
                self.open();
                true
            }
            Some(target) if self.popup.contains(target) => {
                if self.popup.commit_element(target) {
                    self.close();
                }
                true
            }
            _ => {
                self.close();
                false
            }
        }
    }

    fn navigate(&self, step: impl FnOnce(&P) -> bool) {
        if step(&self.popup) && self.selection_strategy.get() == SelectionStrategy::AutoSelect {
            self.popup.select_active();
        }
    }
}

impl<V: Clone + PartialEq + std::fmt::Debug + 'static> ComboboxPopup for ListboxPattern<V> {
    fn focus_first(&self) -> bool {
        self.list.first(false)
    }

    fn focus_last(&self) -> bool {
        self.list.last(false)
    }

    fn focus_next(&self) -> bool {
        self.list.next(false)
    }

    fn focus_prev(&self) -> bool {
        self.list.prev(false)
    }

    fn focus_default(&self) -> bool {
        self.list.set_default_state()
    }

    fn clear_active(&self) {
        self.list.unfocus();
    }

    fn has_active(&self) -> bool {
        self.list.active.with(Option::is_some)
    }

    fn active_element(&self) -> Option<ElementId> {
        self.list.active_item().map(|option| option.element())
    }

    fn select_active(&self) {
        self.list.select(None);
    }

    fn contains(&self, element: ElementId) -> bool {
        element == self.element() || self.list.item_by_element(element).is_some()
    }

    fn commit_element(&self, element: ElementId) -> bool {
        match self.list.item_by_element(element) {
            Some(option) => {
                use crate::behaviors::list::ListItem;
                self.list.goto(&option.value(), true)
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behaviors::list::FocusMode;
    use crate::listbox::{ListboxInputs, OptionSpec};

    const INPUT: ElementId = ElementId::new(500);

    fn combobox(strategy: SelectionStrategy) -> ComboboxPattern<ListboxPattern<&'static str>> {
        let popup = ListboxPattern::new(ListboxInputs::new(ElementId::new(400)));
        popup.list.focus_mode.set(FocusMode::ActiveDescendant);
        popup.set_options(
            ["ash", "beech", "cedar"]
                .iter()
                .enumerate()
                .map(|(i, v)| OptionSpec::new(*v, ElementId::new(i as u64)).search_term(*v)),
        );
        let inputs = ComboboxInputs {
            input_element: INPUT,
            selection_strategy: strategy,
        };
        ComboboxPattern::new(inputs, popup)
    }

    fn key(k: Key) -> KeyboardEvent {
        KeyboardEvent::new(k)
    }

    #[test]
    fn starts_closed() {
        let cb = combobox(SelectionStrategy::Manual);
        assert!(!cb.is_expanded());
        assert_eq!(cb.activedescendant(), None);
    }

    #[test]
    fn arrow_down_opens_and_focuses_first() {
        let cb = combobox(SelectionStrategy::Manual);
        assert!(cb.on_keydown(&key(Key::Down)));
        assert!(cb.is_expanded());
        assert_eq!(cb.popup().list.active.get(), Some("ash"));
        assert_eq!(cb.activedescendant(), Some(ElementId::new(0)));
    }

    #[test]
    fn arrow_up_opens_at_last() {
        let cb = combobox(SelectionStrategy::Manual);
        cb.on_keydown(&key(Key::Up));
        assert!(cb.is_expanded());
        assert_eq!(cb.popup().list.active.get(), Some("cedar"));
    }

    #[test]
    fn input_opens_and_records_search() {
        let cb = combobox(SelectionStrategy::Manual);
        cb.on_input("be");
        assert!(cb.is_expanded());
        assert_eq!(cb.search_string.get(), "be");
    }

    #[test]
    fn open_prefers_selected_item() {
        let cb = combobox(SelectionStrategy::Manual);
        cb.popup().list.select(Some(&"beech"));
        cb.open();
        assert_eq!(cb.popup().list.active.get(), Some("beech"));
    }

    #[test]
    fn manual_mode_commits_only_on_enter() {
        let cb = combobox(SelectionStrategy::Manual);
        cb.open();
        cb.on_keydown(&key(Key::Down));
        assert_eq!(cb.popup().list.value.get(), Vec::<&str>::new());

        cb.on_keydown(&key(Key::Enter));
        assert_eq!(cb.popup().list.value.get(), vec!["beech"]);
        assert!(!cb.is_expanded(), "enter commits and closes");
    }

    #[test]
    fn auto_select_commits_every_step() {
        let cb = combobox(SelectionStrategy::AutoSelect);
        cb.open();
        assert_eq!(cb.popup().list.value.get(), vec!["ash"]);
        cb.on_keydown(&key(Key::Down));
        assert_eq!(cb.popup().list.value.get(), vec!["beech"]);
        assert!(cb.is_expanded(), "auto commit does not close");
    }

    #[test]
    fn escape_closes_and_clears_active() {
        let cb = combobox(SelectionStrategy::Manual);
        cb.open();
        cb.on_keydown(&key(Key::Down));
        assert!(cb.on_keydown(&key(Key::Escape)));
        assert!(!cb.is_expanded());
        assert!(!cb.popup().has_active());
    }

    #[test]
    fn closing_preserves_search_string() {
        let cb = combobox(SelectionStrategy::Manual);
        cb.on_input("ce");
        cb.close();
        assert_eq!(cb.search_string.get(), "ce");
    }

    #[test]
    fn home_end_jump_in_popup() {
        let cb = combobox(SelectionStrategy::Manual);
        cb.open();
        cb.on_keydown(&key(Key::End));
        assert_eq!(cb.popup().list.active.get(), Some("cedar"));
        cb.on_keydown(&key(Key::Home));
        assert_eq!(cb.popup().list.active.get(), Some("ash"));
    }

    #[test]
    fn characters_fall_through_to_the_input() {
        let cb = combobox(SelectionStrategy::Manual);
        cb.open();
        assert!(!cb.on_keydown(&key(Key::Char('b'))));
        assert_eq!(cb.popup().list.active.get(), Some("ash"));
    }

    #[test]
    fn horizontal_arrows_fall_through_for_listbox_popup() {
        let cb = combobox(SelectionStrategy::Manual);
        cb.open();
        assert!(!cb.on_keydown(&key(Key::Right)));
        assert!(!cb.on_keydown(&key(Key::Left)));
    }

    #[test]
    fn outside_pointerdown_closes_unclaimed() {
        let cb = combobox(SelectionStrategy::Manual);
        cb.open();
        assert!(!cb.on_pointerdown(&PointerEvent::primary(None)));
        assert!(!cb.is_expanded());
    }

    #[test]
    fn input_pointerdown_opens() {
        let cb = combobox(SelectionStrategy::Manual);
        assert!(cb.on_pointerdown(&PointerEvent::primary(Some(INPUT))));
        assert!(cb.is_expanded());
    }

    #[test]
    fn option_click_commits_and_closes() {
        let cb = combobox(SelectionStrategy::Manual);
        cb.open();
        assert!(cb.on_pointerdown(&PointerEvent::primary(Some(ElementId::new(1)))));
        assert_eq!(cb.popup().list.value.get(), vec!["beech"]);
        assert!(!cb.is_expanded());
    }

    #[test]
    fn disabled_combobox_is_inert() {
        let cb = combobox(SelectionStrategy::Manual);
        cb.disabled.set(true);
        assert!(!cb.on_keydown(&key(Key::Down)));
        cb.on_input("x");
        cb.open();
        assert!(!cb.is_expanded());
        assert_eq!(cb.search_string.get(), "");
    }

    #[test]
    fn enter_with_no_active_just_closes() {
        let cb = combobox(SelectionStrategy::Manual);
        cb.open();
        cb.popup().clear_active();
        assert!(cb.on_keydown(&key(Key::Enter)));
        assert!(!cb.is_expanded());
        assert_eq!(cb.popup().list.value.get(), Vec::<&str>::new());
    }
}
