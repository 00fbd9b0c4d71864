#![forbid(unsafe_code)]

//! Tabs pattern: tablist, tabs, and tab panels.
//!
//! A tablist is a single-select list over [`TabPattern`] items composed
//! with a single-expansion [`ExpansionBehavior`] keyed by tab value, wired
//! so exactly the selected tab is expanded and each panel's `hidden` is
//! the negation of its tab's expansion.

use aria_core::dispatch::KeyDispatcher;
use aria_core::event::{ElementId, Key, KeyboardEvent, PointerButton, PointerEvent};
use aria_core::signal::Signal;
use std::fmt;
use std::time::Duration;

use crate::behaviors::expansion::{ExpansionBehavior, ExpansionControl};
use crate::behaviors::list::{
    FocusMode, ListBehavior, ListInputs, ListItem, Orientation, SelectionMode, TextDirection,
};
use crate::listbox::navigation_keys;

/// Host-supplied description of one tab.
#[derive(Debug, Clone)]
pub struct TabSpec<V> {
    /// Identifying value, unique within the tablist.
    pub value: V,
    /// Whether the tab is disabled.
    pub disabled: bool,
    /// The tab's host element.
    pub element: ElementId,
}

impl<V> TabSpec<V> {
    /// Create an enabled tab.
    #[must_use]
    pub fn new(value: V, element: ElementId) -> Self {
        Self {
            value,
            disabled: false,
            element,
        }
    }

    /// Mark the tab disabled.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// Per-tab handle exposing the state a host binds onto the tab element.
#[derive(Debug, Clone)]
pub struct TabPattern<V: Clone + PartialEq + fmt::Debug + 'static> {
    value: Signal<V>,
    disabled: Signal<bool>,
    element: ElementId,
    index: usize,
    expansion: ExpansionControl<V>,
    // Shared cells of the owning tablist.
    active: Signal<Option<V>>,
    selection: Signal<Vec<V>>,
    focus_mode: Signal<FocusMode>,
}

impl<V: Clone + PartialEq + fmt::Debug + 'static> TabPattern<V> {
    /// Whether this tab is the tablist's active item.
    #[must_use]
    pub fn active(&self) -> bool {
        self.active.with(|a| a.as_ref() == Some(&self.value.get()))
    }

    /// Whether this tab is selected.
    #[must_use]
    pub fn selected(&self) -> bool {
        self.selection.with(|s| s.contains(&self.value.get()))
    }

    /// Whether this tab's panel is shown. Mirrors [`selected`](Self::selected).
    #[must_use]
    pub fn expanded(&self) -> bool {
        self.expansion.is_expanded()
    }

    /// Whether this tab is disabled.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled.get()
    }

    /// The tab's host element.
    #[must_use]
    pub fn id(&self) -> ElementId {
        self.element
    }

    /// 1-based position for `aria-posinset`.
    #[must_use]
    pub fn posinset(&self) -> usize {
        self.index + 1
    }

    /// Tabindex for the tab element.
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

impl<V: Clone + PartialEq + fmt::Debug + 'static> ListItem for TabPattern<V> {
    type Value = V;

    fn value(&self) -> V {
        self.value.get()
    }

    fn disabled(&self) -> bool {
        self.disabled.get()
    }

    fn element(&self) -> ElementId {
        self.element
    }
}

/// Panel paired with a tab; `hidden` is the negation of the tab's
/// expansion.
#[derive(Debug, Clone)]
pub struct TabPanelPattern<V: Clone + PartialEq + fmt::Debug + 'static> {
    tab_value: V,
    element: ElementId,
    expansion: ExpansionBehavior<V>,
}

impl<V: Clone + PartialEq + fmt::Debug + 'static> TabPanelPattern<V> {
    /// The panel's host element.
    #[must_use]
    pub fn id(&self) -> ElementId {
        self.element
    }

    /// The value of the tab controlling this panel.
    #[must_use]
    pub fn tab_value(&self) -> &V {
        &self.tab_value
    }

    /// Whether the panel is hidden.
    #[must_use]
    pub fn hidden(&self) -> bool {
        !self.expansion.is_expanded(&self.tab_value)
    }
}

/// Construction-time inputs for a [`TabListPattern`].
#[derive(Debug, Clone)]
pub struct TabListInputs {
    /// The tablist container element.
    pub element: ElementId,
    /// Whether the whole tablist is disabled.
    pub disabled: bool,
    /// Whether navigation wraps.
    pub wrap: bool,
    /// Main navigation axis (tabs are usually horizontal).
    pub orientation: Orientation,
    /// Text direction.
    pub text_direction: TextDirection,
    /// Focus strategy.
    pub focus_mode: FocusMode,
    /// Whether arrow navigation also selects (`FollowFocus`) or selection
    /// waits for Space/Enter (`Explicit`).
    pub selection_mode: SelectionMode,
}

impl TabListInputs {
    /// Horizontal, wrapping, follow-focus tablist.
    #[must_use]
    pub fn new(element: ElementId) -> Self {
        Self {
            element,
            disabled: false,
            wrap: true,
            orientation: Orientation::Horizontal,
            text_direction: TextDirection::default(),
            focus_mode: FocusMode::default(),
            selection_mode: SelectionMode::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyAction {
    Next,
    Prev,
    First,
    Last,
    SelectActive,
}

/// Tablist interaction pattern.
#[derive(Debug, Clone)]
pub struct TabListPattern<V: Clone + PartialEq + fmt::Debug + 'static> {
    /// The underlying list engine. Single-select, typeahead disabled.
    pub list: ListBehavior<TabPattern<V>>,
    /// Single-expansion state mirroring the selected tab.
    pub expansion: ExpansionBehavior<V>,
    element: ElementId,
}

impl<V: Clone + PartialEq + fmt::Debug + 'static> TabListPattern<V> {
    /// Create an empty tablist.
    #[must_use]
    pub fn new(inputs: TabListInputs) -> Self {
        let list = ListBehavior::new(ListInputs {
            disabled: inputs.disabled,
            multi: false,
            wrap: inputs.wrap,
            orientation: inputs.orientation,
            text_direction: inputs.text_direction,
            focus_mode: inputs.focus_mode,
            selection_mode: inputs.selection_mode,
            typeahead_delay: Duration::ZERO,
        });
        Self {
            list,
            expansion: ExpansionBehavior::new(false),
            element: inputs.element,
        }
    }

    /// Rebind the tab sequence.
    pub fn set_tabs(&self, specs: impl IntoIterator<Item = TabSpec<V>>) {
        let tabs: Vec<TabPattern<V>> = specs
            .into_iter()
            .enumerate()
            .map(|(index, spec)| TabPattern {
                expansion: ExpansionControl::new(spec.value.clone(), true, &self.expansion),
                value: Signal::new(spec.value),
                disabled: Signal::new(spec.disabled),
                element: spec.element,
                index,
                active: self.list.active.clone(),
                selection: self.list.value.clone(),
                focus_mode: self.list.focus_mode.clone(),
            })
            .collect();
        self.list.set_items(tabs);
        self.sync_expansion();
    }

    /// Handles to the current tabs.
    #[must_use]
    pub fn tabs(&self) -> Vec<TabPattern<V>> {
        self.list.items.get()
    }

    /// Handle to the tab carrying `value`.
    #[must_use]
    pub fn tab(&self, value: &V) -> Option<TabPattern<V>> {
        self.list.item(value)
    }

    /// Create the panel handle paired with `tab_value`.
    #[must_use]
    pub fn panel(&self, tab_value: V, element: ElementId) -> TabPanelPattern<V> {
        TabPanelPattern {
            tab_value,
            element,
            expansion: self.expansion.clone(),
        }
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

    /// Select a tab by value and expand its panel.
    pub fn select_value(&self, value: &V) {
        self.list.select(Some(value));
        self.sync_expansion();
    }

    /// Activate the first selected focusable tab, else the first
    /// focusable tab. Selection is untouched.
    pub fn set_default_state(&self) {
        self.list.set_default_state();
    }

    /// Forward a keydown event. Returns whether it was handled.
    pub fn on_keydown(&self, event: &KeyboardEvent) -> bool {
        if self.list.disabled.get() {
            return false;
        }
        let Some(action) = self.keydown_rules().handle(event) else {
            return false;
        };
        let follow = self.list.selection_mode.get() == SelectionMode::FollowFocus;
        match action {
            KeyAction::Next => {
                self.list.next(follow);
            }
            KeyAction::Prev => {
                self.list.prev(follow);
            }
            KeyAction::First => {
                self.list.first(follow);
            }
            KeyAction::Last => {
                self.list.last(follow);
            }
            KeyAction::SelectActive => self.list.select(None),
        }
        self.sync_expansion();
        true
    }

    /// Forward a pointerdown event. Returns whether it was handled.
    pub fn on_pointerdown(&self, event: &PointerEvent) -> bool {
        if self.list.disabled.get() || event.button != PointerButton::Primary {
            return false;
        }
        let Some(tab) = event.target.and_then(|t| self.list.item_by_element(t)) else {
            return false;
        };
        if self.list.goto(&tab.value(), true) {
            self.sync_expansion();
        }
        true
    }

    /// Re-derive the expanded set from the selection: exactly the selected
    /// tab is expanded.
    fn sync_expansion(&self) {
        match self.list.value.get().first() {
            Some(selected) => self.expansion.open(selected),
            None => self.expansion.close_all(),
        }
    }

    fn keydown_rules(&self) -> KeyDispatcher<KeyAction> {
        let (next_key, prev_key) = navigation_keys(
            self.list.orientation.get(),
            self.list.text_direction.get(),
        );
        let mut rules = KeyDispatcher::new();
        rules.on_key(next_key, KeyAction::Next);
        rules.on_key(prev_key, KeyAction::Prev);
        rules.on_key(Key::Home, KeyAction::First);
        rules.on_key(Key::End, KeyAction::Last);
        rules.on_key(Key::Enter, KeyAction::SelectActive);
        rules.on_key(Key::Char(' '), KeyAction::SelectActive);
        rules
    }
}
