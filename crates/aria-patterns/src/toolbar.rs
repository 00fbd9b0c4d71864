#![forbid(unsafe_code)]

//! Toolbar pattern: a row of widgets and widget groups.
//!
//! Entries are a tagged union ([`ToolbarEntry::Widget`] or
//! [`ToolbarEntry::Group`]) dispatched by tag instead of type tests. A
//! group (e.g. an embedded radio group) owns its own nested
//! [`ListBehavior`]; main-axis navigation moves within the active group
//! first and falls through to the toolbar list only when the group is
//! exhausted, re-entering the next group at its near edge. The
//! perpendicular axis navigates within a group without exiting it.

use aria_core::dispatch::KeyDispatcher;
use aria_core::event::{ElementId, Key, KeyboardEvent, PointerButton, PointerEvent};
use aria_core::signal::Signal;
use std::fmt;
use std::time::Duration;

use crate::behaviors::list::{
    FocusMode, ListBehavior, ListInputs, ListItem, Orientation, SelectionMode, TextDirection,
};
use crate::listbox::navigation_keys;

/// Host-supplied description of one toolbar widget.
#[derive(Debug, Clone)]
pub struct ToolbarWidgetSpec<V> {
    /// Identifying value, unique across the whole toolbar.
    pub value: V,
    /// Whether the widget is disabled.
    pub disabled: bool,
    /// The widget's host element.
    pub element: ElementId,
}

impl<V> ToolbarWidgetSpec<V> {
    /// Create an enabled widget.
    #[must_use]
    pub fn new(value: V, element: ElementId) -> Self {
        Self {
            value,
            disabled: false,
            element,
        }
    }

    /// Mark the widget disabled.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// Host-supplied description of one toolbar entry.
#[derive(Debug, Clone)]
pub enum ToolbarEntrySpec<V> {
    /// A standalone widget (button, toggle, …).
    Widget(ToolbarWidgetSpec<V>),
    /// A group of widgets with its own internal navigation.
    Group {
        /// The group's identifying value.
        value: V,
        /// Whether the whole group is disabled.
        disabled: bool,
        /// The group's container element.
        element: ElementId,
        /// Whether triggering a member mutates the group's selection
        /// (radio/toggle semantics).
        selectable: bool,
        /// Multi-selection for a selectable group (toggle buttons rather
        /// than radios).
        multi: bool,
        /// The group's members.
        widgets: Vec<ToolbarWidgetSpec<V>>,
    },
}

/// Per-widget handle.
#[derive(Debug, Clone)]
pub struct ToolbarWidget<V: Clone + PartialEq + fmt::Debug + 'static> {
    value: Signal<V>,
    disabled: Signal<bool>,
    element: ElementId,
    /// The owning group's selection (an always-empty private cell for
    /// standalone widgets).
    selection: Signal<Vec<V>>,
}

impl<V: Clone + PartialEq + fmt::Debug + 'static> ToolbarWidget<V> {
    /// Whether this widget is selected within its group.
    #[must_use]
    pub fn selected(&self) -> bool {
        self.selection.with(|s| s.contains(&self.value.get()))
    }

    /// Whether this widget is disabled.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled.get()
    }

    /// The widget's host element.
    #[must_use]
    pub fn id(&self) -> ElementId {
        self.element
    }
}

impl<V: Clone + PartialEq + fmt::Debug + 'static> ListItem for ToolbarWidget<V> {
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

/// A widget group embedded in the toolbar.
#[derive(Debug, Clone)]
pub struct ToolbarGroup<V: Clone + PartialEq + fmt::Debug + 'static> {
    value: V,
    disabled: Signal<bool>,
    element: ElementId,
    selectable: bool,
    /// Nested engine over the group's members.
    pub list: ListBehavior<ToolbarWidget<V>>,
}

impl<V: Clone + PartialEq + fmt::Debug + 'static> ToolbarGroup<V> {
    /// The group's identifying value.
    #[must_use]
    pub fn value(&self) -> &V {
        &self.value
    }

    /// The group's container element.
    #[must_use]
    pub fn id(&self) -> ElementId {
        self.element
    }

    /// Handles to the group's members.
    #[must_use]
    pub fn widgets(&self) -> Vec<ToolbarWidget<V>> {
        self.list.items.get()
    }

    /// A group with no focusable member cannot take focus.
    fn focusable(&self) -> bool {
        !self.disabled.get() && self.list.items.with(|ws| ws.iter().any(|w| !w.disabled()))
    }
}

/// One toolbar entry: a widget or a group.
#[derive(Debug, Clone)]
pub enum ToolbarEntry<V: Clone + PartialEq + fmt::Debug + 'static> {
    /// A standalone widget.
    Widget(ToolbarWidget<V>),
    /// A widget group.
    Group(ToolbarGroup<V>),
}

impl<V: Clone + PartialEq + fmt::Debug + 'static> ToolbarEntry<V> {
    /// The nested group, if this entry is one.
    #[must_use]
    pub fn as_group(&self) -> Option<&ToolbarGroup<V>> {
        match self {
            Self::Group(group) => Some(group),
            Self::Widget(_) => None,
        }
    }
}

impl<V: Clone + PartialEq + fmt::Debug + 'static> ListItem for ToolbarEntry<V> {
    type Value = V;

    fn value(&self) -> V {
        match self {
            Self::Widget(widget) => widget.value.get(),
            Self::Group(group) => group.value.clone(),
        }
    }

    fn disabled(&self) -> bool {
        match self {
            Self::Widget(widget) => widget.disabled.get(),
            Self::Group(group) => !group.focusable(),
        }
    }

    fn element(&self) -> ElementId {
        match self {
            Self::Widget(widget) => widget.element,
            Self::Group(group) => group.element,
        }
    }
}

/// Construction-time inputs for a [`ToolbarPattern`].
#[derive(Debug, Clone)]
pub struct ToolbarInputs {
    /// The toolbar container element.
    pub element: ElementId,
    /// Whether the whole toolbar is disabled.
    pub disabled: bool,
    /// Whether main-axis navigation wraps.
    pub wrap: bool,
    /// Main navigation axis (toolbars are usually horizontal).
    pub orientation: Orientation,
    /// Text direction.
    pub text_direction: TextDirection,
}

impl ToolbarInputs {
    /// Horizontal, wrapping toolbar.
    #[must_use]
    pub fn new(element: ElementId) -> Self {
        Self {
            element,
            disabled: false,
            wrap: true,
            orientation: Orientation::Horizontal,
            text_direction: TextDirection::default(),
        }
    }
}

/// An accessibility invariant violation reported by
/// [`ToolbarPattern::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolbarViolation<V> {
    /// Two entries or members share an identifying value.
    DuplicateValue(V),
    /// An enabled group has no members.
    EmptyGroup(V),
    /// The active value no longer resolves to an entry.
    DanglingActive(V),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyAction {
    Next,
    Prev,
    GroupNext,
    GroupPrev,
    First,
    Last,
    Trigger,
}

/// Toolbar interaction pattern.
#[derive(Debug, Clone)]
pub struct ToolbarPattern<V: Clone + PartialEq + fmt::Debug + 'static> {
    /// The outer engine over entries. Selection is unused at this level;
    /// selectable groups carry their own.
    pub list: ListBehavior<ToolbarEntry<V>>,
    element: ElementId,
}

impl<V: Clone + PartialEq + fmt::Debug + 'static> ToolbarPattern<V> {
    /// Create an empty toolbar.
    #[must_use]
    pub fn new(inputs: ToolbarInputs) -> Self {
        let list = ListBehavior::new(ListInputs {
            disabled: inputs.disabled,
            multi: false,
            wrap: inputs.wrap,
            orientation: inputs.orientation,
            text_direction: inputs.text_direction,
            focus_mode: FocusMode::RovingTabindex,
            selection_mode: SelectionMode::Explicit,
            typeahead_delay: Duration::ZERO,
        });
        Self {
            list,
            element: inputs.element,
        }
    }

    /// Rebind the entry sequence.
    pub fn set_entries(&self, specs: impl IntoIterator<Item = ToolbarEntrySpec<V>>) {
        let entries: Vec<ToolbarEntry<V>> = specs
            .into_iter()
            .map(|spec| match spec {
                ToolbarEntrySpec::Widget(w) => ToolbarEntry::Widget(ToolbarWidget {
                    value: Signal::new(w.value),
                    disabled: Signal::new(w.disabled),
                    element: w.element,
                    selection: Signal::new(Vec::new()),
                }),
                ToolbarEntrySpec::Group {
                    value,
                    disabled,
                    element,
                    selectable,
                    multi,
                    widgets,
                } => {
                    // The nested list must not wrap: hitting a group edge is
                    // what hands navigation back to the toolbar.
                    let list = ListBehavior::new(ListInputs {
                        disabled: false,
                        multi,
                        wrap: false,
                        orientation: self.list.orientation.get(),
                        text_direction: self.list.text_direction.get(),
                        focus_mode: FocusMode::RovingTabindex,
                        selection_mode: SelectionMode::Explicit,
                        typeahead_delay: Duration::ZERO,
                    });
                    let members: Vec<ToolbarWidget<V>> = widgets
                        .into_iter()
                        .map(|w| ToolbarWidget {
                            value: Signal::new(w.value),
                            disabled: Signal::new(w.disabled),
                            element: w.element,
                            selection: list.value.clone(),
                        })
                        .collect();
                    list.set_items(members);
                    ToolbarEntry::Group(ToolbarGroup {
                        value,
                        disabled: Signal::new(disabled),
                        element,
                        selectable,
                        list,
                    })
                }
            })
            .collect();
        self.list.set_items(entries);
    }

    /// Handles to the current entries.
    #[must_use]
    pub fn entries(&self) -> Vec<ToolbarEntry<V>> {
        self.list.items.get()
    }

    /// The toolbar container element.
    #[must_use]
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// The active entry.
    #[must_use]
    pub fn active_entry(&self) -> Option<ToolbarEntry<V>> {
        self.list.active_item()
    }

    /// The element that should currently hold `tabindex="0"`: the active
    /// widget, or the active group's internal active widget.
    #[must_use]
    pub fn focused_element(&self) -> Option<ElementId> {
        match self.active_entry()? {
            ToolbarEntry::Widget(widget) => Some(widget.element),
            ToolbarEntry::Group(group) => group.list.active_item().map(|w| w.element),
        }
    }

    /// Roving tabindex for an arbitrary toolbar element.
    #[must_use]
    pub fn tabindex_of(&self, element: ElementId) -> i8 {
        if self.focused_element() == Some(element) {
            0
        } else {
            -1
        }
    }

    /// Move forward along the main axis.
    pub fn next(&self) {
        self.step_main(1);
    }

    /// Move backward along the main axis.
    pub fn prev(&self) {
        self.step_main(-1);
    }

    /// Move to the first entry (entering a group at its first member).
    pub fn first(&self) {
        self.leave_active_group();
        if self.list.first(false) {
            self.enter_active_group(1);
        }
    }

    /// Move to the last entry (entering a group at its last member).
    pub fn last(&self) {
        self.leave_active_group();
        if self.list.last(false) {
            self.enter_active_group(-1);
        }
    }

    /// Move forward within the active group only (perpendicular axis).
    pub fn group_next(&self) {
        if let Some(ToolbarEntry::Group(group)) = self.active_entry() {
            group.list.next(false);
        }
    }

    /// Move backward within the active group only.
    pub fn group_prev(&self) {
        if let Some(ToolbarEntry::Group(group)) = self.active_entry() {
            group.list.prev(false);
        }
    }

    /// Clear the active entry (and any group-internal active widget).
    pub fn unfocus(&self) {
        self.leave_active_group();
        self.list.unfocus();
    }

    /// Activate the first focusable entry.
    pub fn set_default_state(&self) {
        if self.list.set_default_state() {
            self.enter_active_group(1);
        }
    }

    /// Trigger the active widget.
    ///
    /// For a selectable group this mutates the group's selection
    /// (replacing for radios, toggling for multi groups). The triggered
    /// value is returned so the host can run the widget's action.
    pub fn trigger(&self) -> Option<V> {
        match self.active_entry()? {
            ToolbarEntry::Widget(widget) => {
                if widget.disabled.get() {
                    return None;
                }
                Some(widget.value.get())
            }
            ToolbarEntry::Group(group) => {
                let widget = group.list.active_item()?;
                if widget.disabled() {
                    return None;
                }
                let value = widget.value();
                if group.selectable {
                    group.list.select(Some(&value));
                }
                Some(value)
            }
        }
    }

    /// Check structural invariants. Violations are reported, never thrown.
    #[must_use]
    pub fn validate(&self) -> Vec<ToolbarViolation<V>> {
        let mut violations = Vec::new();
        let entries = self.list.items.get();

        let mut seen: Vec<V> = Vec::new();
        let mut note = |value: V, out: &mut Vec<ToolbarViolation<V>>| {
            if seen.contains(&value) {
                out.push(ToolbarViolation::DuplicateValue(value));
            } else {
                seen.push(value);
            }
        };
        for entry in &entries {
            note(entry.value(), &mut violations);
            if let ToolbarEntry::Group(group) = entry {
                if !group.disabled.get() && group.list.is_empty() {
                    violations.push(ToolbarViolation::EmptyGroup(group.value.clone()));
                }
                for widget in group.widgets() {
                    note(widget.value(), &mut violations);
                }
            }
        }

        if let Some(active) = self.list.active.get()
            && !entries.iter().any(|e| e.value() == active)
        {
            violations.push(ToolbarViolation::DanglingActive(active));
        }

        violations
    }

    /// Forward a keydown event. Returns whether it was handled.
    pub fn on_keydown(&self, event: &KeyboardEvent) -> bool {
        if self.list.disabled.get() {
            return false;
        }
        let Some(action) = self.keydown_rules().handle(event) else {
            return false;
        };
        match action {
            KeyAction::Next => self.next(),
            KeyAction::Prev => self.prev(),
            KeyAction::GroupNext => self.group_next(),
            KeyAction::GroupPrev => self.group_prev(),
            KeyAction::First => self.first(),
            KeyAction::Last => self.last(),
            KeyAction::Trigger => {
                self.trigger();
            }
        }
        true
    }

    /// Forward a pointerdown event. Returns whether it was handled.
    ///
    /// A press on a widget focuses it (entering its group if needed) and
    /// triggers it.
    pub fn on_pointerdown(&self, event: &PointerEvent) -> bool {
        if self.list.disabled.get() || event.button != PointerButton::Primary {
            return false;
        }
        let Some(target) = event.target else {
            return false;
        };
        let entries = self.list.items.get();
        for entry in &entries {
            match entry {
                ToolbarEntry::Widget(widget) if widget.element == target => {
                    self.leave_active_group();
                    if self.list.goto(&entry.value(), false) {
                        self.trigger();
                    }
                    return true;
                }
                ToolbarEntry::Group(group) => {
                    if let Some(widget) = group.list.item_by_element(target) {
                        self.leave_active_group();
                        if self.list.goto(&entry.value(), false)
                            && group.list.goto(&widget.value(), false)
                        {
                            self.trigger();
                        }
                        return true;
                    }
                }
                ToolbarEntry::Widget(_) => {}
            }
        }
        false
    }

    fn step_main(&self, dir: i32) {
        // Within the active group first.
        if let Some(ToolbarEntry::Group(group)) = self.active_entry() {
            let moved = if dir > 0 {
                group.list.next(false)
            } else {
                group.list.prev(false)
            };
            if moved {
                return;
            }
        }
        // Group exhausted (or a plain widget): move on the toolbar list.
        let previous = self.active_entry();
        let moved = if dir > 0 {
            self.list.next(false)
        } else {
            self.list.prev(false)
        };
        if moved {
            if let Some(ToolbarEntry::Group(old_group)) = previous {
                old_group.list.unfocus();
            }
            self.enter_active_group(dir);
        }
    }

    fn enter_active_group(&self, dir: i32) {
        if let Some(ToolbarEntry::Group(group)) = self.active_entry() {
            if dir > 0 {
                group.list.first(false);
            } else {
                group.list.last(false);
            }
        }
    }

    fn leave_active_group(&self) {
        if let Some(ToolbarEntry::Group(group)) = self.active_entry() {
            group.list.unfocus();
        }
    }

    fn keydown_rules(&self) -> KeyDispatcher<KeyAction> {
        let orientation = self.list.orientation.get();
        let direction = self.list.text_direction.get();
        let (next_key, prev_key) = navigation_keys(orientation, direction);
        let cross = match orientation {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        };
        let (group_next_key, group_prev_key) = navigation_keys(cross, direction);

        let mut rules = KeyDispatcher::new();
        rules.on_key(next_key, KeyAction::Next);
        rules.on_key(prev_key, KeyAction::Prev);
        rules.on_key(group_next_key, KeyAction::GroupNext);
        rules.on_key(group_prev_key, KeyAction::GroupPrev);
        rules.on_key(Key::Home, KeyAction::First);
        rules.on_key(Key::End, KeyAction::Last);
        rules.on_key(Key::Enter, KeyAction::Trigger);
        rules.on_key(Key::Char(' '), KeyAction::Trigger);
        rules
    }
}
