#![forbid(unsafe_code)]

//! Disclosure and accordion patterns.
//!
//! A disclosure is a two-state machine per instance: collapsed ↔
//! expanded, toggled from its trigger. An accordion composes an
//! [`ExpansionBehavior`] (single- or multi-expansion) with list
//! navigation across its trigger headers.

use aria_core::event::{ElementId, Key, KeyboardEvent, PointerButton, PointerEvent};
use aria_core::signal::Signal;
use std::fmt;
use std::time::Duration;

use crate::behaviors::expansion::ExpansionBehavior;
use crate::behaviors::label::LabelControl;
use crate::behaviors::list::{
    FocusMode, ListBehavior, ListInputs, ListItem, Orientation, SelectionMode, TextDirection,
};

/// Construction-time inputs for a [`DisclosurePattern`].
#[derive(Debug, Clone)]
pub struct DisclosureInputs {
    /// The trigger's host element.
    pub element: ElementId,
    /// Whether the disclosure starts expanded.
    pub expanded: bool,
    /// Suppress the transition to collapsed entirely.
    pub always_expanded: bool,
    /// Whether the trigger is disabled.
    pub disabled: bool,
}

impl DisclosureInputs {
    /// A collapsed, enabled disclosure.
    #[must_use]
    pub fn new(element: ElementId) -> Self {
        Self {
            element,
            expanded: false,
            always_expanded: false,
            disabled: false,
        }
    }

    /// Start expanded.
    #[must_use]
    pub fn expanded(mut self) -> Self {
        self.expanded = true;
        self
    }

    /// Keep the disclosure permanently expanded once it is.
    #[must_use]
    pub fn always_expanded(mut self) -> Self {
        self.always_expanded = true;
        self.expanded = true;
        self
    }
}

/// Disclosure trigger state machine.
#[derive(Debug, Clone)]
pub struct DisclosurePattern {
    /// Whether the content is shown.
    pub expanded: Signal<bool>,
    /// While set, the transition to collapsed is suppressed.
    pub always_expanded: Signal<bool>,
    /// Whether the trigger is disabled.
    pub disabled: Signal<bool>,
    /// Labelling for the trigger element.
    pub label: LabelControl,
    element: ElementId,
}

impl DisclosurePattern {
    /// Create a disclosure trigger.
    #[must_use]
    pub fn new(inputs: DisclosureInputs) -> Self {
        Self {
            expanded: Signal::new(inputs.expanded),
            always_expanded: Signal::new(inputs.always_expanded),
            disabled: Signal::new(inputs.disabled),
            label: LabelControl::new(),
            element: inputs.element,
        }
    }

    /// The trigger's host element.
    #[must_use]
    pub fn id(&self) -> ElementId {
        self.element
    }

    /// Whether the content is shown.
    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.expanded.get()
    }

    /// Tabindex for the trigger element.
    #[must_use]
    pub fn tabindex(&self) -> i8 {
        if self.disabled.get() { -1 } else { 0 }
    }

    /// Show the content.
    pub fn expand(&self) {
        if self.disabled.get() {
            return;
        }
        self.expanded.set(true);
    }

    /// Hide the content. Suppressed while `always_expanded` is set.
    pub fn collapse(&self) {
        if self.disabled.get() || self.always_expanded.get() {
            return;
        }
        self.expanded.set(false);
    }

    /// Flip between expanded and collapsed.
    pub fn toggle(&self) {
        if self.expanded.get() {
            self.collapse();
        } else {
            self.expand();
        }
    }

    /// Forward a keydown from the trigger. Enter/Space toggle.
    pub fn on_keydown(&self, event: &KeyboardEvent) -> bool {
        if self.disabled.get() || !event.modifiers.is_empty() {
            return false;
        }
        match event.key {
            Key::Enter | Key::Char(' ') => {
                self.toggle();
                true
            }
            _ => false,
        }
    }

    /// Forward a pointerdown. A primary press on the trigger toggles.
    pub fn on_pointerdown(&self, event: &PointerEvent) -> bool {
        if self.disabled.get()
            || event.button != PointerButton::Primary
            || event.target != Some(self.element)
        {
            return false;
        }
        self.toggle();
        true
    }
}

/// Disclosure content region; `hidden` follows the resolved trigger.
#[derive(Debug, Clone)]
pub struct DisclosureContentPattern {
    /// Explicit trigger input. Wins over the default.
    pub trigger: Signal<Option<DisclosurePattern>>,
    /// Ancestor-provided fallback trigger.
    pub default_trigger: Signal<Option<DisclosurePattern>>,
    element: ElementId,
}

impl DisclosureContentPattern {
    /// Create a content region with no trigger bound yet.
    #[must_use]
    pub fn new(element: ElementId) -> Self {
        Self {
            trigger: Signal::new(None),
            default_trigger: Signal::new(None),
            element,
        }
    }

    /// The content's host element.
    #[must_use]
    pub fn id(&self) -> ElementId {
        self.element
    }

    /// The trigger controlling this content: the explicit input, else the
    /// ancestor-provided default.
    #[must_use]
    pub fn resolved_trigger(&self) -> Option<DisclosurePattern> {
        self.trigger.get().or_else(|| self.default_trigger.get())
    }

    /// Whether the content is hidden. With no trigger resolved the
    /// content stays visible.
    #[must_use]
    pub fn hidden(&self) -> bool {
        self.resolved_trigger()
            .is_some_and(|trigger| !trigger.is_expanded())
    }
}

/// Host-supplied description of one accordion trigger.
#[derive(Debug, Clone)]
pub struct AccordionTriggerSpec<V> {
    /// Identifying value, unique within the accordion.
    pub value: V,
    /// Whether the trigger is disabled.
    pub disabled: bool,
    /// The trigger's host element.
    pub element: ElementId,
}

impl<V> AccordionTriggerSpec<V> {
    /// Create an enabled trigger.
    #[must_use]
    pub fn new(value: V, element: ElementId) -> Self {
        Self {
            value,
            disabled: false,
            element,
        }
    }

    /// Mark the trigger disabled.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// Per-trigger handle within an accordion.
#[derive(Debug, Clone)]
pub struct AccordionTriggerPattern<V: Clone + PartialEq + fmt::Debug + 'static> {
    value: Signal<V>,
    disabled: Signal<bool>,
    element: ElementId,
    expansion: ExpansionBehavior<V>,
    active: Signal<Option<V>>,
    focus_mode: Signal<FocusMode>,
}

impl<V: Clone + PartialEq + fmt::Debug + 'static> AccordionTriggerPattern<V> {
    /// Whether this trigger's panel is shown.
    #[must_use]
    pub fn expanded(&self) -> bool {
        self.expansion.is_expanded(&self.value.get())
    }

    /// Whether this trigger is the accordion's active item.
    #[must_use]
    pub fn active(&self) -> bool {
        self.active.with(|a| a.as_ref() == Some(&self.value.get()))
    }

    /// Whether this trigger is disabled.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled.get()
    }

    /// The trigger's host element.
    #[must_use]
    pub fn id(&self) -> ElementId {
        self.element
    }

    /// Tabindex for the trigger element.
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

impl<V: Clone + PartialEq + fmt::Debug + 'static> ListItem for AccordionTriggerPattern<V> {
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

/// Panel paired with an accordion trigger.
#[derive(Debug, Clone)]
pub struct AccordionPanelPattern<V: Clone + PartialEq + fmt::Debug + 'static> {
    trigger_value: V,
    element: ElementId,
    expansion: ExpansionBehavior<V>,
}

impl<V: Clone + PartialEq + fmt::Debug + 'static> AccordionPanelPattern<V> {
    /// The panel's host element.
    #[must_use]
    pub fn id(&self) -> ElementId {
        self.element
    }

    /// Whether the panel is hidden.
    #[must_use]
    pub fn hidden(&self) -> bool {
        !self.expansion.is_expanded(&self.trigger_value)
    }
}

/// Construction-time inputs for an [`AccordionGroupPattern`].
#[derive(Debug, Clone)]
pub struct AccordionGroupInputs {
    /// The accordion container element.
    pub element: ElementId,
    /// Whether several panels may be open at once.
    pub multi_expandable: bool,
    /// Whether header navigation wraps.
    pub wrap: bool,
    /// Whether the whole accordion is disabled.
    pub disabled: bool,
}

impl AccordionGroupInputs {
    /// Single-expansion, wrapping accordion.
    #[must_use]
    pub fn new(element: ElementId) -> Self {
        Self {
            element,
            multi_expandable: false,
            wrap: true,
            disabled: false,
        }
    }

    /// Allow several open panels.
    #[must_use]
    pub fn multi_expandable(mut self) -> Self {
        self.multi_expandable = true;
        self
    }
}

/// Accordion group: expansion state plus header navigation.
#[derive(Debug, Clone)]
pub struct AccordionGroupPattern<V: Clone + PartialEq + fmt::Debug + 'static> {
    /// Navigation over the trigger headers. Selection is unused.
    pub list: ListBehavior<AccordionTriggerPattern<V>>,
    /// Panel open/closed state keyed by trigger value.
    pub expansion: ExpansionBehavior<V>,
    element: ElementId,
}

impl<V: Clone + PartialEq + fmt::Debug + 'static> AccordionGroupPattern<V> {
    /// Create an empty accordion.
    #[must_use]
    pub fn new(inputs: AccordionGroupInputs) -> Self {
        let list = ListBehavior::new(ListInputs {
            disabled: inputs.disabled,
            multi: false,
            wrap: inputs.wrap,
            orientation: Orientation::Vertical,
            text_direction: TextDirection::default(),
            focus_mode: FocusMode::RovingTabindex,
            selection_mode: SelectionMode::Explicit,
            typeahead_delay: Duration::ZERO,
        });
        Self {
            list,
            expansion: ExpansionBehavior::new(inputs.multi_expandable),
            element: inputs.element,
        }
    }

    /// Rebind the trigger sequence.
    pub fn set_triggers(&self, specs: impl IntoIterator<Item = AccordionTriggerSpec<V>>) {
        let triggers: Vec<AccordionTriggerPattern<V>> = specs
            .into_iter()
            .map(|spec| AccordionTriggerPattern {
                value: Signal::new(spec.value),
                disabled: Signal::new(spec.disabled),
                element: spec.element,
                expansion: self.expansion.clone(),
                active: self.list.active.clone(),
                focus_mode: self.list.focus_mode.clone(),
            })
            .collect();
        self.list.set_items(triggers);
    }

    /// Handles to the current triggers.
    #[must_use]
    pub fn triggers(&self) -> Vec<AccordionTriggerPattern<V>> {
        self.list.items.get()
    }

    /// Handle to the trigger carrying `value`.
    #[must_use]
    pub fn trigger(&self, value: &V) -> Option<AccordionTriggerPattern<V>> {
        self.list.item(value)
    }

    /// Create the panel handle paired with `trigger_value`.
    #[must_use]
    pub fn panel(&self, trigger_value: V, element: ElementId) -> AccordionPanelPattern<V> {
        AccordionPanelPattern {
            trigger_value,
            element,
            expansion: self.expansion.clone(),
        }
    }

    /// The accordion container element.
    #[must_use]
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Open the panel for `value` (closing others under single
    /// expansion). Disabled triggers are a no-op.
    pub fn expand(&self, value: &V) {
        if self.list.is_focusable(value) {
            self.expansion.open(value);
        }
    }

    /// Close the panel for `value`.
    pub fn collapse(&self, value: &V) {
        if self.list.is_focusable(value) {
            self.expansion.close(value);
        }
    }

    /// Toggle the panel for `value`.
    pub fn toggle(&self, value: &V) {
        if self.list.is_focusable(value) {
            self.expansion.toggle(value);
        }
    }

    /// Activate the first trigger with an open panel, else the first
    /// focusable trigger.
    pub fn set_default_state(&self) {
        let triggers = self.list.items.get();
        let preferred = triggers
            .iter()
            .find(|t| !t.is_disabled() && t.expanded())
            .or_else(|| triggers.iter().find(|t| !t.is_disabled()));
        if let Some(trigger) = preferred {
            self.list.active.set(Some(trigger.value()));
        }
    }

    /// Forward a keydown event. Returns whether it was handled.
    pub fn on_keydown(&self, event: &KeyboardEvent) -> bool {
        if self.list.disabled.get() || !event.modifiers.is_empty() {
            return false;
        }
        match event.key {
            Key::Down => {
                self.list.next(false);
            }
            Key::Up => {
                self.list.prev(false);
            }
            Key::Home => {
                self.list.first(false);
            }
            Key::End => {
                self.list.last(false);
            }
            Key::Enter | Key::Char(' ') => {
                if let Some(active) = self.list.active.get() {
                    self.toggle(&active);
                }
            }
            _ => return false,
        }
        true
    }

    /// Forward a pointerdown event. A press on a trigger focuses it and
    /// toggles its panel.
    pub fn on_pointerdown(&self, event: &PointerEvent) -> bool {
        if self.list.disabled.get() || event.button != PointerButton::Primary {
            return false;
        }
        let Some(trigger) = event.target.and_then(|t| self.list.item_by_element(t)) else {
            return false;
        };
        let value = trigger.value();
        if self.list.goto(&value, false) {
            self.toggle(&value);
        }
        true
    }
}
