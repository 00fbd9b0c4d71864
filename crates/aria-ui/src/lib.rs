#![forbid(unsafe_code)]

//! Headless interaction patterns for composite ARIA widgets.
//!
//! This crate is the public facade: it re-exports the pattern layer's
//! common types and offers a lightweight prelude. The patterns implement
//! keyboard/pointer interaction state machines (listbox, combobox, tabs,
//! toolbar, tree, disclosure/accordion); a host view binds their derived
//! state onto its own widget tree and forwards raw events in.
//!
//! ```
//! use aria_ui::prelude::*;
//!
//! let listbox = ListboxPattern::new(ListboxInputs::new(ElementId::new(1)));
//! listbox.set_options(vec![
//!     OptionSpec::new("apple", ElementId::new(10)).search_term("apple"),
//!     OptionSpec::new("banana", ElementId::new(11)).search_term("banana"),
//! ]);
//! listbox.set_default_state();
//! listbox.on_keydown(&KeyboardEvent::new(Key::Down));
//! assert_eq!(listbox.list.value.get(), vec!["banana"]);
//! ```

// --- Core re-exports -------------------------------------------------------

pub use aria_core::dispatch::{KeyDispatcher, KeyMatch, PointerDispatcher};
pub use aria_core::event::{
    ElementId, Key, KeyboardEvent, Modifiers, PointerButton, PointerEvent,
};
pub use aria_core::signal::{Derived, Memo, Signal, SignalLike};
pub use aria_core::typeahead::TypeaheadBuffer;

// --- Behavior re-exports ---------------------------------------------------

pub use aria_patterns::behaviors::expansion::{ExpansionBehavior, ExpansionControl};
pub use aria_patterns::behaviors::label::LabelControl;
pub use aria_patterns::behaviors::list::{
    FocusMode, ListBehavior, ListInputs, ListItem, Orientation, SelectionMode, TextDirection,
};

// --- Pattern re-exports ----------------------------------------------------

pub use aria_patterns::combobox::{
    ComboboxInputs, ComboboxPattern, ComboboxPopup, SelectionStrategy,
};
pub use aria_patterns::disclosure::{
    AccordionGroupInputs, AccordionGroupPattern, AccordionPanelPattern, AccordionTriggerPattern,
    AccordionTriggerSpec, DisclosureContentPattern, DisclosureInputs, DisclosurePattern,
};
pub use aria_patterns::listbox::{ListboxInputs, ListboxPattern, OptionPattern, OptionSpec};
pub use aria_patterns::persistence::{StateKey, Stateful};
pub use aria_patterns::tabs::{
    TabListInputs, TabListPattern, TabPanelPattern, TabPattern, TabSpec,
};
pub use aria_patterns::toolbar::{
    ToolbarEntry, ToolbarEntrySpec, ToolbarGroup, ToolbarInputs, ToolbarPattern, ToolbarViolation,
    ToolbarWidget, ToolbarWidgetSpec,
};
pub use aria_patterns::tree::{
    ComboboxTreePattern, TreeInputs, TreeItemPattern, TreeNodeSpec, TreePattern,
};

// --- Prelude --------------------------------------------------------------

/// Commonly used types for day-to-day usage.
pub mod prelude {
    pub use crate::{
        ComboboxInputs, ComboboxPattern, ComboboxPopup, ComboboxTreePattern, DisclosureInputs,
        DisclosurePattern, ElementId, FocusMode, Key, KeyboardEvent, ListboxInputs,
        ListboxPattern, Modifiers, OptionSpec, Orientation, PointerButton, PointerEvent,
        SelectionMode, SelectionStrategy, Signal, SignalLike, TabListInputs, TabListPattern,
        TabSpec, TextDirection, ToolbarEntrySpec, ToolbarInputs, ToolbarPattern,
        ToolbarWidgetSpec, TreeInputs, TreeNodeSpec, TreePattern,
    };
}
