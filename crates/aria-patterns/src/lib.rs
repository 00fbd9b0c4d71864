#![forbid(unsafe_code)]

//! Interaction state machines for composite ARIA widgets.
//!
//! Each pattern is a headless engine: a host view constructs it with input
//! accessors bound to component state, forwards raw keyboard/pointer
//! events into `on_keydown`/`on_pointerdown`, and binds the derived state
//! (active item, tabindex, activedescendant, selected, expanded/hidden)
//! onto its own widget tree. No rendering or attribute binding happens
//! here.

pub mod behaviors;
pub mod combobox;
pub mod disclosure;
pub mod listbox;
pub mod persistence;
pub mod tabs;
pub mod toolbar;
pub mod tree;

pub use behaviors::expansion::{ExpansionBehavior, ExpansionControl};
pub use behaviors::label::LabelControl;
pub use behaviors::list::{
    FocusMode, ListBehavior, ListInputs, ListItem, Orientation, SelectionMode, TextDirection,
};
