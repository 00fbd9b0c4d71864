#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! This module defines the standard event types forwarded into the pattern
//! layer by a host view. All events derive `Clone`, `PartialEq`, and `Eq`
//! for use in tests and pattern matching.
//!
//! # Design Notes
//!
//! - Character case is significant: `Key::Char('a')` and `Key::Char('A')`
//!   are distinct keys.
//! - The host performs its own hit testing and stamps
//!   [`PointerEvent::target`] with the [`ElementId`] under the pointer
//!   before forwarding; the patterns never touch a real element tree.
//! - Modifiers use bitflags for easy combination.

use bitflags::bitflags;
#[cfg(feature = "crossterm")]
use crossterm::event as cte;

/// Opaque handle for a host-owned element participating in a pattern.
///
/// Hosts assign one id per interactive element (option row, tab, tree row,
/// toolbar button, combobox input). The id is used for pointer-target
/// resolution and for `aria-activedescendant`-style references; the
/// patterns never dereference it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    /// Create an element id from a raw host-assigned value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw id value.
    #[must_use]
    pub const fn raw(&self) -> u64 {
        self.0
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A regular character key (including `' '` for Space).
    Char(char),

    /// Enter/Return key.
    Enter,

    /// Escape key.
    Escape,

    /// Backspace key.
    Backspace,

    /// Tab key.
    Tab,

    /// Shift+Tab (back-tab).
    BackTab,

    /// Delete key.
    Delete,

    /// Home key.
    Home,

    /// End key.
    End,

    /// Page Up key.
    PageUp,

    /// Page Down key.
    PageDown,

    /// Up arrow key.
    Up,

    /// Down arrow key.
    Down,

    /// Left arrow key.
    Left,

    /// Right arrow key.
    Right,
}

impl Key {
    /// The printable character for this key, if it has one.
    #[must_use]
    pub const fn as_char(&self) -> Option<char> {
        match self {
            Self::Char(c) => Some(*c),
            _ => None,
        }
    }
}

bitflags! {
    /// Modifier keys that can be held during an event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// A keyboard event forwarded verbatim from the host's key handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyboardEvent {
    /// The key that was pressed.
    pub key: Key,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl KeyboardEvent {
    /// Create a new keyboard event with no modifiers.
    #[must_use]
    pub const fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    /// Create a keyboard event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Check if this is a specific character key.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self.key, Key::Char(ch) if ch == c)
    }

    /// Check if Ctrl modifier is held.
    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    /// Check if Alt modifier is held.
    #[must_use]
    pub const fn alt(&self) -> bool {
        self.modifiers.contains(Modifiers::ALT)
    }

    /// Check if Shift modifier is held.
    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }
}

/// Pointer button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Primary button (usually left).
    Primary,

    /// Secondary button (usually right).
    Secondary,

    /// Auxiliary button (usually the wheel/middle button).
    Auxiliary,
}

/// A pointer event forwarded from the host's pointerdown handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    /// The button that went down.
    pub button: PointerButton,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// The participating element under the pointer, resolved by the host.
    ///
    /// `None` means the pointer went down outside every registered element
    /// (patterns treat this as an "outside" interaction, e.g. a combobox
    /// closes its popup).
    pub target: Option<ElementId>,

    /// X coordinate in host units.
    pub x: i32,

    /// Y coordinate in host units.
    pub y: i32,
}

impl PointerEvent {
    /// Create a primary-button event on the given target.
    #[must_use]
    pub const fn primary(target: Option<ElementId>) -> Self {
        Self {
            button: PointerButton::Primary,
            modifiers: Modifiers::NONE,
            target,
            x: 0,
            y: 0,
        }
    }

    /// Create a pointer event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Create a pointer event with a position.
    #[must_use]
    pub const fn at(mut self, x: i32, y: i32) -> Self {
        self.x = x;
        self.y = y;
        self
    }
}

#[cfg(feature = "crossterm")]
impl KeyboardEvent {
    /// Convert a crossterm key event into a [`KeyboardEvent`].
    ///
    /// Returns `None` for release/repeat events and for keys the pattern
    /// layer has no use for (function keys, media keys).
    #[must_use]
    pub fn from_crossterm(event: &cte::KeyEvent) -> Option<Self> {
        if event.kind != cte::KeyEventKind::Press {
            return None;
        }
        let key = map_key_code(event.code)?;
        Some(Self {
            key,
            modifiers: map_modifiers(event.modifiers),
        })
    }
}

#[cfg(feature = "crossterm")]
impl PointerEvent {
    /// Convert a crossterm mouse-down event into a [`PointerEvent`].
    ///
    /// Crossterm reports raw cell coordinates; the host is expected to hit
    /// test those and fill in [`PointerEvent::target`] itself, so the
    /// converted event always carries `target: None`.
    #[must_use]
    pub fn from_crossterm(event: &cte::MouseEvent) -> Option<Self> {
        let button = match event.kind {
            cte::MouseEventKind::Down(cte::MouseButton::Left) => PointerButton::Primary,
            cte::MouseEventKind::Down(cte::MouseButton::Right) => PointerButton::Secondary,
            cte::MouseEventKind::Down(cte::MouseButton::Middle) => PointerButton::Auxiliary,
            _ => return None,
        };
        Some(Self {
            button,
            modifiers: map_modifiers(event.modifiers),
            target: None,
            x: i32::from(event.column),
            y: i32::from(event.row),
        })
    }
}

#[cfg(feature = "crossterm")]
fn map_key_code(code: cte::KeyCode) -> Option<Key> {
    match code {
        cte::KeyCode::Backspace => Some(Key::Backspace),
        cte::KeyCode::Enter => Some(Key::Enter),
        cte::KeyCode::Left => Some(Key::Left),
        cte::KeyCode::Right => Some(Key::Right),
        cte::KeyCode::Up => Some(Key::Up),
        cte::KeyCode::Down => Some(Key::Down),
        cte::KeyCode::Home => Some(Key::Home),
        cte::KeyCode::End => Some(Key::End),
        cte::KeyCode::PageUp => Some(Key::PageUp),
        cte::KeyCode::PageDown => Some(Key::PageDown),
        cte::KeyCode::Tab => Some(Key::Tab),
        cte::KeyCode::BackTab => Some(Key::BackTab),
        cte::KeyCode::Delete => Some(Key::Delete),
        cte::KeyCode::Char(c) => Some(Key::Char(c)),
        cte::KeyCode::Esc => Some(Key::Escape),
        _ => None,
    }
}

#[cfg(feature = "crossterm")]
fn map_modifiers(modifiers: cte::KeyModifiers) -> Modifiers {
    let mut mapped = Modifiers::NONE;
    if modifiers.contains(cte::KeyModifiers::SHIFT) {
        mapped |= Modifiers::SHIFT;
    }
    if modifiers.contains(cte::KeyModifiers::ALT) {
        mapped |= Modifiers::ALT;
    }
    if modifiers.contains(cte::KeyModifiers::CONTROL) {
        mapped |= Modifiers::CTRL;
    }
    if modifiers.contains(cte::KeyModifiers::SUPER)
        || modifiers.contains(cte::KeyModifiers::HYPER)
        || modifiers.contains(cte::KeyModifiers::META)
    {
        mapped |= Modifiers::SUPER;
    }
    mapped
}
