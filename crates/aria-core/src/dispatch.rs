#![forbid(unsafe_code)]

//! Declarative event-to-action dispatch tables.
//!
//! A pattern describes its keyboard/pointer handling as an ordered rule
//! table mapping event shapes to values of a pattern-defined action enum.
//! [`KeyDispatcher::handle`] resolves the *first* rule (in registration
//! order) whose predicate matches and returns its action; the pattern then
//! executes the action against its own state. No match is a no-op.
//!
//! Resolution is pure: rules never mutate anything, so the dispatch step
//! itself never needs rollback, and registration order is a meaningful
//! precedence. A Space rule registered before a catch-all character rule
//! claims `' '` for selection instead of typeahead.
//!
//! Patterns whose bindings depend on current inputs (orientation-aware
//! arrow keys, direction-aware expand/collapse) rebuild their table from
//! those inputs on each `on_keydown`; the tables are a handful of rules,
//! so the rebuild is a cheap ordered scan.

use crate::event::{Key, KeyboardEvent, Modifiers, PointerButton, PointerEvent};

/// Key predicate for a dispatch rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMatch {
    /// Match one exact key.
    Key(Key),

    /// Match any printable character key.
    ///
    /// Used for typeahead: matches `Key::Char(_)` with no modifiers or
    /// with Shift only (Shift is how uppercase characters arrive).
    AnyChar,
}

#[derive(Debug, Clone)]
struct KeyRule<A> {
    modifiers: Modifiers,
    matcher: KeyMatch,
    action: A,
}

/// Ordered keyboard dispatch table resolving events to actions.
#[derive(Debug, Clone)]
pub struct KeyDispatcher<A> {
    rules: Vec<KeyRule<A>>,
}

impl<A> Default for KeyDispatcher<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> KeyDispatcher<A> {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule. Earlier rules take precedence.
    pub fn on(&mut self, modifiers: Modifiers, matcher: KeyMatch, action: A) -> &mut Self {
        self.rules.push(KeyRule {
            modifiers,
            matcher,
            action,
        });
        self
    }

    /// Append an exact-key rule with no modifiers.
    pub fn on_key(&mut self, key: Key, action: A) -> &mut Self {
        self.on(Modifiers::NONE, KeyMatch::Key(key), action)
    }

    /// Number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the table has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<A: Clone> KeyDispatcher<A> {
    /// Resolve an event to the first matching rule's action.
    #[must_use]
    pub fn handle(&self, event: &KeyboardEvent) -> Option<A> {
        self.rules
            .iter()
            .find(|rule| rule_matches(rule, event))
            .map(|rule| rule.action.clone())
    }
}

fn rule_matches<A>(rule: &KeyRule<A>, event: &KeyboardEvent) -> bool {
    match rule.matcher {
        KeyMatch::Key(key) => event.key == key && event.modifiers == rule.modifiers,
        KeyMatch::AnyChar => {
            matches!(event.key, Key::Char(_))
                && (event.modifiers == Modifiers::NONE || event.modifiers == Modifiers::SHIFT)
        }
    }
}

#[derive(Debug, Clone)]
struct PointerRule<A> {
    button: PointerButton,
    modifiers: Modifiers,
    action: A,
}

/// Ordered pointer dispatch table resolving events to actions.
///
/// Rules match on button and exact modifier set only; resolving the
/// event's target to a participating item is the calling pattern's job
/// (it owns the element-to-item lookup), which keeps rule predicates
/// pure.
#[derive(Debug, Clone)]
pub struct PointerDispatcher<A> {
    rules: Vec<PointerRule<A>>,
}

impl<A> Default for PointerDispatcher<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> PointerDispatcher<A> {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule. Earlier rules take precedence.
    pub fn on(&mut self, button: PointerButton, modifiers: Modifiers, action: A) -> &mut Self {
        self.rules.push(PointerRule {
            button,
            modifiers,
            action,
        });
        self
    }
}

impl<A: Clone> PointerDispatcher<A> {
    /// Resolve an event to the first matching rule's action.
    #[must_use]
    pub fn handle(&self, event: &PointerEvent) -> Option<A> {
        self.rules
            .iter()
            .find(|rule| rule.button == event.button && rule.modifiers == event.modifiers)
            .map(|rule| rule.action.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::ElementId;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Action {
        Next,
        Prev,
        Select,
        Type,
    }

    fn key(k: Key) -> KeyboardEvent {
        KeyboardEvent::new(k)
    }

    #[test]
    fn resolves_exact_key() {
        let mut d = KeyDispatcher::new();
        d.on_key(Key::Down, Action::Next).on_key(Key::Up, Action::Prev);

        assert_eq!(d.handle(&key(Key::Down)), Some(Action::Next));
        assert_eq!(d.handle(&key(Key::Up)), Some(Action::Prev));
    }

    #[test]
    fn no_match_is_none() {
        let mut d = KeyDispatcher::new();
        d.on_key(Key::Down, Action::Next);
        assert_eq!(d.handle(&key(Key::Escape)), None);
    }

    #[test]
    fn modifiers_must_match_exactly() {
        let mut d = KeyDispatcher::new();
        d.on(
            Modifiers::CTRL,
            KeyMatch::Key(Key::Char('a')),
            Action::Select,
        );

        let plain = key(Key::Char('a'));
        let ctrl = plain.with_modifiers(Modifiers::CTRL);
        let ctrl_shift = plain.with_modifiers(Modifiers::CTRL | Modifiers::SHIFT);

        assert_eq!(d.handle(&plain), None);
        assert_eq!(d.handle(&ctrl), Some(Action::Select));
        assert_eq!(d.handle(&ctrl_shift), None);
    }

    #[test]
    fn first_registered_rule_wins() {
        // Space registered before the catch-all character rule claims ' '.
        let mut d = KeyDispatcher::new();
        d.on_key(Key::Char(' '), Action::Select);
        d.on(Modifiers::NONE, KeyMatch::AnyChar, Action::Type);

        assert_eq!(d.handle(&key(Key::Char(' '))), Some(Action::Select));
        assert_eq!(d.handle(&key(Key::Char('b'))), Some(Action::Type));
    }

    #[test]
    fn any_char_accepts_shift_only() {
        let mut d = KeyDispatcher::new();
        d.on(Modifiers::NONE, KeyMatch::AnyChar, Action::Type);

        let shifted = key(Key::Char('B')).with_modifiers(Modifiers::SHIFT);
        let ctrled = key(Key::Char('b')).with_modifiers(Modifiers::CTRL);

        assert_eq!(d.handle(&shifted), Some(Action::Type));
        assert_eq!(d.handle(&ctrled), None);
    }

    #[test]
    fn any_char_ignores_non_characters() {
        let mut d = KeyDispatcher::new();
        d.on(Modifiers::NONE, KeyMatch::AnyChar, Action::Type);
        assert_eq!(d.handle(&key(Key::Enter)), None);
    }

    #[test]
    fn empty_table_reports_itself() {
        let d: KeyDispatcher<Action> = KeyDispatcher::new();
        assert!(d.is_empty());
        assert_eq!(d.len(), 0);
    }

    #[test]
    fn pointer_rules_match_button_and_modifiers() {
        let mut d = PointerDispatcher::new();
        d.on(PointerButton::Primary, Modifiers::SHIFT, Action::Prev);
        d.on(PointerButton::Primary, Modifiers::NONE, Action::Select);

        let target = Some(ElementId::new(1));
        let plain = PointerEvent::primary(target);
        let shifted = PointerEvent::primary(target).with_modifiers(Modifiers::SHIFT);

        assert_eq!(d.handle(&plain), Some(Action::Select));
        assert_eq!(d.handle(&shifted), Some(Action::Prev));
    }

    #[test]
    fn pointer_secondary_button_unmatched() {
        let mut d = PointerDispatcher::new();
        d.on(PointerButton::Primary, Modifiers::NONE, Action::Select);

        let event = PointerEvent {
            button: PointerButton::Secondary,
            ..PointerEvent::primary(None)
        };
        assert_eq!(d.handle(&event), None);
    }
}
