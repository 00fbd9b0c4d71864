#![forbid(unsafe_code)]

//! Opt-in persistence for user-facing pattern state.
//!
//! The [`Stateful`] trait defines the contract for patterns whose
//! interactive state (selection, active item, expansion) should survive a
//! session or a configuration rebuild. It is orthogonal to the patterns'
//! event handling: `save_state` is a pure read, `restore_state` only
//! mutates the pattern.
//!
//! Restoring is lenient: saved values that no longer resolve to an item
//! are dropped silently, so a stale blob can never wedge a pattern. Snapshot types derive `serde` under the `state-persistence`
//! feature; without it they are still usable as in-memory snapshots.

use core::fmt;
use core::hash::{Hash, Hasher};

use crate::disclosure::AccordionGroupPattern;
use crate::listbox::ListboxPattern;
use crate::tabs::TabListPattern;
use crate::tree::TreePattern;

/// Unique identifier for a pattern's persisted state.
///
/// The `(pattern_type, instance_id)` pair maps a pattern instance to its
/// stored blob. The instance id is derived from the pattern's container
/// element, so hosts that want stable persistence should assign stable
/// element ids.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StateKey {
    /// The pattern type name (e.g. `"Listbox"`, `"Tree"`).
    pub pattern_type: &'static str,
    /// Instance-unique identifier.
    pub instance_id: String,
}

impl StateKey {
    /// Create a new state key.
    #[must_use]
    pub fn new(pattern_type: &'static str, id: impl Into<String>) -> Self {
        Self {
            pattern_type,
            instance_id: id.into(),
        }
    }

    /// Canonical string representation: `"pattern_type::instance_id"`.
    #[must_use]
    pub fn canonical(&self) -> String {
        format!("{}::{}", self.pattern_type, self.instance_id)
    }
}

impl Hash for StateKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pattern_type.hash(state);
        self.instance_id.hash(state);
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical())
    }
}

/// Contract for patterns with persistable user-facing state.
///
/// Round-trip fidelity: `restore_state(save_state())` must reproduce the
/// observable interactive state, modulo values that stopped resolving to
/// items in between.
pub trait Stateful {
    /// The snapshot type.
    type State;

    /// Key identifying this instance's blob.
    fn state_key(&self) -> StateKey;

    /// Take a snapshot. Pure read.
    fn save_state(&self) -> Self::State;

    /// Re-apply a snapshot, dropping values that no longer resolve.
    fn restore_state(&self, state: Self::State);
}

/// Persistable state for a [`ListboxPattern`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct ListboxPersistState<V> {
    /// Active option value.
    pub active: Option<V>,
    /// Selected option values.
    pub selection: Vec<V>,
}

impl<V: Clone + PartialEq + fmt::Debug + 'static> Stateful for ListboxPattern<V> {
    type State = ListboxPersistState<V>;

    fn state_key(&self) -> StateKey {
        StateKey::new("Listbox", self.element().raw().to_string())
    }

    fn save_state(&self) -> ListboxPersistState<V> {
        ListboxPersistState {
            active: self.list.active.get(),
            selection: self.list.value.get(),
        }
    }

    fn restore_state(&self, state: ListboxPersistState<V>) {
        let selection: Vec<V> = state
            .selection
            .into_iter()
            .filter(|v| self.list.item(v).is_some())
            .collect();
        self.list.value.set(selection);
        match state.active.filter(|v| self.list.item(v).is_some()) {
            Some(active) => self.list.active.set(Some(active)),
            None => self.list.active.set(None),
        }
    }
}

/// Persistable state for a [`TreePattern`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct TreePersistState<V> {
    /// Expanded node values.
    pub expanded: Vec<V>,
    /// Selected node values.
    pub selection: Vec<V>,
    /// Active node value.
    pub active: Option<V>,
}

impl<V: Clone + PartialEq + fmt::Debug + 'static> Stateful for TreePattern<V> {
    type State = TreePersistState<V>;

    fn state_key(&self) -> StateKey {
        StateKey::new("Tree", self.element().raw().to_string())
    }

    fn save_state(&self) -> TreePersistState<V> {
        TreePersistState {
            expanded: self.expansion.expanded_ids(),
            selection: self.list.value.get(),
            active: self.list.active.get(),
        }
    }

    fn restore_state(&self, state: TreePersistState<V>) {
        let in_arena = |v: &V| self.arena.with(|a| a.index_of(v).is_some());

        let expanded: Vec<V> = state.expanded.into_iter().filter(|v| in_arena(v)).collect();
        self.expansion.expanded.set(expanded);

        let selection: Vec<V> = state.selection.into_iter().filter(|v| in_arena(v)).collect();
        self.list.value.set(selection);

        self.sync();
        // The active node must be navigable, not merely present.
        match state.active.filter(|v| self.list.index_of(v).is_some()) {
            Some(active) => self.list.active.set(Some(active)),
            None => self.list.active.set(None),
        }
    }
}

/// Persistable state for a [`TabListPattern`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct TabsPersistState<V> {
    /// The selected tab value.
    pub selected: Option<V>,
}

impl<V: Clone + PartialEq + fmt::Debug + 'static> Stateful for TabListPattern<V> {
    type State = TabsPersistState<V>;

    fn state_key(&self) -> StateKey {
        StateKey::new("Tabs", self.element().raw().to_string())
    }

    fn save_state(&self) -> TabsPersistState<V> {
        TabsPersistState {
            selected: self.list.value.get().first().cloned(),
        }
    }

    fn restore_state(&self, state: TabsPersistState<V>) {
        if let Some(selected) = state.selected
            && self.list.item(&selected).is_some()
        {
            self.select_value(&selected);
        }
    }
}

/// Persistable state for an [`AccordionGroupPattern`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct AccordionPersistState<V> {
    /// Values of the triggers whose panels are open.
    pub expanded: Vec<V>,
}

impl<V: Clone + PartialEq + fmt::Debug + 'static> Stateful for AccordionGroupPattern<V> {
    type State = AccordionPersistState<V>;

    fn state_key(&self) -> StateKey {
        StateKey::new("Accordion", self.element().raw().to_string())
    }

    fn save_state(&self) -> AccordionPersistState<V> {
        AccordionPersistState {
            expanded: self.expansion.expanded_ids(),
        }
    }

    fn restore_state(&self, state: AccordionPersistState<V>) {
        let mut expanded: Vec<V> = state
            .expanded
            .into_iter()
            .filter(|v| self.list.item(v).is_some())
            .collect();
        if !self.expansion.multi_expandable.get() {
            expanded.truncate(1);
        }
        self.expansion.expanded.set(expanded);
    }
}
