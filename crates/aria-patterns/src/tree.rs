#![forbid(unsafe_code)]

//! Tree pattern: list navigation over a recursively expandable hierarchy.
//!
//! Nodes live in an arena (a flat `Vec` with integer parent/child links)
//! rather than as mutually referencing objects, which keeps ownership
//! one-directional and tree shape trivial to build and inspect. Linear
//! keyboard navigation runs over the *visible* flattening: children of
//! collapsed ancestors drop out of navigable order but stay in the arena
//! (and keep their selection). The flattening is memoized against the
//! arena and expansion versions since it is recomputed on every
//! interaction.
//!
//! [`ComboboxTreePattern`] adapts a tree into a combobox popup: its own
//! event entry points are no-ops because the owning combobox drives it by
//! direct calls, and its tabindex is pinned to -1 since the combobox
//! input keeps real focus.

use aria_core::dispatch::{KeyDispatcher, KeyMatch};
use aria_core::event::{ElementId, Key, KeyboardEvent, Modifiers, PointerButton, PointerEvent};
use aria_core::signal::{Memo, Signal};
use std::fmt;
use std::time::{Duration, Instant};

use crate::behaviors::expansion::ExpansionBehavior;
use crate::behaviors::list::{
    FocusMode, ListBehavior, ListInputs, ListItem, Orientation, SelectionMode, TextDirection,
};
use crate::combobox::ComboboxPopup;

/// Host-supplied description of one tree node (with its subtree).
#[derive(Debug, Clone)]
pub struct TreeNodeSpec<V> {
    /// Identifying value, unique within the tree.
    pub value: V,
    /// Whether the node is disabled.
    pub disabled: bool,
    /// Typeahead search term.
    pub search_term: String,
    /// The node's host element.
    pub element: ElementId,
    /// Whether the node starts expanded.
    pub expanded: bool,
    /// Child subtrees, owned by this node.
    pub children: Vec<TreeNodeSpec<V>>,
}

impl<V> TreeNodeSpec<V> {
    /// Create an enabled, collapsed leaf.
    #[must_use]
    pub fn new(value: V, element: ElementId) -> Self {
        Self {
            value,
            disabled: false,
            search_term: String::new(),
            element,
            expanded: false,
            children: Vec::new(),
        }
    }

    /// Mark the node disabled.
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

    /// Start expanded.
    #[must_use]
    pub fn expanded(mut self) -> Self {
        self.expanded = true;
        self
    }

    /// Add a child subtree.
    #[must_use]
    pub fn child(mut self, node: TreeNodeSpec<V>) -> Self {
        self.children.push(node);
        self
    }
}

#[derive(Debug, Clone)]
struct ArenaNode<V> {
    value: V,
    disabled: bool,
    search_term: String,
    element: ElementId,
    parent: Option<usize>,
    children: Vec<usize>,
    /// 1-based depth, for `aria-level`.
    level: usize,
}

#[derive(Debug, Clone)]
pub(crate) struct TreeArena<V> {
    nodes: Vec<ArenaNode<V>>,
    roots: Vec<usize>,
}

impl<V> Default for TreeArena<V> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            roots: Vec::new(),
        }
    }
}

impl<V: Clone + PartialEq> TreeArena<V> {
    pub(crate) fn index_of(&self, value: &V) -> Option<usize> {
        self.nodes.iter().position(|n| &n.value == value)
    }

    fn insert(&mut self, spec: TreeNodeSpec<V>, parent: Option<usize>, expanded: &mut Vec<V>) {
        let level = parent.map_or(1, |p| self.nodes[p].level + 1);
        let index = self.nodes.len();
        if spec.expanded && !spec.children.is_empty() {
            expanded.push(spec.value.clone());
        }
        self.nodes.push(ArenaNode {
            value: spec.value,
            disabled: spec.disabled,
            search_term: spec.search_term,
            element: spec.element,
            parent,
            children: Vec::new(),
            level,
        });
        match parent {
            Some(p) => self.nodes[p].children.push(index),
            None => self.roots.push(index),
        }
        for child in spec.children {
            self.insert(child, Some(index), expanded);
        }
    }
}

/// Per-node handle exposing the state a host binds onto the node's row.
///
/// Structural fields (level, position, parent) are snapshots taken when
/// the item sequence was derived; interaction state (`active`, `selected`,
/// `expanded`) reads live shared cells.
#[derive(Debug, Clone)]
pub struct TreeItemPattern<V: Clone + PartialEq + fmt::Debug + 'static> {
    value: V,
    disabled: bool,
    search_term: String,
    element: ElementId,
    level: usize,
    expandable: bool,
    parent: Option<V>,
    posinset: usize,
    setsize: usize,
    visible: bool,
    expansion: ExpansionBehavior<V>,
    active: Signal<Option<V>>,
    selection: Signal<Vec<V>>,
    focus_mode: Signal<FocusMode>,
}

impl<V: Clone + PartialEq + fmt::Debug + 'static> TreeItemPattern<V> {
    /// 1-based depth for `aria-level`.
    #[must_use]
    pub fn level(&self) -> usize {
        self.level
    }

    /// Whether the node has children.
    #[must_use]
    pub fn expandable(&self) -> bool {
        self.expandable
    }

    /// Whether the node is currently expanded.
    #[must_use]
    pub fn expanded(&self) -> bool {
        self.expandable && self.expansion.is_expanded(&self.value)
    }

    /// Whether this node is the tree's active item.
    #[must_use]
    pub fn active(&self) -> bool {
        self.active.with(|a| a.as_ref() == Some(&self.value))
    }

    /// Whether this node is selected.
    #[must_use]
    pub fn selected(&self) -> bool {
        self.selection.with(|s| s.contains(&self.value))
    }

    /// Whether this node was in the visible flattening when the handle
    /// was derived.
    #[must_use]
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// The parent node's value.
    #[must_use]
    pub fn parent(&self) -> Option<&V> {
        self.parent.as_ref()
    }

    /// 1-based position among siblings for `aria-posinset`.
    #[must_use]
    pub fn posinset(&self) -> usize {
        self.posinset
    }

    /// Sibling count for `aria-setsize`.
    #[must_use]
    pub fn setsize(&self) -> usize {
        self.setsize
    }

    /// The node's host element.
    #[must_use]
    pub fn id(&self) -> ElementId {
        self.element
    }

    /// Tabindex for the node's row element.
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

impl<V: Clone + PartialEq + fmt::Debug + 'static> ListItem for TreeItemPattern<V> {
    type Value = V;

    fn value(&self) -> V {
        self.value.clone()
    }

    fn disabled(&self) -> bool {
        self.disabled
    }

    fn search_term(&self) -> String {
        self.search_term.clone()
    }

    fn element(&self) -> ElementId {
        self.element
    }
}

/// Construction-time inputs for a [`TreePattern`].
#[derive(Debug, Clone)]
pub struct TreeInputs {
    /// The tree container element.
    pub element: ElementId,
    /// Whether the whole tree is disabled.
    pub disabled: bool,
    /// Multi-selection.
    pub multi: bool,
    /// Whether linear navigation wraps.
    pub wrap: bool,
    /// Focus strategy.
    pub focus_mode: FocusMode,
    /// Selection strategy.
    pub selection_mode: SelectionMode,
    /// Text direction: resolves which arrow expands and which collapses.
    pub text_direction: TextDirection,
    /// Typeahead window.
    pub typeahead_delay: Duration,
}

impl TreeInputs {
    /// Single-select, wrapping, follow-focus tree.
    #[must_use]
    pub fn new(element: ElementId) -> Self {
        Self {
            element,
            disabled: false,
            multi: false,
            wrap: true,
            focus_mode: FocusMode::default(),
            selection_mode: SelectionMode::default(),
            text_direction: TextDirection::default(),
            typeahead_delay: Duration::from_millis(500),
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
    ExpandOrChild,
    CollapseOrParent,
    SelectActive,
    Typeahead,
}

/// Tree interaction pattern.
#[derive(Debug, Clone)]
pub struct TreePattern<V: Clone + PartialEq + fmt::Debug + 'static> {
    /// The linear engine over the visible flattening.
    pub list: ListBehavior<TreeItemPattern<V>>,
    /// Per-node open/closed state, keyed by value. Multi-expandable.
    pub expansion: ExpansionBehavior<V>,
    pub(crate) arena: Signal<TreeArena<V>>,
    visible: Memo<Vec<TreeItemPattern<V>>>,
    element: ElementId,
}

impl<V: Clone + PartialEq + fmt::Debug + 'static> TreePattern<V> {
    /// Create an empty tree.
    #[must_use]
    pub fn new(inputs: TreeInputs) -> Self {
        let list = ListBehavior::new(ListInputs {
            disabled: inputs.disabled,
            multi: inputs.multi,
            wrap: inputs.wrap,
            orientation: Orientation::Vertical,
            text_direction: inputs.text_direction,
            focus_mode: inputs.focus_mode,
            selection_mode: inputs.selection_mode,
            typeahead_delay: inputs.typeahead_delay,
        });
        let arena: Signal<TreeArena<V>> = Signal::new(TreeArena::default());
        let expansion: ExpansionBehavior<V> = ExpansionBehavior::new(true);

        let visible = {
            let arena_dep = arena.clone();
            let expansion_dep = expansion.expanded.clone();
            let arena_read = arena.clone();
            let expansion_read = expansion.clone();
            let active = list.active.clone();
            let selection = list.value.clone();
            let focus_mode = list.focus_mode.clone();
            Memo::new(
                move || {
                    arena_dep
                        .version()
                        .wrapping_add(expansion_dep.version())
                },
                move || {
                    flatten_visible(
                        &arena_read.get(),
                        &expansion_read,
                        &active,
                        &selection,
                        &focus_mode,
                    )
                },
            )
        };

        Self {
            list,
            expansion,
            arena,
            visible,
            element: inputs.element,
        }
    }

    /// Rebind the node hierarchy.
    ///
    /// The expansion state is re-seeded from the specs' `expanded` flags;
    /// a host that wants to preserve interactive expansion across a
    /// rebind stamps its current expanded values into the specs first.
    /// Selection and the active item are pruned against the new arena.
    pub fn set_nodes(&self, specs: impl IntoIterator<Item = TreeNodeSpec<V>>) {
        let mut arena = TreeArena::default();
        let mut expanded = Vec::new();
        for spec in specs {
            arena.insert(spec, None, &mut expanded);
        }

        #[cfg(debug_assertions)]
        for (i, a) in arena.nodes.iter().enumerate() {
            for b in &arena.nodes[i + 1..] {
                debug_assert!(a.value != b.value, "duplicate tree node value {:?}", a.value);
            }
        }

        self.list
            .value
            .update(|selected| selected.retain(|v| arena.index_of(v).is_some()));
        if let Some(active) = self.list.active.get()
            && arena.index_of(&active).is_none()
        {
            self.list.active.set(None);
        }
        self.expansion.expanded.set(expanded);
        self.arena.set(arena);
        self.sync();
    }

    /// The tree container element.
    #[must_use]
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Handles for the currently visible rows, in navigation order.
    #[must_use]
    pub fn visible_items(&self) -> Vec<TreeItemPattern<V>> {
        self.sync();
        self.list.items.get()
    }

    /// Handle for any node by value, visible or not.
    #[must_use]
    pub fn item(&self, value: &V) -> Option<TreeItemPattern<V>> {
        self.sync();
        let arena = self.arena.get();
        let index = arena.index_of(value)?;
        let visible = self
            .list
            .items
            .with(|items| items.iter().any(|it| &it.value == value));
        Some(make_item(
            &arena,
            index,
            visible,
            &self.expansion,
            &self.list.active,
            &self.list.value,
            &self.list.focus_mode,
        ))
    }

    /// Tabindex for the container element.
    #[must_use]
    pub fn tabindex(&self) -> i8 {
        self.list.tabindex()
    }

    /// `aria-activedescendant` reference for the container.
    #[must_use]
    pub fn activedescendant(&self) -> Option<ElementId> {
        self.sync();
        self.list.activedescendant()
    }

    /// Move to the next visible node.
    pub fn next(&self, select: bool) -> bool {
        self.sync();
        self.list.next(select)
    }

    /// Move to the previous visible node.
    pub fn prev(&self, select: bool) -> bool {
        self.sync();
        self.list.prev(select)
    }

    /// Move to the first visible node.
    pub fn first(&self, select: bool) -> bool {
        self.sync();
        self.list.first(select)
    }

    /// Move to the last visible node.
    pub fn last(&self, select: bool) -> bool {
        self.sync();
        self.list.last(select)
    }

    /// Move to a visible node by value. Hidden nodes are a no-op.
    pub fn goto(&self, value: &V, select: bool) -> bool {
        self.sync();
        self.list.goto(value, select)
    }

    /// Expand the active node.
    pub fn expand(&self) -> bool {
        match self.list.active.get() {
            Some(value) => self.expand_item(&value),
            None => false,
        }
    }

    /// Collapse the active node.
    pub fn collapse(&self) -> bool {
        match self.list.active.get() {
            Some(value) => self.collapse_item(&value),
            None => false,
        }
    }

    /// Expand a node by value. Leaves and disabled nodes are a no-op.
    pub fn expand_item(&self, value: &V) -> bool {
        let Some(index) = self.arena.with(|a| a.index_of(value)) else {
            return false;
        };
        let expandable = self
            .arena
            .with(|a| !a.nodes[index].children.is_empty() && !a.nodes[index].disabled);
        if !expandable || self.expansion.is_expanded(value) {
            return false;
        }
        self.expansion.open(value);
        self.sync();
        true
    }

    /// Collapse a node by value.
    ///
    /// If the active node was a descendant of the collapsed node it is no
    /// longer navigable, so the active item re-anchors to the collapsed
    /// node itself.
    pub fn collapse_item(&self, value: &V) -> bool {
        if !self.expansion.is_expanded(value) {
            return false;
        }
        self.expansion.close(value);
        self.sync();
        if let Some(active) = self.list.active.get()
            && self.list.index_of(&active).is_none()
        {
            self.list.active.set(Some(value.clone()));
        }
        true
    }

    /// Toggle a node's expansion by value.
    pub fn toggle_item(&self, value: &V) -> bool {
        if self.expansion.is_expanded(value) {
            self.collapse_item(value)
        } else {
            self.expand_item(value)
        }
    }

    /// Activate the first selected visible node, else the first focusable
    /// visible node.
    pub fn set_default_state(&self) {
        self.sync();
        self.list.set_default_state();
    }

    /// Forward a keydown event. Returns whether it was handled.
    pub fn on_keydown(&self, event: &KeyboardEvent) -> bool {
        self.on_keydown_at(event, Instant::now())
    }

    /// Forward a keydown event with an explicit timestamp.
    pub fn on_keydown_at(&self, event: &KeyboardEvent, now: Instant) -> bool {
        if self.list.disabled.get() {
            return false;
        }
        self.sync();
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
            KeyAction::ExpandOrChild => self.expand_or_first_child(),
            KeyAction::CollapseOrParent => self.collapse_or_parent(),
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
    ///
    /// A press on a row focuses and selects it; on an expandable row it
    /// also toggles the subtree.
    pub fn on_pointerdown(&self, event: &PointerEvent) -> bool {
        if self.list.disabled.get() || event.button != PointerButton::Primary {
            return false;
        }
        self.sync();
        let Some(item) = event.target.and_then(|t| self.list.item_by_element(t)) else {
            return false;
        };
        let value = item.value();
        if self.list.goto(&value, true) && item.expandable() {
            self.toggle_item(&value);
        }
        true
    }

    /// Re-derive the visible flattening into the list engine.
    pub(crate) fn sync(&self) {
        self.list.items.set(self.visible.get());
    }

    fn expand_or_first_child(&self) {
        let Some(active) = self.list.active_item() else {
            return;
        };
        if !active.expandable() || active.disabled {
            return;
        }
        if !active.expanded() {
            self.expand_item(&active.value);
            return;
        }
        // Already expanded: descend to the first child.
        let arena = self.arena.get();
        if let Some(index) = arena.index_of(&active.value)
            && let Some(&child) = arena.nodes[index].children.first()
        {
            let child_value = arena.nodes[child].value.clone();
            self.sync();
            self.list.goto(&child_value, false);
        }
    }

    fn collapse_or_parent(&self) {
        let Some(active) = self.list.active_item() else {
            return;
        };
        if active.expanded() {
            self.collapse_item(&active.value);
            return;
        }
        if let Some(parent) = active.parent.clone() {
            self.list.goto(&parent, false);
        }
    }

    fn keydown_rules(&self) -> KeyDispatcher<KeyAction> {
        let (expand_key, collapse_key) = match self.list.text_direction.get() {
            TextDirection::Ltr => (Key::Right, Key::Left),
            TextDirection::Rtl => (Key::Left, Key::Right),
        };
        let multi = self.list.multi.get();

        let mut rules = KeyDispatcher::new();
        rules.on_key(Key::Down, KeyAction::Next);
        rules.on_key(Key::Up, KeyAction::Prev);
        if multi {
            rules.on(Modifiers::SHIFT, KeyMatch::Key(Key::Down), KeyAction::ExtendNext);
            rules.on(Modifiers::SHIFT, KeyMatch::Key(Key::Up), KeyAction::ExtendPrev);
        }
        rules.on_key(expand_key, KeyAction::ExpandOrChild);
        rules.on_key(collapse_key, KeyAction::CollapseOrParent);
        rules.on_key(Key::Home, KeyAction::First);
        rules.on_key(Key::End, KeyAction::Last);
        rules.on_key(Key::Enter, KeyAction::SelectActive);
        rules.on_key(Key::Char(' '), KeyAction::SelectActive);
        if !self.list.typeahead_delay.get().is_zero() {
            rules.on(Modifiers::NONE, KeyMatch::AnyChar, KeyAction::Typeahead);
        }
        rules
    }
}

fn make_item<V: Clone + PartialEq + fmt::Debug + 'static>(
    arena: &TreeArena<V>,
    index: usize,
    visible: bool,
    expansion: &ExpansionBehavior<V>,
    active: &Signal<Option<V>>,
    selection: &Signal<Vec<V>>,
    focus_mode: &Signal<FocusMode>,
) -> TreeItemPattern<V> {
    let node = &arena.nodes[index];
    let siblings = match node.parent {
        Some(p) => &arena.nodes[p].children,
        None => &arena.roots,
    };
    TreeItemPattern {
        value: node.value.clone(),
        disabled: node.disabled,
        search_term: node.search_term.clone(),
        element: node.element,
        level: node.level,
        expandable: !node.children.is_empty(),
        parent: node.parent.map(|p| arena.nodes[p].value.clone()),
        posinset: siblings.iter().position(|&s| s == index).map_or(1, |p| p + 1),
        setsize: siblings.len(),
        visible,
        expansion: expansion.clone(),
        active: active.clone(),
        selection: selection.clone(),
        focus_mode: focus_mode.clone(),
    }
}

/// Depth-first flattening of the nodes whose ancestors are all expanded.
fn flatten_visible<V: Clone + PartialEq + fmt::Debug + 'static>(
    arena: &TreeArena<V>,
    expansion: &ExpansionBehavior<V>,
    active: &Signal<Option<V>>,
    selection: &Signal<Vec<V>>,
    focus_mode: &Signal<FocusMode>,
) -> Vec<TreeItemPattern<V>> {
    fn walk<V: Clone + PartialEq + fmt::Debug + 'static>(
        arena: &TreeArena<V>,
        index: usize,
        expansion: &ExpansionBehavior<V>,
        active: &Signal<Option<V>>,
        selection: &Signal<Vec<V>>,
        focus_mode: &Signal<FocusMode>,
        out: &mut Vec<TreeItemPattern<V>>,
    ) {
        out.push(make_item(
            arena, index, true, expansion, active, selection, focus_mode,
        ));
        let node = &arena.nodes[index];
        if !node.children.is_empty() && expansion.is_expanded(&node.value) {
            for &child in &node.children {
                walk(arena, child, expansion, active, selection, focus_mode, out);
            }
        }
    }

    let mut out = Vec::with_capacity(arena.nodes.len());
    for &root in &arena.roots {
        walk(
            arena, root, expansion, active, selection, focus_mode, &mut out,
        );
    }
    out
}

/// A tree adapted as a combobox popup.
///
/// The combobox drives navigation through direct [`ComboboxPopup`] calls;
/// the tree's own event entry points are deliberately no-ops here, and
/// its tabindex is pinned to -1 because the combobox input holds focus.
#[derive(Debug, Clone)]
pub struct ComboboxTreePattern<V: Clone + PartialEq + fmt::Debug + 'static> {
    tree: TreePattern<V>,
}

impl<V: Clone + PartialEq + fmt::Debug + 'static> ComboboxTreePattern<V> {
    /// Wrap a tree for use as a combobox popup.
    #[must_use]
    pub fn new(tree: TreePattern<V>) -> Self {
        tree.list.focus_mode.set(FocusMode::ActiveDescendant);
        Self { tree }
    }

    /// The underlying tree.
    #[must_use]
    pub fn tree(&self) -> &TreePattern<V> {
        &self.tree
    }

    /// Pinned to -1: the combobox input element keeps DOM focus.
    #[must_use]
    pub fn tabindex(&self) -> i8 {
        -1
    }

    /// No-op: the owning combobox handles keyboard input.
    pub fn on_keydown(&self, _event: &KeyboardEvent) -> bool {
        false
    }

    /// No-op: the owning combobox handles pointer input.
    pub fn on_pointerdown(&self, _event: &PointerEvent) -> bool {
        false
    }

    /// No-op: the owning combobox decides the default focus on open.
    pub fn set_default_state(&self) {}
}

impl<V: Clone + PartialEq + fmt::Debug + 'static> ComboboxPopup for ComboboxTreePattern<V> {
    fn focus_first(&self) -> bool {
        self.tree.first(false)
    }

    fn focus_last(&self) -> bool {
        self.tree.last(false)
    }

    fn focus_next(&self) -> bool {
        self.tree.next(false)
    }

    fn focus_prev(&self) -> bool {
        self.tree.prev(false)
    }

    fn focus_default(&self) -> bool {
        self.tree.sync();
        self.tree.list.set_default_state()
    }

    fn clear_active(&self) {
        self.tree.list.unfocus();
    }

    fn has_active(&self) -> bool {
        self.tree.list.active.with(Option::is_some)
    }

    fn active_element(&self) -> Option<ElementId> {
        self.tree.list.active_item().map(|item| item.element)
    }

    fn select_active(&self) {
        self.tree.list.select(None);
    }

    fn contains(&self, element: ElementId) -> bool {
        element == self.tree.element()
            || self
                .tree
                .arena
                .with(|a| a.nodes.iter().any(|n| n.element == element))
    }

    fn commit_element(&self, element: ElementId) -> bool {
        self.tree.sync();
        let Some(item) = self.tree.list.item_by_element(element) else {
            return false;
        };
        let value = item.value();
        if item.expandable() {
            // Folders toggle instead of committing, so the popup stays
            // open while the user drills in.
            self.tree.goto(&value, false);
            self.tree.toggle_item(&value);
            false
        } else {
            self.tree.goto(&value, true)
        }
    }

    fn expand_active(&self) -> bool {
        self.tree.expand()
    }

    fn collapse_active(&self) -> bool {
        self.tree.collapse()
    }
}
