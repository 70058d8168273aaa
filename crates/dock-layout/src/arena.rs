use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use dock_core::PaneId;

use crate::node::{Leaf, PaneNode, Split};

// ──────────────────────────────────────────────
// PaneArena: flat id -> node storage
// ──────────────────────────────────────────────

/// Identifier-indexed pane storage. No business logic lives here; a missing
/// id is reported as `None` and the caller decides what that means.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaneArena {
    nodes: HashMap<PaneId, PaneNode>,
}

impl PaneArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: PaneId) -> Option<&PaneNode> {
        self.nodes.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: PaneId) -> Option<&mut PaneNode> {
        self.nodes.get_mut(&id)
    }

    pub fn contains(&self, id: PaneId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn leaf(&self, id: PaneId) -> Option<&Leaf> {
        self.get(id)?.as_leaf()
    }

    pub(crate) fn leaf_mut(&mut self, id: PaneId) -> Option<&mut Leaf> {
        self.get_mut(id)?.as_leaf_mut()
    }

    pub fn split(&self, id: PaneId) -> Option<&Split> {
        self.get(id)?.as_split()
    }

    pub(crate) fn split_mut(&mut self, id: PaneId) -> Option<&mut Split> {
        self.get_mut(id)?.as_split_mut()
    }

    /// Store a node under its own id, returning whatever occupied that slot.
    pub(crate) fn insert(&mut self, node: PaneNode) -> Option<PaneNode> {
        self.nodes.insert(node.id(), node)
    }

    pub(crate) fn remove(&mut self, id: PaneId) -> Option<PaneNode> {
        self.nodes.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = PaneId> + '_ {
        self.nodes.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PaneId, &PaneNode)> + '_ {
        self.nodes.iter().map(|(id, node)| (*id, node))
    }

    /// The split that lists `child` as one of its children.
    pub(crate) fn parent_of(&self, child: PaneId) -> Option<PaneId> {
        self.nodes.values().find_map(|node| match node {
            PaneNode::Split(split) if split.first == child || split.second == child => {
                Some(split.id)
            }
            _ => None,
        })
    }
}

// ──────────────────────────────────────────────
// Leaves: lazy pre-order walk
// ──────────────────────────────────────────────

/// Pre-order iterator over the leaves reachable from a root.
pub struct Leaves<'a> {
    arena: &'a PaneArena,
    stack: Vec<PaneId>,
}

impl<'a> Leaves<'a> {
    pub(crate) fn new(arena: &'a PaneArena, root: PaneId) -> Self {
        Self {
            arena,
            stack: vec![root],
        }
    }
}

impl<'a> Iterator for Leaves<'a> {
    type Item = &'a Leaf;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            match self.arena.get(id) {
                Some(PaneNode::Leaf(leaf)) => return Some(leaf),
                Some(PaneNode::Split(split)) => {
                    self.stack.push(split.second);
                    self.stack.push(split.first);
                }
                None => {}
            }
        }
        None
    }
}
