use std::collections::HashSet;
use std::fmt;

use dock_core::{PaneId, TabId};

use crate::node::PaneNode;
use crate::PaneLayout;

/// A broken structural invariant. Always a bug in the engine, never a caller error.
#[derive(Debug, Clone, PartialEq)]
pub enum InvariantViolation {
    /// A split references a child that is not in the arena.
    MissingNode(PaneId),
    /// A node is reachable from the root more than once.
    SharedNode(PaneId),
    /// A node in the arena is not reachable from the root.
    Orphan(PaneId),
    /// An arena slot holds a node carrying a different id.
    SlotMismatch { slot: PaneId, node: PaneId },
    RatioOutOfRange { split: PaneId, ratio: f32 },
    /// A non-root leaf, or a root leaf with siblings, has no tabs.
    EmptyLeaf(PaneId),
    ActivePaneNotLeaf(PaneId),
    ActiveTabMissing { pane: PaneId, tab: Option<TabId> },
    DuplicateTab(TabId),
    DanglingAlias { alias: PaneId, target: PaneId },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingNode(id) => write!(f, "split child {id} is missing from the arena"),
            Self::SharedNode(id) => write!(f, "node {id} is reachable more than once"),
            Self::Orphan(id) => write!(f, "node {id} is not reachable from the root"),
            Self::SlotMismatch { slot, node } => write!(f, "slot {slot} holds node {node}"),
            Self::RatioOutOfRange { split, ratio } => {
                write!(f, "split {split} has ratio {ratio} outside the allowed range")
            }
            Self::EmptyLeaf(id) => write!(f, "leaf {id} has no tabs"),
            Self::ActivePaneNotLeaf(id) => write!(f, "active pane {id} is not a leaf"),
            Self::ActiveTabMissing { pane, tab } => {
                write!(f, "leaf {pane} has active tab {tab:?} that does not match its tabs")
            }
            Self::DuplicateTab(id) => write!(f, "tab {id} appears more than once"),
            Self::DanglingAlias { alias, target } => {
                write!(f, "alias {alias} points at missing node {target}")
            }
        }
    }
}

impl PaneLayout {
    /// Check every structural invariant of the layout.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        for (slot, node) in self.panes.iter() {
            if slot != node.id() {
                return Err(InvariantViolation::SlotMismatch { slot, node: node.id() });
            }
        }

        let mut seen_panes = HashSet::new();
        let mut seen_tabs = HashSet::new();
        let mut stack = vec![self.root];
        let sole_root = self.panes.len() == 1;

        while let Some(id) = stack.pop() {
            if !seen_panes.insert(id) {
                return Err(InvariantViolation::SharedNode(id));
            }
            match self.panes.get(id) {
                None => return Err(InvariantViolation::MissingNode(id)),
                Some(PaneNode::Split(split)) => {
                    let (min, max) = (self.min_ratio, 1.0 - self.min_ratio);
                    if !(split.ratio >= min && split.ratio <= max) {
                        return Err(InvariantViolation::RatioOutOfRange {
                            split: id,
                            ratio: split.ratio,
                        });
                    }
                    stack.push(split.second);
                    stack.push(split.first);
                }
                Some(PaneNode::Leaf(leaf)) => {
                    if leaf.is_empty() && !(sole_root && id == self.root) {
                        return Err(InvariantViolation::EmptyLeaf(id));
                    }
                    let active_ok = match leaf.active_tab {
                        None => leaf.is_empty(),
                        Some(tab) => leaf.contains(tab),
                    };
                    if !active_ok {
                        return Err(InvariantViolation::ActiveTabMissing {
                            pane: id,
                            tab: leaf.active_tab,
                        });
                    }
                    for tab in &leaf.tabs {
                        if !seen_tabs.insert(tab.id) {
                            return Err(InvariantViolation::DuplicateTab(tab.id));
                        }
                    }
                }
            }
        }

        if let Some(orphan) = self.panes.ids().find(|id| !seen_panes.contains(id)) {
            return Err(InvariantViolation::Orphan(orphan));
        }
        if self.panes.leaf(self.active_pane).is_none() {
            return Err(InvariantViolation::ActivePaneNotLeaf(self.active_pane));
        }
        for &(alias, target) in &self.aliases {
            if self.panes.contains(alias) || !self.panes.contains(target) {
                return Err(InvariantViolation::DanglingAlias { alias, target });
            }
        }
        Ok(())
    }
}
