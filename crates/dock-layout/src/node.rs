use serde::{Deserialize, Serialize};

use dock_core::{PaneId, Rect, SplitDirection, Tab, TabId};

// ──────────────────────────────────────────────
// Node: one entry of the pane arena
// ──────────────────────────────────────────────

/// A pane holding an ordered stack of tabs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leaf {
    pub(crate) id: PaneId,
    pub(crate) tabs: Vec<Tab>,
    pub(crate) active_tab: Option<TabId>,
}

/// A pane dividing two children along an axis. Children are referenced by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Split {
    pub(crate) id: PaneId,
    pub(crate) direction: SplitDirection,
    pub(crate) first: PaneId,
    pub(crate) second: PaneId,
    pub(crate) ratio: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "lowercase")]
pub enum PaneNode {
    Leaf(Leaf),
    Split(Split),
}

impl Leaf {
    pub(crate) fn new(id: PaneId, tabs: Vec<Tab>) -> Self {
        let active_tab = tabs.last().map(|t| t.id);
        Self {
            id,
            tabs,
            active_tab,
        }
    }

    pub fn id(&self) -> PaneId {
        self.id
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn active_tab(&self) -> Option<TabId> {
        self.active_tab
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn contains(&self, tab: TabId) -> bool {
        self.position(tab).is_some()
    }

    pub fn position(&self, tab: TabId) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == tab)
    }

    pub fn tab(&self, tab: TabId) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == tab)
    }

    pub(crate) fn tab_mut(&mut self, tab: TabId) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|t| t.id == tab)
    }

    /// Append a tab and make it the active one.
    pub(crate) fn push_tab(&mut self, tab: Tab) {
        self.active_tab = Some(tab.id);
        self.tabs.push(tab);
    }

    /// Remove a tab. If it was active, the tab that slid into its index
    /// becomes active, else the one before it, else nothing.
    pub(crate) fn remove_tab(&mut self, tab: TabId) -> Option<Tab> {
        let index = self.position(tab)?;
        let removed = self.tabs.remove(index);
        if self.active_tab == Some(tab) {
            self.active_tab = self
                .tabs
                .get(index)
                .or_else(|| index.checked_sub(1).and_then(|i| self.tabs.get(i)))
                .map(|t| t.id);
        }
        Some(removed)
    }
}

impl Split {
    pub fn id(&self) -> PaneId {
        self.id
    }

    pub fn direction(&self) -> SplitDirection {
        self.direction
    }

    pub fn first(&self) -> PaneId {
        self.first
    }

    pub fn second(&self) -> PaneId {
        self.second
    }

    pub fn ratio(&self) -> f32 {
        self.ratio
    }

    /// The other child of this split, if `child` is one of them.
    pub(crate) fn sibling_of(&self, child: PaneId) -> Option<PaneId> {
        if self.first == child {
            Some(self.second)
        } else if self.second == child {
            Some(self.first)
        } else {
            None
        }
    }
}

impl PaneNode {
    pub fn id(&self) -> PaneId {
        match self {
            PaneNode::Leaf(leaf) => leaf.id,
            PaneNode::Split(split) => split.id,
        }
    }

    /// Rebind this node to a new arena slot.
    pub(crate) fn set_id(&mut self, id: PaneId) {
        match self {
            PaneNode::Leaf(leaf) => leaf.id = id,
            PaneNode::Split(split) => split.id = id,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, PaneNode::Leaf(_))
    }

    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            PaneNode::Leaf(leaf) => Some(leaf),
            PaneNode::Split(_) => None,
        }
    }

    pub(crate) fn as_leaf_mut(&mut self) -> Option<&mut Leaf> {
        match self {
            PaneNode::Leaf(leaf) => Some(leaf),
            PaneNode::Split(_) => None,
        }
    }

    pub fn as_split(&self) -> Option<&Split> {
        match self {
            PaneNode::Split(split) => Some(split),
            PaneNode::Leaf(_) => None,
        }
    }

    pub(crate) fn as_split_mut(&mut self) -> Option<&mut Split> {
        match self {
            PaneNode::Split(split) => Some(split),
            PaneNode::Leaf(_) => None,
        }
    }
}

// ──────────────────────────────────────────────
// Helpers
// ──────────────────────────────────────────────

/// Split a rect into two sub-rects based on direction and ratio.
pub(crate) fn split_rect(rect: Rect, direction: SplitDirection, ratio: f32) -> (Rect, Rect) {
    match direction {
        SplitDirection::Horizontal => {
            let left_width = rect.width * ratio;
            let right_width = rect.width - left_width;
            (
                Rect::new(rect.x, rect.y, left_width, rect.height),
                Rect::new(rect.x + left_width, rect.y, right_width, rect.height),
            )
        }
        SplitDirection::Vertical => {
            let top_height = rect.height * ratio;
            let bottom_height = rect.height - top_height;
            (
                Rect::new(rect.x, rect.y, rect.width, top_height),
                Rect::new(rect.x, rect.y + top_height, rect.width, bottom_height),
            )
        }
    }
}
