// Pane & tab layout engine.
// One `PaneLayout` per connection: a binary split tree stored in a flat arena,
// leaves holding ordered tab stacks. `Workspace` owns the per-connection
// layouts and notifies subscribers after each committed change.

mod arena;
mod command;
mod drop_zone;
mod geometry;
mod mutate;
mod node;
mod notify;
pub mod settings;
mod tabs;
mod validate;
mod workspace;

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

use dock_core::{PaneId, Tab, TabId, TabKind, TabOptions};

pub use arena::{Leaves, PaneArena};
pub use command::Command;
pub use dock_core::EDGE_THRESHOLD;
pub use drop_zone::resolve_drop_zone;
pub use node::{Leaf, PaneNode, Split};
pub use notify::{LayoutEvent, SubscriptionId};
pub use settings::{EmptyWorkspace, LayoutSettings};
pub use validate::InvariantViolation;
pub use workspace::{PendingDrag, Workspace};

// ──────────────────────────────────────────────
// PaneLayout
// ──────────────────────────────────────────────

/// Default ε: no split child may be smaller than this fraction of its parent.
pub const MIN_RATIO: f32 = 0.05;

/// Collapses remembered by the alias table. Older superseded ids stop resolving.
pub const MAX_ALIASES: usize = 64;

fn default_min_ratio() -> f32 {
    MIN_RATIO
}

/// Layout state of a single connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaneLayout {
    pub(crate) panes: PaneArena,
    pub(crate) root: PaneId,
    pub(crate) active_pane: PaneId,
    /// Ids superseded by a collapse, mapped to the id that now holds their
    /// content. Oldest first, at most `MAX_ALIASES` entries.
    #[serde(default)]
    pub(crate) aliases: VecDeque<(PaneId, PaneId)>,
    next_pane_id: PaneId,
    next_tab_id: TabId,
    #[serde(skip, default = "default_min_ratio")]
    pub(crate) min_ratio: f32,
    /// Split currently being dragged by the host, between begin/end resize.
    #[serde(skip)]
    pub(crate) active_resize: Option<PaneId>,
}

impl PaneLayout {
    /// Create a layout with a single root leaf holding one tab.
    pub fn with_initial_tab(kind: TabKind, options: TabOptions) -> Self {
        let mut layout = Self {
            panes: PaneArena::new(),
            root: 1,
            active_pane: 1,
            aliases: VecDeque::new(),
            next_pane_id: 2,
            next_tab_id: 1,
            min_ratio: MIN_RATIO,
            active_resize: None,
        };
        let tab = layout.make_tab(kind, options);
        layout.panes.insert(PaneNode::Leaf(Leaf::new(1, vec![tab])));
        layout
    }

    /// Override ε. Values are kept within `[0.01, 0.45]`.
    pub fn with_min_ratio(mut self, min_ratio: f32) -> Self {
        self.min_ratio = settings::clamp_min_ratio(min_ratio);
        self
    }

    pub fn root(&self) -> PaneId {
        self.root
    }

    pub fn active_pane(&self) -> PaneId {
        self.active_pane
    }

    pub fn min_ratio(&self) -> f32 {
        self.min_ratio
    }

    pub fn panes(&self) -> &PaneArena {
        &self.panes
    }

    pub fn node(&self, id: PaneId) -> Option<&PaneNode> {
        self.panes.get(id)
    }

    pub fn leaf(&self, id: PaneId) -> Option<&Leaf> {
        self.panes.leaf(id)
    }

    pub fn split(&self, id: PaneId) -> Option<&Split> {
        self.panes.split(id)
    }

    pub fn active_leaf(&self) -> Option<&Leaf> {
        self.panes.leaf(self.active_pane)
    }

    /// All leaves, pre-order from the root. Lazy and finite.
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves::new(&self.panes, self.root)
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves().count()
    }

    pub fn tab_count(&self) -> usize {
        self.leaves().map(|leaf| leaf.tabs.len()).sum()
    }

    /// Leaf currently holding `tab`.
    pub fn find_tab(&self, tab: TabId) -> Option<PaneId> {
        self.leaves().find(|leaf| leaf.contains(tab)).map(|leaf| leaf.id)
    }

    pub fn tab(&self, tab: TabId) -> Option<&Tab> {
        self.leaves().find_map(|leaf| leaf.tab(tab))
    }

    /// True once the last tab of the last pane has been closed.
    pub fn is_vacant(&self) -> bool {
        self.panes.leaf(self.root).is_some_and(|leaf| leaf.is_empty())
    }

    /// Map a possibly stale pane id to the node that now carries its content.
    /// Ids superseded by a collapse are followed through the alias table.
    pub fn resolve(&self, id: PaneId) -> Option<PaneId> {
        let mut current = id;
        for _ in 0..=self.aliases.len() {
            if self.panes.contains(current) {
                return Some(current);
            }
            current = self
                .aliases
                .iter()
                .find(|&&(old, _)| old == current)
                .map(|&(_, canonical)| canonical)?;
        }
        None
    }

    /// Number of superseded ids that still resolve.
    pub fn alias_count(&self) -> usize {
        self.aliases.len()
    }

    pub(crate) fn alloc_pane_id(&mut self) -> PaneId {
        let id = self.next_pane_id;
        self.next_pane_id += 1;
        id
    }

    pub(crate) fn alloc_tab_id(&mut self) -> TabId {
        let id = self.next_tab_id;
        self.next_tab_id += 1;
        id
    }

    pub(crate) fn make_tab(&mut self, kind: TabKind, options: TabOptions) -> Tab {
        let id = self.alloc_tab_id();
        Tab {
            id,
            title: options.title.unwrap_or_else(|| kind.default_title()),
            content: options.content.unwrap_or_default(),
            kind,
        }
    }
}

// ──────────────────────────────────────────────
// Rejection: why a command became a no-op
// ──────────────────────────────────────────────

/// Class of a refused command. Only ever logged; the command boundary
/// reports refusals as `false`/`None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Rejection {
    StaleReference,
    InvalidParameter,
    StructuralImpossible,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::StaleReference => f.write_str("stale reference"),
            Rejection::InvalidParameter => f.write_str("invalid parameter"),
            Rejection::StructuralImpossible => f.write_str("structurally impossible"),
        }
    }
}

pub(crate) fn reject(op: &str, why: Rejection, detail: fmt::Arguments<'_>) -> bool {
    log::debug!("{op}: {why} ({detail})");
    false
}
