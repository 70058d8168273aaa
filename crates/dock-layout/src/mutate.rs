// Tree mutators: split, resize, collapse and reparent nodes while keeping
// the arena a single well-formed tree.

use dock_core::{DropZone, PaneId, SplitDirection, TabId};

use crate::node::{Leaf, PaneNode, Split};
use crate::{reject, PaneLayout, Rejection, MAX_ALIASES};

impl PaneLayout {
    /// Move `tab` out of leaf `pane` into a new leaf placed after the
    /// remaining tabs. `pane` keeps its id and becomes the split.
    ///
    /// A single-tab leaf cannot be split (it would leave an empty leaf); the
    /// call only re-asserts that pane as active.
    pub fn split_pane(&mut self, pane: PaneId, direction: SplitDirection, tab: TabId) -> bool {
        let Some(pane) = self.resolve(pane) else {
            return reject("split_pane", Rejection::StaleReference, format_args!("pane {pane}"));
        };
        let Some(leaf) = self.panes.leaf(pane) else {
            return reject("split_pane", Rejection::StaleReference, format_args!("{pane} is not a leaf"));
        };
        if !leaf.contains(tab) {
            return reject("split_pane", Rejection::StaleReference, format_args!("tab {tab} not in {pane}"));
        }
        if leaf.tabs.len() == 1 {
            return self.focus_leaf(pane);
        }
        self.split_leaf_with(pane, tab, direction, false)
    }

    /// Clamp `ratio` into `[ε, 1-ε]` and store it on split `split`.
    pub fn resize_pane(&mut self, split: PaneId, ratio: f32) -> bool {
        if !ratio.is_finite() {
            return reject("resize_pane", Rejection::InvalidParameter, format_args!("ratio {ratio}"));
        }
        let min = self.min_ratio;
        let Some(node) = self.resolve(split).and_then(|id| self.panes.split_mut(id)) else {
            return reject("resize_pane", Rejection::StaleReference, format_args!("split {split}"));
        };
        let ratio = ratio.clamp(min, 1.0 - min);
        if node.ratio == ratio {
            return false;
        }
        node.ratio = ratio;
        true
    }

    /// Start an interactive resize of `split`. Later `update_resize` calls
    /// only apply while this split is the one being dragged.
    pub fn begin_resize(&mut self, split: PaneId) -> bool {
        let Some(split) = self.resolve(split).filter(|id| self.panes.split(*id).is_some()) else {
            return reject("begin_resize", Rejection::StaleReference, format_args!("split {split}"));
        };
        self.active_resize = Some(split);
        true
    }

    pub fn update_resize(&mut self, split: PaneId, ratio: f32) -> bool {
        match (self.resolve(split), self.active_resize) {
            (Some(id), Some(active)) if id == active => self.resize_pane(id, ratio),
            _ => reject("update_resize", Rejection::StaleReference, format_args!("split {split} is not being resized")),
        }
    }

    pub fn end_resize(&mut self, split: PaneId) -> bool {
        if self.resolve(split).is_some() && self.resolve(split) == self.active_resize {
            self.active_resize = None;
            return true;
        }
        reject("end_resize", Rejection::StaleReference, format_args!("split {split} is not being resized"))
    }

    pub fn resizing(&self) -> Option<PaneId> {
        self.active_resize
    }

    /// Move `tab` from leaf `from` to pane `to`.
    ///
    /// `Center` appends the tab to the target leaf. Directional zones split
    /// the target (leaf or whole subtree) and place the tab's new leaf first
    /// for left/top and second for right/bottom. If `from` empties it is
    /// collapsed before the target is used; the target id is re-resolved
    /// through the collapse.
    pub fn move_tab_to_pane(&mut self, from: PaneId, tab: TabId, to: PaneId, zone: DropZone) -> bool {
        let Some(from) = self.resolve(from).filter(|id| self.panes.leaf(*id).is_some_and(|l| l.contains(tab))) else {
            return reject("move_tab_to_pane", Rejection::StaleReference, format_args!("tab {tab} not in pane {from}"));
        };
        let Some(target) = self.resolve(to) else {
            return reject("move_tab_to_pane", Rejection::StaleReference, format_args!("target {to}"));
        };
        let placement = zone.split_placement();
        if placement.is_none() && self.panes.leaf(target).is_none() {
            return reject("move_tab_to_pane", Rejection::InvalidParameter, format_args!("center drop on split {target}"));
        }

        if from == target {
            return match placement {
                None => reject("move_tab_to_pane", Rejection::StructuralImpossible, format_args!("tab {tab} dropped on its own pane")),
                Some(_) if self.panes.leaf(from).is_some_and(|l| l.tabs.len() == 1) => self.focus_leaf(from),
                Some((direction, insert_first)) => self.split_leaf_with(from, tab, direction, insert_first),
            };
        }

        let Some(moved) = self.panes.leaf_mut(from).and_then(|leaf| leaf.remove_tab(tab)) else {
            return false;
        };
        if self.panes.leaf(from).is_some_and(|leaf| leaf.is_empty()) {
            self.collapse(from);
        }
        // The collapse only removes `from` and aliases the promoted sibling,
        // so a target distinct from `from` always resolves.
        let Some(target) = self.resolve(target) else {
            unreachable!("drop target {target} lost during collapse");
        };

        match placement {
            None => {
                if let Some(leaf) = self.panes.leaf_mut(target) {
                    leaf.push_tab(moved);
                }
                self.active_pane = target;
            }
            Some((direction, insert_first)) => {
                let id = self.alloc_pane_id();
                let leaf = Leaf::new(id, vec![moved]);
                self.wrap(target, leaf, direction, insert_first);
                self.active_pane = id;
            }
        }
        true
    }

    /// Dock `tab` along an edge of the whole workspace.
    pub fn move_tab_to_root(&mut self, from: PaneId, tab: TabId, zone: DropZone) -> bool {
        if zone == DropZone::Center {
            return reject("move_tab_to_root", Rejection::InvalidParameter, format_args!("center drop on root"));
        }
        let root = self.root;
        self.move_tab_to_pane(from, tab, root, zone)
    }

    // ──────────────────────────────────────────
    // Internal restructuring
    // ──────────────────────────────────────────

    /// Pull `tab` out of multi-tab leaf `pane` and split `pane` around it.
    fn split_leaf_with(&mut self, pane: PaneId, tab: TabId, direction: SplitDirection, insert_first: bool) -> bool {
        let Some(moved) = self.panes.leaf_mut(pane).and_then(|leaf| leaf.remove_tab(tab)) else {
            return false;
        };
        let id = self.alloc_pane_id();
        self.wrap(pane, Leaf::new(id, vec![moved]), direction, insert_first);
        self.active_pane = id;
        true
    }

    /// Replace node `target` with a split of (`leaf`, old content). The old
    /// content moves to a fresh id so `target` keeps denoting "the split".
    pub(crate) fn wrap(&mut self, target: PaneId, leaf: Leaf, direction: SplitDirection, insert_first: bool) {
        let Some(mut existing) = self.panes.remove(target) else {
            return;
        };
        let moved_id = self.alloc_pane_id();
        existing.set_id(moved_id);
        self.panes.insert(existing);

        if self.active_resize == Some(target) {
            self.active_resize = Some(moved_id);
        }

        let leaf_id = leaf.id;
        self.panes.insert(PaneNode::Leaf(leaf));
        let (first, second) = if insert_first {
            (leaf_id, moved_id)
        } else {
            (moved_id, leaf_id)
        };
        self.panes.insert(PaneNode::Split(Split {
            id: target,
            direction,
            first,
            second,
            ratio: 0.5,
        }));
    }

    /// Remove emptied leaf `leaf`: its parent's slot takes over the sibling's
    /// content and the sibling's old id becomes an alias of the parent.
    /// The sole root leaf is never removed; it stays as an empty placeholder.
    pub(crate) fn collapse(&mut self, leaf: PaneId) {
        let Some(parent) = self.panes.parent_of(leaf) else {
            return;
        };
        let Some(sibling) = self.panes.split(parent).and_then(|s| s.sibling_of(leaf)) else {
            return;
        };
        let Some(mut promoted) = self.panes.remove(sibling) else {
            return;
        };
        self.panes.remove(leaf);
        promoted.set_id(parent);
        self.panes.insert(promoted);

        self.add_alias(sibling, parent);
        self.aliases.retain(|&(_, target)| target != leaf);

        self.active_resize = match self.active_resize {
            Some(id) if id == parent || id == leaf => None,
            Some(id) if id == sibling => Some(parent),
            other => other,
        };

        if self.panes.leaf(self.active_pane).is_none() {
            let anchor = self.resolve(self.active_pane).unwrap_or(parent);
            self.active_pane = self.first_leaf_under(anchor);
        }
        log::trace!("collapsed leaf {leaf}; {sibling} promoted into {parent}");
    }

    fn add_alias(&mut self, old: PaneId, canonical: PaneId) {
        for (_, target) in self.aliases.iter_mut() {
            if *target == old {
                *target = canonical;
            }
        }
        self.aliases.push_back((old, canonical));
        while self.aliases.len() > MAX_ALIASES {
            self.aliases.pop_front();
        }
    }

    /// Leftmost/topmost leaf of the subtree at `id`.
    pub(crate) fn first_leaf_under(&self, id: PaneId) -> PaneId {
        let mut current = id;
        while let Some(split) = self.panes.split(current) {
            current = split.first;
        }
        current
    }

    /// Make leaf `pane` the active pane. Reports whether anything changed.
    pub(crate) fn focus_leaf(&mut self, pane: PaneId) -> bool {
        if self.active_pane == pane {
            return false;
        }
        self.active_pane = pane;
        true
    }
}
