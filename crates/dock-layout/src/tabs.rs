use dock_core::{PaneId, TabId, TabKind, TabOptions, TabPatch};

use crate::{reject, PaneLayout, Rejection};

// ──────────────────────────────────────────────
// Tab list operations within a leaf
// ──────────────────────────────────────────────

impl PaneLayout {
    /// Append a new tab to leaf `pane`, activate it and focus the pane.
    pub fn create_tab(&mut self, pane: PaneId, kind: TabKind, options: TabOptions) -> Option<TabId> {
        let Some(pane) = self.resolve(pane).filter(|id| self.panes.leaf(*id).is_some()) else {
            reject("create_tab", Rejection::StaleReference, format_args!("pane {pane}"));
            return None;
        };
        let tab = self.make_tab(kind, options);
        let id = tab.id;
        self.panes.leaf_mut(pane)?.push_tab(tab);
        self.active_pane = pane;
        Some(id)
    }

    /// Close a tab. An emptied leaf is collapsed into its sibling.
    pub fn close_tab(&mut self, pane: PaneId, tab: TabId) -> bool {
        let Some(pane) = self.leaf_with_tab(pane, tab) else {
            return reject("close_tab", Rejection::StaleReference, format_args!("tab {tab} not in pane {pane}"));
        };
        let Some(leaf) = self.panes.leaf_mut(pane) else {
            return false;
        };
        leaf.remove_tab(tab);
        if leaf.is_empty() {
            self.collapse(pane);
        }
        true
    }

    /// Close every tab of the leaf except `keep`, which becomes active.
    pub fn close_other_tabs(&mut self, pane: PaneId, keep: TabId) -> bool {
        let Some(pane) = self.leaf_with_tab(pane, keep) else {
            return reject("close_other_tabs", Rejection::StaleReference, format_args!("tab {keep} not in pane {pane}"));
        };
        let Some(leaf) = self.panes.leaf_mut(pane) else {
            return false;
        };
        if leaf.tabs.len() == 1 {
            return false;
        }
        leaf.tabs.retain(|t| t.id == keep);
        leaf.active_tab = Some(keep);
        true
    }

    /// Close the tabs after `tab`. If the active tab was among them, `tab` becomes active.
    pub fn close_tabs_to_right(&mut self, pane: PaneId, tab: TabId) -> bool {
        let Some(pane) = self.leaf_with_tab(pane, tab) else {
            return reject("close_tabs_to_right", Rejection::StaleReference, format_args!("tab {tab} not in pane {pane}"));
        };
        let Some(leaf) = self.panes.leaf_mut(pane) else {
            return false;
        };
        let Some(index) = leaf.position(tab) else {
            return false;
        };
        if index + 1 == leaf.tabs.len() {
            return false;
        }
        leaf.tabs.truncate(index + 1);
        if !leaf.active_tab.is_some_and(|active| leaf.contains(active)) {
            leaf.active_tab = Some(tab);
        }
        true
    }

    /// Move the tab at `from` to index `to`. Only the order changes.
    pub fn reorder_tabs(&mut self, pane: PaneId, from: usize, to: usize) -> bool {
        let Some(leaf) = self.resolve(pane).and_then(|id| self.panes.leaf_mut(id)) else {
            return reject("reorder_tabs", Rejection::StaleReference, format_args!("pane {pane}"));
        };
        let len = leaf.tabs.len();
        if from >= len || to >= len {
            return reject("reorder_tabs", Rejection::InvalidParameter, format_args!("indices {from} -> {to} with {len} tabs"));
        }
        if from == to {
            return false;
        }
        let tab = leaf.tabs.remove(from);
        leaf.tabs.insert(to, tab);
        true
    }

    /// Patch a tab's title and/or payload.
    pub fn update_tab(&mut self, pane: PaneId, tab: TabId, patch: TabPatch) -> bool {
        let Some(target) = self
            .resolve(pane)
            .and_then(|id| self.panes.leaf_mut(id))
            .and_then(|leaf| leaf.tab_mut(tab))
        else {
            return reject("update_tab", Rejection::StaleReference, format_args!("tab {tab} not in pane {pane}"));
        };
        let mut changed = false;
        if let Some(title) = patch.title {
            if target.title != title {
                target.title = title;
                changed = true;
            }
        }
        if let Some(content) = patch.content {
            if target.content != content {
                target.content = content;
                changed = true;
            }
        }
        changed
    }

    /// Insert a deep copy of `tab` right after it, with a fresh id. The copy becomes active.
    pub fn duplicate_tab(&mut self, pane: PaneId, tab: TabId) -> Option<TabId> {
        let Some(pane) = self.leaf_with_tab(pane, tab) else {
            reject("duplicate_tab", Rejection::StaleReference, format_args!("tab {tab} not in pane {pane}"));
            return None;
        };
        let id = self.alloc_tab_id();
        let leaf = self.panes.leaf_mut(pane)?;
        let index = leaf.position(tab)?;
        let mut copy = leaf.tabs[index].clone();
        copy.id = id;
        leaf.tabs.insert(index + 1, copy);
        leaf.active_tab = Some(id);
        self.active_pane = pane;
        Some(id)
    }

    /// Activate `tab` in its leaf and focus that leaf.
    pub fn set_active_tab(&mut self, pane: PaneId, tab: TabId) -> bool {
        let Some(pane) = self.leaf_with_tab(pane, tab) else {
            return reject("set_active_tab", Rejection::StaleReference, format_args!("tab {tab} not in pane {pane}"));
        };
        let Some(leaf) = self.panes.leaf_mut(pane) else {
            return false;
        };
        let changed = leaf.active_tab != Some(tab) || self.active_pane != pane;
        leaf.active_tab = Some(tab);
        self.active_pane = pane;
        changed
    }

    pub fn set_active_pane(&mut self, pane: PaneId) -> bool {
        let Some(pane) = self.resolve(pane).filter(|id| self.panes.leaf(*id).is_some()) else {
            return reject("set_active_pane", Rejection::StaleReference, format_args!("pane {pane} is not a leaf"));
        };
        self.focus_leaf(pane)
    }

    /// Resolve `pane` and check that the resulting leaf holds `tab`.
    fn leaf_with_tab(&self, pane: PaneId, tab: TabId) -> Option<PaneId> {
        self.resolve(pane)
            .filter(|id| self.panes.leaf(*id).is_some_and(|leaf| leaf.contains(tab)))
    }
}
