use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use dock_core::{ConnectionId, DropZone, PaneId, SplitDirection, TabId, TabKind, TabOptions, TabPatch};

use crate::notify::{LayoutEvent, Subscribers, SubscriptionId};
use crate::settings::{EmptyWorkspace, LayoutSettings};
use crate::{Command, Leaf, PaneLayout};

/// A tab picked up by a drag gesture, waiting for its drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingDrag {
    pub tab: TabId,
    pub from_pane: PaneId,
}

struct Entry {
    layout: PaneLayout,
    drag: Option<PendingDrag>,
}

// ──────────────────────────────────────────────
// Workspace: layouts of every open connection
// ──────────────────────────────────────────────

/// Owns one `PaneLayout` per connection and notifies subscribers after each
/// committed transition. Rejected commands leave state untouched and notify
/// nobody. Single-threaded: callers serialize access themselves.
pub struct Workspace {
    settings: LayoutSettings,
    layouts: HashMap<ConnectionId, Entry>,
    subscribers: Subscribers,
}

impl Workspace {
    pub fn new() -> Self {
        Self::with_settings(LayoutSettings::default())
    }

    pub fn with_settings(settings: LayoutSettings) -> Self {
        Self {
            settings,
            layouts: HashMap::new(),
            subscribers: Subscribers::default(),
        }
    }

    pub fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    // ── Lifecycle ──────────────────────────────

    /// Create the connection's layout: one root leaf with one default tab.
    /// A no-op if the layout already exists.
    pub fn initialize_layout(&mut self, connection: &str, kind: Option<TabKind>) -> bool {
        if self.layouts.contains_key(connection) {
            return false;
        }
        let options = match kind {
            Some(_) => TabOptions::default(),
            None => TabOptions::titled(self.settings.default_tab_title.clone()),
        };
        let kind = kind.unwrap_or_else(|| self.settings.default_tab_kind.clone());
        let layout = PaneLayout::with_initial_tab(kind, options)
            .with_min_ratio(self.settings.effective_min_ratio());
        self.layouts
            .insert(connection.to_string(), Entry { layout, drag: None });
        log::info!("Layout created for connection {connection}");
        self.notify(connection);
        true
    }

    /// Discard the connection's layout as a unit. Subscriptions stay registered.
    pub fn teardown(&mut self, connection: &str) -> bool {
        if self.layouts.remove(connection).is_none() {
            return false;
        }
        log::info!("Layout torn down for connection {connection}");
        self.subscribers.emit(connection, &LayoutEvent::Closed);
        true
    }

    pub fn connections(&self) -> impl Iterator<Item = &str> + '_ {
        self.layouts.keys().map(String::as_str)
    }

    // ── Queries ────────────────────────────────

    pub fn layout(&self, connection: &str) -> Option<&PaneLayout> {
        self.layouts.get(connection).map(|entry| &entry.layout)
    }

    /// Pre-order leaves of the connection's layout; empty if there is none.
    pub fn leaf_panes(&self, connection: &str) -> impl Iterator<Item = &Leaf> + '_ {
        self.layout(connection).into_iter().flat_map(|layout| layout.leaves())
    }

    pub fn pending_drag(&self, connection: &str) -> Option<PendingDrag> {
        self.layouts.get(connection)?.drag
    }

    // ── Subscriptions ──────────────────────────

    pub fn subscribe(
        &mut self,
        connection: &str,
        listener: impl FnMut(&LayoutEvent<'_>) + 'static,
    ) -> SubscriptionId {
        let id = self.subscribers.add(connection, Box::new(listener));
        log::info!(
            "Subscriber {id} added for connection {connection} ({} total)",
            self.subscribers.count(connection)
        );
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let removed = self.subscribers.remove(id);
        if removed {
            log::info!("Subscriber {id} removed");
        }
        removed
    }

    // ── Tree commands ──────────────────────────

    pub fn split_pane(&mut self, connection: &str, pane: PaneId, direction: SplitDirection, tab: TabId) -> bool {
        self.commit_bool(connection, |l| l.split_pane(pane, direction, tab))
    }

    pub fn resize_pane(&mut self, connection: &str, split: PaneId, ratio: f32) -> bool {
        self.commit_bool(connection, |l| l.resize_pane(split, ratio))
    }

    /// Resize protocol: begin/end only track which split is being dragged
    /// and do not notify; each update is a `resize_pane`.
    pub fn begin_resize(&mut self, connection: &str, split: PaneId) -> bool {
        self.layouts
            .get_mut(connection)
            .is_some_and(|entry| entry.layout.begin_resize(split))
    }

    pub fn update_resize(&mut self, connection: &str, split: PaneId, ratio: f32) -> bool {
        self.commit_bool(connection, |l| l.update_resize(split, ratio))
    }

    pub fn end_resize(&mut self, connection: &str, split: PaneId) -> bool {
        self.layouts
            .get_mut(connection)
            .is_some_and(|entry| entry.layout.end_resize(split))
    }

    pub fn move_tab_to_pane(&mut self, connection: &str, from: PaneId, tab: TabId, to: PaneId, zone: DropZone) -> bool {
        self.commit_bool(connection, |l| l.move_tab_to_pane(from, tab, to, zone))
    }

    pub fn move_tab_to_root(&mut self, connection: &str, from: PaneId, tab: TabId, zone: DropZone) -> bool {
        self.commit_bool(connection, |l| l.move_tab_to_root(from, tab, zone))
    }

    // ── Drag and drop ──────────────────────────

    /// Record the tab a drag gesture picked up. Not layout state: no notification.
    pub fn begin_tab_drag(&mut self, connection: &str, from_pane: PaneId, tab: TabId) -> bool {
        let Some(entry) = self.layouts.get_mut(connection) else {
            return false;
        };
        let Some(from_pane) = entry
            .layout
            .resolve(from_pane)
            .filter(|id| entry.layout.leaf(*id).is_some_and(|leaf| leaf.contains(tab)))
        else {
            log::debug!("begin_tab_drag: tab {tab} not in pane {from_pane}");
            return false;
        };
        entry.drag = Some(PendingDrag { tab, from_pane });
        true
    }

    /// Consume the pending drag and move its tab. The tab is located by id,
    /// so the drop still lands if its source pane collapsed meanwhile.
    pub fn drop_tab(&mut self, connection: &str, target: PaneId, zone: DropZone) -> bool {
        let Some(drag) = self.layouts.get_mut(connection).and_then(|entry| entry.drag.take()) else {
            log::debug!("drop_tab: no pending drag on connection {connection}");
            return false;
        };
        let Some(from) = self.layout(connection).and_then(|l| l.find_tab(drag.tab)) else {
            log::debug!("drop_tab: dragged tab {} no longer exists", drag.tab);
            return false;
        };
        self.move_tab_to_pane(connection, from, drag.tab, target, zone)
    }

    pub fn cancel_tab_drag(&mut self, connection: &str) -> bool {
        self.layouts
            .get_mut(connection)
            .and_then(|entry| entry.drag.take())
            .is_some()
    }

    // ── Tab commands ───────────────────────────

    pub fn create_tab(&mut self, connection: &str, pane: PaneId, kind: TabKind, options: TabOptions) -> Option<TabId> {
        self.commit(connection, |l| l.create_tab(pane, kind, options))
    }

    pub fn close_tab(&mut self, connection: &str, pane: PaneId, tab: TabId) -> bool {
        self.commit_bool(connection, |l| l.close_tab(pane, tab))
    }

    pub fn close_other_tabs(&mut self, connection: &str, pane: PaneId, keep: TabId) -> bool {
        self.commit_bool(connection, |l| l.close_other_tabs(pane, keep))
    }

    pub fn close_tabs_to_right(&mut self, connection: &str, pane: PaneId, tab: TabId) -> bool {
        self.commit_bool(connection, |l| l.close_tabs_to_right(pane, tab))
    }

    pub fn reorder_tabs(&mut self, connection: &str, pane: PaneId, from: usize, to: usize) -> bool {
        self.commit_bool(connection, |l| l.reorder_tabs(pane, from, to))
    }

    pub fn update_tab(&mut self, connection: &str, pane: PaneId, tab: TabId, patch: TabPatch) -> bool {
        self.commit_bool(connection, |l| l.update_tab(pane, tab, patch))
    }

    pub fn duplicate_tab(&mut self, connection: &str, pane: PaneId, tab: TabId) -> Option<TabId> {
        self.commit(connection, |l| l.duplicate_tab(pane, tab))
    }

    pub fn set_active_tab(&mut self, connection: &str, pane: PaneId, tab: TabId) -> bool {
        self.commit_bool(connection, |l| l.set_active_tab(pane, tab))
    }

    pub fn set_active_pane(&mut self, connection: &str, pane: PaneId) -> bool {
        self.commit_bool(connection, |l| l.set_active_pane(pane))
    }

    /// Apply a command value. Returns whether it changed anything.
    pub fn execute(&mut self, connection: &str, command: Command) -> bool {
        match command {
            Command::InitializeLayout { kind } => self.initialize_layout(connection, kind),
            Command::Teardown => self.teardown(connection),
            Command::SplitPane { pane, direction, tab } => self.split_pane(connection, pane, direction, tab),
            Command::ResizePane { split, ratio } => self.resize_pane(connection, split, ratio),
            Command::BeginResize { split } => self.begin_resize(connection, split),
            Command::UpdateResize { split, ratio } => self.update_resize(connection, split, ratio),
            Command::EndResize { split } => self.end_resize(connection, split),
            Command::MoveTabToPane { from, tab, to, zone } => self.move_tab_to_pane(connection, from, tab, to, zone),
            Command::MoveTabToRoot { from, tab, zone } => self.move_tab_to_root(connection, from, tab, zone),
            Command::BeginTabDrag { pane, tab } => self.begin_tab_drag(connection, pane, tab),
            Command::DropTab { target, zone } => self.drop_tab(connection, target, zone),
            Command::CancelTabDrag => self.cancel_tab_drag(connection),
            Command::CreateTab { pane, kind, options } => self.create_tab(connection, pane, kind, options).is_some(),
            Command::CloseTab { pane, tab } => self.close_tab(connection, pane, tab),
            Command::CloseOtherTabs { pane, tab } => self.close_other_tabs(connection, pane, tab),
            Command::CloseTabsToRight { pane, tab } => self.close_tabs_to_right(connection, pane, tab),
            Command::ReorderTabs { pane, from, to } => self.reorder_tabs(connection, pane, from, to),
            Command::UpdateTab { pane, tab, patch } => self.update_tab(connection, pane, tab, patch),
            Command::DuplicateTab { pane, tab } => self.duplicate_tab(connection, pane, tab).is_some(),
            Command::SetActiveTab { pane, tab } => self.set_active_tab(connection, pane, tab),
            Command::SetActivePane { pane } => self.set_active_pane(connection, pane),
        }
    }

    // ── Commit ─────────────────────────────────

    fn commit_bool(&mut self, connection: &str, op: impl FnOnce(&mut PaneLayout) -> bool) -> bool {
        self.commit(connection, |layout| op(layout).then_some(())).is_some()
    }

    /// Run `op` on the connection's layout. `None` means the command was
    /// rejected or changed nothing; otherwise the transition is checked,
    /// the empty-workspace policy applied and subscribers notified.
    fn commit<T>(&mut self, connection: &str, op: impl FnOnce(&mut PaneLayout) -> Option<T>) -> Option<T> {
        let Some(entry) = self.layouts.get_mut(connection) else {
            log::debug!("No layout for connection {connection}");
            return None;
        };
        let result = op(&mut entry.layout)?;

        if cfg!(debug_assertions) {
            if let Err(violation) = entry.layout.validate() {
                panic!("layout invariant broken on connection {connection}: {violation}");
            }
        }

        if entry.layout.is_vacant() && self.settings.empty_workspace == EmptyWorkspace::Teardown {
            self.teardown(connection);
        } else {
            log::trace!("Layout committed for connection {connection}");
            self.notify(connection);
        }
        Some(result)
    }

    fn notify(&mut self, connection: &str) {
        if let Some(entry) = self.layouts.get(connection) {
            self.subscribers
                .emit(connection, &LayoutEvent::Updated(&entry.layout));
        }
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}
