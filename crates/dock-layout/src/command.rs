use serde::{Deserialize, Serialize};

use dock_core::{DropZone, PaneId, SplitDirection, TabId, TabKind, TabOptions, TabPatch};

/// Every mutating engine operation as a value, so hosts can translate UI
/// events (or a recorded stream) into engine calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    InitializeLayout {
        #[serde(default)]
        kind: Option<TabKind>,
    },
    Teardown,
    SplitPane {
        pane: PaneId,
        direction: SplitDirection,
        tab: TabId,
    },
    ResizePane {
        split: PaneId,
        ratio: f32,
    },
    BeginResize {
        split: PaneId,
    },
    UpdateResize {
        split: PaneId,
        ratio: f32,
    },
    EndResize {
        split: PaneId,
    },
    MoveTabToPane {
        from: PaneId,
        tab: TabId,
        to: PaneId,
        zone: DropZone,
    },
    MoveTabToRoot {
        from: PaneId,
        tab: TabId,
        zone: DropZone,
    },
    BeginTabDrag {
        pane: PaneId,
        tab: TabId,
    },
    DropTab {
        target: PaneId,
        zone: DropZone,
    },
    CancelTabDrag,
    CreateTab {
        pane: PaneId,
        kind: TabKind,
        #[serde(default)]
        options: TabOptions,
    },
    CloseTab {
        pane: PaneId,
        tab: TabId,
    },
    CloseOtherTabs {
        pane: PaneId,
        tab: TabId,
    },
    CloseTabsToRight {
        pane: PaneId,
        tab: TabId,
    },
    ReorderTabs {
        pane: PaneId,
        from: usize,
        to: usize,
    },
    UpdateTab {
        pane: PaneId,
        tab: TabId,
        patch: TabPatch,
    },
    DuplicateTab {
        pane: PaneId,
        tab: TabId,
    },
    SetActiveTab {
        pane: PaneId,
        tab: TabId,
    },
    SetActivePane {
        pane: PaneId,
    },
}
