// Pointer router for the dock layout.
// Turns raw pointer/key events into layout actions: tab drags with a press
// threshold, divider resizes, and pane focus. Hit-testing goes through the
// `LayoutEngine` geometry surface; the router never mutates a layout itself.

use dock_core::{
    DropTarget, InputEvent, Key, LayoutEngine, MouseButton, PaneId, Rect, TabId, Vec2,
    EDGE_THRESHOLD,
};

/// Pointer travel before a pressed tab turns into a drag.
pub const DRAG_THRESHOLD: f32 = 4.0;

/// Hit distance for split dividers.
pub const BORDER_THRESHOLD: f32 = 6.0;

// ──────────────────────────────────────────────
// Action types
// ──────────────────────────────────────────────

/// What the host should do in response to an input event.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetActivePane(PaneId),
    SetActiveTab { pane: PaneId, tab: TabId },
    BeginTabDrag { pane: PaneId, tab: TabId },
    /// Highlight only; the layout is not touched until the drop.
    Hover(Option<DropTarget>),
    DropTab(DropTarget),
    CancelTabDrag,
    BeginResize(PaneId),
    UpdateResize { split: PaneId, ratio: f32 },
    EndResize(PaneId),
    None,
}

// ──────────────────────────────────────────────
// Gesture state machine
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Idle,
    /// A tab was pressed but the pointer has not moved far enough yet.
    PendingTabDrag {
        pane: PaneId,
        tab: TabId,
        press_pos: Vec2,
    },
    DraggingTab {
        pane: PaneId,
        tab: TabId,
        hover: Option<DropTarget>,
    },
    Resizing {
        split: PaneId,
    },
}

// ──────────────────────────────────────────────
// Router
// ──────────────────────────────────────────────

pub struct Router {
    gesture: Gesture,
    drag_threshold: f32,
    border_threshold: f32,
    edge_threshold: f32,
}

impl Router {
    pub fn new() -> Self {
        Self::with_thresholds(DRAG_THRESHOLD, BORDER_THRESHOLD, EDGE_THRESHOLD)
    }

    pub fn with_thresholds(drag_threshold: f32, border_threshold: f32, edge_threshold: f32) -> Self {
        Self {
            gesture: Gesture::Idle,
            drag_threshold,
            border_threshold,
            edge_threshold,
        }
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn is_idle(&self) -> bool {
        self.gesture == Gesture::Idle
    }

    /// The host hit-tests its own tab strip; a press on a tab arms a
    /// pending drag here instead of going through `process`.
    pub fn press_tab(&mut self, pane: PaneId, tab: TabId, position: Vec2) {
        self.gesture = Gesture::PendingTabDrag {
            pane,
            tab,
            press_pos: position,
        };
    }

    /// Drop any gesture in progress without producing an action.
    pub fn reset(&mut self) {
        self.gesture = Gesture::Idle;
    }

    /// Process an input event against the current layout geometry.
    pub fn process(&mut self, event: InputEvent, engine: &impl LayoutEngine, area: Rect) -> Action {
        match event {
            InputEvent::KeyPress { key } => self.process_key(key),
            InputEvent::MouseClick { position, button } => {
                self.process_press(position, button, engine, area)
            }
            InputEvent::MouseDrag { position, .. } => self.process_drag(position, engine, area),
            InputEvent::MouseMove { position } => match self.gesture {
                // Some hosts report held-button motion as plain moves.
                Gesture::DraggingTab { .. } | Gesture::Resizing { .. } => {
                    self.process_drag(position, engine, area)
                }
                _ => Action::None,
            },
            InputEvent::MouseRelease { position, .. } => {
                self.process_release(position, engine, area)
            }
        }
    }

    // ── Key processing ──────────────────────────

    fn process_key(&mut self, key: Key) -> Action {
        match key {
            Key::Escape => self.abort_gesture(),
        }
    }

    /// End the gesture in progress, returning the action that closes it
    /// on the engine side.
    fn abort_gesture(&mut self) -> Action {
        match std::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::DraggingTab { .. } => Action::CancelTabDrag,
            Gesture::Resizing { split } => Action::EndResize(split),
            Gesture::PendingTabDrag { .. } | Gesture::Idle => Action::None,
        }
    }

    // ── Press processing ────────────────────────

    fn process_press(
        &mut self,
        position: Vec2,
        button: MouseButton,
        engine: &impl LayoutEngine,
        area: Rect,
    ) -> Action {
        if button != MouseButton::Left {
            return Action::None;
        }
        match self.gesture {
            // Already armed by `press_tab` for this same press.
            Gesture::PendingTabDrag { .. } => return Action::None,
            // A missed release: close the old gesture and swallow this press.
            Gesture::DraggingTab { .. } | Gesture::Resizing { .. } => {
                return self.abort_gesture();
            }
            Gesture::Idle => {}
        }

        if let Some(split) = engine.split_border_at(area, position, self.border_threshold) {
            self.gesture = Gesture::Resizing { split };
            return Action::BeginResize(split);
        }

        match engine.pane_at(area, position) {
            Some(pane) => Action::SetActivePane(pane),
            None => Action::None,
        }
    }

    // ── Drag processing ─────────────────────────

    fn process_drag(&mut self, position: Vec2, engine: &impl LayoutEngine, area: Rect) -> Action {
        match self.gesture {
            Gesture::Idle => Action::None,
            Gesture::PendingTabDrag {
                pane,
                tab,
                press_pos,
            } => {
                if press_pos.distance(position) < self.drag_threshold {
                    return Action::None;
                }
                self.gesture = Gesture::DraggingTab {
                    pane,
                    tab,
                    hover: None,
                };
                Action::BeginTabDrag { pane, tab }
            }
            Gesture::DraggingTab { pane, tab, hover } => {
                let target = engine.drop_target_at(area, position, self.edge_threshold);
                if target == hover {
                    return Action::None;
                }
                self.gesture = Gesture::DraggingTab {
                    pane,
                    tab,
                    hover: target,
                };
                Action::Hover(target)
            }
            Gesture::Resizing { split } => match engine.ratio_at(area, split, position) {
                Some(ratio) => Action::UpdateResize { split, ratio },
                None => Action::None,
            },
        }
    }

    // ── Release processing ──────────────────────

    fn process_release(&mut self, position: Vec2, engine: &impl LayoutEngine, area: Rect) -> Action {
        let gesture = std::mem::replace(&mut self.gesture, Gesture::Idle);
        match gesture {
            Gesture::Idle => Action::None,
            // Released before the threshold: a plain click on the tab.
            Gesture::PendingTabDrag { pane, tab, .. } => Action::SetActiveTab { pane, tab },
            Gesture::DraggingTab { .. } => {
                match engine.drop_target_at(area, position, self.edge_threshold) {
                    Some(target) => Action::DropTab(target),
                    None => Action::CancelTabDrag,
                }
            }
            Gesture::Resizing { split } => Action::EndResize(split),
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
