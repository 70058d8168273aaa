use serde::{Deserialize, Serialize};

// ──────────────────────────────────────────────
// Geometry
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    /// Translate an absolute point into this rect's local coordinates.
    pub fn to_local(&self, point: Vec2) -> Vec2 {
        Vec2::new(point.x - self.x, point.y - self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Vec2) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

// ──────────────────────────────────────────────
// Identity
// ──────────────────────────────────────────────

pub type PaneId = u64;

/// Tab ids are unique across a whole layout, not just within one pane.
pub type TabId = u64;

/// One layout exists per active database connection.
pub type ConnectionId = String;

// ──────────────────────────────────────────────
// Tabs
// ──────────────────────────────────────────────

/// What a tab shows. The engine only stores the tag; rendering is the host's job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TabKind {
    Data,
    Query,
    Terminal,
    Plugin(String),
}

impl TabKind {
    pub fn default_title(&self) -> String {
        match self {
            TabKind::Data => "Data".to_string(),
            TabKind::Query => "Query".to_string(),
            TabKind::Terminal => "Terminal".to_string(),
            TabKind::Plugin(name) => name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tab {
    pub id: TabId,
    pub kind: TabKind,
    pub title: String,
    /// Opaque, kind-specific payload (selected table, editor text, ...).
    #[serde(default)]
    pub content: serde_json::Value,
}

/// Caller-supplied fields for a new tab.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TabOptions {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<serde_json::Value>,
}

impl TabOptions {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: None,
        }
    }
}

/// Partial update for an existing tab. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TabPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<serde_json::Value>,
}

// ──────────────────────────────────────────────
// Input
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Raw pointer and key events as the host delivers them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputEvent {
    KeyPress { key: Key },
    MouseClick { position: Vec2, button: MouseButton },
    MouseRelease { position: Vec2, button: MouseButton },
    MouseMove { position: Vec2 },
    MouseDrag { position: Vec2, button: MouseButton },
}

// ──────────────────────────────────────────────
// Layout types
// ──────────────────────────────────────────────

/// `Horizontal` places children side by side (divides width),
/// `Vertical` stacks them (divides height).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitDirection {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropZone {
    Top,
    Bottom,
    Left,
    Right,
    Center,
}

/// Default width of the left/right drop bands, in the host's layout units.
pub const EDGE_THRESHOLD: f32 = 60.0;

impl DropZone {
    /// Split direction and whether the dropped tab's leaf goes first
    /// (left/top). `None` for `Center`, which merges instead of splitting.
    pub fn split_placement(self) -> Option<(SplitDirection, bool)> {
        match self {
            DropZone::Top => Some((SplitDirection::Vertical, true)),
            DropZone::Bottom => Some((SplitDirection::Vertical, false)),
            DropZone::Left => Some((SplitDirection::Horizontal, true)),
            DropZone::Right => Some((SplitDirection::Horizontal, false)),
            DropZone::Center => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropTarget {
    pub pane: PaneId,
    pub zone: DropZone,
}

impl DropTarget {
    pub fn new(pane: PaneId, zone: DropZone) -> Self {
        Self { pane, zone }
    }
}

// ──────────────────────────────────────────────
// Trait: LayoutEngine
// ──────────────────────────────────────────────

/// Geometry surface of a pane layout.
/// Knows pane ids, ratios and the area they share, never what tabs contain.
pub trait LayoutEngine {
    /// Rect of every leaf pane, in pre-order.
    fn compute(&self, area: Rect) -> Vec<(PaneId, Rect)>;

    /// Split whose divider lies within `threshold` of `point`, nearest first.
    fn split_border_at(&self, area: Rect, point: Vec2, threshold: f32) -> Option<PaneId>;

    /// Ratio that would put `split`'s divider under `point`.
    fn ratio_at(&self, area: Rect, split: PaneId, point: Vec2) -> Option<f32>;

    /// Leaf under `point` and the drop zone the pointer is in.
    fn drop_target_at(&self, area: Rect, point: Vec2, edge_threshold: f32)
        -> Option<DropTarget>;

    fn pane_at(&self, area: Rect, point: Vec2) -> Option<PaneId> {
        self.compute(area)
            .into_iter()
            .find(|(_, rect)| rect.contains(point))
            .map(|(id, _)| id)
    }
}
