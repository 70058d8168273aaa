use serde::Deserialize;

use dock_core::{InputEvent, PaneId, Rect, TabId, Vec2};
use dock_input::Action;
use dock_layout::Command;

/// Area used for pointer hit-testing when the script does not name one.
pub const DEFAULT_AREA: Rect = Rect {
    x: 0.0,
    y: 0.0,
    width: 1280.0,
    height: 800.0,
};

fn default_area() -> Rect {
    DEFAULT_AREA
}

// ──────────────────────────────────────────────
// Script format
// ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Script {
    pub area: Rect,
    pub steps: Vec<Step>,
}

/// One scripted event for one connection.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Step {
    pub connection: String,
    #[serde(flatten)]
    pub input: StepInput,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepInput {
    /// A command applied to the engine as-is.
    Command(Command),
    /// A raw pointer/key event routed through the gesture router.
    Pointer(InputEvent),
    /// The host's own tab-strip hit: arms a tab drag.
    PressTab {
        pane: PaneId,
        tab: TabId,
        position: Vec2,
    },
}

/// Either a bare array of steps or an object carrying the hit-test area too.
#[derive(Deserialize)]
#[serde(untagged)]
enum ScriptFile {
    Steps(Vec<Step>),
    Full {
        #[serde(default = "default_area")]
        area: Rect,
        steps: Vec<Step>,
    },
}

pub fn parse(text: &str) -> Result<Script, serde_json::Error> {
    Ok(match serde_json::from_str(text)? {
        ScriptFile::Steps(steps) => Script {
            area: DEFAULT_AREA,
            steps,
        },
        ScriptFile::Full { area, steps } => Script { area, steps },
    })
}

// ──────────────────────────────────────────────
// Router actions -> engine commands
// ──────────────────────────────────────────────

/// The engine command a router action stands for. Hover feedback and
/// no-ops have none.
pub fn command_for(action: Action) -> Option<Command> {
    let command = match action {
        Action::SetActivePane(pane) => Command::SetActivePane { pane },
        Action::SetActiveTab { pane, tab } => Command::SetActiveTab { pane, tab },
        Action::BeginTabDrag { pane, tab } => Command::BeginTabDrag { pane, tab },
        Action::DropTab(target) => Command::DropTab {
            target: target.pane,
            zone: target.zone,
        },
        Action::CancelTabDrag => Command::CancelTabDrag,
        Action::BeginResize(split) => Command::BeginResize { split },
        Action::UpdateResize { split, ratio } => Command::UpdateResize { split, ratio },
        Action::EndResize(split) => Command::EndResize { split },
        Action::Hover(_) | Action::None => return None,
    };
    Some(command)
}
