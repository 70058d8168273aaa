use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use dock_core::Rect;
use dock_input::{Action, Router};
use dock_layout::{LayoutEvent, LayoutSettings, Workspace};

use crate::script::{command_for, Step, StepInput};

// ──────────────────────────────────────────────
// Session: workspace + one gesture router per connection
// ──────────────────────────────────────────────

pub struct Session {
    workspace: Workspace,
    routers: HashMap<String, Router>,
    subscribed: HashSet<String>,
    area: Rect,
    /// JSON lines produced by layout subscribers, waiting to be printed.
    output: Rc<RefCell<Vec<String>>>,
}

impl Session {
    pub fn new(settings: LayoutSettings, area: Rect) -> Self {
        Self {
            workspace: Workspace::with_settings(settings),
            routers: HashMap::new(),
            subscribed: HashSet::new(),
            area,
            output: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// Apply one scripted step. Returns whether the layout changed.
    pub fn apply(&mut self, step: Step) -> bool {
        let Step { connection, input } = step;
        self.ensure_subscribed(&connection);

        match input {
            StepInput::Command(command) => self.workspace.execute(&connection, command),
            StepInput::PressTab { pane, tab, position } => {
                router_for(&mut self.routers, self.workspace.settings(), &connection)
                    .press_tab(pane, tab, position);
                false
            }
            StepInput::Pointer(event) => {
                let router = router_for(&mut self.routers, self.workspace.settings(), &connection);
                let Some(layout) = self.workspace.layout(&connection) else {
                    log::debug!("Pointer event for connection {connection} without a layout");
                    router.reset();
                    return false;
                };
                let action = router.process(event, layout, self.area);
                if let Action::Hover(target) = &action {
                    log::debug!("Hover {target:?} on connection {connection}");
                }
                match command_for(action) {
                    Some(command) => self.workspace.execute(&connection, command),
                    None => false,
                }
            }
        }
    }

    /// Take every line emitted since the last call.
    pub fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut *self.output.borrow_mut())
    }

    fn ensure_subscribed(&mut self, connection: &str) {
        if !self.subscribed.insert(connection.to_string()) {
            return;
        }
        let output = Rc::clone(&self.output);
        let name = connection.to_string();
        self.workspace.subscribe(connection, move |event| {
            let line = match event {
                LayoutEvent::Updated(layout) => serde_json::to_value(layout).map(|layout| {
                    serde_json::json!({ "connection": name, "event": "updated", "layout": layout })
                }),
                LayoutEvent::Closed => {
                    Ok(serde_json::json!({ "connection": name, "event": "closed" }))
                }
            };
            match line {
                Ok(value) => output.borrow_mut().push(value.to_string()),
                Err(e) => log::error!("Failed to serialize layout for {name}: {e}"),
            }
        });
    }
}

fn router_for<'a>(
    routers: &'a mut HashMap<String, Router>,
    settings: &LayoutSettings,
    connection: &str,
) -> &'a mut Router {
    routers.entry(connection.to_string()).or_insert_with(|| {
        Router::with_thresholds(
            settings.drag_threshold,
            settings.border_threshold,
            settings.edge_threshold,
        )
    })
}
