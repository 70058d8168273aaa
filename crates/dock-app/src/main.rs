// dock: drive the pane layout engine from a JSON script.
// Each step targets one connection and is either an engine command, a raw
// pointer event fed through the gesture router, or a tab-strip press.
// Every committed layout change is printed as one JSON line.

mod script;
mod session;

use std::io::Read;

use session::Session;

fn read_script(path: Option<&str>) -> std::io::Result<String> {
    match path {
        Some(path) if path != "-" => std::fs::read_to_string(path),
        _ => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

// ──────────────────────────────────────────────
// Entry point
// ──────────────────────────────────────────────

fn main() {
    env_logger::init();

    let path = std::env::args().nth(1);
    let source = path.as_deref().unwrap_or("stdin");
    let text = match read_script(path.as_deref()) {
        Ok(text) => text,
        Err(e) => {
            log::error!("Failed to read script from {source}: {e}");
            std::process::exit(1);
        }
    };
    let script = match script::parse(&text) {
        Ok(script) => script,
        Err(e) => {
            log::error!("Failed to parse script from {source}: {e}");
            std::process::exit(1);
        }
    };

    let settings = dock_layout::settings::load_settings();
    log::info!("Running {} steps from {source}", script.steps.len());

    let mut session = Session::new(settings, script.area);
    for step in script.steps {
        session.apply(step);
        for line in session.drain() {
            println!("{line}");
        }
    }
    log::info!(
        "Script finished with {} open layouts",
        session.workspace().connections().count()
    );
}
