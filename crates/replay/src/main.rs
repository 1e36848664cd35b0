mod report;
mod trace;

use std::path::PathBuf;

use tracing_subscriber::EnvFilter;
use trip_gesture::viewport::{DEFAULT_CENTER, DEFAULT_HEIGHT_PX, DEFAULT_WIDTH_PX, DEFAULT_ZOOM};
use trip_gesture::{GestureConfig, GestureEngine, MercatorViewport};

const USAGE: &str = "Usage: cargo run -p gesture-replay -- --trace events.jsonl [--config gesture.json] [--width 800] [--height 600] [--zoom 5]";

fn get_arg(flag: &str) -> Option<String> {
    std::env::args().skip_while(|a| a != flag).nth(1)
}

/// Flag first, then environment variable.
fn arg_or_env(flag: &str, var: &str) -> Option<String> {
    get_arg(flag).or_else(|| std::env::var(var).ok())
}

fn parse_number<T: std::str::FromStr>(flag: &str, default: T) -> T {
    match get_arg(flag) {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            eprintln!("Error: {flag} expects a number, got {raw:?}");
            eprintln!("{USAGE}");
            std::process::exit(1);
        }),
        None => default,
    }
}

fn load_config(path: Option<String>) -> GestureConfig {
    let Some(path) = path else {
        return GestureConfig::default();
    };
    let text = std::fs::read_to_string(&path).unwrap_or_else(|e| {
        eprintln!("Failed to read config {path}: {e}");
        std::process::exit(1);
    });
    let config = GestureConfig::from_json(&text).unwrap_or_else(|e| {
        eprintln!("{path}: {e}");
        std::process::exit(1);
    });
    tracing::info!(%path, "Loaded gesture config");
    config
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let trace_path = arg_or_env("--trace", "GESTURE_TRACE").unwrap_or_else(|| {
        eprintln!("Error: --trace <file.jsonl> is required");
        eprintln!("{USAGE}");
        std::process::exit(1);
    });

    let config = load_config(arg_or_env("--config", "GESTURE_CONFIG"));
    let width = parse_number("--width", DEFAULT_WIDTH_PX);
    let height = parse_number("--height", DEFAULT_HEIGHT_PX);
    let zoom = parse_number("--zoom", DEFAULT_ZOOM);

    let events = trace::load_trace(&PathBuf::from(&trace_path)).unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(1);
    });

    let mut viewport =
        MercatorViewport::new(DEFAULT_CENTER, zoom, width, height).with_max_zoom(config.max_zoom_level);
    let mut engine = GestureEngine::for_viewport(config, &viewport);

    let steps = report::replay(&events, &mut engine, &mut viewport);
    print!("{}", report::format_report(&steps));
}
