use std::path::Path;

use trip_gesture::GestureEvent;

#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Parse a JSON-lines trace: one `GestureEvent` per line.
///
/// Blank lines and lines starting with `#` are skipped.
pub fn parse_trace(text: &str) -> Result<Vec<GestureEvent>, TraceError> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line, json)| {
            serde_json::from_str(json).map_err(|source| TraceError::Parse { line, source })
        })
        .collect()
}

pub fn load_trace(path: &Path) -> Result<Vec<GestureEvent>, TraceError> {
    let text = std::fs::read_to_string(path).map_err(|source| TraceError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let events = parse_trace(&text)?;
    tracing::info!(events = events.len(), path = %path.display(), "Loaded trace");
    Ok(events)
}
