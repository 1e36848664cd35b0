use std::collections::BTreeMap;

use trip_gesture::{
    GeoCoordinate, GestureEngine, GestureEvent, GestureKind, HorizontalScrollProbe, ViewportAdapter,
};

/// One replayed event and the viewport it left behind.
#[derive(Debug, Clone)]
pub struct ReplayStep {
    pub timestamp_ms: i64,
    pub kind: GestureKind,
    pub viewport_changed: bool,
    pub zoom: i32,
    pub fractional_zoom: f64,
    pub center: GeoCoordinate,
}

/// Feed every event through the engine against `viewport`.
pub fn replay<P, V>(
    events: &[GestureEvent],
    engine: &mut GestureEngine<P>,
    viewport: &mut V,
) -> Vec<ReplayStep>
where
    P: HorizontalScrollProbe,
    V: ViewportAdapter,
{
    events
        .iter()
        .map(|event| {
            let outcome = engine.handle(*event, viewport);
            ReplayStep {
                timestamp_ms: event.timestamp_ms,
                kind: outcome.kind,
                viewport_changed: outcome.viewport_changed,
                zoom: viewport.zoom(),
                fractional_zoom: engine.zoom_state().fractional_zoom(),
                center: viewport.center(),
            }
        })
        .collect()
}

/// Count of events per gesture label.
pub fn summarize(steps: &[ReplayStep]) -> BTreeMap<&'static str, usize> {
    let mut counts = BTreeMap::new();
    for step in steps {
        *counts.entry(step.kind.label()).or_insert(0) += 1;
    }
    counts
}

pub fn format_report(steps: &[ReplayStep]) -> String {
    let mut out = String::new();

    out.push_str("=== Events ===\n");
    for step in steps {
        let marker = if step.viewport_changed { "*" } else { " " };
        out.push_str(&format!(
            "{marker} t={:>8}  {:<24} zoom={:>2} ({:>6.3})  center={}\n",
            step.timestamp_ms,
            step.kind.to_string(),
            step.zoom,
            step.fractional_zoom,
            step.center
        ));
    }

    out.push_str("\n=== Summary ===\n");
    for (label, count) in summarize(steps) {
        out.push_str(&format!("  {label:<16} {count}\n"));
    }
    let changed = steps.iter().filter(|s| s.viewport_changed).count();
    out.push_str(&format!("  viewport updates {changed}\n"));

    out
}
