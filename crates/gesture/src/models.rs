use serde::{Deserialize, Serialize};

/// A point on the map surface in pixels. Origin is the top-left corner, Y grows down.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point, in pixels.
    pub fn distance_to(self, other: ScreenPoint) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoCoordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl std::fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5}, {:.5}", self.latitude, self.longitude)
    }
}

/// One wheel event as delivered by the input layer.
///
/// Hardware wheels report `precise_rotation == notches`; trackpads report small
/// fractional rotations with `notches == 0` most of the time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GestureEvent {
    pub precise_rotation: f64,
    #[serde(default)]
    pub notches: i32,
    pub timestamp_ms: i64,
    #[serde(default)]
    pub control_down: bool,
    #[serde(default)]
    pub shift_down: bool,
    #[serde(default)]
    pub cursor: ScreenPoint,
    /// Best-effort platform signal that this is a horizontal-scroll event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizontal_hint: Option<bool>,
}

impl GestureEvent {
    /// A trackpad-style event: fractional rotation, no notches, no modifiers.
    pub fn trackpad(precise_rotation: f64, timestamp_ms: i64) -> Self {
        Self {
            precise_rotation,
            notches: 0,
            timestamp_ms,
            control_down: false,
            shift_down: false,
            cursor: ScreenPoint::default(),
            horizontal_hint: None,
        }
    }

    /// A hardware wheel event: rotation equals the notch count.
    pub fn wheel(notches: i32, timestamp_ms: i64) -> Self {
        Self {
            precise_rotation: notches as f64,
            notches,
            ..Self::trackpad(0.0, timestamp_ms)
        }
    }

    pub fn at(mut self, cursor: ScreenPoint) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn with_control(mut self) -> Self {
        self.control_down = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift_down = true;
        self
    }

    pub fn with_horizontal_hint(mut self, hint: bool) -> Self {
        self.horizontal_hint = Some(hint);
        self
    }
}

/// What a single event means for the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "magnitude")]
pub enum GestureKind {
    NoOp,
    /// Discrete zoom from a physical wheel; magnitude is in zoom levels.
    ZoomHardwareWheel(f64),
    /// Smooth trackpad zoom; magnitude is in zoom levels.
    ZoomPinch(f64),
    /// Magnitude is in screen pixels.
    PanVertical(f64),
    /// Magnitude is in screen pixels.
    PanHorizontal(f64),
}

impl GestureKind {
    pub fn is_zoom(&self) -> bool {
        matches!(self, GestureKind::ZoomHardwareWheel(_) | GestureKind::ZoomPinch(_))
    }

    pub fn is_pan(&self) -> bool {
        matches!(self, GestureKind::PanVertical(_) | GestureKind::PanHorizontal(_))
    }

    pub fn magnitude(&self) -> f64 {
        match *self {
            GestureKind::NoOp => 0.0,
            GestureKind::ZoomHardwareWheel(m)
            | GestureKind::ZoomPinch(m)
            | GestureKind::PanVertical(m)
            | GestureKind::PanHorizontal(m) => m,
        }
    }

    /// Short stable label, used in logs and replay summaries.
    pub fn label(&self) -> &'static str {
        match self {
            GestureKind::NoOp => "noop",
            GestureKind::ZoomHardwareWheel(_) => "zoom-wheel",
            GestureKind::ZoomPinch(_) => "zoom-pinch",
            GestureKind::PanVertical(_) => "pan-vertical",
            GestureKind::PanHorizontal(_) => "pan-horizontal",
        }
    }
}

impl std::fmt::Display for GestureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GestureKind::NoOp => write!(f, "{}", self.label()),
            _ => write!(f, "{}({:+.3})", self.label(), self.magnitude()),
        }
    }
}
