//! Wheel and trackpad gesture handling for the trip planner's map surface.
//!
//! A single wheel-event stream is split into hardware-wheel zoom, pinch zoom
//! and two-finger pan, then applied to any [`ViewportAdapter`] with the zoom
//! held under the cursor and pans accumulated at sub-pixel precision.

pub mod classifier;
pub mod config;
pub mod engine;
pub mod models;
pub mod pan;
pub mod probe;
pub mod viewport;
pub mod zoom;

pub use classifier::{classify, ClassifierState};
pub use config::{ConfigError, GestureConfig};
pub use engine::{GestureEngine, GestureOutcome};
pub use models::{GeoCoordinate, GestureEvent, GestureKind, ScreenPoint};
pub use pan::{DragPan, PanOutcome, PanState};
pub use probe::{HorizontalScrollProbe, UnsupportedProbe};
pub use viewport::{MercatorViewport, ViewportAdapter};
pub use zoom::{ZoomOutcome, ZoomState};
