use crate::classifier::{classify, ClassifierState};
use crate::config::GestureConfig;
use crate::models::{GestureEvent, GestureKind};
use crate::pan::{PanOutcome, PanState};
use crate::probe::{annotate, HorizontalScrollProbe, UnsupportedProbe};
use crate::viewport::ViewportAdapter;
use crate::zoom::{resolve_anchor, ZoomOutcome, ZoomState};

/// Result of handling one event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureOutcome {
    pub kind: GestureKind,
    /// Whether the viewport's zoom or center was changed by this event.
    pub viewport_changed: bool,
}

/// Wheel-gesture state for one map surface.
///
/// Every mutation takes `&mut self`; drive it from the thread that owns the
/// surface.
#[derive(Debug)]
pub struct GestureEngine<P = UnsupportedProbe> {
    config: GestureConfig,
    classifier: ClassifierState,
    zoom: ZoomState,
    pan: PanState,
    probe: P,
}

impl GestureEngine<UnsupportedProbe> {
    pub fn new(config: GestureConfig, initial_zoom: i32) -> Self {
        let zoom = ZoomState::new(initial_zoom, config.max_zoom_level);
        Self {
            config,
            classifier: ClassifierState::default(),
            zoom,
            pan: PanState::default(),
            probe: UnsupportedProbe,
        }
    }

    /// Start with the accumulator seeded from the viewport's current zoom.
    pub fn for_viewport<V: ViewportAdapter + ?Sized>(config: GestureConfig, viewport: &V) -> Self {
        Self::new(config, viewport.zoom())
    }
}

impl<P: HorizontalScrollProbe> GestureEngine<P> {
    /// Swap in a platform horizontal-scroll probe.
    pub fn with_probe<Q: HorizontalScrollProbe>(self, probe: Q) -> GestureEngine<Q> {
        GestureEngine {
            config: self.config,
            classifier: self.classifier,
            zoom: self.zoom,
            pan: self.pan,
            probe,
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn classifier_state(&self) -> &ClassifierState {
        &self.classifier
    }

    pub fn zoom_state(&self) -> &ZoomState {
        &self.zoom
    }

    pub fn pan_state(&self) -> &PanState {
        &self.pan
    }

    /// Classify one wheel event and apply it to `viewport`.
    pub fn handle<V: ViewportAdapter + ?Sized>(
        &mut self,
        event: GestureEvent,
        viewport: &mut V,
    ) -> GestureOutcome {
        let event = annotate(&self.probe, event);
        let (kind, next) = classify(&event, self.classifier, &self.config);
        self.classifier = next;

        let viewport_changed = match kind {
            GestureKind::NoOp => false,
            GestureKind::ZoomHardwareWheel(delta) => {
                // A wheel tick never leaves pan drift behind.
                self.pan.reset();
                self.zoom_at(delta, event, viewport)
            }
            GestureKind::ZoomPinch(delta) => self.zoom_at(delta, event, viewport),
            GestureKind::PanVertical(px) => self.pan_by(0.0, px, viewport),
            GestureKind::PanHorizontal(px) => self.pan_by(px, 0.0, viewport),
        };

        GestureOutcome {
            kind,
            viewport_changed,
        }
    }

    /// Zoom-button press: whole levels about the viewport center.
    pub fn zoom_step<V: ViewportAdapter + ?Sized>(&mut self, levels: i32, viewport: &mut V) -> bool {
        self.pan.reset();
        self.zoom.step(levels, viewport).changed()
    }

    /// Re-seed the zoom accumulator after the viewport was zoomed from elsewhere.
    pub fn sync_zoom<V: ViewportAdapter + ?Sized>(&mut self, viewport: &V) {
        self.zoom.sync_to(viewport);
    }

    fn zoom_at<V: ViewportAdapter + ?Sized>(
        &mut self,
        delta: f64,
        event: GestureEvent,
        viewport: &mut V,
    ) -> bool {
        let anchor = resolve_anchor(event.cursor, &*viewport);
        let outcome = self.zoom.apply_zoom(delta, anchor, viewport);
        !matches!(outcome, ZoomOutcome::Unchanged)
    }

    fn pan_by<V: ViewportAdapter + ?Sized>(&mut self, dx: f64, dy: f64, viewport: &mut V) -> bool {
        let threshold = self.config.apply_threshold_px;
        matches!(
            self.pan.apply_pan(dx, dy, threshold, viewport),
            PanOutcome::Applied { .. }
        )
    }
}
