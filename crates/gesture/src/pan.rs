use crate::models::{GeoCoordinate, ScreenPoint};
use crate::viewport::ViewportAdapter;

/// Sub-pixel pan offsets waiting to be applied to the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PanState {
    pub offset_x: f64,
    pub offset_y: f64,
}

/// What a pan request did to the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanOutcome {
    /// Below the apply threshold; offsets carried to the next event.
    Carried,
    /// The viewport center moved by this many whole pixels.
    Applied { dx: f64, dy: f64 },
    /// Projection failed; the offsets are kept and retried next time.
    Deferred,
}

impl PanState {
    pub fn reset(&mut self) {
        self.offset_x = 0.0;
        self.offset_y = 0.0;
    }

    pub fn is_idle(&self) -> bool {
        self.offset_x == 0.0 && self.offset_y == 0.0
    }

    /// Add `(dx, dy)` pixels and move the viewport once either axis reaches
    /// `threshold_px`. Only whole pixels are applied; the fraction stays here.
    pub fn apply_pan<V: ViewportAdapter + ?Sized>(
        &mut self,
        dx: f64,
        dy: f64,
        threshold_px: f64,
        viewport: &mut V,
    ) -> PanOutcome {
        if dx.is_finite() && dy.is_finite() {
            self.offset_x += dx;
            self.offset_y += dy;
        }

        if self.offset_x.abs().max(self.offset_y.abs()) < threshold_px {
            tracing::trace!(x = self.offset_x, y = self.offset_y, "pan carried");
            return PanOutcome::Carried;
        }

        let step_x = self.offset_x.round();
        let step_y = self.offset_y.round();
        let center = viewport.center_point();
        let target = ScreenPoint::new(center.x + step_x, center.y + step_y);

        let Some(geo) = viewport.screen_to_geo(target) else {
            tracing::debug!(x = self.offset_x, y = self.offset_y, "pan deferred, projection unavailable");
            return PanOutcome::Deferred;
        };

        viewport.set_center(geo);
        self.offset_x -= step_x;
        self.offset_y -= step_y;
        tracing::debug!(dx = step_x, dy = step_y, "pan applied");
        PanOutcome::Applied {
            dx: step_x,
            dy: step_y,
        }
    }
}

/// Click-and-drag panning: the point grabbed at press stays under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragPan {
    grabbed: Option<Grab>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Grab {
    pointer: ScreenPoint,
    center: GeoCoordinate,
}

impl DragPan {
    /// Start a drag at `pointer`. Ignored while the viewport cannot project.
    pub fn press<V: ViewportAdapter + ?Sized>(&mut self, pointer: ScreenPoint, viewport: &V) {
        let center = viewport.center_point();
        self.grabbed = viewport
            .screen_to_geo(center)
            .map(|center| Grab { pointer, center });
    }

    pub fn is_dragging(&self) -> bool {
        self.grabbed.is_some()
    }

    /// Follow the pointer. Returns whether the viewport moved.
    pub fn drag<V: ViewportAdapter + ?Sized>(&mut self, pointer: ScreenPoint, viewport: &mut V) -> bool {
        let Some(grab) = self.grabbed else {
            return false;
        };
        // Re-anchor on the center recorded at press so long drags don't accumulate error.
        let Some(grab_center) = viewport.geo_to_screen(grab.center) else {
            return false;
        };
        let target = ScreenPoint::new(
            grab_center.x - (pointer.x - grab.pointer.x),
            grab_center.y - (pointer.y - grab.pointer.y),
        );
        match viewport.screen_to_geo(target) {
            Some(geo) => {
                viewport.set_center(geo);
                true
            }
            None => false,
        }
    }

    pub fn release(&mut self) {
        self.grabbed = None;
    }
}
