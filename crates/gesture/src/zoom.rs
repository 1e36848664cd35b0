use crate::models::ScreenPoint;
use crate::viewport::ViewportAdapter;

/// Fractional zoom level that absorbs sub-level deltas before they reach the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomState {
    fractional_zoom: f64,
    max_zoom: i32,
}

/// What a zoom request did to the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZoomOutcome {
    /// The rounded level did not change; the viewport was not touched.
    Unchanged,
    Zoomed {
        from: i32,
        to: i32,
        /// False when projection failed and the anchor could not be held.
        anchored: bool,
    },
}

impl ZoomOutcome {
    pub fn changed(&self) -> bool {
        matches!(self, ZoomOutcome::Zoomed { .. })
    }
}

/// The point a zoom should hold still: the cursor if it is over the map,
/// otherwise the middle of the viewport.
pub fn resolve_anchor<V: ViewportAdapter + ?Sized>(cursor: ScreenPoint, viewport: &V) -> ScreenPoint {
    if viewport.contains(cursor) {
        cursor
    } else {
        viewport.center_point()
    }
}

/// Set the viewport to `level` and shift its center so the geographic point
/// under `anchor` stays under `anchor`. Returns whether the anchor was held.
pub fn zoom_about_anchor<V: ViewportAdapter + ?Sized>(
    viewport: &mut V,
    level: i32,
    anchor: ScreenPoint,
) -> bool {
    let before = viewport.zoom();
    let anchor_geo = viewport.screen_to_geo(anchor);
    viewport.set_zoom(level);
    if viewport.zoom() == before {
        return false;
    }

    let Some(anchor_geo) = anchor_geo else {
        return false;
    };
    let Some(moved) = viewport.geo_to_screen(anchor_geo) else {
        return false;
    };

    let center = viewport.center_point();
    let target = ScreenPoint::new(
        center.x + (moved.x - anchor.x),
        center.y + (moved.y - anchor.y),
    );
    match viewport.screen_to_geo(target) {
        Some(new_center) => {
            viewport.set_center(new_center);
            true
        }
        None => false,
    }
}

impl ZoomState {
    pub fn new(initial_zoom: i32, max_zoom: i32) -> Self {
        let max_zoom = max_zoom.max(0);
        Self {
            fractional_zoom: initial_zoom.clamp(0, max_zoom) as f64,
            max_zoom,
        }
    }

    pub fn fractional_zoom(&self) -> f64 {
        self.fractional_zoom
    }

    /// Always derived from the fractional level.
    pub fn integer_zoom(&self) -> i32 {
        self.fractional_zoom.round() as i32
    }

    pub fn max_zoom(&self) -> i32 {
        self.max_zoom
    }

    /// Re-seed from the viewport, e.g. after something else changed its zoom.
    pub fn sync_to<V: ViewportAdapter + ?Sized>(&mut self, viewport: &V) {
        self.fractional_zoom = viewport.zoom().clamp(0, self.max_zoom) as f64;
    }

    /// Accumulate `delta` zoom levels and push the rounded level to the viewport
    /// when it changes, holding `anchor` in place.
    pub fn apply_zoom<V: ViewportAdapter + ?Sized>(
        &mut self,
        delta: f64,
        anchor: ScreenPoint,
        viewport: &mut V,
    ) -> ZoomOutcome {
        if !delta.is_finite() {
            return ZoomOutcome::Unchanged;
        }
        self.fractional_zoom = (self.fractional_zoom + delta).clamp(0.0, self.max_zoom as f64);
        self.push_level(anchor, viewport)
    }

    /// Zoom-button step: move `levels` whole levels about the viewport center.
    pub fn step<V: ViewportAdapter + ?Sized>(&mut self, levels: i32, viewport: &mut V) -> ZoomOutcome {
        let target = viewport.zoom().saturating_add(levels).clamp(0, self.max_zoom);
        self.fractional_zoom = target as f64;
        let anchor = viewport.center_point();
        self.push_level(anchor, viewport)
    }

    fn push_level<V: ViewportAdapter + ?Sized>(&mut self, anchor: ScreenPoint, viewport: &mut V) -> ZoomOutcome {
        let from = viewport.zoom();
        let requested = self.integer_zoom();
        if requested == from {
            tracing::trace!(fractional = self.fractional_zoom, level = requested, "zoom carried");
            return ZoomOutcome::Unchanged;
        }

        let anchored = zoom_about_anchor(viewport, requested, anchor);

        // The viewport may cap the level tighter than `max_zoom`; never run ahead of it.
        let to = viewport.zoom();
        if to != requested {
            let limit = to as f64;
            self.fractional_zoom = if to < requested {
                self.fractional_zoom.min(limit)
            } else {
                self.fractional_zoom.max(limit)
            };
            tracing::debug!(requested, applied = to, "viewport limited zoom level");
        }
        if to == from {
            return ZoomOutcome::Unchanged;
        }

        tracing::debug!(from, to, anchored, "zoom level changed");
        ZoomOutcome::Zoomed { from, to, anchored }
    }
}
