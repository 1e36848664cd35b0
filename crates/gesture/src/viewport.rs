//! The map surface driven by the gesture engine, plus a Web Mercator reference implementation.
//!
//! Tiles are 256 px square. At zoom `z` the world is `256 * 2^z` pixels wide.

use std::f64::consts::PI;

use crate::models::{GeoCoordinate, ScreenPoint};

pub const TILE_SIZE_PX: f64 = 256.0;

/// Latitude where Web Mercator's world square ends.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Default view of the planner: downtown Toronto.
pub const DEFAULT_CENTER: GeoCoordinate = GeoCoordinate {
    latitude: 43.6532,
    longitude: -79.3832,
};
pub const DEFAULT_ZOOM: i32 = 5;
pub const DEFAULT_WIDTH_PX: f64 = 800.0;
pub const DEFAULT_HEIGHT_PX: f64 = 600.0;

/// What the gesture engine needs from a map widget.
///
/// Projections return `None` when the surface cannot answer, e.g. before it
/// has been laid out. Callers treat that as "skip this step", never as an error.
pub trait ViewportAdapter {
    fn zoom(&self) -> i32;
    fn set_zoom(&mut self, zoom: i32);
    fn center(&self) -> GeoCoordinate;
    fn set_center(&mut self, center: GeoCoordinate);
    fn screen_to_geo(&self, point: ScreenPoint) -> Option<GeoCoordinate>;
    fn geo_to_screen(&self, geo: GeoCoordinate) -> Option<ScreenPoint>;
    /// (width, height) in pixels.
    fn viewport_size(&self) -> (f64, f64);

    /// The screen point at the middle of the viewport.
    fn center_point(&self) -> ScreenPoint {
        let (w, h) = self.viewport_size();
        ScreenPoint::new(w / 2.0, h / 2.0)
    }

    /// Whether `point` lies inside the laid-out viewport.
    fn contains(&self, point: ScreenPoint) -> bool {
        let (w, h) = self.viewport_size();
        point.x.is_finite()
            && point.y.is_finite()
            && (0.0..=w).contains(&point.x)
            && (0.0..=h).contains(&point.y)
    }
}

/// Size of the world in pixels at `zoom`.
pub fn world_size_px(zoom: i32) -> f64 {
    TILE_SIZE_PX * 2f64.powi(zoom)
}

/// Convert a coordinate to world pixels at `zoom`.
pub fn geo_to_world_px(geo: GeoCoordinate, zoom: i32) -> (f64, f64) {
    let size = world_size_px(zoom);
    let lat = geo.latitude.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let x = (geo.longitude + 180.0) / 360.0 * size;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * size;
    (x, y)
}

/// Convert world pixels at `zoom` back to a coordinate.
///
/// Longitude is not wrapped, so a point left of the antimeridian comes back below -180.
pub fn world_px_to_geo(x: f64, y: f64, zoom: i32) -> GeoCoordinate {
    let size = world_size_px(zoom);
    let longitude = x / size * 360.0 - 180.0;
    let n = PI * (1.0 - 2.0 * y / size);
    let latitude = n.sinh().atan().to_degrees();
    GeoCoordinate::new(latitude, longitude)
}

/// A plain Web Mercator viewport with integer zoom levels.
#[derive(Debug, Clone, PartialEq)]
pub struct MercatorViewport {
    center: GeoCoordinate,
    zoom: i32,
    max_zoom: i32,
    width: f64,
    height: f64,
}

impl Default for MercatorViewport {
    fn default() -> Self {
        Self::new(
            DEFAULT_CENTER,
            DEFAULT_ZOOM,
            DEFAULT_WIDTH_PX,
            DEFAULT_HEIGHT_PX,
        )
    }
}

impl MercatorViewport {
    pub fn new(center: GeoCoordinate, zoom: i32, width: f64, height: f64) -> Self {
        let mut viewport = Self {
            center,
            zoom: 0,
            max_zoom: 20,
            width,
            height,
        };
        viewport.set_zoom(zoom);
        viewport
    }

    pub fn with_max_zoom(mut self, max_zoom: i32) -> Self {
        self.max_zoom = max_zoom.max(0);
        self.zoom = self.zoom.clamp(0, self.max_zoom);
        self
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    fn is_laid_out(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Top-left corner of the viewport in world pixels.
    fn origin_world_px(&self) -> (f64, f64) {
        let (cx, cy) = geo_to_world_px(self.center, self.zoom);
        (cx - self.width / 2.0, cy - self.height / 2.0)
    }
}

impl ViewportAdapter for MercatorViewport {
    fn zoom(&self) -> i32 {
        self.zoom
    }

    fn set_zoom(&mut self, zoom: i32) {
        self.zoom = zoom.clamp(0, self.max_zoom);
    }

    fn center(&self) -> GeoCoordinate {
        self.center
    }

    fn set_center(&mut self, center: GeoCoordinate) {
        self.center = GeoCoordinate::new(
            center.latitude.clamp(-MAX_LATITUDE, MAX_LATITUDE),
            center.longitude,
        );
    }

    fn screen_to_geo(&self, point: ScreenPoint) -> Option<GeoCoordinate> {
        if !self.is_laid_out() || !point.x.is_finite() || !point.y.is_finite() {
            return None;
        }
        let (ox, oy) = self.origin_world_px();
        let (wx, wy) = (ox + point.x, oy + point.y);
        if !(0.0..=world_size_px(self.zoom)).contains(&wy) {
            return None;
        }
        Some(world_px_to_geo(wx, wy, self.zoom))
    }

    fn geo_to_screen(&self, geo: GeoCoordinate) -> Option<ScreenPoint> {
        if !self.is_laid_out() || !geo.latitude.is_finite() || !geo.longitude.is_finite() {
            return None;
        }
        let (ox, oy) = self.origin_world_px();
        let (wx, wy) = geo_to_world_px(geo, self.zoom);
        Some(ScreenPoint::new(wx - ox, wy - oy))
    }

    fn viewport_size(&self) -> (f64, f64) {
        (self.width, self.height)
    }
}
