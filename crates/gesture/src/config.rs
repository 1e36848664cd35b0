use serde::{Deserialize, Serialize};

/// Tunables for the gesture engine, fixed for the engine's lifetime.
///
/// The defaults are heuristics measured against common trackpads and wheels.
/// A JSON config only needs the fields it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GestureConfig {
    pub max_zoom_level: i32,

    /// Inactivity after which all rolling classifier state is forgotten.
    pub reset_window_ms: i64,
    /// Events closer than this count toward a directional run.
    pub quick_window_ms: i64,
    pub directional_activation_count: u32,
    /// Rotations smaller than this are never counted as directional.
    pub direction_epsilon: f64,

    pub pinch_rotation_threshold: f64,
    pub pinch_time_window_ms: i64,
    pub pinch_activation_count: u32,
    pub pinch_session_timeout_ms: i64,
    pub pinch_step_unit: f64,
    pub pinch_steps_per_event: f64,

    pub hardware_wheel_step: f64,
    /// Max difference between rotation and notch count for a physical wheel.
    pub notch_match_tolerance: f64,
    /// Rotations below this magnitude look like a trackpad.
    pub trackpad_magnitude_floor: f64,
    /// Event spacing below this looks like a trackpad's report rate.
    pub rapid_stream_ms: i64,

    pub pan_sensitivity_px_per_unit: f64,
    pub apply_threshold_px: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            max_zoom_level: 20,
            reset_window_ms: 200,
            quick_window_ms: 100,
            directional_activation_count: 2,
            direction_epsilon: 0.001,
            pinch_rotation_threshold: 0.12,
            pinch_time_window_ms: 60,
            pinch_activation_count: 1,
            pinch_session_timeout_ms: 180,
            pinch_step_unit: 0.03,
            pinch_steps_per_event: 20.0,
            hardware_wheel_step: 1.2,
            notch_match_tolerance: 0.001,
            trackpad_magnitude_floor: 0.75,
            rapid_stream_ms: 35,
            pan_sensitivity_px_per_unit: 35.0,
            apply_threshold_px: 1.0,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse gesture config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid gesture config: {field} {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

impl GestureConfig {
    /// Parse a (possibly partial) JSON config and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GestureConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: &'static str) -> ConfigError {
            ConfigError::Invalid { field, reason }
        }

        if self.max_zoom_level < 0 {
            return Err(invalid("maxZoomLevel", "must not be negative"));
        }

        let windows = [
            ("resetWindowMs", self.reset_window_ms),
            ("quickWindowMs", self.quick_window_ms),
            ("pinchTimeWindowMs", self.pinch_time_window_ms),
            ("pinchSessionTimeoutMs", self.pinch_session_timeout_ms),
            ("rapidStreamMs", self.rapid_stream_ms),
        ];
        for (field, value) in windows {
            if value < 0 {
                return Err(invalid(field, "must not be negative"));
            }
        }

        let positive = [
            ("pinchRotationThreshold", self.pinch_rotation_threshold),
            ("pinchStepUnit", self.pinch_step_unit),
            ("pinchStepsPerEvent", self.pinch_steps_per_event),
            ("hardwareWheelStep", self.hardware_wheel_step),
            ("panSensitivityPxPerUnit", self.pan_sensitivity_px_per_unit),
            ("applyThresholdPx", self.apply_threshold_px),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(field, "must be a positive finite number"));
            }
        }

        // Whole-pixel rounding leaves up to half a pixel behind.
        if self.apply_threshold_px < 0.5 {
            return Err(invalid("applyThresholdPx", "must be at least 0.5"));
        }

        let tolerances = [
            ("directionEpsilon", self.direction_epsilon),
            ("notchMatchTolerance", self.notch_match_tolerance),
            ("trackpadMagnitudeFloor", self.trackpad_magnitude_floor),
        ];
        for (field, value) in tolerances {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(field, "must be a non-negative finite number"));
            }
        }

        if self.directional_activation_count == 0 {
            return Err(invalid("directionalActivationCount", "must be at least 1"));
        }
        if self.pinch_activation_count == 0 {
            return Err(invalid("pinchActivationCount", "must be at least 1"));
        }

        Ok(())
    }
}
