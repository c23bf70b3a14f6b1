use serde::{Deserialize, Serialize};

/// Slowest tick rate the engine will run at. Lower or non-numeric
/// `frame_rate` values are raised to it.
pub const MIN_FRAME_RATE: f32 = 1.0;

/// `rate`, raised to [`MIN_FRAME_RATE`] when it is lower or NaN.
pub fn clamp_frame_rate(rate: f32) -> f32 {
    rate.max(MIN_FRAME_RATE)
}

/// Tunable engine constants, provided by the game.
///
/// Every field has a default, so a JSON override only needs the fields it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Ticks per second of the fixed-rate loop.
    pub frame_rate: f32,
    /// Viewport width in screen pixels.
    pub viewport_width: f32,
    /// Viewport height in screen pixels.
    pub viewport_height: f32,
    /// Vertical velocity lost per tick.
    pub gravity: f32,
    /// Vertical velocity set by a jump.
    pub jump_speed: f32,
    /// How far above the ground a falling entity still snaps onto it.
    pub ground_tolerance: f32,
    /// Divisor for camera easing: the camera closes `1/follow_speed` of the
    /// gap each tick.
    pub follow_speed: f32,
    /// Fraction of the viewport, from each edge, that pushes the camera.
    pub follow_border: f32,
    /// Extra tiles kept around the visible terrain range.
    pub cull_margin_tiles: u32,
    /// Extra pixels around the viewport before an entity is culled.
    pub entity_cull_margin: f32,
    /// Initial capacity of the draw list.
    pub max_draw_commands: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            frame_rate: 35.0,
            viewport_width: 800.0,
            viewport_height: 480.0,
            gravity: 1.5,
            jump_speed: 13.0,
            ground_tolerance: 0.5,
            follow_speed: 6.0,
            follow_border: 0.2,
            cull_margin_tiles: 2,
            entity_cull_margin: 64.0,
            max_draw_commands: 4096,
        }
    }
}

impl EngineConfig {
    /// Parse a config from a JSON string. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Seconds per tick.
    pub fn fixed_dt(&self) -> f32 {
        1.0 / clamp_frame_rate(self.frame_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = EngineConfig::from_json(r#"{ "gravity": 2.0, "follow_speed": 4 }"#).unwrap();
        assert_eq!(config.gravity, 2.0);
        assert_eq!(config.follow_speed, 4.0);
        assert_eq!(config.jump_speed, EngineConfig::default().jump_speed);
    }

    #[test]
    fn fixed_dt_matches_frame_rate() {
        let config = EngineConfig { frame_rate: 40.0, ..Default::default() };
        assert!((config.fixed_dt() - 0.025).abs() < 1e-6);
    }

    #[test]
    fn non_positive_frame_rate_is_clamped() {
        let config = EngineConfig::from_json(r#"{ "frame_rate": 0 }"#).unwrap();
        assert_eq!(config.fixed_dt(), 1.0 / MIN_FRAME_RATE);
        assert_eq!(clamp_frame_rate(-35.0), MIN_FRAME_RATE);
        assert_eq!(clamp_frame_rate(f32::NAN), MIN_FRAME_RATE);
        assert_eq!(clamp_frame_rate(60.0), 60.0);
    }

    #[test]
    fn bad_json_is_an_error() {
        assert!(EngineConfig::from_json("{ gravity: }").is_err());
    }
}
