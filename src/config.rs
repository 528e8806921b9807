use crate::error::Result;
use crate::surface::SurfaceConfig;
use crate::viewer::catalog::DEFAULT_START_INDEX;
use crate::viewer::gesture::GestureConfig;
use serde::{Deserialize, Serialize};

/// Per-tick smoothing and pointer tuning for the interaction controller.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    pub start_index: usize,
    /// Rotation added per pointer event at the viewport edge.
    pub pointer_rate: f64,
    pub rotation_damping: f64,
    pub camera_damping: f64,
    /// Yaw added to the rotation target every tick.
    pub auto_spin: f64,
    pub cloud_spin: f64,
    /// Largest random tilt of a moon's orbit plane, in radians.
    pub moon_tilt: f64,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            start_index: DEFAULT_START_INDEX,
            pointer_rate: 0.02,
            rotation_damping: 0.05,
            camera_damping: 0.1,
            auto_spin: 0.0005,
            cloud_spin: 0.0003,
            moon_tilt: 0.25,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub gesture: GestureConfig,
    pub controls: ControlConfig,
    pub surface: SurfaceConfig,
}

impl ViewerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
