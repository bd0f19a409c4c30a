//! Headless viewer state and the render boundary
//!
//! [`render`] is the only entry point from a stored model to something
//! displayable. Decoder errors and decoder panics both end up as
//! [`ViewerState::Fallback`]; nothing escapes this boundary.

use super::decode::decode;
use super::normalize::{normalize, NormalizedScene};
use crate::config::ViewerConfig;
use crate::error::AerosuiteError;
use crate::model::SupportedFormat;
use serde::Serialize;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Elevation limit, keeps the camera off the poles
const MAX_ELEVATION: f32 = 89.0_f32 * std::f32::consts::PI / 180.0;

/// Orbit camera around a target point
#[derive(Debug, Clone, Serialize)]
pub struct OrbitCamera {
    /// Camera position in world space
    pub position: [f32; 3],
    /// Point the camera orbits and looks at
    pub target: [f32; 3],
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Closest allowed distance to the target
    pub min_distance: f32,
    /// Farthest allowed distance to the target
    pub max_distance: f32,
}

impl OrbitCamera {
    /// Camera at the configured initial position looking at the origin
    pub fn new(config: &ViewerConfig) -> Self {
        let mut camera = Self {
            position: config.camera_position,
            target: [0.0; 3],
            fov_degrees: config.fov_degrees,
            min_distance: config.min_distance,
            max_distance: config.max_distance,
        };
        let (azimuth, elevation, distance) = camera.spherical();
        camera.set_spherical(azimuth, elevation, distance);
        camera
    }

    /// Distance from the camera to its target
    pub fn distance(&self) -> f32 {
        let d = self.offset();
        (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt()
    }

    /// Orbit by the given angles in radians
    pub fn rotate(&mut self, delta_azimuth: f32, delta_elevation: f32) {
        let (azimuth, elevation, distance) = self.spherical();
        self.set_spherical(azimuth + delta_azimuth, elevation + delta_elevation, distance);
    }

    /// Multiply the distance to the target by `factor`, within the clamps
    pub fn zoom(&mut self, factor: f32) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let (azimuth, elevation, distance) = self.spherical();
        self.set_spherical(azimuth, elevation, distance * factor);
    }

    /// Move camera and target together
    pub fn pan(&mut self, delta: [f32; 3]) {
        for axis in 0..3 {
            self.position[axis] += delta[axis];
            self.target[axis] += delta[axis];
        }
    }

    fn offset(&self) -> [f32; 3] {
        [0, 1, 2].map(|axis| self.position[axis] - self.target[axis])
    }

    /// (azimuth, elevation, distance) with Y up
    fn spherical(&self) -> (f32, f32, f32) {
        let d = self.offset();
        let distance = self.distance();
        if distance <= f32::EPSILON {
            return (0.0, 0.0, 0.0);
        }
        let azimuth = d[0].atan2(d[2]);
        let elevation = (d[1] / distance).clamp(-1.0, 1.0).asin();
        (azimuth, elevation, distance)
    }

    fn set_spherical(&mut self, azimuth: f32, elevation: f32, distance: f32) {
        let elevation = elevation.clamp(-MAX_ELEVATION, MAX_ELEVATION);
        let distance = distance.clamp(self.min_distance, self.max_distance);
        let horizontal = distance * elevation.cos();
        self.position = [
            self.target[0] + horizontal * azimuth.sin(),
            self.target[1] + distance * elevation.sin(),
            self.target[2] + horizontal * azimuth.cos(),
        ];
    }
}

/// Named environment lighting preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentPreset {
    /// Neutral studio lighting
    Studio,
}

/// Fixed lighting setup for the viewer
#[derive(Debug, Clone, Serialize)]
pub struct LightingRig {
    /// Ambient light intensity
    pub ambient_intensity: f32,
    /// Directional light position
    pub directional_position: [f32; 3],
    /// Directional light intensity
    pub directional_intensity: f32,
    /// Environment map preset
    pub environment: EnvironmentPreset,
}

impl Default for LightingRig {
    fn default() -> Self {
        Self {
            ambient_intensity: 0.5,
            directional_position: [10.0, 10.0, 5.0],
            directional_intensity: 1.0,
            environment: EnvironmentPreset::Studio,
        }
    }
}

/// Placeholder geometry shown when a model cannot be displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackShape {
    /// Unit cube
    Cube,
}

/// Summary counts for a rendered scene
#[derive(Debug, Clone, Serialize)]
pub struct SceneStats {
    /// Number of mesh parts
    pub meshes: usize,
    /// Number of vertices
    pub vertices: usize,
    /// Number of triangles
    pub triangles: usize,
    /// Largest extent of the source model, in source units
    pub source_max_dimension: f32,
}

/// What the viewer displays
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum ViewerState {
    /// Model decoded and normalized
    Ready {
        /// Normalized scene
        scene: Box<NormalizedScene>,
        /// Initial camera
        camera: OrbitCamera,
        /// Lighting setup
        lighting: LightingRig,
        /// Scene counts
        stats: SceneStats,
    },
    /// Model could not be displayed
    Fallback {
        /// Placeholder geometry
        shape: FallbackShape,
        /// Reason shown to the user
        message: String,
    },
}

impl ViewerState {
    /// Whether the model was rendered
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }

    fn fallback(message: impl Into<String>) -> Self {
        Self::Fallback {
            shape: FallbackShape::Cube,
            message: message.into(),
        }
    }
}

/// Decode, normalize and frame a model payload
///
/// Never fails: any decode error or decoder panic yields a fallback state.
pub fn render(bytes: &[u8], format: SupportedFormat, config: &ViewerConfig) -> ViewerState {
    let decoded = catch_unwind(AssertUnwindSafe(|| decode(bytes, format)));

    let scene = match decoded {
        Ok(Ok(scene)) => scene,
        Ok(Err(e)) => {
            tracing::warn!(format = %format, "Model failed to decode: {}", e);
            return ViewerState::fallback(format!("Failed to load model: {}", e));
        }
        Err(_) => {
            tracing::error!(format = %format, "Model decoder panicked");
            return ViewerState::fallback("Failed to load model: decoder crashed");
        }
    };

    let Some(normalized) = normalize(&scene, config.target_size) else {
        return ViewerState::fallback(format!(
            "Failed to load model: {}",
            AerosuiteError::EmptyScene
        ));
    };

    let stats = SceneStats {
        meshes: normalized.scene.meshes.len(),
        vertices: normalized.scene.vertex_count(),
        triangles: normalized.scene.triangle_count(),
        source_max_dimension: normalized.source_bounds.max_dimension(),
    };

    tracing::info!(
        meshes = stats.meshes,
        vertices = stats.vertices,
        "Model ready for viewing"
    );

    ViewerState::Ready {
        scene: Box::new(normalized),
        camera: OrbitCamera::new(config),
        lighting: LightingRig::default(),
        stats,
    }
}
