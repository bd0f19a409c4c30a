//! Scene normalization for display
//!
//! Normalization works on a copy: the decoded source scene is never mutated.

use super::bounds::Aabb;
use super::decode::SceneGraph;
use serde::Serialize;

/// Scene translated to the origin and scaled to a fixed size
#[derive(Debug, Clone, Serialize)]
pub struct NormalizedScene {
    /// Transformed geometry
    pub scene: SceneGraph,
    /// Bounds of the source geometry before normalization
    pub source_bounds: Aabb,
    /// Bounds after normalization
    pub bounds: Aabb,
    /// Uniform scale factor that was applied
    pub scale: f32,
    /// Translation applied before scaling
    pub offset: [f32; 3],
}

/// Center a scene on the origin and scale its largest dimension to `target_size`
///
/// A zero-extent scene is only re-centered.
///
/// Returns `None` when the scene has no vertices.
///
/// # Examples
///
/// ```
/// use aerosuite::scene::{normalize, MeshPart, SceneGraph};
///
/// let scene = SceneGraph {
///     meshes: vec![MeshPart {
///         name: "box".into(),
///         positions: vec![[10.0, 10.0, 10.0], [14.0, 12.0, 11.0]],
///         indices: vec![],
///     }],
/// };
/// let normalized = normalize(&scene, 2.0).unwrap();
/// assert!((normalized.bounds.max_dimension() - 2.0).abs() < 1e-5);
/// ```
pub fn normalize(source: &SceneGraph, target_size: f32) -> Option<NormalizedScene> {
    let source_bounds = Aabb::from_points(source.positions())?;
    let center = source_bounds.center();
    let max_dim = source_bounds.max_dimension();

    let scale = if max_dim > f32::EPSILON {
        target_size / max_dim
    } else {
        1.0
    };

    let mut scene = source.clone();
    for mesh in &mut scene.meshes {
        for p in &mut mesh.positions {
            for axis in 0..3 {
                p[axis] = (p[axis] - center[axis]) * scale;
            }
        }
    }

    let bounds = Aabb::from_points(scene.positions())?;

    tracing::debug!(
        source_max_dimension = max_dim,
        scale,
        "Normalized scene"
    );

    Some(NormalizedScene {
        scene,
        source_bounds,
        bounds,
        scale,
        offset: center.map(|c| -c),
    })
}
