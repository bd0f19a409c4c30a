//! Model decoding, normalization and the viewer boundary
//!
//! A stored model payload flows through [`decode`], then [`normalize`], and
//! ends up as a [`ViewerState`] produced by [`render`].

pub mod bounds;
pub mod decode;
pub mod normalize;
pub mod viewer;

pub use bounds::Aabb;
pub use decode::{decode, MeshPart, SceneGraph};
pub use normalize::{normalize, NormalizedScene};
pub use viewer::{
    render, EnvironmentPreset, FallbackShape, LightingRig, OrbitCamera, SceneStats, ViewerState,
};
