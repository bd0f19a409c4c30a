//! Mesh decoding for GLB/GLTF and OBJ payloads
//!
//! glTF node transforms are baked into vertex positions so the resulting
//! [`SceneGraph`] is flat and in world space.

use crate::error::{AerosuiteError, Result};
use crate::model::SupportedFormat;
use serde::Serialize;

type Mat4 = [[f32; 4]; 4];

const IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// One triangle mesh in world space
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeshPart {
    /// Mesh or object name from the source file
    pub name: String,
    /// Vertex positions
    pub positions: Vec<[f32; 3]>,
    /// Triangle indices into `positions`
    pub indices: Vec<u32>,
}

/// Decoded model geometry
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SceneGraph {
    /// All mesh parts in the scene
    pub meshes: Vec<MeshPart>,
}

impl SceneGraph {
    /// Total number of vertices across all parts
    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(|m| m.positions.len()).sum()
    }

    /// Total number of triangles across all parts
    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(|m| m.indices.len() / 3).sum()
    }

    /// Iterate every vertex position
    pub fn positions(&self) -> impl Iterator<Item = &[f32; 3]> {
        self.meshes.iter().flat_map(|m| m.positions.iter())
    }
}

/// Decode a model payload into a [`SceneGraph`]
///
/// # Errors
///
/// Returns `AerosuiteError::Decode` when the decoder rejects the payload and
/// `AerosuiteError::EmptyScene` when it contains no vertices.
pub fn decode(bytes: &[u8], format: SupportedFormat) -> Result<SceneGraph> {
    let scene = if format.is_gltf_family() {
        decode_gltf(bytes)?
    } else {
        decode_obj(bytes)?
    };

    if scene.vertex_count() == 0 {
        return Err(AerosuiteError::EmptyScene.into());
    }

    tracing::debug!(
        format = %format,
        meshes = scene.meshes.len(),
        vertices = scene.vertex_count(),
        triangles = scene.triangle_count(),
        "Decoded model"
    );
    Ok(scene)
}

fn decode_gltf(bytes: &[u8]) -> Result<SceneGraph> {
    let (document, buffers, _images) = gltf::import_slice(bytes)
        .map_err(|e| AerosuiteError::Decode(format!("glTF import failed: {}", e)))?;

    let mut scene = SceneGraph::default();
    match document.default_scene().or_else(|| document.scenes().next()) {
        Some(root) => {
            for node in root.nodes() {
                collect_node(&node, &IDENTITY, &buffers, &mut scene);
            }
        }
        None => {
            // No scene: take meshes as authored
            for mesh in document.meshes() {
                collect_mesh(&mesh, &IDENTITY, &buffers, &mut scene);
            }
        }
    }
    Ok(scene)
}

fn collect_node(
    node: &gltf::Node<'_>,
    parent: &Mat4,
    buffers: &[gltf::buffer::Data],
    scene: &mut SceneGraph,
) {
    let world = mat_mul(parent, &node.transform().matrix());
    if let Some(mesh) = node.mesh() {
        collect_mesh(&mesh, &world, buffers, scene);
    }
    for child in node.children() {
        collect_node(&child, &world, buffers, scene);
    }
}

fn collect_mesh(
    mesh: &gltf::Mesh<'_>,
    transform: &Mat4,
    buffers: &[gltf::buffer::Data],
    scene: &mut SceneGraph,
) {
    let name = mesh
        .name()
        .map(str::to_string)
        .unwrap_or_else(|| format!("mesh_{}", mesh.index()));

    for primitive in mesh.primitives() {
        let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|d| d.0.as_slice()));
        let Some(positions) = reader.read_positions() else {
            continue;
        };
        let positions: Vec<[f32; 3]> = positions.map(|p| transform_point(transform, p)).collect();
        let indices = match reader.read_indices() {
            Some(indices) => indices.into_u32().collect(),
            None => (0..positions.len() as u32).collect(),
        };
        scene.meshes.push(MeshPart {
            name: name.clone(),
            positions,
            indices,
        });
    }
}

fn decode_obj(bytes: &[u8]) -> Result<SceneGraph> {
    let load_opts = tobj::LoadOptions {
        triangulate: true,
        single_index: true,
        ..Default::default()
    };
    let mut reader = bytes;
    let (models, _materials) = tobj::load_obj_buf(&mut reader, &load_opts, |_| {
        Ok((Vec::new(), Default::default()))
    })
    .map_err(|e| AerosuiteError::Decode(format!("OBJ parse failed: {}", e)))?;

    let meshes = models
        .into_iter()
        .map(|model| MeshPart {
            positions: model
                .mesh
                .positions
                .chunks_exact(3)
                .map(|p| [p[0], p[1], p[2]])
                .collect(),
            indices: model.mesh.indices,
            name: model.name,
        })
        .collect();

    Ok(SceneGraph { meshes })
}

/// Column-major 4x4 product `a * b`
fn mat_mul(a: &Mat4, b: &Mat4) -> Mat4 {
    let mut out = [[0.0; 4]; 4];
    for (col, out_col) in out.iter_mut().enumerate() {
        for (row, cell) in out_col.iter_mut().enumerate() {
            *cell = (0..4).map(|k| a[k][row] * b[col][k]).sum();
        }
    }
    out
}

fn transform_point(m: &Mat4, p: [f32; 3]) -> [f32; 3] {
    let mut out = [0.0; 3];
    for (row, value) in out.iter_mut().enumerate() {
        *value = m[0][row] * p[0] + m[1][row] * p[1] + m[2][row] * p[2] + m[3][row];
    }
    out
}
