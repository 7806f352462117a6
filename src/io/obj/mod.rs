// use tobj to load the obj file and convert it to triangle faces
use std::fmt::Debug;
use std::path::Path;

use crate::core::mesh::builder::{self, MeshBuilder};
use crate::core::mesh::Vertex;
use crate::Mesh;

#[remain::sorted]
#[derive(Debug, thiserror::Error)]
pub enum Err {
    #[error("Face refers to vertex {index}, but model '{model}' has {num_vertices} vertices")]
    InvalidIndex { model: String, index: usize, num_vertices: usize },
    #[error("Failed to load OBJ file: {0}")]
    LoadError(#[from] tobj::LoadError),
    #[error("Mesh Builder Error: {0}")]
    MeshBuilderError(#[from] builder::Err),
}

/// Loads every model of an OBJ file into a single mesh.
///
/// Polygons are triangulated. Each face gets the normal of its triangle, computed
/// from the winding order; normals stored in the OBJ file are ignored.
pub fn load_obj<P, C>(path: P, comment: C) -> Result<Mesh, Err>
where
    P: AsRef<Path> + Debug,
    C: AsRef<[u8]>,
{
    let op = tobj::LoadOptions {
        triangulate: true,
        single_index: true,
        ..Default::default()
    };

    let (models, _materials) = tobj::load_obj(path.as_ref(), &op)?;

    let num_faces = models.iter().map(|m| m.mesh.indices.len() / 3).sum();
    let mut builder = MeshBuilder::with_capacity(comment, num_faces);
    for model in &models {
        let pos = model.mesh.positions.chunks_exact(3)
            .map(|x| Vertex::new(x[0], x[1], x[2]))
            .collect::<Vec<_>>();
        let vertex = |idx: u32| {
            pos.get(idx as usize).copied().ok_or_else(|| Err::InvalidIndex {
                model: model.name.clone(),
                index: idx as usize,
                num_vertices: pos.len(),
            })
        };
        for face in model.mesh.indices.chunks_exact(3) {
            builder.add_triangle(vertex(face[0])?, vertex(face[1])?, vertex(face[2])?);
        }
    }

    tracing::debug!(
        path = ?path,
        models = models.len(),
        triangles = builder.num_faces(),
        "loaded OBJ file"
    );
    Ok(builder.build()?)
}
