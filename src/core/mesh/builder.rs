use thiserror::Error;

use super::{Face, Header, Mesh, Triangle, Vertex};

#[remain::sorted]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Err {
    #[error("Too many faces for a binary STL file: {0}")]
    TooManyFaces(usize),
}

/// Collects faces in order and produces a [Mesh] whose header count matches them.
pub struct MeshBuilder {
    comment: Vec<u8>,
    faces: Vec<Face>,
}

impl MeshBuilder {
    pub fn new<C: AsRef<[u8]>>(comment: C) -> Self {
        Self {
            comment: comment.as_ref().to_vec(),
            faces: Vec::new(),
        }
    }

    pub fn with_capacity<C: AsRef<[u8]>>(comment: C, num_faces: usize) -> Self {
        Self {
            comment: comment.as_ref().to_vec(),
            faces: Vec::with_capacity(num_faces),
        }
    }

    pub fn add_face(&mut self, face: Face) -> &mut Self {
        self.faces.push(face);
        self
    }

    /// Adds a face for the triangle `a, b, c`, with the normal computed from the winding order.
    pub fn add_triangle(&mut self, a: Vertex, b: Vertex, c: Vertex) -> &mut Self {
        let triangle = Triangle::new(a, b, c);
        self.add_face(Face::new(triangle.normal(), triangle, 0))
    }

    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    pub fn build(self) -> Result<Mesh, Err> {
        let Self { comment, faces } = self;
        let triangle_count = u32::try_from(faces.len())
            .map_err(|_| Err::TooManyFaces(faces.len()))?;
        Ok(Mesh::from_parts(Header::new(comment, triangle_count), faces))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_keeps_order_and_count() {
        let a = Vertex::new(0.0, 0.0, 0.0);
        let b = Vertex::new(1.0, 0.0, 0.0);
        let c = Vertex::new(0.0, 1.0, 0.0);

        let mut builder = MeshBuilder::new("two faces");
        builder
            .add_triangle(a, b, c)
            .add_face(Face::new(Vertex::ZERO, Triangle::new(c, b, a), 3));
        assert_eq!(builder.num_faces(), 2);

        let mesh = builder.build().unwrap();
        assert_eq!(mesh.get_header().triangle_count, 2);
        assert_eq!(mesh.get_header().comment_str(), "two faces");

        let faces = mesh.get_faces();
        assert_eq!(faces[0].triangle.vertices, [a, b, c]);
        assert_eq!(faces[0].normal, Vertex::new(0.0, 0.0, 1.0));
        assert_eq!(faces[1].triangle.vertices, [c, b, a]);
        assert_eq!(faces[1].attribute_byte_count, 3);
    }

    #[test]
    fn empty_mesh() {
        let mesh = MeshBuilder::new("").build().unwrap();
        assert!(mesh.is_empty());
        assert_eq!(mesh.get_header().triangle_count, 0);
    }
}
