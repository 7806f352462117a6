pub mod builder;

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

/// Number of raw bytes in the free-text comment at the start of a binary STL file.
pub const COMMENT_SIZE: usize = 80;

/// Number of bytes in the header: the comment followed by the triangle count.
pub const HEADER_SIZE: usize = COMMENT_SIZE + 4;

/// Number of bytes in a single face record.
pub const FACE_SIZE: usize = 50;

/// A point or direction with single precision components.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Vertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vertex {
    pub const ZERO: Vertex = Vertex { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Returns a new vertex with every component multiplied by `factor`.
    /// The factor is narrowed to `f32` before the multiplication.
    pub fn scale(&self, factor: f64) -> Self {
        let s = factor as f32;
        Self {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
        }
    }

    pub(crate) fn sub(&self, other: &Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    pub(crate) fn cross(&self, other: &Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub(crate) fn min(&self, other: &Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    pub(crate) fn max(&self, other: &Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }
}

impl From<[f32; 3]> for Vertex {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<Vertex> for [f32; 3] {
    fn from(v: Vertex) -> Self {
        [v.x, v.y, v.z]
    }
}

/// Three vertices in winding order.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(a: Vertex, b: Vertex, c: Vertex) -> Self {
        Self { vertices: [a, b, c] }
    }

    pub fn scale(&self, factor: f64) -> Self {
        let [a, b, c] = self.vertices;
        Self::new(a.scale(factor), b.scale(factor), c.scale(factor))
    }

    /// Unit normal following the right-hand rule over the winding order.
    /// Degenerate triangles have a zero normal.
    pub fn normal(&self) -> Vertex {
        let [a, b, c] = &self.vertices;
        let n = b.sub(a).cross(&c.sub(a));
        let len = (n.x * n.x + n.y * n.y + n.z * n.z).sqrt();
        if len > 0.0 && len.is_finite() {
            Vertex::new(n.x / len, n.y / len, n.z / len)
        } else {
            Vertex::ZERO
        }
    }
}

/// One face record: a triangle, its normal, and the reserved attribute field.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Face {
    pub normal: Vertex,
    pub triangle: Triangle,
    pub attribute_byte_count: u16,
}

impl Face {
    pub fn new(normal: Vertex, triangle: Triangle, attribute_byte_count: u16) -> Self {
        Self { normal, triangle, attribute_byte_count }
    }

    /// Scales the triangle. The normal and the attribute field are kept as is.
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            triangle: self.triangle.scale(factor),
            ..*self
        }
    }
}

impl From<Triangle> for Face {
    fn from(triangle: Triangle) -> Self {
        Self::new(Vertex::ZERO, triangle, 0)
    }
}

/// The fixed-size header of a binary STL file.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub comment: [u8; COMMENT_SIZE],
    pub triangle_count: u32,
}

impl Header {
    pub fn new<C: AsRef<[u8]>>(comment: C, triangle_count: u32) -> Self {
        Self {
            comment: pad_comment(comment.as_ref()),
            triangle_count,
        }
    }

    /// The comment as text, with trailing NUL padding removed.
    pub fn comment_str(&self) -> Cow<'_, str> {
        let end = self.comment.iter()
            .rposition(|&b| b != 0)
            .map_or(0, |i| i + 1);
        String::from_utf8_lossy(&self.comment[..end])
    }
}

impl Default for Header {
    fn default() -> Self {
        Self {
            comment: [0; COMMENT_SIZE],
            triangle_count: 0,
        }
    }
}

impl fmt::Debug for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Header")
            .field("comment", &self.comment_str())
            .field("triangle_count", &self.triangle_count)
            .finish()
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.comment_str())
    }
}

/// Left-aligns `comment` in an 80 byte field, truncating or zero-filling as needed.
pub fn pad_comment(comment: &[u8]) -> [u8; COMMENT_SIZE] {
    let mut out = [0; COMMENT_SIZE];
    let len = comment.len().min(COMMENT_SIZE);
    out[..len].copy_from_slice(&comment[..len]);
    out
}

/// Axis-aligned box enclosing every vertex of a mesh.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BoundingBox {
    pub min: Vertex,
    pub max: Vertex,
}

impl BoundingBox {
    pub fn from_vertex(v: Vertex) -> Self {
        Self { min: v, max: v }
    }

    pub fn include(&mut self, v: &Vertex) {
        self.min = self.min.min(v);
        self.max = self.max.max(v);
    }

    pub fn size(&self) -> Vertex {
        self.max.sub(&self.min)
    }

    pub fn center(&self) -> Vertex {
        Vertex::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
            (self.min.z + self.max.z) / 2.0,
        )
    }
}

/// A binary STL file held in memory: the header and the faces in file order.
/// The header's triangle count always equals the number of faces.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    header: Header,
    faces: Vec<Face>,
}

impl Mesh {
    /// Creates an empty mesh with the given comment.
    pub fn new<C: AsRef<[u8]>>(comment: C) -> Self {
        Self {
            header: Header::new(comment, 0),
            faces: Vec::new(),
        }
    }

    /// Callers guarantee that `header.triangle_count == faces.len()`.
    pub(crate) fn from_parts(header: Header, faces: Vec<Face>) -> Self {
        debug_assert_eq!(header.triangle_count as usize, faces.len());
        Self { header, faces }
    }

    pub fn get_header(&self) -> &Header {
        &self.header
    }

    pub fn get_faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn into_faces(self) -> Vec<Face> {
        self.faces
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Returns a new mesh with every face scaled by `factor`.
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            header: self.header,
            faces: self.faces.iter().map(|f| f.scale(factor)).collect(),
        }
    }

    /// Returns `None` if the mesh has no faces.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let mut vertices = self.faces.iter().flat_map(|f| f.triangle.vertices.iter());
        let mut bbox = BoundingBox::from_vertex(*vertices.next()?);
        for v in vertices {
            bbox.include(v);
        }
        Some(bbox)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> Triangle {
        Triangle::new(
            Vertex::new(1.0, 0.0, 0.0),
            Vertex::new(0.0, 1.0, 0.0),
            Vertex::new(0.0, 0.0, 1.0),
        )
    }

    #[test]
    fn scale_triangle() {
        let scaled = unit_triangle().scale(2.0);
        assert_eq!(scaled.vertices, [
            Vertex::new(2.0, 0.0, 0.0),
            Vertex::new(0.0, 2.0, 0.0),
            Vertex::new(0.0, 0.0, 2.0),
        ]);
        assert_eq!(unit_triangle().scale(1.0), unit_triangle());
    }

    #[test]
    fn scale_does_not_touch_receiver() {
        let v = Vertex::new(1.5, -2.0, 3.0);
        let scaled = v.scale(-0.5);
        assert_eq!(v, Vertex::new(1.5, -2.0, 3.0));
        assert_eq!(scaled, Vertex::new(-0.75, 1.0, -1.5));
    }

    #[test]
    fn scale_face_keeps_normal_and_attribute() {
        let face = Face::new(Vertex::new(0.0, 0.0, 1.0), unit_triangle(), 7);
        let scaled = face.scale(3.0);
        assert_eq!(scaled.normal, face.normal);
        assert_eq!(scaled.attribute_byte_count, 7);
        assert_eq!(scaled.triangle, unit_triangle().scale(3.0));
    }

    #[test]
    fn normal() {
        let t = Triangle::new(
            Vertex::new(0.0, 0.0, 0.0),
            Vertex::new(2.0, 0.0, 0.0),
            Vertex::new(0.0, 2.0, 0.0),
        );
        assert_eq!(t.normal(), Vertex::new(0.0, 0.0, 1.0));

        let degenerate = Triangle::new(
            Vertex::new(0.0, 0.0, 0.0),
            Vertex::new(1.0, 1.0, 1.0),
            Vertex::new(2.0, 2.0, 2.0),
        );
        assert_eq!(degenerate.normal(), Vertex::ZERO);
    }

    #[test]
    fn comment_padding_and_truncation() {
        let header = Header::new("solid cube", 0);
        assert_eq!(&header.comment[..10], b"solid cube");
        assert!(header.comment[10..].iter().all(|&b| b == 0));
        assert_eq!(header.comment_str(), "solid cube");
        assert_eq!(header.to_string(), "solid cube");

        let long = [b'x'; 100];
        let header = Header::new(long, 0);
        assert_eq!(header.comment, [b'x'; COMMENT_SIZE]);
    }

    #[test]
    fn bounding_box() {
        assert!(Mesh::new("").bounding_box().is_none());

        let faces = vec![
            Face::from(unit_triangle()),
            Face::from(unit_triangle().scale(-2.0)),
        ];
        let mesh = Mesh::from_parts(Header::new("", 2), faces);
        let bbox = mesh.bounding_box().unwrap();
        assert_eq!(bbox.min, Vertex::new(-2.0, -2.0, -2.0));
        assert_eq!(bbox.max, Vertex::new(1.0, 1.0, 1.0));
        assert_eq!(bbox.size(), Vertex::new(3.0, 3.0, 3.0));
        assert_eq!(bbox.center(), Vertex::new(-0.5, -0.5, -0.5));
    }

    #[test]
    fn scaled_mesh_is_a_new_value() {
        let mesh = Mesh::from_parts(Header::new("m", 1), vec![Face::from(unit_triangle())]);
        let scaled = mesh.scale(2.0);
        assert_eq!(mesh.get_faces()[0].triangle, unit_triangle());
        assert_eq!(scaled.get_faces()[0].triangle, unit_triangle().scale(2.0));
        assert_eq!(scaled.get_header(), mesh.get_header());
    }
}
