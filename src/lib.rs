// lib.rs

/// Contains the interface between `Mesh` object and files on disk,
/// such as stl and obj.
pub mod io;

/// Defines the binary STL encoder.
pub mod encode;

/// Defines the binary STL decoder.
pub mod decode;

/// Contains the shared definitions, geometry values, and the byte reader and writer.
pub mod core;

pub use crate::core::mesh::Mesh;

/// Contains the most commonly used traits, types, and objects.
pub mod prelude {
    pub use crate::core::mesh::{
        BoundingBox,
        Face,
        Header,
        Mesh,
        Triangle,
        Vertex,
        builder::MeshBuilder,
    };
    pub use crate::core::shared::ConfigType;
    pub use crate::core::bit_coder::{ByteReader, ByteWriter};
    pub use crate::encode::{self, encode, Encoder, FaceCount, Sink};
    pub use crate::decode::{self, decode};
}
