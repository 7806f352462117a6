/// Little-endian byte reader and writer traits used by the decoder and the encoder.
pub mod bit_coder;

/// Geometry value types and the in-memory mesh.
pub mod mesh;

pub mod shared;
