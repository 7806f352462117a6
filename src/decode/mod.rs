mod header;
mod face;

use std::io;

use crate::core::bit_coder::{ByteReader, ReaderErr};
use crate::core::mesh::Mesh;
use crate::core::shared::ConfigType;

/// Upper bound on the number of faces reserved before any face data has been read.
/// Larger meshes grow the face list as records arrive.
const MAX_PREALLOCATED_FACES: usize = 1 << 16;

#[derive(Debug, Clone)]
pub struct Config {
    max_triangles: Option<u32>,
}

impl Config {
    /// Rejects files whose header declares more than `max` triangles.
    pub fn with_max_triangles(mut self, max: u32) -> Self {
        self.max_triangles = Some(max);
        self
    }
}

impl ConfigType for Config {
    fn default() -> Self {
        Self {
            max_triangles: None,
        }
    }
}

#[remain::sorted]
#[derive(thiserror::Error, Debug)]
pub enum Err {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Header declares {declared} triangles, more than the allowed {max}")]
    TooManyTriangles { declared: u32, max: u32 },
    #[error("Not enough data for face {0}")]
    TruncatedFace(usize),
    #[error("Not enough data for the 84 byte header")]
    TruncatedHeader,
}

/// Decodes a binary STL file from `reader`.
///
/// Exactly as many faces as the header declares are read. Bytes following the
/// last face are left in the reader.
pub fn decode<R>(reader: &mut R, cfg: Config) -> Result<Mesh, Err>
where
    R: ByteReader,
{
    let header = header::decode_header(reader)
        .map_err(|r| match r {
            ReaderErr::NotEnoughData => Err::TruncatedHeader,
            ReaderErr::Io(e) => Err::Io(e),
        })?;

    if let Some(max) = cfg.max_triangles {
        if header.triangle_count > max {
            return Err(Err::TooManyTriangles { declared: header.triangle_count, max });
        }
    }

    let num_faces = header.triangle_count as usize;
    let mut faces = Vec::with_capacity(num_faces.min(MAX_PREALLOCATED_FACES));
    for idx in 0..num_faces {
        let face = face::decode_face(reader)
            .map_err(|r| match r {
                ReaderErr::NotEnoughData => Err::TruncatedFace(idx),
                ReaderErr::Io(e) => Err::Io(e),
            })?;
        faces.push(face);
    }

    Ok(Mesh::from_parts(header, faces))
}
