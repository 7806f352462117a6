use std::fmt::Debug;
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::Path;

use crate::core::shared::ConfigType;
use crate::{decode, encode, Mesh};

#[remain::sorted]
#[derive(Debug, thiserror::Error)]
pub enum Err {
    #[error("Failed to decode STL file: {0}")]
    DecodeError(#[from] decode::Err),
    #[error("Failed to encode STL file: {0}")]
    EncodeError(#[from] encode::Err),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Reads a binary STL file.
pub fn load_stl<P: AsRef<Path> + Debug>(path: P) -> Result<Mesh, Err> {
    let file = File::open(path.as_ref())?;
    let mut reader = BufReader::new(file);
    let mesh = decode::decode(&mut reader, decode::Config::default())?;
    tracing::debug!(path = ?path, triangles = mesh.len(), "loaded STL file");
    Ok(mesh)
}

/// Writes `mesh` to a binary STL file, replacing any existing file.
pub fn save_stl<P: AsRef<Path> + Debug>(path: P, mesh: &Mesh) -> Result<(), Err> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    encode::encode(mesh, &mut writer, encode::Config::default())?;
    tracing::debug!(path = ?path, triangles = mesh.len(), "saved STL file");
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mesh::builder::MeshBuilder;
    use crate::core::mesh::Vertex;

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("triangle.stl");

        let mut builder = MeshBuilder::new("saved by a test");
        builder.add_triangle(
            Vertex::new(0.0, 0.0, 0.0),
            Vertex::new(1.0, 0.0, 0.0),
            Vertex::new(0.0, 1.0, 0.0),
        );
        let mesh = builder.build().unwrap();

        save_stl(&path, &mesh).unwrap();
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 84 + 50);
        assert_eq!(load_stl(&path).unwrap(), mesh);
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_stl(dir.path().join("missing.stl"));
        match result {
            Err(Err::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::NotFound),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
