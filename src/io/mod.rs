/// Loads and saves binary STL files by path.
pub mod stl;

/// Imports Wavefront OBJ meshes.
pub mod obj;
