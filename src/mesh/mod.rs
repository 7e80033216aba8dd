//! Mesh-Ausgaben: Fahrstreifen-Flächen und Markierungs-Striche, gebündelt als Jobs.

pub mod lane_mesh;
pub mod stroke_mesh;
pub mod tasks;
pub mod types;

pub use lane_mesh::build_lane_mesh;
pub use stroke_mesh::{
    build_dashed_stroke, build_solid_stroke, build_stroke_meshes, StrokeMesh, StrokeProfile,
};
pub use tasks::{
    build_road_meshes, collect_jobs, run_batch, MeshJob, MeshJobInput, MeshOutput, MeshScope,
    RoadMeshes,
};
pub use types::{MeshData, MeshError, MeshKey, MeshTarget, MeshVertex};
