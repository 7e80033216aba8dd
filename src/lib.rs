//! Road Lane Engine Library.
//! Geometrie- und Topologie-Kern für Straßen aus Sections, Fahrstreifen und Randlinien.

pub mod app;
pub mod core;
pub mod geometry;
pub mod io;
pub mod mesh;
pub mod shared;

pub use app::{
    BlockedEdit, CommandLog, EditCommand, EditError, LaneAttribute, LaneRef, RoadEditor,
    SplitRequest,
};
pub use core::{
    BoundaryMark, CatmullRomCurve3, ElevationProfile, Lane, LaneBoundary, LaneId, LaneSide,
    LaneType, ParametricCurve, Road, RoadId, RoadKind, RoadTemplate, Section, SharedCurve,
};
pub use io::{parse_road_json, write_road_json};
pub use mesh::{MeshScope, RoadMeshes};
pub use shared::EngineOptions;
