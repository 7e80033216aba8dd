//! Core-Domänentypen: Kurven, Straße, Sections, Fahrstreifen und Randlinien.

pub mod boundary;
pub mod curve;
pub mod ids;
pub mod lane;
pub mod lane_type;
pub mod mark;
/// Core-Datenmodell einer Straße
///
/// - Road: Referenzlinie, Höhenprofil und geordnete Sections
/// - Section: Längsabschnitt mit eigenen Fahrstreifen und Randlinien
/// - Lane: Fahrstreifen mit ID-Verweisen auf seine Randlinien
pub mod road;
pub mod section;
mod section_edit;

pub use boundary::{BoundarySide, LaneBoundary};
pub use curve::{
    horizontal_perpendicular, CatmullRomCurve3, CurveKind, ElevationProfile, ParametricCurve,
    SharedCurve,
};
pub use ids::{
    BoundaryId, BoundaryIdAllocator, LaneId, MonotonicBoundaryIds, RoadId, SectionId,
};
pub use lane::{Lane, LaneSide};
pub use lane_type::LaneType;
pub use mark::{BoundaryMark, LineStyle, MarkColor, ParsedMark};
pub use road::{BlockRange, Road, RoadKind, RoadTemplate};
pub use section::{Section, TopologyError};
