//! Geometrie-Ableitung: Abtastung, Übergänge, Verkettung und Mittellinien.

pub mod centerline;
pub mod derive;
pub mod offset;
pub mod segment;
pub mod transition;
pub mod trend;

pub use centerline::{midpoints, update_lane_center_points};
pub use derive::{derive_road, derive_section, derive_sections, derive_side};
pub use offset::{OffsetSampler, ParallelSamples};
pub use segment::{matching_segment, segment_by_length};
pub use transition::{
    taper_boundary_samples, taper_control_points, tween_samples_by_key_path, TaperRequest,
};
pub use trend::{infer_trend, LaneTrend};
