//! Use-Case: Breite eines Fahrstreifens ändern.

use super::guards::{blocked, ensure_inward_of_transitions, lane_section_index};
use crate::app::EditError;
use crate::core::{LaneId, LaneSide, Road, SectionId};
use crate::geometry::{derive_side, update_lane_center_points, OffsetSampler};
use crate::mesh::MeshScope;
use crate::shared::EngineOptions;

/// Setzt die Breite von `lane_id` in allen Sections seines Block-Bereichs.
///
/// Die Breite wird auf `[min_lane_width, max_lane_width]` begrenzt. Neu
/// abgeleitet werden nur der Fahrstreifen selbst und alles außerhalb.
pub fn resize_lane_width(
    road: &mut Road,
    section_id: SectionId,
    lane_id: LaneId,
    width: f64,
    options: &EngineOptions,
) -> Result<MeshScope, EditError> {
    let index = lane_section_index(road, section_id, lane_id)?;
    ensure_inward_of_transitions(road, lane_id).map_err(blocked)?;

    let width = options.clamp_lane_width(width);
    let indices = road
        .lane_block_range(index, lane_id)
        .indices(road.sections.len());
    let side = LaneSide::of(lane_id).unwrap_or(LaneSide::Forward);

    let sampler = OffsetSampler::new(road.key_path.as_ref(), road.elevation.as_ref(), options);
    for &i in &indices {
        let section = &mut road.sections[i];
        let Some(lane) = section.lane_mut(lane_id) else {
            continue;
        };
        lane.normal_width = width;
        derive_side(section, side, lane_id.unsigned_abs(), &sampler, options);
        update_lane_center_points(section);
    }

    log::info!(
        "Straße {}: Fahrstreifen {} auf Breite {:.3} in {} Sections",
        road.id,
        lane_id,
        width,
        indices.len()
    );
    Ok(MeshScope::All)
}
