//! Use-Case: Fahrstreifen einfügen.

use super::guards::{blocked, ensure_inward_of_transitions, lane_section_index};
use crate::app::EditError;
use crate::core::{LaneId, Road, SectionId};
use crate::geometry::derive_sections;
use crate::mesh::MeshScope;
use crate::shared::EngineOptions;

/// Fügt in allen Sections des Block-Bereichs außen neben `lane_id` einen Fahrstreifen ein.
pub fn add_lane(
    road: &mut Road,
    section_id: SectionId,
    lane_id: LaneId,
    options: &EngineOptions,
) -> Result<MeshScope, EditError> {
    let index = lane_section_index(road, section_id, lane_id)?;
    ensure_inward_of_transitions(road, lane_id).map_err(blocked)?;

    let indices = road
        .lane_block_range(index, lane_id)
        .indices(road.sections.len());
    for &i in &indices {
        let boundary = road.allocate_boundary_id();
        road.sections[i].insert_lane_outward(lane_id, boundary);
    }
    derive_sections(road, &indices, options);

    log::info!(
        "Straße {}: Fahrstreifen neben {} in {} Sections eingefügt",
        road.id,
        lane_id,
        indices.len()
    );
    Ok(MeshScope::All)
}
