//! Use-Case: Fahrstreifen entfernen.

use super::guards::{blocked, ensure_not_last_lane, lane_section_index};
use crate::app::{BlockedEdit, EditError};
use crate::core::{LaneId, Road, SectionId};
use crate::geometry::derive_sections;
use crate::mesh::MeshScope;
use crate::shared::EngineOptions;

/// Sections, aus denen `lane_id` entfernt würde.
///
/// Ohne Übergang ist das der Block-Bereich. Ist der Fahrstreifen selbst der
/// innerste Übergang, der verbundene Bereich vom verbreiternden bis zum
/// verengenden Übergang.
fn removal_indices(road: &Road, index: usize, lane_id: LaneId) -> Result<Vec<usize>, BlockedEdit> {
    let abs = lane_id.unsigned_abs();
    let block_range = || road.lane_block_range(index, lane_id).indices(road.sections.len());

    let Some(transition) = road.innermost_transition_lane() else {
        return Ok(block_range());
    };
    if abs > transition.unsigned_abs() {
        return Err(BlockedEdit::OutwardOfTransition {
            lane: lane_id,
            transition,
        });
    }
    if lane_id == transition {
        let (start, end) = road
            .transition_link_range(index, lane_id)
            .ok_or(BlockedEdit::TransitionLinkUnresolved { lane: lane_id })?;
        if road.has_outward_transition((start, end), lane_id) {
            return Err(BlockedEdit::StackedTransitions { lane: lane_id });
        }
        return Ok((start..=end).collect());
    }
    if abs == 1 && transition == lane_id * 2 {
        return Err(BlockedEdit::InnerLaneOfTransition {
            lane: lane_id,
            transition,
        });
    }
    Ok(block_range())
}

/// Entfernt `lane_id` aus allen betroffenen Sections und verschmilzt seine Randlinien.
pub fn remove_lane(
    road: &mut Road,
    section_id: SectionId,
    lane_id: LaneId,
    options: &EngineOptions,
) -> Result<MeshScope, EditError> {
    let index = lane_section_index(road, section_id, lane_id)?;
    let indices = removal_indices(road, index, lane_id).map_err(blocked)?;
    ensure_not_last_lane(road, &indices, lane_id).map_err(blocked)?;

    for &i in &indices {
        road.sections[i].remove_lane_merging(lane_id);
    }
    derive_sections(road, &indices, options);

    log::info!(
        "Straße {}: Fahrstreifen {} aus {} Sections entfernt",
        road.id,
        lane_id,
        indices.len()
    );
    Ok(MeshScope::All)
}
