//! Gemeinsame Vorbedingungen und Lookups der Bearbeitungen.
//!
//! Alle Prüfungen lesen nur; sie laufen vor jeder Mutation.

use crate::app::{BlockedEdit, EditError};
use crate::core::{LaneId, LaneSide, Road, SectionId};

/// Index der Section `section_id`, die den Fahrstreifen `lane_id` enthalten muss.
pub fn lane_section_index(
    road: &Road,
    section_id: SectionId,
    lane_id: LaneId,
) -> Result<usize, EditError> {
    let index = road
        .section_index(section_id)
        .ok_or(EditError::SectionNotFound {
            road: road.id,
            section: section_id,
        })?;
    if !road.sections[index].has_lane(lane_id) {
        return Err(EditError::LaneNotFound {
            section: section_id,
            lane: lane_id,
        });
    }
    Ok(index)
}

/// Blockiert Bearbeitungen auf Höhe oder außerhalb des innersten Übergangs.
pub fn ensure_inward_of_transitions(road: &Road, lane_id: LaneId) -> Result<(), BlockedEdit> {
    match road.innermost_transition_lane() {
        Some(transition) if transition.unsigned_abs() <= lane_id.unsigned_abs() => {
            Err(BlockedEdit::OutwardOfTransition {
                lane: lane_id,
                transition,
            })
        }
        _ => Ok(()),
    }
}

/// Blockiert das Entfernen, wenn der Fahrstreifen in einer der Sections der letzte seiner Richtung ist.
pub fn ensure_not_last_lane(
    road: &Road,
    indices: &[usize],
    lane_id: LaneId,
) -> Result<(), BlockedEdit> {
    let side = LaneSide::of(lane_id).unwrap_or(LaneSide::Forward);
    for &index in indices {
        let section = &road.sections[index];
        if section.has_lane(lane_id) && section.lane_count(side) <= 1 {
            return Err(BlockedEdit::LastLaneOfDirection {
                section: section.id,
                lane: lane_id,
            });
        }
    }
    Ok(())
}

/// Meldet eine blockierte Bearbeitung und gibt den Fehler weiter.
pub fn blocked(reason: BlockedEdit) -> EditError {
    log::warn!("Bearbeitung blockiert: {reason}");
    EditError::Blocked(reason)
}
