//! Use-Case: Markierung einer Randlinie ändern.

use crate::app::EditError;
use crate::core::{BoundaryId, BoundaryMark, Road, SectionId};
use crate::mesh::MeshScope;

/// Setzt die Markierung der Randlinie `boundary_id`.
///
/// Die Geometrie bleibt unverändert; nur die Linien-Meshes werden neu erzeugt.
pub fn update_boundary_mark(
    road: &mut Road,
    section_id: SectionId,
    boundary_id: BoundaryId,
    mark: BoundaryMark,
) -> Result<MeshScope, EditError> {
    let road_id = road.id;
    let section = road
        .section_mut(section_id)
        .ok_or(EditError::SectionNotFound {
            road: road_id,
            section: section_id,
        })?;
    let boundary = section
        .boundary_mut(boundary_id)
        .ok_or(EditError::BoundaryNotFound {
            section: section_id,
            boundary: boundary_id,
        })?;
    if boundary.mark == mark {
        return Ok(MeshScope::Nothing);
    }
    boundary.mark = mark;
    log::debug!("Straße {road_id}: Randlinie {boundary_id} Markierung {mark:?}");
    Ok(MeshScope::BoundariesOnly)
}
