//! Use-Case: Attribute eines Fahrstreifens ohne Geometrie-Auswirkung.

use super::guards::lane_section_index;
use crate::app::{EditError, LaneAttribute};
use crate::core::{LaneId, Road, SectionId};
use crate::mesh::MeshScope;

/// Setzt ein einzelnes Attribut von `lane_id` in Section `section_id`.
///
/// Ein neuer Typ setzt die Reibung auf den Standardwert des Typs,
/// `SOffset` wird auf die Länge der Section begrenzt.
pub fn update_lane_attribute(
    road: &mut Road,
    section_id: SectionId,
    lane_id: LaneId,
    attribute: LaneAttribute,
) -> Result<MeshScope, EditError> {
    let index = lane_section_index(road, section_id, lane_id)?;
    let section = &mut road.sections[index];
    let section_length = section.length;
    let Some(lane) = section.lane_mut(lane_id) else {
        return Err(EditError::LaneNotFound {
            section: section_id,
            lane: lane_id,
        });
    };

    match attribute {
        LaneAttribute::SpeedLimit(value) => lane.speed_limit = value,
        LaneAttribute::Type(lane_type) => {
            lane.lane_type = lane_type;
            lane.friction = lane_type.default_friction();
        }
        LaneAttribute::Friction(value) => lane.friction = value,
        LaneAttribute::SOffset(value) => lane.s_offset = value.min(section_length),
    }

    log::debug!(
        "Straße {}: Fahrstreifen {} in Section {}: {:?}",
        road.id,
        lane_id,
        section_id,
        attribute
    );
    Ok(MeshScope::Nothing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CatmullRomCurve3, LaneType, RoadTemplate};
    use crate::shared::EngineOptions;
    use glam::DVec3;
    use std::sync::Arc;

    fn road() -> Road {
        let curve = CatmullRomCurve3::chordal(vec![DVec3::ZERO, DVec3::new(50.0, 0.0, 0.0)]);
        Road::create(
            3,
            Arc::new(curve),
            None,
            &RoadTemplate::two_way(1, 3.5),
            &EngineOptions::default(),
        )
    }

    #[test]
    fn test_typ_setzt_reibung() {
        let mut road = road();
        road.sections[0].lane_mut(-1).expect("Fahrstreifen erwartet").friction = 0.1;
        let scope = update_lane_attribute(&mut road, 0, -1, LaneAttribute::Type(LaneType::Biking))
            .expect("Update erwartet");
        assert_eq!(scope, MeshScope::Nothing);
        let lane = road.lane(0, -1).expect("Fahrstreifen erwartet");
        assert_eq!(lane.lane_type, LaneType::Biking);
        assert_eq!(lane.friction, LaneType::Biking.default_friction());
    }

    #[test]
    fn test_s_offset_wird_begrenzt() {
        let mut road = road();
        update_lane_attribute(&mut road, 0, 1, LaneAttribute::SOffset(80.0))
            .expect("Update erwartet");
        assert_eq!(road.lane(0, 1).map(|l| l.s_offset), Some(50.0));
    }

    #[test]
    fn test_unbekannter_fahrstreifen() {
        let mut road = road();
        let result = update_lane_attribute(&mut road, 0, -4, LaneAttribute::SpeedLimit(50.0));
        assert!(matches!(result, Err(EditError::LaneNotFound { lane: -4, .. })));
    }
}
