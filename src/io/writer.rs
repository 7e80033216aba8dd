//! Writer für persistierte Straßen (JSON).

use super::records::{BoundaryRecord, LaneRecord, RoadRecord, SectionRecord};
use crate::core::{Lane, Road, Section};
use anyhow::{Context, Result};

/// Schreibt eine Straße als JSON-String (eingerückt).
pub fn write_road_json(road: &Road) -> Result<String> {
    let record = road_record(road);
    serde_json::to_string_pretty(&record)
        .with_context(|| format!("Straße {} konnte nicht geschrieben werden", road.id))
}

/// Baut den persistierten Record einer Straße.
pub fn road_record(road: &Road) -> RoadRecord {
    RoadRecord {
        id: road.id,
        sections: road.sections.iter().map(section_record).collect(),
        length: road.length,
    }
}

fn section_record(section: &Section) -> SectionRecord {
    SectionRecord {
        id: section.id,
        p_start: section.p_start,
        p_end: section.p_end,
        length: section.length,
        lanes: section.lanes.iter().map(lane_record).collect(),
        boundarys: section
            .boundaries
            .iter()
            .map(|b| BoundaryRecord {
                id: b.id,
                mark: b.mark,
                sample_points: b.sample_points.iter().copied().map(Into::into).collect(),
            })
            .collect(),
    }
}

fn lane_record(lane: &Lane) -> LaneRecord {
    LaneRecord {
        id: lane.id.to_string(),
        lbid: lane.lbid,
        rbid: lane.rbid,
        normal_width: Some(lane.normal_width),
        is_transition: Some(lane.is_transition),
        is_extends: lane.is_extends,
        lane_type: lane.lane_type,
        speed_limit: lane.speed_limit,
        friction: lane.friction,
        s_offset: lane.s_offset,
        enabled: lane.enabled,
    }
}
