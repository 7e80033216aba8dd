//! Reader für persistierte Straßen (JSON).

use super::records::{LaneRecord, RoadRecord, SectionRecord};
use crate::core::{
    BoundarySide, CatmullRomCurve3, ElevationProfile, Lane, LaneBoundary, LaneId,
    MonotonicBoundaryIds, Road, Section, SharedCurve,
};
use crate::geometry::{infer_trend, update_lane_center_points};
use crate::shared::EngineOptions;
use anyhow::{bail, Context, Result};
use glam::DVec3;
use std::sync::Arc;

/// Mindestabstand zweier übernommener Punkte der Mittellinie.
const KEY_PATH_POINT_EPSILON: f64 = 1e-3;

/// Liest eine Straße aus einem JSON-String.
///
/// Referenzlinie und Höhenprofil werden nicht persistiert und vom Aufrufer
/// übergeben. Die Reihenfolge von Fahrstreifen und Randlinien bleibt wie
/// gespeichert; Mittellinien werden neu berechnet.
pub fn parse_road_json(
    json: &str,
    key_path: SharedCurve,
    elevation: Option<ElevationProfile>,
    options: &EngineOptions,
) -> Result<Road> {
    let record: RoadRecord =
        serde_json::from_str(json).context("Straßen-JSON konnte nicht gelesen werden")?;
    road_from_record(&record, key_path, elevation, options)
}

/// Baut eine Straße aus einem bereits gelesenen Record.
pub fn road_from_record(
    record: &RoadRecord,
    key_path: SharedCurve,
    elevation: Option<ElevationProfile>,
    options: &EngineOptions,
) -> Result<Road> {
    let sections = record
        .sections
        .iter()
        .map(|s| rehydrate_section(s, options))
        .collect::<Result<Vec<_>>>()
        .with_context(|| format!("Straße {} ist ungültig", record.id))?;

    let boundary_ids = MonotonicBoundaryIds::resume_after(
        sections
            .iter()
            .flat_map(|s| s.boundaries.iter().map(|b| b.id)),
    );

    let road = Road {
        id: record.id,
        sections,
        key_path,
        elevation,
        length: record.length,
        boundary_ids,
    };
    road.validate()
        .with_context(|| format!("Topologie von Straße {} ist ungültig", road.id))?;

    log::info!(
        "Straße {} geladen: {} Sections, Länge {:.3}",
        road.id,
        road.sections.len(),
        road.length
    );
    Ok(road)
}

/// Referenzlinie aus den gespeicherten Mittellinien aller Sections.
///
/// Für Dateien ohne eigene Referenzlinie. `None`, wenn eine Section keinen
/// Fahrstreifen `-1`/`1` hat oder weniger als zwei Punkte übrig bleiben.
pub fn centerline_key_path(record: &RoadRecord) -> Option<SharedCurve> {
    let mut points: Vec<DVec3> = Vec::new();
    for section in &record.sections {
        let center = section.lanes.iter().find_map(|l| match l.id.trim() {
            "-1" => Some(l.lbid),
            "1" => Some(l.rbid),
            _ => None,
        })?;
        let boundary = section.boundarys.iter().find(|b| b.id == center)?;
        for &point in &boundary.sample_points {
            let point = DVec3::from(point);
            if points
                .last()
                .map_or(true, |last| last.distance(point) > KEY_PATH_POINT_EPSILON)
            {
                points.push(point);
            }
        }
    }
    if points.len() < 2 {
        return None;
    }
    Some(Arc::new(CatmullRomCurve3::chordal(points)))
}

fn rehydrate_section(record: &SectionRecord, options: &EngineOptions) -> Result<Section> {
    let mut section = Section::new(record.id, record.p_start, record.p_end, record.length);
    section.boundaries = record
        .boundarys
        .iter()
        .map(|b| {
            let mut boundary = LaneBoundary::new(b.id, b.mark, BoundarySide::Center);
            boundary.replace_samples(b.sample_points.iter().copied().map(Into::into).collect());
            boundary
        })
        .collect();

    for lane_record in &record.lanes {
        let lane = rehydrate_lane(&section, lane_record, options)
            .with_context(|| format!("Section {}", record.id))?;
        section.lanes.push(lane);
    }

    section.refresh_boundary_sides();
    section.validate()?;
    update_lane_center_points(&mut section);
    Ok(section)
}

fn rehydrate_lane(section: &Section, record: &LaneRecord, options: &EngineOptions) -> Result<Lane> {
    let id: LaneId = record
        .id
        .trim()
        .parse()
        .with_context(|| format!("Ungültige Fahrstreifen-ID '{}'", record.id))?;
    if id == 0 {
        bail!("Fahrstreifen-ID 0 ist nicht erlaubt");
    }

    let mut lane = Lane::new(
        id,
        record.lbid,
        record.rbid,
        options.lane_width,
        record.lane_type,
        record.speed_limit,
    );
    lane.friction = record.friction;
    lane.s_offset = record.s_offset;
    lane.enabled = record.enabled;
    lane.is_extends = record.is_extends;

    match (record.normal_width, record.is_transition) {
        (Some(width), Some(is_transition)) => {
            lane.normal_width = width;
            lane.is_transition = is_transition;
        }
        _ => {
            let trend = infer_trend(
                section.boundary_samples(record.lbid),
                section.boundary_samples(record.rbid),
                options.trend_width_deviation,
            );
            if let Some(trend) = trend {
                log::debug!("Fahrstreifen {id}: Verlauf aus Randlinien bestimmt");
                lane.normal_width = record.normal_width.unwrap_or(trend.normal_width);
                lane.is_transition = record.is_transition.unwrap_or(trend.is_transition);
                if record.is_transition.is_none() {
                    lane.is_extends = trend.is_extends;
                }
            } else {
                lane.normal_width = record.normal_width.unwrap_or(options.lane_width);
                lane.is_transition = record.is_transition.unwrap_or(false);
            }
        }
    }
    Ok(lane)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BoundaryMark, CatmullRomCurve3};
    use glam::DVec3;
    use std::sync::Arc;

    fn key_path() -> SharedCurve {
        Arc::new(CatmullRomCurve3::chordal(vec![
            DVec3::ZERO,
            DVec3::new(10.0, 0.0, 0.0),
        ]))
    }

    const TAPER_JSON: &str = r#"{
        "id": 4,
        "length": 10.0,
        "sections": [{
            "id": 0, "pStart": 0.0, "pEnd": 1.0, "length": 10.0,
            "lanes": [
                {"id": "-1", "lbid": 0, "rbid": 5, "isExtends": false, "type": 1,
                 "speedlimit": 30.0, "friction": 0.8, "sOffset": 0.0}
            ],
            "boundarys": [
                {"id": 0, "mark": 65553, "samplePoints": [{"x": 0, "y": 0, "z": 0}, {"x": 10, "y": 0, "z": 0}]},
                {"id": 5, "mark": 1, "samplePoints": [{"x": 0, "y": 0, "z": 3.5}, {"x": 10, "y": 0, "z": 5.5}]}
            ]
        }]
    }"#;

    #[test]
    fn test_uebergang_wird_aus_randlinien_bestimmt() {
        let road = parse_road_json(TAPER_JSON, key_path(), None, &EngineOptions::default())
            .expect("Straße erwartet");
        let lane = road.lane(0, -1).expect("Fahrstreifen erwartet");
        assert!(lane.is_transition);
        assert!(lane.is_extends);
        assert_eq!(lane.normal_width, 5.5);
        assert_eq!(lane.center_points.len(), 2);
        assert_eq!(
            road.sections[0].boundary(0).map(|b| b.mark),
            Some(BoundaryMark::DOUBLE_SOLID_YELLOW)
        );
        // Neue Randlinien-IDs setzen oberhalb der größten gespeicherten ID an
        assert_eq!(road.boundary_ids.peek(), 6);
    }

    #[test]
    fn test_ungueltige_fahrstreifen_id() {
        let json = TAPER_JSON.replace("\"-1\"", "\"links\"");
        let result = parse_road_json(&json, key_path(), None, &EngineOptions::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_fehlende_randlinie_wird_abgelehnt() {
        let json = TAPER_JSON.replace("\"rbid\": 5", "\"rbid\": 9");
        let result = parse_road_json(&json, key_path(), None, &EngineOptions::default());
        assert!(result.is_err());
    }
}
