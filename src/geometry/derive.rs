//! Ableitung der Randlinien einer Section aus Referenzlinie und Fahrstreifen-Breiten.
//!
//! Pro Richtung wird der Versatz von der Referenzlinie nach außen aufsummiert:
//! - reguläre Fahrstreifen innerhalb eines Übergangs: Parallel-Abtastung
//! - Übergangs-Fahrstreifen: Übergangskurve zwischen innerem und äußerem Versatz
//! - reguläre Fahrstreifen außerhalb eines Übergangs: Verkettung an der inneren Randlinie

use super::centerline::update_lane_center_points;
use super::offset::OffsetSampler;
use super::segment::matching_segment;
use super::transition::{taper_boundary_samples, TaperRequest};
use crate::core::{BoundaryId, LaneSide, Road, Section};
use crate::shared::EngineOptions;
use glam::DVec3;

/// Schnappschuss der für die Ableitung nötigen Fahrstreifen-Daten.
struct LaneGeometry {
    abs_id: u32,
    inner: BoundaryId,
    outer: BoundaryId,
    width: f64,
    is_transition: bool,
    is_extends: bool,
}

/// Intervallanzahl für eine Ableitung.
///
/// Bei teilweiser Ableitung bleibt die Punktanzahl der vorhandenen
/// Mittellinie erhalten, damit innere und äußere Randlinien zusammenpassen.
fn side_segment(section: &Section, from_abs_id: u32, options: &EngineOptions) -> usize {
    let existing = section
        .center_boundary_id()
        .map(|id| section.boundary_samples(id).len())
        .unwrap_or(0);
    if from_abs_id > 1 && existing > 1 {
        return existing - 1;
    }
    let segment = matching_segment(section);
    if section.has_transition() {
        segment.max(options.tween_sample_segment)
    } else {
        segment
    }
}

/// Leitet die Randlinien einer Richtung ab Fahrstreifen `from_abs_id` (Betrag) neu ab.
///
/// Innere Fahrstreifen werden nur für den Versatz berücksichtigt.
pub fn derive_side(
    section: &mut Section,
    side: LaneSide,
    from_abs_id: u32,
    sampler: &OffsetSampler<'_>,
    options: &EngineOptions,
) {
    let lanes: Vec<LaneGeometry> = section
        .lanes_on(side)
        .into_iter()
        .map(|lane| LaneGeometry {
            abs_id: lane.abs_id(),
            inner: lane.inner_boundary_id(),
            outer: lane.outer_boundary_id(),
            width: lane.normal_width,
            is_transition: lane.is_transition,
            is_extends: lane.is_extends,
        })
        .collect();
    if lanes.is_empty() {
        return;
    }

    let segment = side_segment(section, from_abs_id, options);
    let (p_start, p_end) = (section.p_start, section.p_end);
    let ref_points = sampler
        .parallel_samples(p_start, p_end, segment, 0.0, side)
        .ref_points;

    let mut offset = 0.0;
    let mut transition_seen = false;
    for lane in &lanes {
        if lane.abs_id < from_abs_id {
            if lane.is_transition {
                transition_seen = true;
            } else {
                offset += lane.width;
            }
            continue;
        }

        if lane.abs_id == 1 {
            if let Some(center) = section.boundary_mut(lane.inner) {
                center.replace_samples(ref_points.clone());
            }
        }

        let outer_points: Vec<DVec3> = if lane.is_transition {
            let inner_offset = side.sign() * offset;
            let outer_offset = side.sign() * (offset + lane.width);
            let (start_offset, end_offset) = if lane.is_extends {
                (inner_offset, outer_offset)
            } else {
                (outer_offset, inner_offset)
            };
            transition_seen = true;
            taper_boundary_samples(
                sampler,
                &TaperRequest {
                    p_start,
                    p_end,
                    start_offset,
                    end_offset,
                    segment,
                },
                options,
            )
        } else if transition_seen {
            let inner_points = section.boundary_samples(lane.inner).to_vec();
            sampler.chained_samples(
                &ref_points,
                &inner_points,
                lane.width,
                side,
                p_start,
                p_end,
                segment,
            )
        } else {
            sampler
                .parallel_samples(p_start, p_end, segment, offset + lane.width, side)
                .offset_points
        };

        if let Some(outer) = section.boundary_mut(lane.outer) {
            outer.replace_samples(outer_points);
        }
        if !lane.is_transition {
            offset += lane.width;
        }
    }
}

/// Leitet beide Richtungen vollständig ab und berechnet die Mittellinien neu.
pub fn derive_section(section: &mut Section, sampler: &OffsetSampler<'_>, options: &EngineOptions) {
    for side in LaneSide::BOTH {
        derive_side(section, side, 1, sampler, options);
    }
    update_lane_center_points(section);
    section.refresh_boundary_sides();
}

/// Leitet alle Sections einer Straße neu ab.
pub fn derive_road(road: &mut Road, options: &EngineOptions) {
    let sampler = OffsetSampler::new(road.key_path.as_ref(), road.elevation.as_ref(), options);
    for section in &mut road.sections {
        derive_section(section, &sampler, options);
    }
    log::debug!(
        "Straße {}: {} Sections neu abgeleitet",
        road.id,
        road.sections.len()
    );
}

/// Leitet ausgewählte Sections einer Straße neu ab.
pub fn derive_sections(road: &mut Road, indices: &[usize], options: &EngineOptions) {
    let sampler = OffsetSampler::new(road.key_path.as_ref(), road.elevation.as_ref(), options);
    for &index in indices {
        if let Some(section) = road.sections.get_mut(index) {
            derive_section(section, &sampler, options);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CatmullRomCurve3, RoadTemplate};
    use approx::assert_relative_eq;
    use std::sync::Arc;

    fn road() -> Road {
        let curve = CatmullRomCurve3::chordal(vec![DVec3::ZERO, DVec3::new(100.0, 0.0, 0.0)]);
        Road::create(
            7,
            Arc::new(curve),
            None,
            &RoadTemplate::two_way(2, 3.5),
            &EngineOptions::default(),
        )
    }

    fn outer_z(section: &Section, lane_id: i32, index: usize) -> f64 {
        let lane = section.lane(lane_id).expect("Fahrstreifen erwartet");
        section.boundary_samples(lane.outer_boundary_id())[index].z
    }

    #[test]
    fn test_regulaere_fahrstreifen_liegen_parallel() {
        let road = road();
        let section = &road.sections[0];
        // 100 m → 30 Intervalle
        assert_eq!(section.boundaries[0].sample_points.len(), 31);
        assert_relative_eq!(outer_z(section, -1, 10), 3.5, epsilon = 1e-9);
        assert_relative_eq!(outer_z(section, -2, 10), 7.0, epsilon = 1e-9);
        assert_relative_eq!(outer_z(section, 1, 10), -3.5, epsilon = 1e-9);
        assert_relative_eq!(outer_z(section, 2, 30), -7.0, epsilon = 1e-9);
        let center = &section.lane(-2).expect("Fahrstreifen erwartet").center_points;
        assert_eq!(center.len(), 31);
        assert_relative_eq!(center[3].z, 5.25, epsilon = 1e-9);
    }

    #[test]
    fn test_uebergang_mit_verkettetem_aussenstreifen() {
        let mut road = road();
        let options = EngineOptions::default();
        {
            let section = &mut road.sections[0];
            let lane = section.lane_mut(1).expect("Fahrstreifen erwartet");
            lane.is_transition = true;
            lane.is_extends = true;
        }
        derive_road(&mut road, &options);
        let section = &road.sections[0];

        // Übergang auf der Rückwärts-Seite: von 0 auf -3.5
        assert_relative_eq!(outer_z(section, 1, 0), 0.0, epsilon = 1e-9);
        assert_relative_eq!(outer_z(section, 1, 30), -3.5, epsilon = 1e-9);
        // Äußerer Fahrstreifen folgt mit konstanter Breite
        assert_relative_eq!(outer_z(section, 2, 0), -3.5, epsilon = 1e-9);
        assert_relative_eq!(outer_z(section, 2, 30), -7.0, epsilon = 1e-6);
        for i in 0..=30 {
            let inner = section.boundary_samples(section.lane(2).map(|l| l.rbid).unwrap_or(0))[i];
            let outer = section.boundary_samples(section.lane(2).map(|l| l.lbid).unwrap_or(0))[i];
            assert_relative_eq!(inner.distance(outer), 3.5, epsilon = 1e-9);
        }
        // Vorwärts-Seite unberührt
        assert_relative_eq!(outer_z(section, -2, 15), 7.0, epsilon = 1e-9);
    }

    #[test]
    fn test_ab_fahrstreifen_ableiten_laesst_innere_unberuehrt() {
        let mut road = road();
        let options = EngineOptions::default();
        let sampler_road = road.clone();
        let sampler = OffsetSampler::new(sampler_road.key_path.as_ref(), None, &options);
        let section = &mut road.sections[0];
        let before = section.boundary_samples(section.lane(-1).map(|l| l.rbid).unwrap_or(0)).to_vec();
        if let Some(lane) = section.lane_mut(-2) {
            lane.normal_width = 5.0;
        }
        derive_side(section, LaneSide::Forward, 2, &sampler, &options);
        let after = section.boundary_samples(section.lane(-1).map(|l| l.rbid).unwrap_or(0));
        assert_eq!(before, after);
        assert_relative_eq!(outer_z(section, -2, 5), 8.5, epsilon = 1e-9);
    }
}
