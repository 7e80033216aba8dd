//! Use-Cases: Referenzlinie und Höhenprofil einer Straße ersetzen.

use super::guards::blocked;
use crate::app::{BlockedEdit, EditError};
use crate::core::{ElevationProfile, Road, SharedCurve};
use crate::geometry::derive_road;
use crate::mesh::MeshScope;
use crate::shared::{fixed_length, within_deviation, EngineOptions};

/// Index der Section, die eine Längenänderung bei `percent` aufnimmt.
///
/// Nahe Anfang bzw. Ende der Straße wird auf die erste bzw. letzte Section eingerastet.
fn absorbing_section(road: &Road, percent: f64, snap: f64) -> usize {
    let last = road.sections.len().saturating_sub(1);
    if within_deviation(0.0, percent, snap) {
        0
    } else if within_deviation(1.0, percent, snap) {
        last
    } else {
        road.section_index_at(percent).unwrap_or(last)
    }
}

/// Ersetzt die Referenzlinie und leitet alle Sections neu ab.
///
/// Ohne `target_percent` behalten alle Sections ihre Anteile. Mit
/// `target_percent` behalten alle anderen Sections ihre Länge und die
/// Section an dieser Stelle nimmt die Längenänderung auf.
pub fn update_key_path(
    road: &mut Road,
    key_path: SharedCurve,
    target_percent: Option<f64>,
    options: &EngineOptions,
) -> Result<MeshScope, EditError> {
    let new_length = fixed_length(key_path.length());
    if new_length <= 0.0 || road.sections.is_empty() {
        return Err(blocked(BlockedEdit::DegenerateKeyPath { section: 0 }));
    }

    match target_percent {
        None => {
            for section in &mut road.sections {
                section.length = fixed_length(section.span() * new_length);
            }
        }
        Some(percent) => {
            let index = absorbing_section(
                road,
                percent.clamp(0.0, 1.0),
                options.section_snap_deviation,
            );
            let others: f64 = road
                .sections
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != index)
                .map(|(_, s)| s.length)
                .sum();
            let target_length = fixed_length(new_length - others);
            if target_length <= 0.0 {
                return Err(blocked(BlockedEdit::DegenerateKeyPath {
                    section: road.sections[index].id,
                }));
            }

            let mut start = 0.0;
            for (i, section) in road.sections.iter_mut().enumerate() {
                if i == index {
                    section.length = target_length;
                }
                let span = section.length / new_length;
                section.p_start = start;
                section.p_end = start + span;
                start += span;
            }
            if let Some(last) = road.sections.last_mut() {
                last.p_end = 1.0;
            }
        }
    }

    road.key_path = key_path;
    road.length = new_length;
    road.elevation = road.elevation.as_ref().map(|e| e.rescaled(new_length));
    derive_road(road, options);

    log::info!(
        "Straße {}: Referenzlinie ersetzt, neue Länge {:.3}",
        road.id,
        new_length
    );
    Ok(MeshScope::All)
}

/// Setzt oder entfernt das Höhenprofil und leitet alle Sections neu ab.
pub fn set_elevation(
    road: &mut Road,
    elevation: Option<ElevationProfile>,
    options: &EngineOptions,
) -> Result<MeshScope, EditError> {
    let has_profile = elevation.is_some();
    road.elevation = elevation;
    derive_road(road, options);
    log::info!(
        "Straße {}: Höhenprofil {}",
        road.id,
        if has_profile { "gesetzt" } else { "entfernt" }
    );
    Ok(MeshScope::All)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::use_cases::{split_section, SplitRequest};
    use crate::core::{CatmullRomCurve3, RoadTemplate};
    use approx::assert_relative_eq;
    use glam::{DVec2, DVec3};
    use std::sync::Arc;

    fn straight(length: f64) -> SharedCurve {
        Arc::new(CatmullRomCurve3::chordal(vec![
            DVec3::ZERO,
            DVec3::new(length, 0.0, 0.0),
        ]))
    }

    fn split_road() -> Road {
        let options = EngineOptions::default();
        let mut road = Road::create(1, straight(100.0), None, &RoadTemplate::two_way(1, 3.5), &options);
        split_section(&mut road, -1, SplitRequest::Plain { at: 0.4 }, &options)
            .expect("Schnitt erwartet");
        road
    }

    #[test]
    fn test_ohne_ziel_bleiben_anteile() {
        let mut road = split_road();
        update_key_path(&mut road, straight(200.0), None, &EngineOptions::default())
            .expect("Update erwartet");
        assert_eq!(road.length, 200.0);
        assert_eq!(road.sections[0].p_end, 0.4);
        assert_eq!(road.sections[0].length, 80.0);
        assert_eq!(road.sections[1].length, 120.0);
        road.validate().expect("gültige Straße erwartet");
    }

    #[test]
    fn test_ziel_section_nimmt_aenderung_auf() {
        let mut road = split_road();
        update_key_path(&mut road, straight(160.0), Some(0.99), &EngineOptions::default())
            .expect("Update erwartet");
        assert_eq!(road.sections[0].length, 40.0);
        assert_eq!(road.sections[1].length, 120.0);
        assert_relative_eq!(road.sections[0].p_end, 0.25);
        assert_eq!(road.sections[1].p_end, 1.0);
        road.validate().expect("gültige Straße erwartet");
        // Abtastpunkte folgen der neuen Referenzlinie
        let outer = road.sections[1].boundaries.last().expect("Randlinie erwartet");
        assert_relative_eq!(outer.sample_points.last().map(|p| p.x).unwrap_or(0.0), 160.0, epsilon = 1e-6);
    }

    #[test]
    fn test_zu_kurze_referenzlinie_wird_blockiert() {
        let mut road = split_road();
        let result = update_key_path(&mut road, straight(30.0), Some(0.99), &EngineOptions::default());
        assert!(matches!(
            result,
            Err(EditError::Blocked(BlockedEdit::DegenerateKeyPath { section: 1 }))
        ));
        assert_eq!(road.length, 100.0);
    }

    #[test]
    fn test_hoehenprofil_wird_uebernommen() {
        let mut road = split_road();
        let profile = ElevationProfile::new(vec![DVec2::new(0.0, 5.0), DVec2::new(100.0, 5.0)]);
        set_elevation(&mut road, Some(profile), &EngineOptions::default()).expect("Update erwartet");
        let center = road.sections[0].center_boundary_id().expect("Mittellinie erwartet");
        assert!(road.sections[0]
            .boundary_samples(center)
            .iter()
            .all(|p| (p.y - 5.0).abs() < 1e-6));
    }
}
