//! Integrationstests für das Teilen von Sections:
//! - einfacher Schnitt
//! - Verbreiterung und Verengung mit Übergangs-Section
//! - Idempotenz bei wiederholtem Schnitt

use approx::assert_abs_diff_eq;
use glam::DVec3;
use road_lane_engine::{
    BlockedEdit, CatmullRomCurve3, EditCommand, EditError, EngineOptions, LaneSide, Road,
    RoadEditor, RoadTemplate, Section, SplitRequest,
};
use std::collections::HashSet;
use std::sync::Arc;

const ROAD: u64 = 3;

fn editor_with_road() -> RoadEditor {
    let mut editor = RoadEditor::new(EngineOptions::default());
    let curve = CatmullRomCurve3::chordal(vec![DVec3::ZERO, DVec3::new(100.0, 0.0, 0.0)]);
    editor
        .handle_command(EditCommand::CreateRoad {
            id: ROAD,
            key_path: Arc::new(curve),
            elevation: None,
            template: RoadTemplate::two_way(2, 3.5),
        })
        .expect("Straße erwartet");
    editor
}

fn split(editor: &mut RoadEditor, lane: i32, request: SplitRequest) -> Result<(), EditError> {
    editor.handle_command(EditCommand::SplitSection {
        road: ROAD,
        lane,
        request,
    })
}

fn road(editor: &RoadEditor) -> &Road {
    editor.road(ROAD).expect("Straße erwartet")
}

fn ranges(road: &Road) -> Vec<(f64, f64)> {
    road.sections.iter().map(|s| (s.p_start, s.p_end)).collect()
}

fn outer_z(section: &Section, lane_id: i32) -> (f64, f64) {
    let lane = section.lane(lane_id).expect("Fahrstreifen erwartet");
    let samples = section.boundary_samples(lane.outer_boundary_id());
    (
        samples.first().map(|p| p.z).unwrap_or(f64::NAN),
        samples.last().map(|p| p.z).unwrap_or(f64::NAN),
    )
}

#[test]
fn test_verbreiterung_erzeugt_drei_sections() {
    let mut editor = editor_with_road();
    split(&mut editor, -2, SplitRequest::Widen { from: 0.3, to: 0.5 })
        .expect("Übergang erwartet");

    let road = road(&editor);
    road.validate().expect("gültige Straße erwartet");
    assert_eq!(ranges(road), vec![(0.0, 0.3), (0.3, 0.5), (0.5, 1.0)]);
    assert_eq!(
        road.sections.iter().map(|s| s.id).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
    assert_eq!(
        road.sections.iter().map(|s| s.length).collect::<Vec<_>>(),
        vec![30.0, 20.0, 50.0]
    );

    // Vor dem Übergang fehlt der Fahrstreifen
    assert_eq!(road.sections[0].lane_ids_on(LaneSide::Forward), vec![-1]);
    let transition = road.sections[1].lane(-2).expect("Übergang erwartet");
    assert!(transition.is_transition);
    assert!(transition.is_extends);
    assert!(!road.sections[2].lane(-2).expect("Fahrstreifen erwartet").is_transition);

    // Der Übergang beginnt mit Breite 0 und endet mit voller Breite
    let (start, end) = outer_z(&road.sections[1], -2);
    assert_abs_diff_eq!(start, 3.5, epsilon = 1e-6);
    assert_abs_diff_eq!(end, 7.0, epsilon = 1e-6);
    let (start, _) = outer_z(&road.sections[2], -2);
    assert_abs_diff_eq!(start, 7.0, epsilon = 1e-6);

    // Rückwärts-Seite unverändert
    for section in &road.sections {
        assert_eq!(section.lane_ids_on(LaneSide::Reverse), vec![1, 2]);
    }
}

#[test]
fn test_randlinien_ids_sind_je_section_eindeutig() {
    let mut editor = editor_with_road();
    split(&mut editor, -2, SplitRequest::Widen { from: 0.3, to: 0.5 })
        .expect("Übergang erwartet");

    let mut seen = HashSet::new();
    for section in &road(&editor).sections {
        for boundary in &section.boundaries {
            assert!(seen.insert(boundary.id), "Randlinie {} doppelt", boundary.id);
        }
    }
}

#[test]
fn test_wiederholter_schnitt_ist_idempotent() {
    let mut editor = editor_with_road();
    let request = SplitRequest::Widen { from: 0.3, to: 0.5 };
    split(&mut editor, -2, request).expect("Übergang erwartet");
    let before = road(&editor).sections.clone();

    split(&mut editor, -2, request).expect("Wiederholung erwartet");
    assert_eq!(road(&editor).sections, before);

    split(&mut editor, -1, SplitRequest::Plain { at: 0.5 }).expect("Schnitt erwartet");
    assert_eq!(road(&editor).sections.len(), 3);
}

#[test]
fn test_verengung_entfernt_fahrstreifen_danach() {
    let mut editor = editor_with_road();
    split(&mut editor, 2, SplitRequest::from_boundary_cuts(0.8, 0.6))
        .expect("Übergang erwartet");

    let road = road(&editor);
    road.validate().expect("gültige Straße erwartet");
    assert_eq!(ranges(road), vec![(0.0, 0.6), (0.6, 0.8), (0.8, 1.0)]);
    let transition = road.sections[1].lane(2).expect("Übergang erwartet");
    assert!(transition.is_transition && !transition.is_extends);
    assert_eq!(road.sections[2].lane_ids_on(LaneSide::Reverse), vec![1]);

    let (start, end) = outer_z(&road.sections[1], 2);
    assert_abs_diff_eq!(start, -7.0, epsilon = 1e-6);
    assert_abs_diff_eq!(end, -3.5, epsilon = 1e-6);
}

#[test]
fn test_einfacher_schnitt_mit_uebergang_wird_blockiert() {
    let mut editor = editor_with_road();
    split(&mut editor, -2, SplitRequest::Widen { from: 0.3, to: 0.5 })
        .expect("Übergang erwartet");
    let result = split(&mut editor, -1, SplitRequest::Plain { at: 0.4 });
    assert_eq!(
        result,
        Err(EditError::Blocked(BlockedEdit::TransitionInSplitRange {
            section: 1
        }))
    );
    assert_eq!(road(&editor).sections.len(), 3);
}

#[test]
fn test_schnitt_ueber_section_grenzen_wird_blockiert() {
    let mut editor = editor_with_road();
    split(&mut editor, -1, SplitRequest::Plain { at: 0.5 }).expect("Schnitt erwartet");
    let result = split(&mut editor, -2, SplitRequest::Widen { from: 0.4, to: 0.6 });
    assert!(matches!(
        result,
        Err(EditError::Blocked(BlockedEdit::CutOutOfRange { .. }))
    ));
}
