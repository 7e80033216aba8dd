//! Wahl der Abtast-Intervalle einer Section.

use crate::core::Section;

/// Abtast-Intervalle für eine Section der Länge `length`.
///
/// Kurze Sections bekommen feste Stufen, ab 300 m wird alle 10 m abgetastet.
pub fn segment_by_length(length: f64) -> usize {
    if length <= 50.0 {
        20
    } else if length <= 100.0 {
        30
    } else if length <= 300.0 {
        40
    } else {
        (length / 10.0).floor() as usize + 1
    }
}

/// Abtast-Intervalle, die zur bestehenden Abtastung der Section passen.
///
/// Eine bereits feinere Abtastung (aus der Mittellinie des ersten Fahrstreifens) bleibt erhalten.
pub fn matching_segment(section: &Section) -> usize {
    let by_length = segment_by_length(section.length);
    match section.lanes.first().map(|l| l.center_points.len()) {
        Some(count) if count > 1 => by_length.max(count - 1),
        _ => by_length,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stufen_nach_laenge() {
        assert_eq!(segment_by_length(12.0), 20);
        assert_eq!(segment_by_length(50.0), 20);
        assert_eq!(segment_by_length(100.0), 30);
        assert_eq!(segment_by_length(250.0), 40);
        assert_eq!(segment_by_length(1234.0), 124);
    }

    #[test]
    fn test_bestehende_feinere_abtastung_bleibt() {
        let mut section = Section::new(0, 0.0, 1.0, 40.0);
        assert_eq!(matching_segment(&section), 20);
        let mut lane = crate::core::Lane::new(-1, 0, 1, 3.5, crate::core::LaneType::Driving, 30.0);
        lane.center_points = vec![glam::DVec3::ZERO; 31];
        section.lanes.push(lane);
        assert_eq!(matching_segment(&section), 30);
    }
}
