//! Mittellinien der Fahrstreifen aus ihren Randlinien.

use crate::core::Section;
use crate::shared::fixed_length;
use glam::DVec3;

/// Punktweise Mitte zweier Randlinien, auf die kürzere gekürzt und cm-genau gerundet.
pub fn midpoints(left: &[DVec3], right: &[DVec3]) -> Vec<DVec3> {
    left.iter()
        .zip(right)
        .map(|(l, r)| {
            let mid = (*l + *r) * 0.5;
            DVec3::new(fixed_length(mid.x), fixed_length(mid.y), fixed_length(mid.z))
        })
        .collect()
}

/// Berechnet die Mittellinie jedes Fahrstreifens der Section neu.
pub fn update_lane_center_points(section: &mut Section) {
    let centers: Vec<Vec<DVec3>> = section
        .lanes
        .iter()
        .map(|lane| {
            midpoints(
                section.boundary_samples(lane.lbid),
                section.boundary_samples(lane.rbid),
            )
        })
        .collect();
    for (lane, center) in section.lanes.iter_mut().zip(centers) {
        lane.center_points = center;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mitte_wird_auf_kuerzere_linie_gekuerzt() {
        let left = vec![DVec3::new(0.0, 0.0, 0.0), DVec3::new(1.0, 0.0, 0.0), DVec3::new(2.0, 0.0, 0.0)];
        let right = vec![DVec3::new(0.0, 0.0, 3.0), DVec3::new(1.0, 0.0, 3.0)];
        let mid = midpoints(&left, &right);
        assert_eq!(mid.len(), 2);
        assert_eq!(mid[1], DVec3::new(1.0, 0.0, 1.5));
    }

    #[test]
    fn test_mitte_ist_cm_genau() {
        let mid = midpoints(&[DVec3::new(0.0, 0.0, 0.0)], &[DVec3::new(0.0, 0.0, 1.23456)]);
        assert_eq!(mid[0].z, 0.617);
    }
}
