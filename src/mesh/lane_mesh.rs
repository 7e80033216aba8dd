//! Fahrstreifen-Mesh aus den Abtastpunkten der beiden Randlinien.

use super::types::{ensure_finite, MeshData, MeshVertex};
use glam::DVec3;

/// Baut das Dreiecks-Mesh zwischen zwei Randlinien.
///
/// ```text
/// a ---- b
/// |      |
/// c ---- d
/// ```
/// Pro Punktpaar zwei Vertices, pro Intervall die Dreiecke `abd` und `adc`.
/// Unterschiedlich lange Randlinien werden auf die kürzere gekürzt.
pub fn build_lane_mesh(left: &[DVec3], right: &[DVec3]) -> Result<MeshData, super::MeshError> {
    let count = left.len().min(right.len());
    let (left, right) = (&left[..count], &right[..count]);
    ensure_finite(left)?;
    ensure_finite(right)?;

    let mut mesh = MeshData {
        vertices: Vec::with_capacity(count * 2),
        indices: Vec::with_capacity(count.saturating_sub(1) * 6),
    };
    let delta_u = if count > 1 {
        1.0 / (count - 1) as f32
    } else {
        0.0
    };

    for (i, (l, r)) in left.iter().zip(right).enumerate() {
        let u = delta_u * i as f32;
        mesh.vertices.push(MeshVertex::new(*l, [u, 0.0]));
        mesh.vertices.push(MeshVertex::new(*r, [u, 1.0]));
        if i + 1 < count {
            mesh.push_quad(i);
        }
    }
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::MeshError;

    fn line(z: f64, n: usize) -> Vec<DVec3> {
        (0..n).map(|i| DVec3::new(i as f64, 0.0, z)).collect()
    }

    #[test]
    fn test_mesh_aus_zwei_randlinien() {
        let mesh = build_lane_mesh(&line(0.0, 3), &line(3.5, 3)).expect("Mesh erwartet");
        assert_eq!(mesh.vertices.len(), 6);
        assert_eq!(mesh.indices, vec![0, 1, 3, 0, 3, 2, 2, 3, 5, 2, 5, 4]);
        assert_eq!(mesh.vertices[4].uv, [1.0, 0.0]);
        assert_eq!(mesh.vertices[3].uv, [0.5, 1.0]);
    }

    #[test]
    fn test_ungleiche_laengen_werden_gekuerzt() {
        let mesh = build_lane_mesh(&line(0.0, 5), &line(3.5, 2)).expect("Mesh erwartet");
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn test_einzelner_punkt_ergibt_leeres_mesh() {
        let mesh = build_lane_mesh(&line(0.0, 1), &line(3.5, 1)).expect("Mesh erwartet");
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertices[1].uv, [0.0, 1.0]);
    }

    #[test]
    fn test_nan_wird_abgelehnt() {
        let mut right = line(3.5, 3);
        right[2].z = f64::INFINITY;
        assert_eq!(
            build_lane_mesh(&line(0.0, 3), &right),
            Err(MeshError::NonFiniteSample { index: 2 })
        );
    }
}
