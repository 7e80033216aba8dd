//! Mesh-Typen für die Ausgabe an Rendering und Export.

use crate::core::{BoundaryId, LaneId, RoadId, SectionId};
use bytemuck::{Pod, Zeroable};
use glam::DVec3;
use std::fmt;

/// Vertex eines Fahrstreifen- oder Markierungs-Meshes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    /// Position im 3D-Raum (Y oben)
    pub position: [f32; 3],
    /// Texturkoordinate
    pub uv: [f32; 2],
}

impl MeshVertex {
    /// Erstellt einen Vertex aus einem Abtastpunkt.
    pub fn new(point: DVec3, uv: [f32; 2]) -> Self {
        Self {
            position: point.as_vec3().to_array(),
            uv,
        }
    }
}

/// Indiziertes Dreiecks-Mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// `true`, wenn kein Dreieck vorhanden ist.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Vertex-Daten als Bytes für einen GPU-Buffer.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index-Daten als Bytes für einen GPU-Buffer.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Hängt das Quad-Paar `(a,b,d)` und `(a,d,c)` zwischen Punktpaar `i` und `i+1` an.
    pub(crate) fn push_quad(&mut self, i: usize) {
        let a = (i * 2) as u32;
        let b = a + 1;
        let c = a + 2;
        let d = a + 3;
        self.indices.extend_from_slice(&[a, b, d, a, d, c]);
    }
}

/// Ziel eines Mesh-Jobs innerhalb einer Section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshTarget {
    Lane(LaneId),
    Boundary(BoundaryId),
}

/// Schlüssel eines Mesh-Ergebnisses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshKey {
    pub road: RoadId,
    pub section: SectionId,
    pub target: MeshTarget,
}

impl fmt::Display for MeshKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.target {
            MeshTarget::Lane(id) => {
                write!(f, "Straße {} / Section {} / Fahrstreifen {}", self.road, self.section, id)
            }
            MeshTarget::Boundary(id) => {
                write!(f, "Straße {} / Section {} / Randlinie {}", self.road, self.section, id)
            }
        }
    }
}

/// Fehler bei der Mesh-Erzeugung.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    #[error("Abtastpunkt {index} ist nicht endlich")]
    NonFiniteSample { index: usize },
    #[error("Mesh-Job {key} fehlgeschlagen: {source}")]
    Job {
        key: MeshKey,
        #[source]
        source: Box<MeshError>,
    },
}

/// Prüft, dass alle Abtastpunkte endlich sind.
pub(crate) fn ensure_finite(points: &[DVec3]) -> Result<(), MeshError> {
    match points.iter().position(|p| !p.is_finite()) {
        Some(index) => Err(MeshError::NonFiniteSample { index }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_bytes_haben_feste_groesse() {
        let mesh = MeshData {
            vertices: vec![MeshVertex::new(DVec3::new(1.0, 2.0, 3.0), [0.0, 1.0]); 2],
            indices: vec![0, 1, 1],
        };
        assert_eq!(std::mem::size_of::<MeshVertex>(), 20);
        assert_eq!(mesh.vertex_bytes().len(), 40);
        assert_eq!(mesh.index_bytes().len(), 12);
        assert_eq!(mesh.vertices[0].position, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_nicht_endliche_punkte_werden_erkannt() {
        let points = [DVec3::ZERO, DVec3::new(f64::NAN, 0.0, 0.0)];
        assert_eq!(
            ensure_finite(&points),
            Err(MeshError::NonFiniteSample { index: 1 })
        );
        assert_eq!(ensure_finite(&points[..1]), Ok(()));
    }
}
