//! Mesh-Jobs: unabhängige Aufgaben mit kopierten Eingaben, parallel auf dem rayon-Pool.
//!
//! Ergebnisse werden erst nach Abschluss aller Jobs eines Batches
//! zusammengeführt. Schlägt ein Job fehl, liefert der Batch nur den Fehler.

use super::lane_mesh::build_lane_mesh;
use super::stroke_mesh::{build_stroke_meshes, StrokeMesh};
use super::types::{MeshData, MeshError, MeshKey, MeshTarget};
use crate::core::{BoundaryMark, Road};
use crate::shared::EngineOptions;
use glam::DVec3;
use indexmap::IndexMap;
use rayon::prelude::*;

/// Welche Meshes nach einer Bearbeitung neu gebaut werden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MeshScope {
    /// Fahrstreifen und Randlinien aller Sections
    #[default]
    All,
    /// Nur Markierungen (Geometrie unverändert)
    BoundariesOnly,
    /// Keine Geometrie betroffen
    Nothing,
}

/// Kopierte Eingabe eines Jobs.
#[derive(Debug, Clone, PartialEq)]
pub enum MeshJobInput {
    Lane { left: Vec<DVec3>, right: Vec<DVec3> },
    Boundary { samples: Vec<DVec3>, mark: BoundaryMark },
}

/// Ein einzelner Mesh-Job.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshJob {
    pub key: MeshKey,
    pub input: MeshJobInput,
}

/// Ergebnis eines Jobs.
#[derive(Debug, Clone, PartialEq)]
pub enum MeshOutput {
    Lane(MeshData),
    Boundary(Vec<StrokeMesh>),
}

impl MeshJob {
    /// Führt den Job aus; Fehler tragen den Schlüssel des Jobs.
    pub fn run(&self, options: &EngineOptions) -> Result<(MeshKey, MeshOutput), MeshError> {
        let output = match &self.input {
            MeshJobInput::Lane { left, right } => build_lane_mesh(left, right).map(MeshOutput::Lane),
            MeshJobInput::Boundary { samples, mark } => {
                build_stroke_meshes(samples, *mark, options).map(MeshOutput::Boundary)
            }
        };
        output
            .map(|output| (self.key, output))
            .map_err(|source| MeshError::Job {
                key: self.key,
                source: Box::new(source),
            })
    }
}

/// Mesh-Tabelle einer Straße.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoadMeshes {
    pub lanes: IndexMap<MeshKey, MeshData>,
    pub boundaries: IndexMap<MeshKey, Vec<StrokeMesh>>,
}

impl RoadMeshes {
    fn insert(&mut self, key: MeshKey, output: MeshOutput) {
        match output {
            MeshOutput::Lane(mesh) => {
                self.lanes.insert(key, mesh);
            }
            MeshOutput::Boundary(strokes) => {
                self.boundaries.insert(key, strokes);
            }
        }
    }

    /// Übernimmt einen frisch gebauten Batch gemäß `scope`.
    ///
    /// Ersetzt die betroffenen Tabellen vollständig, damit Schlüssel
    /// entfernter Sections oder Fahrstreifen nicht zurückbleiben.
    pub fn apply(&mut self, scope: MeshScope, fresh: RoadMeshes) {
        match scope {
            MeshScope::All => *self = fresh,
            MeshScope::BoundariesOnly => self.boundaries = fresh.boundaries,
            MeshScope::Nothing => {}
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty() && self.boundaries.is_empty()
    }

    /// Gesamtzahl der Dreiecke aller Meshes.
    pub fn triangle_count(&self) -> usize {
        let lanes: usize = self.lanes.values().map(MeshData::triangle_count).sum();
        let strokes: usize = self
            .boundaries
            .values()
            .flatten()
            .map(|s| s.mesh.triangle_count())
            .sum();
        lanes + strokes
    }
}

/// Sammelt die Jobs einer Straße mit kopierten Abtastpunkten.
pub fn collect_jobs(road: &Road, scope: MeshScope) -> Vec<MeshJob> {
    let with_lanes = scope == MeshScope::All;
    let with_boundaries = scope != MeshScope::Nothing;
    let mut jobs = Vec::new();

    for section in &road.sections {
        let key = |target| MeshKey {
            road: road.id,
            section: section.id,
            target,
        };
        if with_lanes {
            jobs.extend(section.lanes.iter().map(|lane| MeshJob {
                key: key(MeshTarget::Lane(lane.id)),
                input: MeshJobInput::Lane {
                    left: section.boundary_samples(lane.lbid).to_vec(),
                    right: section.boundary_samples(lane.rbid).to_vec(),
                },
            }));
        }
        if with_boundaries {
            jobs.extend(section.boundaries.iter().map(|boundary| MeshJob {
                key: key(MeshTarget::Boundary(boundary.id)),
                input: MeshJobInput::Boundary {
                    samples: boundary.sample_points.clone(),
                    mark: boundary.mark,
                },
            }));
        }
    }
    jobs
}

/// Führt alle Jobs parallel aus und führt die Ergebnisse danach zusammen.
pub fn run_batch(jobs: Vec<MeshJob>, options: &EngineOptions) -> Result<RoadMeshes, MeshError> {
    let job_count = jobs.len();
    let results = jobs
        .into_par_iter()
        .map(|job| job.run(options))
        .collect::<Result<Vec<_>, MeshError>>()?;

    let mut meshes = RoadMeshes::default();
    for (key, output) in results {
        meshes.insert(key, output);
    }
    log::debug!(
        "Mesh-Batch: {} Jobs, {} Fahrstreifen, {} Randlinien",
        job_count,
        meshes.lanes.len(),
        meshes.boundaries.len()
    );
    Ok(meshes)
}

/// Baut die Meshes einer Straße für `scope`.
pub fn build_road_meshes(
    road: &Road,
    scope: MeshScope,
    options: &EngineOptions,
) -> Result<RoadMeshes, MeshError> {
    run_batch(collect_jobs(road, scope), options)
}
