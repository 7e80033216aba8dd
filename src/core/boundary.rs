//! Randlinie zwischen zwei Fahrstreifen bzw. zwischen Fahrstreifen und Fahrbahnrand.

use super::ids::BoundaryId;
use super::mark::BoundaryMark;
use glam::DVec3;

/// Lage einer Randlinie innerhalb der Section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundarySide {
    /// Liegt auf der Referenzlinie (zwischen den Richtungen)
    #[default]
    Center,
    /// Begrenzt Vorwärts-Fahrstreifen
    Forward,
    /// Begrenzt Rückwärts-Fahrstreifen
    Reverse,
}

/// Abgetastete Randlinie einer Section.
///
/// Die Abtastpunkte sind autoritativ und werden bei Strukturänderungen
/// immer vollständig ersetzt.
#[derive(Debug, Clone, PartialEq)]
pub struct LaneBoundary {
    pub id: BoundaryId,
    pub mark: BoundaryMark,
    pub sample_points: Vec<DVec3>,
    /// Wird aus der Fahrstreifen-Topologie abgeleitet, nicht persistiert
    pub side: BoundarySide,
}

impl LaneBoundary {
    /// Neue Randlinie ohne Abtastpunkte.
    pub fn new(id: BoundaryId, mark: BoundaryMark, side: BoundarySide) -> Self {
        Self {
            id,
            mark,
            sample_points: Vec::new(),
            side,
        }
    }

    /// `true` für Randlinien auf der Vorwärts-Seite.
    pub fn is_forward(&self) -> bool {
        self.side == BoundarySide::Forward
    }

    /// Ersetzt die Abtastpunkte vollständig.
    pub fn replace_samples(&mut self, points: Vec<DVec3>) {
        self.sample_points = points;
    }
}
