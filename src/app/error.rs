//! Fehler der Bearbeitungs-Operationen.

use crate::core::{BoundaryId, LaneId, RoadId, SectionId};
use crate::mesh::MeshError;

/// Eine Bearbeitung würde eine strukturelle Invariante verletzen.
///
/// Alle Prüfungen laufen auf dem unveränderten Zustand.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BlockedEdit {
    #[error("Fahrstreifen {lane} ist der letzte seiner Richtung in Section {section}")]
    LastLaneOfDirection { section: SectionId, lane: LaneId },
    #[error("Fahrstreifen {lane} liegt auf Höhe oder außerhalb des Übergangs {transition}")]
    OutwardOfTransition { lane: LaneId, transition: LaneId },
    #[error("Zum Übergang {lane} gehört kein auflösbarer Section-Bereich")]
    TransitionLinkUnresolved { lane: LaneId },
    #[error("Im Bereich des Übergangs {lane} liegt ein weiterer Übergang weiter außen")]
    StackedTransitions { lane: LaneId },
    #[error("Fahrstreifen {lane} ist der einzige reguläre innerhalb des Übergangs {transition}")]
    InnerLaneOfTransition { lane: LaneId, transition: LaneId },
    #[error("Schnitt [{from}, {to}] liegt nicht innerhalb einer Section")]
    CutOutOfRange { from: f64, to: f64 },
    #[error("Section {section} enthält bereits einen Übergang")]
    TransitionInSplitRange { section: SectionId },
    #[error("Referenzlinie ergibt für Section {section} keine positive Länge")]
    DegenerateKeyPath { section: SectionId },
}

/// Fehler einer Bearbeitung. Im Fehlerfall bleibt die Straße unverändert.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EditError {
    #[error("Straße {0} nicht gefunden")]
    RoadNotFound(RoadId),
    #[error("Section {section} in Straße {road} nicht gefunden")]
    SectionNotFound { road: RoadId, section: SectionId },
    #[error("Fahrstreifen {lane} in Section {section} nicht gefunden")]
    LaneNotFound { section: SectionId, lane: LaneId },
    #[error("Randlinie {boundary} in Section {section} nicht gefunden")]
    BoundaryNotFound {
        section: SectionId,
        boundary: BoundaryId,
    },
    #[error("Bearbeitung blockiert: {0}")]
    Blocked(#[from] BlockedEdit),
    #[error(transparent)]
    Mesh(#[from] MeshError),
}

impl EditError {
    /// `true` für blockierte Bearbeitungen (kein Lookup- oder Mesh-Fehler).
    pub fn is_blocked(&self) -> bool {
        matches!(self, EditError::Blocked(_))
    }
}
