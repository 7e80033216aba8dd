//! Bearbeitungs-Commands für den `RoadEditor`.

use crate::core::{
    BoundaryId, BoundaryMark, ElevationProfile, LaneId, LaneType, RoadId, RoadTemplate, SectionId,
    SharedCurve,
};
use crate::app::use_cases::SplitRequest;

/// Verweis auf einen Fahrstreifen einer Section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LaneRef {
    pub road: RoadId,
    pub section: SectionId,
    pub lane: LaneId,
}

impl LaneRef {
    pub fn new(road: RoadId, section: SectionId, lane: LaneId) -> Self {
        Self {
            road,
            section,
            lane,
        }
    }
}

/// Einzelnes Fahrstreifen-Attribut ohne Geometrie-Auswirkung.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LaneAttribute {
    SpeedLimit(f64),
    /// Setzt auch die Reibung auf den Standardwert des Typs
    Type(LaneType),
    Friction(f64),
    /// Wird auf die Section-Länge begrenzt
    SOffset(f64),
}

/// Mutierende Operationen auf den Straßen des Editors.
#[derive(Debug, Clone)]
pub enum EditCommand {
    /// Neue Straße mit einer Section über die volle Länge
    CreateRoad {
        id: RoadId,
        key_path: SharedCurve,
        elevation: Option<ElevationProfile>,
        template: RoadTemplate,
    },
    /// Straße entfernen
    RemoveRoad { road: RoadId },
    /// Breite eines Fahrstreifens ändern (wird begrenzt)
    ResizeLaneWidth { lane: LaneRef, width: f64 },
    /// Fahrstreifen außen neben `lane` einfügen
    AddLane { lane: LaneRef },
    /// Fahrstreifen entfernen
    RemoveLane { lane: LaneRef },
    /// Section teilen (mit oder ohne Übergang)
    SplitSection {
        road: RoadId,
        lane: LaneId,
        request: SplitRequest,
    },
    /// Referenzlinie ersetzen
    UpdateKeyPath {
        road: RoadId,
        key_path: SharedCurve,
        target_percent: Option<f64>,
    },
    /// Höhenprofil setzen oder entfernen
    SetElevation {
        road: RoadId,
        elevation: Option<ElevationProfile>,
    },
    UpdateLaneAttribute {
        lane: LaneRef,
        attribute: LaneAttribute,
    },
    UpdateBoundaryMark {
        road: RoadId,
        section: SectionId,
        boundary: BoundaryId,
        mark: BoundaryMark,
    },
}

impl EditCommand {
    /// Straße, auf die sich der Command bezieht.
    pub fn road_id(&self) -> RoadId {
        match self {
            EditCommand::CreateRoad { id, .. } => *id,
            EditCommand::RemoveRoad { road }
            | EditCommand::SplitSection { road, .. }
            | EditCommand::UpdateKeyPath { road, .. }
            | EditCommand::SetElevation { road, .. }
            | EditCommand::UpdateBoundaryMark { road, .. } => *road,
            EditCommand::ResizeLaneWidth { lane, .. }
            | EditCommand::AddLane { lane }
            | EditCommand::RemoveLane { lane }
            | EditCommand::UpdateLaneAttribute { lane, .. } => lane.road,
        }
    }

    /// Kurzer Name für Logs.
    pub fn name(&self) -> &'static str {
        match self {
            EditCommand::CreateRoad { .. } => "CreateRoad",
            EditCommand::RemoveRoad { .. } => "RemoveRoad",
            EditCommand::ResizeLaneWidth { .. } => "ResizeLaneWidth",
            EditCommand::AddLane { .. } => "AddLane",
            EditCommand::RemoveLane { .. } => "RemoveLane",
            EditCommand::SplitSection { .. } => "SplitSection",
            EditCommand::UpdateKeyPath { .. } => "UpdateKeyPath",
            EditCommand::SetElevation { .. } => "SetElevation",
            EditCommand::UpdateLaneAttribute { .. } => "UpdateLaneAttribute",
            EditCommand::UpdateBoundaryMark { .. } => "UpdateBoundaryMark",
        }
    }
}
