//! Section: Längsabschnitt einer Straße mit eigener Fahrstreifen-Aufteilung.

use super::boundary::{BoundarySide, LaneBoundary};
use super::ids::{BoundaryId, LaneId, SectionId};
use super::lane::{Lane, LaneSide};

/// Verletzung einer strukturellen Invariante.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TopologyError {
    #[error("Section {section}: {boundaries} Randlinien für {lanes} Fahrstreifen")]
    BoundaryCount {
        section: SectionId,
        boundaries: usize,
        lanes: usize,
    },
    #[error("Section {section}: Fahrstreifen {lane} verweist auf unbekannte Randlinie {boundary}")]
    DanglingBoundary {
        section: SectionId,
        lane: LaneId,
        boundary: BoundaryId,
    },
    #[error("Section {section}: Fahrstreifen-IDs {side:?} nicht lückenlos")]
    LaneIdGap { section: SectionId, side: LaneSide },
    #[error("Section an Index {index} hat ID {id}")]
    SectionIdGap { index: usize, id: SectionId },
    #[error("Section {section} beginnt bei {p_start}, Vorgänger endet bei {previous_end}")]
    NotContiguous {
        section: SectionId,
        p_start: f64,
        previous_end: f64,
    },
    #[error("Summe der Section-Anteile ist {0} statt 1")]
    PercentSum(f64),
}

/// Längsabschnitt `[p_start, p_end)` der Straße.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub id: SectionId,
    pub p_start: f64,
    pub p_end: f64,
    pub length: f64,
    pub lanes: Vec<Lane>,
    pub boundaries: Vec<LaneBoundary>,
}

impl Section {
    /// Leere Section ohne Fahrstreifen.
    pub fn new(id: SectionId, p_start: f64, p_end: f64, length: f64) -> Self {
        Self {
            id,
            p_start,
            p_end,
            length,
            lanes: Vec::new(),
            boundaries: Vec::new(),
        }
    }

    /// Anteil an der Straßenlänge.
    pub fn span(&self) -> f64 {
        self.p_end - self.p_start
    }

    /// `true`, wenn `percent` in `[p_start, p_end]` liegt.
    pub fn contains_percent(&self, percent: f64) -> bool {
        percent >= self.p_start && percent <= self.p_end
    }

    // ── Lookups ─────────────────────────────────────────────────

    pub fn lane(&self, id: LaneId) -> Option<&Lane> {
        self.lanes.iter().find(|l| l.id == id)
    }

    pub fn lane_mut(&mut self, id: LaneId) -> Option<&mut Lane> {
        self.lanes.iter_mut().find(|l| l.id == id)
    }

    pub fn has_lane(&self, id: LaneId) -> bool {
        self.lane(id).is_some()
    }

    pub fn boundary(&self, id: BoundaryId) -> Option<&LaneBoundary> {
        self.boundaries.iter().find(|b| b.id == id)
    }

    pub fn boundary_mut(&mut self, id: BoundaryId) -> Option<&mut LaneBoundary> {
        self.boundaries.iter_mut().find(|b| b.id == id)
    }

    /// Fahrstreifen einer Richtung, von innen nach außen sortiert.
    pub fn lanes_on(&self, side: LaneSide) -> Vec<&Lane> {
        let mut lanes: Vec<&Lane> = self.lanes.iter().filter(|l| l.side() == side).collect();
        lanes.sort_by_key(|l| l.abs_id());
        lanes
    }

    /// IDs der Fahrstreifen einer Richtung, von innen nach außen.
    pub fn lane_ids_on(&self, side: LaneSide) -> Vec<LaneId> {
        self.lanes_on(side).into_iter().map(|l| l.id).collect()
    }

    pub fn lane_count(&self, side: LaneSide) -> usize {
        self.lanes.iter().filter(|l| l.side() == side).count()
    }

    /// Äußerster Fahrstreifen einer Richtung.
    pub fn outermost_lane(&self, side: LaneSide) -> Option<&Lane> {
        self.lanes
            .iter()
            .filter(|l| l.side() == side)
            .max_by_key(|l| l.abs_id())
    }

    /// Randlinie auf der Referenzlinie (innere Randlinie von Fahrstreifen -1 bzw. 1).
    pub fn center_boundary_id(&self) -> Option<BoundaryId> {
        self.lane(-1)
            .or_else(|| self.lane(1))
            .map(Lane::inner_boundary_id)
    }

    /// `true`, wenn mindestens ein Übergangs-Fahrstreifen existiert.
    pub fn has_transition(&self) -> bool {
        self.lanes.iter().any(|l| l.is_transition)
    }

    /// Abtastpunkte einer Randlinie (leer, wenn unbekannt).
    pub fn boundary_samples(&self, id: BoundaryId) -> &[glam::DVec3] {
        self.boundary(id)
            .map(|b| b.sample_points.as_slice())
            .unwrap_or(&[])
    }

    // ── Ordnung ─────────────────────────────────────────────────

    /// Leitet die Seite jeder Randlinie aus den Fahrstreifen ab.
    pub fn refresh_boundary_sides(&mut self) {
        let center = self.center_boundary_id();
        let outer: Vec<(BoundaryId, LaneSide)> = self
            .lanes
            .iter()
            .map(|l| (l.outer_boundary_id(), l.side()))
            .collect();
        for boundary in &mut self.boundaries {
            boundary.side = if Some(boundary.id) == center {
                BoundarySide::Center
            } else {
                match outer.iter().find(|(id, _)| *id == boundary.id) {
                    Some((_, LaneSide::Forward)) => BoundarySide::Forward,
                    Some((_, LaneSide::Reverse)) => BoundarySide::Reverse,
                    None => boundary.side,
                }
            };
        }
    }

    /// Sortiert Fahrstreifen (vorwärts, dann rückwärts, je von innen nach außen)
    /// und Randlinien in dieselbe Reihenfolge (Referenzlinie zuerst).
    pub fn normalize_order(&mut self) {
        self.lanes.sort_by_key(|l| {
            let side_rank = match l.side() {
                LaneSide::Forward => 0,
                LaneSide::Reverse => 1,
            };
            (side_rank, l.abs_id())
        });

        let center = self.center_boundary_id();
        let order: Vec<BoundaryId> = center
            .into_iter()
            .chain(self.lanes.iter().map(Lane::outer_boundary_id))
            .collect();
        self.boundaries.sort_by_key(|b| {
            order
                .iter()
                .position(|id| *id == b.id)
                .unwrap_or(usize::MAX)
        });
        self.refresh_boundary_sides();
    }

    // ── Invarianten ─────────────────────────────────────────────

    /// Prüft Randlinien-Anzahl, Auflösbarkeit der Randlinien-IDs und lückenlose Fahrstreifen-IDs.
    pub fn validate(&self) -> Result<(), TopologyError> {
        if self.boundaries.len() != self.lanes.len() + 1 {
            return Err(TopologyError::BoundaryCount {
                section: self.id,
                boundaries: self.boundaries.len(),
                lanes: self.lanes.len(),
            });
        }
        for lane in &self.lanes {
            for boundary in [lane.lbid, lane.rbid] {
                if self.boundary(boundary).is_none() {
                    return Err(TopologyError::DanglingBoundary {
                        section: self.id,
                        lane: lane.id,
                        boundary,
                    });
                }
            }
        }
        for side in LaneSide::BOTH {
            let contiguous = self
                .lanes_on(side)
                .iter()
                .enumerate()
                .all(|(i, lane)| lane.abs_id() as usize == i + 1);
            if !contiguous {
                return Err(TopologyError::LaneIdGap {
                    section: self.id,
                    side,
                });
            }
        }
        Ok(())
    }
}
