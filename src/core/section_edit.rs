//! Topologische Änderungen an einer Section (ohne Geometrie).
//!
//! Die Abtastpunkte neuer oder verschobener Randlinien werden danach
//! über `geometry::derive_section` neu abgeleitet.

use super::boundary::{BoundarySide, LaneBoundary};
use super::ids::{BoundaryId, BoundaryIdAllocator, LaneId};
use super::lane::{Lane, LaneSide};
use super::mark::BoundaryMark;
use super::section::Section;
use std::collections::HashMap;

fn outer_side(side: LaneSide) -> BoundarySide {
    match side {
        LaneSide::Forward => BoundarySide::Forward,
        LaneSide::Reverse => BoundarySide::Reverse,
    }
}

impl Section {
    /// Fügt außen neben `target` einen Fahrstreifen ein und gibt dessen ID zurück.
    ///
    /// Der neue Fahrstreifen übernimmt Breite, Typ, Tempolimit und Aktivierung
    /// von `target`. Seine innere Randlinie ist die bisherige äußere von
    /// `target`, die äußere ist `new_boundary` mit derselben Markierung.
    /// Alle weiter außen liegenden Fahrstreifen rücken um eine ID nach außen.
    pub fn insert_lane_outward(
        &mut self,
        target: LaneId,
        new_boundary: BoundaryId,
    ) -> Option<LaneId> {
        let side = LaneSide::of(target)?;
        let template = self.lane(target)?.clone();
        let abs = template.abs_id();
        let target_outer = template.outer_boundary_id();
        let mark = self
            .boundary(target_outer)
            .map(|b| b.mark)
            .unwrap_or(BoundaryMark::SINGLE_DASH_WHITE);
        let step = side.outward_step();

        for lane in self
            .lanes
            .iter_mut()
            .filter(|l| l.side() == side && l.abs_id() > abs)
        {
            if lane.abs_id() == abs + 1 {
                lane.set_inner_boundary_id(new_boundary);
            }
            lane.id += step;
        }

        let new_id = target + step;
        let mut lane = Lane::new(
            new_id,
            0,
            0,
            template.normal_width,
            template.lane_type,
            template.speed_limit,
        );
        lane.enabled = template.enabled;
        lane.set_inner_boundary_id(target_outer);
        lane.set_outer_boundary_id(new_boundary);
        self.lanes.push(lane);
        self.boundaries
            .push(LaneBoundary::new(new_boundary, mark, outer_side(side)));
        self.normalize_order();
        Some(new_id)
    }

    /// Entfernt `target` und verschmilzt seine beiden Randlinien zur inneren.
    ///
    /// Weiter außen liegende Fahrstreifen rücken um eine ID nach innen. Die
    /// äußerste Randlinie der Richtung wird danach durchgezogen weiß.
    pub fn remove_lane_merging(&mut self, target: LaneId) -> Option<Lane> {
        let side = LaneSide::of(target)?;
        let position = self.lanes.iter().position(|l| l.id == target)?;
        let removed = self.lanes.remove(position);
        let abs = removed.abs_id();
        let inner = removed.inner_boundary_id();
        let outer = removed.outer_boundary_id();
        self.boundaries.retain(|b| b.id != outer);

        let step = side.outward_step();
        for lane in self
            .lanes
            .iter_mut()
            .filter(|l| l.side() == side && l.abs_id() > abs)
        {
            if lane.abs_id() == abs + 1 {
                lane.set_inner_boundary_id(inner);
            }
            lane.id -= step;
        }

        self.seal_outer_boundary(side);
        self.normalize_order();
        Some(removed)
    }

    /// Setzt die äußerste Randlinie einer Richtung auf durchgezogen weiß.
    pub fn seal_outer_boundary(&mut self, side: LaneSide) {
        let Some(outer) = self.outermost_lane(side).map(Lane::outer_boundary_id) else {
            return;
        };
        if let Some(boundary) = self.boundary_mut(outer) {
            boundary.mark = BoundaryMark::SINGLE_SOLID_WHITE;
        }
    }

    /// Vergibt allen Randlinien neue IDs und zieht die Fahrstreifen-Verweise nach.
    pub fn reassign_boundary_ids(&mut self, allocator: &mut impl BoundaryIdAllocator) {
        let mapping: HashMap<BoundaryId, BoundaryId> = self
            .boundaries
            .iter_mut()
            .map(|boundary| {
                let old = boundary.id;
                boundary.id = allocator.next_id();
                (old, boundary.id)
            })
            .collect();
        for lane in &mut self.lanes {
            if let Some(id) = mapping.get(&lane.lbid) {
                lane.lbid = *id;
            }
            if let Some(id) = mapping.get(&lane.rbid) {
                lane.rbid = *id;
            }
        }
    }
}
