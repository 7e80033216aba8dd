//! Road-Aggregat: Referenzlinie, Höhenprofil und geordnete Sections.

use super::boundary::{BoundarySide, LaneBoundary};
use super::curve::{ElevationProfile, SharedCurve};
use super::ids::{BoundaryIdAllocator, LaneId, MonotonicBoundaryIds, RoadId, SectionId};
use super::lane::{Lane, LaneSide};
use super::lane_type::LaneType;
use super::mark::BoundaryMark;
use super::section::{Section, TopologyError};
use crate::shared::{fixed_length, EngineOptions};

/// Toleranz für die Summe der Section-Anteile.
const PERCENT_SUM_TOLERANCE: f64 = 1e-6;

/// Art der Straße, bestimmt Mittellinie und Fahrstreifen-Typ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoadKind {
    /// Normale Straße: gelbe Doppellinie in der Mitte, Typ `Driving`
    #[default]
    Default,
    /// Rampe: weiße Mittellinie, Typ `ConnectingRamp`
    Ramp,
}

impl RoadKind {
    fn center_mark(self) -> BoundaryMark {
        match self {
            RoadKind::Default => BoundaryMark::DOUBLE_SOLID_YELLOW,
            RoadKind::Ramp => BoundaryMark::SINGLE_SOLID_WHITE,
        }
    }

    fn lane_type(self) -> LaneType {
        match self {
            RoadKind::Default => LaneType::Driving,
            RoadKind::Ramp => LaneType::ConnectingRamp,
        }
    }
}

/// Parameter für eine neu angelegte Straße.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadTemplate {
    pub forward_lanes: u32,
    pub reverse_lanes: u32,
    pub lane_width: f64,
    pub kind: RoadKind,
}

impl RoadTemplate {
    /// Zweirichtungsstraße mit gleich vielen Fahrstreifen je Richtung.
    pub fn two_way(lanes_per_direction: u32, lane_width: f64) -> Self {
        Self {
            forward_lanes: lanes_per_direction,
            reverse_lanes: lanes_per_direction,
            lane_width,
            kind: RoadKind::Default,
        }
    }
}

/// Bereich, in dem ein Fahrstreifen durchgehend existiert.
///
/// `head` ist die letzte Section davor ohne den Fahrstreifen, `tail` die erste
/// danach. Betroffen sind nur die Sections strikt dazwischen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlockRange {
    pub head: Option<usize>,
    pub tail: Option<usize>,
}

impl BlockRange {
    /// `true`, wenn die Section am Index `index` im Bereich liegt.
    pub fn contains(&self, index: usize) -> bool {
        self.head.map_or(true, |head| index > head) && self.tail.map_or(true, |tail| index < tail)
    }

    /// Alle betroffenen Indizes bei `count` Sections.
    pub fn indices(&self, count: usize) -> Vec<usize> {
        (0..count).filter(|i| self.contains(*i)).collect()
    }
}

/// Eine Straße. Besitzt ihre Sections exklusiv; keine Verweise auf andere Straßen.
#[derive(Debug, Clone)]
pub struct Road {
    pub id: RoadId,
    pub sections: Vec<Section>,
    pub key_path: SharedCurve,
    pub elevation: Option<ElevationProfile>,
    pub length: f64,
    /// Straßenweiter Zähler für neue Randlinien
    pub boundary_ids: MonotonicBoundaryIds,
}

impl Road {
    /// Legt eine Straße mit einer Section über die volle Länge an und leitet die Geometrie ab.
    pub fn create(
        id: RoadId,
        key_path: SharedCurve,
        elevation: Option<ElevationProfile>,
        template: &RoadTemplate,
        options: &EngineOptions,
    ) -> Self {
        let length = fixed_length(key_path.length());
        let mut boundary_ids = MonotonicBoundaryIds::default();
        let forward_count = if template.forward_lanes + template.reverse_lanes == 0 {
            1
        } else {
            template.forward_lanes
        };
        let width = options.clamp_lane_width(template.lane_width);

        let mut section = Section::new(0, 0.0, 1.0, length);
        let center_id = boundary_ids.next_id();
        section.boundaries.push(LaneBoundary::new(
            center_id,
            template.kind.center_mark(),
            BoundarySide::Center,
        ));

        for (side, count) in [
            (LaneSide::Forward, forward_count),
            (LaneSide::Reverse, template.reverse_lanes),
        ] {
            let mut inner = center_id;
            for abs in 1..=count {
                let outer = boundary_ids.next_id();
                let mark = if abs == count {
                    BoundaryMark::SINGLE_SOLID_WHITE
                } else {
                    BoundaryMark::SINGLE_DASH_WHITE
                };
                let boundary_side = match side {
                    LaneSide::Forward => BoundarySide::Forward,
                    LaneSide::Reverse => BoundarySide::Reverse,
                };
                section
                    .boundaries
                    .push(LaneBoundary::new(outer, mark, boundary_side));

                let mut lane = Lane::new(
                    side.lane_id(abs),
                    0,
                    0,
                    width,
                    template.kind.lane_type(),
                    options.default_speed_limit,
                );
                lane.set_inner_boundary_id(inner);
                lane.set_outer_boundary_id(outer);
                section.lanes.push(lane);
                inner = outer;
            }
        }
        section.normalize_order();

        let mut road = Self {
            id,
            sections: vec![section],
            key_path,
            elevation,
            length,
            boundary_ids,
        };
        crate::geometry::derive_road(&mut road, options);
        log::info!(
            "Straße {} angelegt: Länge {:.3}, {} Fahrstreifen",
            road.id,
            road.length,
            road.sections[0].lanes.len()
        );
        road
    }

    // ── Lookups ─────────────────────────────────────────────────

    pub fn section(&self, id: SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn section_mut(&mut self, id: SectionId) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.id == id)
    }

    pub fn section_index(&self, id: SectionId) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }

    pub fn lane(&self, section_id: SectionId, lane_id: LaneId) -> Option<&Lane> {
        self.section(section_id)?.lane(lane_id)
    }

    /// Section, die `percent` enthält (an Grenzen die spätere).
    pub fn section_index_at(&self, percent: f64) -> Option<usize> {
        self.sections
            .iter()
            .rposition(|s| s.contains_percent(percent))
    }

    // ── Übergangs-Fahrstreifen ──────────────────────────────────

    /// Übergangs-Fahrstreifen mit dem kleinsten Betrag über alle Sections.
    pub fn innermost_transition_lane(&self) -> Option<LaneId> {
        self.sections
            .iter()
            .flat_map(|s| s.lanes.iter())
            .filter(|l| l.is_transition)
            .min_by_key(|l| l.abs_id())
            .map(|l| l.id)
    }

    /// Bereich, in dem `lane_id` ab der Section `section_index` durchgehend existiert.
    pub fn lane_block_range(&self, section_index: usize, lane_id: LaneId) -> BlockRange {
        let mut range = BlockRange::default();
        let met_target = self
            .sections
            .get(section_index)
            .is_some_and(|s| s.has_lane(lane_id));
        for (i, section) in self.sections.iter().enumerate() {
            if i == section_index || section.has_lane(lane_id) {
                continue;
            }
            if i < section_index || !met_target {
                range.head = Some(i);
            } else if range.tail.is_none() {
                range.tail = Some(i);
            }
        }
        range
    }

    /// Sections, die mit dem Übergangs-Fahrstreifen `lane_id` verbunden sind:
    /// vom verbreiternden bis zum verengenden Übergang.
    ///
    /// `None`, wenn vorher ein Übergang in Gegenrichtung liegt.
    pub fn transition_link_range(
        &self,
        section_index: usize,
        lane_id: LaneId,
    ) -> Option<(usize, usize)> {
        let last = self.sections.len().checked_sub(1)?;
        let mut start = 0;
        let mut end = last;

        for i in (0..=section_index.min(last)).rev() {
            let Some(lane) = self.sections[i].lane(lane_id) else {
                continue;
            };
            if !lane.is_transition {
                continue;
            }
            if lane.is_extends {
                start = i;
                break;
            }
            if i != section_index {
                return None;
            }
        }

        for i in section_index..=last {
            let Some(lane) = self.sections[i].lane(lane_id) else {
                continue;
            };
            if !lane.is_transition {
                continue;
            }
            if !lane.is_extends {
                end = i;
                break;
            }
            if i != section_index {
                return None;
            }
        }
        Some((start, end))
    }

    /// `true`, wenn im Bereich ein Übergang weiter außen als `lane_id` liegt.
    pub fn has_outward_transition(&self, range: (usize, usize), lane_id: LaneId) -> bool {
        let abs = lane_id.unsigned_abs();
        self.sections
            .iter()
            .enumerate()
            .filter(|(i, _)| *i >= range.0 && *i <= range.1)
            .flat_map(|(_, s)| s.lanes.iter())
            .any(|l| l.abs_id() > abs && l.is_transition)
    }

    // ── Pflege ──────────────────────────────────────────────────

    /// Nummeriert die Sections nach ihrem Index.
    pub fn renumber_sections(&mut self) {
        for (i, section) in self.sections.iter_mut().enumerate() {
            section.id = i as SectionId;
        }
    }

    /// Summe der Section-Anteile.
    pub fn percent_sum(&self) -> f64 {
        self.sections.iter().map(Section::span).sum()
    }

    /// Prüft alle strukturellen Invarianten der Straße und ihrer Sections.
    pub fn validate(&self) -> Result<(), TopologyError> {
        let sum = self.percent_sum();
        if (sum - 1.0).abs() > PERCENT_SUM_TOLERANCE {
            return Err(TopologyError::PercentSum(sum));
        }
        let mut previous_end = 0.0;
        for (index, section) in self.sections.iter().enumerate() {
            if section.id != index as SectionId {
                return Err(TopologyError::SectionIdGap {
                    index,
                    id: section.id,
                });
            }
            if (section.p_start - previous_end).abs() > PERCENT_SUM_TOLERANCE {
                return Err(TopologyError::NotContiguous {
                    section: section.id,
                    p_start: section.p_start,
                    previous_end,
                });
            }
            previous_end = section.p_end;
            section.validate()?;
        }
        Ok(())
    }

    /// Vergibt eine neue Randlinien-ID über den straßenweiten Zähler.
    pub fn allocate_boundary_id(&mut self) -> super::ids::BoundaryId {
        self.boundary_ids.next_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CatmullRomCurve3;
    use glam::DVec3;
    use std::sync::Arc;

    fn straight_road(lanes: u32) -> Road {
        let curve = CatmullRomCurve3::chordal(vec![DVec3::ZERO, DVec3::new(100.0, 0.0, 0.0)]);
        Road::create(
            1,
            Arc::new(curve),
            None,
            &RoadTemplate::two_way(lanes, 3.5),
            &EngineOptions::default(),
        )
    }

    #[test]
    fn test_create_baut_gueltige_topologie() {
        let road = straight_road(2);
        road.validate().expect("gültige Straße erwartet");
        let section = &road.sections[0];
        assert_eq!(section.lanes.len(), 4);
        assert_eq!(section.boundaries.len(), 5);
        assert_eq!(section.lane_ids_on(LaneSide::Forward), vec![-1, -2]);
        assert_eq!(section.lane_ids_on(LaneSide::Reverse), vec![1, 2]);
        assert_eq!(road.boundary_ids.peek(), 5);
        assert!((road.length - 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_create_setzt_markierungen() {
        let road = straight_road(2);
        let section = &road.sections[0];
        let center = section.center_boundary_id().expect("Mittellinie erwartet");
        assert_eq!(
            section.boundary(center).map(|b| b.mark),
            Some(BoundaryMark::DOUBLE_SOLID_YELLOW)
        );
        let outer = section
            .outermost_lane(LaneSide::Reverse)
            .map(|l| l.outer_boundary_id())
            .expect("äußerer Fahrstreifen erwartet");
        assert_eq!(
            section.boundary(outer).map(|b| b.mark),
            Some(BoundaryMark::SINGLE_SOLID_WHITE)
        );
        let inner_dash = section.lane(-1).map(|l| l.rbid).expect("Fahrstreifen erwartet");
        assert_eq!(
            section.boundary(inner_dash).map(|b| b.mark),
            Some(BoundaryMark::SINGLE_DASH_WHITE)
        );
    }

    #[test]
    fn test_block_range_und_innerster_uebergang() {
        let mut road = straight_road(2);
        let mut second = road.sections[0].clone();
        let mut third = road.sections[0].clone();
        second.lanes.retain(|l| l.id != -2);
        third.lanes.iter_mut().filter(|l| l.id == -2).for_each(|l| {
            l.is_transition = true;
            l.is_extends = true;
        });
        road.sections.push(second);
        road.sections.push(third);
        road.renumber_sections();

        let range = road.lane_block_range(2, -2);
        assert_eq!(range.head, Some(1));
        assert_eq!(range.tail, None);
        assert_eq!(range.indices(3), vec![2]);
        assert_eq!(road.innermost_transition_lane(), Some(-2));
        assert_eq!(road.transition_link_range(2, -2), Some((2, 2)));
    }
}
