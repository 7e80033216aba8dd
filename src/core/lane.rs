//! Fahrstreifen einer Section.

use super::ids::{BoundaryId, LaneId};
use super::lane_type::LaneType;
use glam::DVec3;

/// Fahrtrichtung eines Fahrstreifens, abgeleitet aus dem Vorzeichen der ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LaneSide {
    /// Negative IDs, liegen auf der `+Senkrechten` der Referenzlinie
    Forward,
    /// Positive IDs, liegen auf der `-Senkrechten`
    Reverse,
}

impl LaneSide {
    pub const BOTH: [LaneSide; 2] = [LaneSide::Forward, LaneSide::Reverse];

    /// Richtung zu einer Fahrstreifen-ID (`None` für 0).
    pub fn of(id: LaneId) -> Option<Self> {
        match id.signum() {
            -1 => Some(LaneSide::Forward),
            1 => Some(LaneSide::Reverse),
            _ => None,
        }
    }

    /// Vorzeichen des Versatzes entlang der Senkrechten.
    pub fn sign(self) -> f64 {
        match self {
            LaneSide::Forward => 1.0,
            LaneSide::Reverse => -1.0,
        }
    }

    /// Fahrstreifen-ID zum Betrag `abs` auf dieser Seite.
    pub fn lane_id(self, abs: u32) -> LaneId {
        match self {
            LaneSide::Forward => -(abs as LaneId),
            LaneSide::Reverse => abs as LaneId,
        }
    }

    /// ID-Schritt nach außen (-1 vorwärts, +1 rückwärts).
    pub fn outward_step(self) -> LaneId {
        match self {
            LaneSide::Forward => -1,
            LaneSide::Reverse => 1,
        }
    }
}

/// Ein Fahrstreifen mit ID-Verweisen auf seine beiden Randlinien.
///
/// Vorwärts: `lbid` innen, `rbid` außen. Rückwärts: `rbid` innen, `lbid` außen.
#[derive(Debug, Clone, PartialEq)]
pub struct Lane {
    pub id: LaneId,
    pub lbid: BoundaryId,
    pub rbid: BoundaryId,
    /// Nennbreite; bei Übergängen die breitere Seite
    pub normal_width: f64,
    pub is_transition: bool,
    /// Nur bei Übergängen: `true` = wird breiter
    pub is_extends: bool,
    pub lane_type: LaneType,
    pub speed_limit: f64,
    pub friction: f64,
    pub s_offset: f64,
    pub enabled: bool,
    /// Abgeleitete Mittellinie (nicht persistiert)
    pub center_points: Vec<DVec3>,
}

impl Lane {
    /// Regulärer Fahrstreifen mit Standardattributen des Typs.
    pub fn new(
        id: LaneId,
        lbid: BoundaryId,
        rbid: BoundaryId,
        width: f64,
        lane_type: LaneType,
        speed_limit: f64,
    ) -> Self {
        Self {
            id,
            lbid,
            rbid,
            normal_width: width,
            is_transition: false,
            is_extends: false,
            lane_type,
            speed_limit,
            friction: lane_type.default_friction(),
            s_offset: 0.0,
            enabled: true,
            center_points: Vec::new(),
        }
    }

    /// Fahrtrichtung; ID 0 wird als vorwärts behandelt.
    pub fn side(&self) -> LaneSide {
        LaneSide::of(self.id).unwrap_or(LaneSide::Forward)
    }

    /// Betrag der ID (1 = innerster Fahrstreifen).
    pub fn abs_id(&self) -> u32 {
        self.id.unsigned_abs()
    }

    /// Randlinie zur Referenzlinie hin.
    pub fn inner_boundary_id(&self) -> BoundaryId {
        match self.side() {
            LaneSide::Forward => self.lbid,
            LaneSide::Reverse => self.rbid,
        }
    }

    /// Randlinie nach außen.
    pub fn outer_boundary_id(&self) -> BoundaryId {
        match self.side() {
            LaneSide::Forward => self.rbid,
            LaneSide::Reverse => self.lbid,
        }
    }

    pub fn set_inner_boundary_id(&mut self, id: BoundaryId) {
        match self.side() {
            LaneSide::Forward => self.lbid = id,
            LaneSide::Reverse => self.rbid = id,
        }
    }

    pub fn set_outer_boundary_id(&mut self, id: BoundaryId) {
        match self.side() {
            LaneSide::Forward => self.rbid = id,
            LaneSide::Reverse => self.lbid = id,
        }
    }

    /// Macht den Fahrstreifen zu einem regulären (kein Übergang).
    pub fn clear_transition(&mut self) {
        self.is_transition = false;
        self.is_extends = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seite_und_randlinien_rollen() {
        let mut forward = Lane::new(-2, 10, 11, 3.5, LaneType::Driving, 30.0);
        assert_eq!(forward.side(), LaneSide::Forward);
        assert_eq!(forward.inner_boundary_id(), 10);
        assert_eq!(forward.outer_boundary_id(), 11);

        let mut reverse = Lane::new(2, 21, 20, 3.5, LaneType::Driving, 30.0);
        assert_eq!(reverse.side(), LaneSide::Reverse);
        assert_eq!(reverse.inner_boundary_id(), 20);
        assert_eq!(reverse.outer_boundary_id(), 21);

        forward.set_outer_boundary_id(99);
        reverse.set_outer_boundary_id(98);
        assert_eq!(forward.rbid, 99);
        assert_eq!(reverse.lbid, 98);
    }

    #[test]
    fn test_ids_pro_seite() {
        assert_eq!(LaneSide::Forward.lane_id(3), -3);
        assert_eq!(LaneSide::Reverse.lane_id(3), 3);
        assert_eq!(LaneSide::of(0), None);
        assert_eq!(LaneSide::Forward.sign(), 1.0);
    }

    #[test]
    fn test_reibwert_folgt_typ() {
        let lane = Lane::new(-1, 0, 1, 3.5, LaneType::Median, 30.0);
        assert_eq!(lane.friction, 1.0);
        assert!(lane.enabled);
    }
}
