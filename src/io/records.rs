//! Serde-Records des persistierten Straßenformats.
//!
//! Die Feldnamen entsprechen dem Austauschformat (camelCase, `boundarys`,
//! `speedlimit`). Abgeleitete Daten wie Mittellinien werden nicht gespeichert.

use crate::core::{BoundaryId, BoundaryMark, LaneType, RoadId, SectionId};
use glam::DVec3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadRecord {
    pub id: RoadId,
    pub sections: Vec<SectionRecord>,
    pub length: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionRecord {
    pub id: SectionId,
    pub p_start: f64,
    pub p_end: f64,
    pub length: f64,
    pub lanes: Vec<LaneRecord>,
    pub boundarys: Vec<BoundaryRecord>,
}

/// Fahrstreifen. Die ID wird als Text gespeichert (`"-1"`, `"2"`).
///
/// Fehlen `normalWidth` oder `isTransition`, werden sie beim Laden aus den
/// Randlinien bestimmt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaneRecord {
    pub id: String,
    pub lbid: BoundaryId,
    pub rbid: BoundaryId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normal_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_transition: Option<bool>,
    #[serde(default)]
    pub is_extends: bool,
    #[serde(rename = "type", default)]
    pub lane_type: LaneType,
    #[serde(rename = "speedlimit")]
    pub speed_limit: f64,
    pub friction: f64,
    pub s_offset: f64,
    #[serde(default = "enabled_default", skip_serializing_if = "is_enabled")]
    pub enabled: bool,
}

fn enabled_default() -> bool {
    true
}

fn is_enabled(enabled: &bool) -> bool {
    *enabled
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundaryRecord {
    pub id: BoundaryId,
    pub mark: BoundaryMark,
    pub sample_points: Vec<PointRecord>,
}

/// Punkt als Objekt `{x, y, z}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl From<DVec3> for PointRecord {
    fn from(p: DVec3) -> Self {
        Self {
            x: p.x,
            y: p.y,
            z: p.z,
        }
    }
}

impl From<PointRecord> for DVec3 {
    fn from(p: PointRecord) -> Self {
        DVec3::new(p.x, p.y, p.z)
    }
}
