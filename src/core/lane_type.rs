//! Fahrstreifen-Typen mit numerischem Code und Standard-Reibwert.

use serde::{Deserialize, Serialize};

/// Reibwert befestigter Fahrstreifen.
const FRICTION_PAVED: f64 = 0.8;
/// Reibwert für Ränder, Bankette und Gleise.
const FRICTION_ROUGH: f64 = 1.0;

/// Typ eines Fahrstreifens. Wird als numerischer Code persistiert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum LaneType {
    /// Leerraum am äußersten Rand
    None,
    /// Normaler Fahrstreifen
    #[default]
    Driving,
    /// Standstreifen
    Stop,
    Shoulder,
    Biking,
    Sidewalk,
    Border,
    Restricted,
    Parking,
    /// Durchgehender Linksabbieger in beiden Richtungen
    Bidirectional,
    ConnectingRamp,
    Curb,
    Entry,
    Exit,
    Median,
    Offramp,
    Onramp,
    Rail,
    RoadWorks,
    Tram,
}

impl LaneType {
    /// Alle Typen in Code-Reihenfolge.
    pub const ALL: [LaneType; 20] = [
        LaneType::None,
        LaneType::Driving,
        LaneType::Stop,
        LaneType::Shoulder,
        LaneType::Biking,
        LaneType::Sidewalk,
        LaneType::Border,
        LaneType::Restricted,
        LaneType::Parking,
        LaneType::Bidirectional,
        LaneType::ConnectingRamp,
        LaneType::Curb,
        LaneType::Entry,
        LaneType::Exit,
        LaneType::Median,
        LaneType::Offramp,
        LaneType::Onramp,
        LaneType::Rail,
        LaneType::RoadWorks,
        LaneType::Tram,
    ];

    /// Numerischer Code im Austauschformat.
    pub fn code(self) -> u32 {
        match self {
            LaneType::None => 0,
            LaneType::Driving => 1,
            LaneType::Stop => 2,
            LaneType::Shoulder => 3,
            LaneType::Biking => 4,
            LaneType::Sidewalk => 5,
            LaneType::Border => 6,
            LaneType::Restricted => 7,
            LaneType::Parking => 8,
            LaneType::Bidirectional => 27,
            LaneType::ConnectingRamp => 29,
            LaneType::Curb => 30,
            LaneType::Entry => 31,
            LaneType::Exit => 32,
            LaneType::Median => 33,
            LaneType::Offramp => 34,
            LaneType::Onramp => 35,
            LaneType::Rail => 36,
            LaneType::RoadWorks => 37,
            LaneType::Tram => 39,
        }
    }

    /// Typ zu einem Code, `None` bei unbekanntem Code.
    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    /// Standard-Reibwert des Typs.
    pub fn default_friction(self) -> f64 {
        match self {
            LaneType::Shoulder
            | LaneType::Border
            | LaneType::Curb
            | LaneType::Median
            | LaneType::Rail
            | LaneType::RoadWorks
            | LaneType::Tram => FRICTION_ROUGH,
            _ => FRICTION_PAVED,
        }
    }
}

impl From<LaneType> for u32 {
    fn from(value: LaneType) -> Self {
        value.code()
    }
}

impl TryFrom<u32> for LaneType {
    type Error = String;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        LaneType::from_code(code).ok_or_else(|| format!("Unbekannter Fahrstreifen-Typ: {code}"))
    }
}
