//! Markierungen der Fahrstreifen-Randlinien (Hex-Bitfeld).

use serde::{Deserialize, Serialize};

/// Anzahl der ausgewerteten Hex-Stellen einer Markierung.
const MARK_HEX_DIGITS: u32 = 7;

/// Markierung einer Randlinie: Linienmuster, Farbe und Strichstärke als Hex-Bitfeld.
///
/// Jede Hex-Stelle trägt eine eigene Bedeutung (Einzellinie, Doppellinie,
/// Bordstein/Zaun, Stärke, Farbe, Sonderflags).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoundaryMark(pub u32);

impl BoundaryMark {
    // ── Einzellinie ─────────────────────────────────────────────
    pub const NONE: Self = Self(0x000_0000);
    pub const SOLID: Self = Self(0x000_0001);
    pub const BROKEN: Self = Self(0x000_0002);

    // ── Doppellinie ─────────────────────────────────────────────
    pub const SOLID2: Self = Self(0x000_0010);
    pub const BROKEN2: Self = Self(0x000_0020);
    pub const SOLID_SOLID: Self = Self(0x000_0011);
    /// Innen durchgezogen, außen unterbrochen
    pub const SOLID_BROKEN: Self = Self(0x000_0021);
    /// Innen unterbrochen, außen durchgezogen
    pub const BROKEN_SOLID: Self = Self(0x000_0012);
    pub const BROKEN_BROKEN: Self = Self(0x000_0022);

    // ── Physische Ränder ────────────────────────────────────────
    pub const CURB: Self = Self(0x000_0100);
    pub const FENCE: Self = Self(0x000_0200);
    pub const ROAD_EDGE: Self = Self(0x000_0400);

    pub const BOLD: Self = Self(0x000_1000);

    // ── Farben ──────────────────────────────────────────────────
    pub const YELLOW: Self = Self(0x001_0000);
    pub const YELLOW2: Self = Self(0x002_0000);
    pub const YELLOW_YELLOW: Self = Self(0x003_0000);
    pub const RED: Self = Self(0x005_0000);
    pub const GREEN: Self = Self(0x006_0000);
    pub const BLUE: Self = Self(0x007_0000);

    // ── Sonderflags ─────────────────────────────────────────────
    pub const LDM: Self = Self(0x010_0000);
    pub const VGL: Self = Self(0x020_0000);
    pub const SHIELDED: Self = Self(0x100_0000);
    pub const ABSENT: Self = Self(0x200_0000);

    // ── Standard-Kombinationen ──────────────────────────────────
    /// Weiße unterbrochene Einzellinie (zwischen gleichgerichteten Fahrstreifen)
    pub const SINGLE_DASH_WHITE: Self = Self::BROKEN;
    /// Weiße durchgezogene Einzellinie (Fahrbahnrand)
    pub const SINGLE_SOLID_WHITE: Self = Self::SOLID;
    /// Gelbe doppelte durchgezogene Linie (Mittellinie)
    pub const DOUBLE_SOLID_YELLOW: Self = Self(0x001_0011);

    /// Rohwert des Bitfelds.
    pub fn bits(self) -> u32 {
        self.0
    }

    /// Prüft Hex-Stelle für Hex-Stelle, ob `pattern` in der Markierung enthalten ist.
    ///
    /// Null-Stellen des Musters werden ignoriert.
    pub fn matches(self, pattern: Self) -> bool {
        (0..MARK_HEX_DIGITS).all(|digit| {
            let shift = digit * 4;
            let wanted = (pattern.0 >> shift) & 0xF;
            wanted == 0 || wanted == (self.0 >> shift) & 0xF
        })
    }

    /// Zerlegt die Markierung in Linienstile, Strichstärke und Farbe.
    pub fn parse(self) -> ParsedMark {
        let line_styles = if self.matches(Self::SOLID_SOLID) {
            vec![LineStyle::Solid, LineStyle::Solid]
        } else if self.matches(Self::BROKEN_BROKEN) {
            vec![LineStyle::Dash, LineStyle::Dash]
        } else if self.matches(Self::BROKEN_SOLID) {
            vec![LineStyle::Dash, LineStyle::Solid]
        } else if self.matches(Self::SOLID_BROKEN) {
            vec![LineStyle::Solid, LineStyle::Dash]
        } else if self.matches(Self::BROKEN) {
            vec![LineStyle::Dash]
        } else if self.matches(Self::SOLID) {
            vec![LineStyle::Solid]
        } else {
            Vec::new()
        };

        let color = if self.matches(Self::YELLOW)
            || self.matches(Self::YELLOW2)
            || self.matches(Self::YELLOW_YELLOW)
        {
            MarkColor::Yellow
        } else if self.matches(Self::RED) {
            MarkColor::Red
        } else if self.matches(Self::GREEN) {
            MarkColor::Green
        } else if self.matches(Self::BLUE) {
            MarkColor::Blue
        } else {
            MarkColor::White
        };

        ParsedMark {
            line_styles,
            bold: self.matches(Self::BOLD),
            color,
        }
    }
}

/// Stil einer einzelnen Linie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dash,
}

/// Farbe einer Markierung.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkColor {
    #[default]
    White,
    Yellow,
    Red,
    Green,
    Blue,
}

/// Ausgewertete Markierung für die Strich-Meshes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMark {
    /// Null, ein oder zwei Linien (innen zuerst)
    pub line_styles: Vec<LineStyle>,
    pub bold: bool,
    pub color: MarkColor,
}
