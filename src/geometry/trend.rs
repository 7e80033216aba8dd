//! Erkennung von Übergängen aus geladenen Randlinien.

use crate::shared::{fixed_length, within_deviation};
use glam::DVec3;

/// Aus den Randlinien abgeleitete Fahrstreifen-Eigenschaften.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaneTrend {
    pub is_transition: bool,
    pub is_extends: bool,
    pub normal_width: f64,
}

/// Vergleicht die Breite am Anfang und am Ende eines Fahrstreifens.
///
/// Gleiche Breiten (innerhalb `deviation`) ergeben einen regulären Fahrstreifen
/// mit der mittleren Breite, sonst einen Übergang mit der größeren Breite.
/// `None`, wenn eine der Randlinien keine Punkte hat.
pub fn infer_trend(left: &[DVec3], right: &[DVec3], deviation: f64) -> Option<LaneTrend> {
    let first = fixed_length(left.first()?.distance(*right.first()?));
    let last = fixed_length(left.last()?.distance(*right.last()?));

    if within_deviation(first, last, deviation) {
        Some(LaneTrend {
            is_transition: false,
            is_extends: false,
            normal_width: fixed_length((first + last) / 2.0),
        })
    } else {
        Some(LaneTrend {
            is_transition: true,
            is_extends: last > first,
            normal_width: first.max(last),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(z0: f64, z1: f64) -> Vec<DVec3> {
        vec![DVec3::new(0.0, 0.0, z0), DVec3::new(10.0, 0.0, z1)]
    }

    #[test]
    fn test_gleiche_breite_ist_regulaer() {
        let trend = infer_trend(&line(0.0, 0.0), &line(3.5, 3.8), 0.5).expect("Trend erwartet");
        assert!(!trend.is_transition);
        assert_eq!(trend.normal_width, 3.65);
    }

    #[test]
    fn test_verbreiterung_und_verengung() {
        let widen = infer_trend(&line(0.0, 0.0), &line(0.0, 3.5), 0.5).expect("Trend erwartet");
        assert!(widen.is_transition && widen.is_extends);
        assert_eq!(widen.normal_width, 3.5);

        let narrow = infer_trend(&line(0.0, 0.0), &line(3.5, 0.1), 0.5).expect("Trend erwartet");
        assert!(narrow.is_transition && !narrow.is_extends);
    }

    #[test]
    fn test_leere_randlinie() {
        assert_eq!(infer_trend(&[], &line(0.0, 1.0), 0.5), None);
    }
}
