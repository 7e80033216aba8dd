//! Numerische Hilfsfunktionen für Rundung und Prozent-Schrittweiten.

/// Standard-Nachkommastellen für Längen (cm-genau).
pub const LENGTH_PRECISION: u32 = 3;

/// Nachkommastellen für Prozentwerte auf der Referenzlinie.
pub const PERCENT_PRECISION: u32 = 8;

/// Rundet `value` auf `digits` Nachkommastellen.
pub fn fixed_precision(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    (value * factor).round() / factor
}

/// Rundet eine Länge auf Zentimeter.
pub fn fixed_length(value: f64) -> f64 {
    fixed_precision(value, LENGTH_PRECISION)
}

/// Rundet einen Prozentwert auf 8 Nachkommastellen.
pub fn fixed_percent(value: f64) -> f64 {
    fixed_precision(value, PERCENT_PRECISION)
}

/// Schrittweite für `segment` gleichmäßige Intervalle im Bereich `[p_start, p_end]`.
///
/// Die Rundung darf nie nach oben ausschlagen, sonst landet der letzte
/// Abtastpunkt hinter `p_end`. In dem Fall wird die letzte Stelle abgezogen.
pub fn sample_space(p_start: f64, p_end: f64, segment: usize, digits: u32) -> f64 {
    let segment = segment.max(1) as f64;
    let exact = (p_end - p_start) / segment;
    let rounded = fixed_precision(exact, digits);
    if rounded > exact {
        rounded - 10f64.powi(-(digits as i32))
    } else {
        rounded
    }
}

/// Liefert die `segment + 1` Abtast-Prozente für `[p_start, p_end]` (max. 1.0).
pub fn sample_percents(p_start: f64, p_end: f64, segment: usize, digits: u32) -> Vec<f64> {
    let space = sample_space(p_start, p_end, segment, digits);
    (0..=segment)
        .map(|i| (p_start + i as f64 * space).min(1.0))
        .collect()
}

/// Prüft, ob zwei Werte innerhalb einer Toleranz liegen.
pub fn within_deviation(a: f64, b: f64, deviation: f64) -> bool {
    (a - b).abs() <= deviation
}
