//! Zentrale Konfiguration der Straßengeometrie-Engine.
//!
//! `EngineOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

// ── Fahrstreifen ────────────────────────────────────────────────────

/// Standardbreite neuer Fahrstreifen in Metern.
pub const LANE_WIDTH: f64 = 3.5;
/// Minimale Fahrstreifenbreite; kleinere Werte werden geklemmt.
pub const MIN_LANE_WIDTH: f64 = 0.4;
/// Maximale Fahrstreifenbreite; größere Werte werden geklemmt.
pub const MAX_LANE_WIDTH: f64 = 99.0;
/// Standard-Tempolimit neuer Fahrstreifen.
pub const DEFAULT_SPEED_LIMIT: f64 = 30.0;

// ── Übergangs-Fahrstreifen ──────────────────────────────────────────

/// Anzahl der Kontrollpunkt-Intervalle der Übergangskurve (muss gerade sein).
pub const TWEEN_CONTROL_POINT_SEGMENT: usize = 10;
/// Exponent der Easing-Funktion für die Kontrollpunkt-Offsets.
pub const TWEEN_CONTROL_POINT_EXPONENT: f64 = 0.25;
/// Abtast-Intervalle einer Übergangs-Section ohne bestehende Abtastung.
pub const TWEEN_SAMPLE_SEGMENT: usize = 20;
/// Dichte Abtastpunkte der Übergangskurve für die Winkel-Suche.
pub const TWEEN_DENSE_SAMPLES: usize = 500;

// ── Abtastung ───────────────────────────────────────────────────────

/// Nachkommastellen der Prozent-Schrittweite.
pub const OFFSET_SAMPLE_PRECISION: u32 = 8;
/// Mindestabstand Referenzpunkt ↔ Randpunkt, unterhalb wird die Kurvennormale genutzt.
pub const DEGENERATE_NORMAL_DISTANCE: f64 = 0.3;

// ── Markierungen ────────────────────────────────────────────────────

/// Strichbreite einer Fahrbahnmarkierung.
pub const MARK_WIDTH: f64 = 0.15;
/// Seitlicher Versatz der Striche einer Doppellinie.
pub const MARK_OFFSET: f64 = 0.1;
/// Länge eines Strichs einer unterbrochenen Linie.
pub const MARK_UNIT_LENGTH: f64 = 4.0;
/// Lücke zwischen zwei Strichen einer unterbrochenen Linie.
pub const MARK_GAP_LENGTH: f64 = 6.0;

// ── Sections / Laden ────────────────────────────────────────────────

/// Toleranz (Prozent) beim Einrasten auf die erste/letzte Section.
pub const SECTION_SNAP_DEVIATION: f64 = 0.05;
/// Toleranz beim Erkennen eines Übergangs aus geladenen Randlinien.
pub const TREND_WIDTH_DEVIATION: f64 = 0.5;

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Engine-Optionen.
/// Wird als `road_lane_engine.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineOptions {
    // ── Fahrstreifen ────────────────────────────────────────────
    /// Breite neu angelegter Fahrstreifen
    pub lane_width: f64,
    /// Untere Klemmgrenze für Breitenänderungen
    pub min_lane_width: f64,
    /// Obere Klemmgrenze für Breitenänderungen
    pub max_lane_width: f64,
    /// Tempolimit neu angelegter Fahrstreifen
    #[serde(default = "default_speed_limit")]
    pub default_speed_limit: f64,

    // ── Übergänge ───────────────────────────────────────────────
    /// Kontrollpunkt-Intervalle der Übergangskurve
    pub tween_control_point_segment: usize,
    /// Easing-Exponent der Kontrollpunkte
    pub tween_control_point_exponent: f64,
    /// Abtast-Intervalle einer Übergangs-Section
    pub tween_sample_segment: usize,
    /// Dichte Abtastpunkte für die Projektion auf die Übergangskurve
    pub tween_dense_samples: usize,

    // ── Abtastung ───────────────────────────────────────────────
    /// Nachkommastellen der Prozent-Schrittweite
    pub offset_sample_precision: u32,
    /// Schwelle für instabile Normalen
    pub degenerate_normal_distance: f64,

    // ── Markierungen ────────────────────────────────────────────
    /// Strichbreite
    pub mark_width: f64,
    /// Versatz der Doppellinien
    pub mark_offset: f64,
    /// Strichlänge unterbrochener Linien
    pub mark_unit_length: f64,
    /// Lückenlänge unterbrochener Linien
    pub mark_gap_length: f64,

    // ── Sections / Laden ────────────────────────────────────────
    /// Einrast-Toleranz beim Ändern der Referenzlinie
    #[serde(default = "default_section_snap_deviation")]
    pub section_snap_deviation: f64,
    /// Toleranz für die Übergangserkennung beim Laden
    #[serde(default = "default_trend_width_deviation")]
    pub trend_width_deviation: f64,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            lane_width: LANE_WIDTH,
            min_lane_width: MIN_LANE_WIDTH,
            max_lane_width: MAX_LANE_WIDTH,
            default_speed_limit: DEFAULT_SPEED_LIMIT,

            tween_control_point_segment: TWEEN_CONTROL_POINT_SEGMENT,
            tween_control_point_exponent: TWEEN_CONTROL_POINT_EXPONENT,
            tween_sample_segment: TWEEN_SAMPLE_SEGMENT,
            tween_dense_samples: TWEEN_DENSE_SAMPLES,

            offset_sample_precision: OFFSET_SAMPLE_PRECISION,
            degenerate_normal_distance: DEGENERATE_NORMAL_DISTANCE,

            mark_width: MARK_WIDTH,
            mark_offset: MARK_OFFSET,
            mark_unit_length: MARK_UNIT_LENGTH,
            mark_gap_length: MARK_GAP_LENGTH,

            section_snap_deviation: SECTION_SNAP_DEVIATION,
            trend_width_deviation: TREND_WIDTH_DEVIATION,
        }
    }
}

/// Serde-Default für `default_speed_limit` (Abwärtskompatibilität bestehender TOML-Dateien).
fn default_speed_limit() -> f64 {
    DEFAULT_SPEED_LIMIT
}

/// Serde-Default für `section_snap_deviation`.
fn default_section_snap_deviation() -> f64 {
    SECTION_SNAP_DEVIATION
}

/// Serde-Default für `trend_width_deviation`.
fn default_trend_width_deviation() -> f64 {
    TREND_WIDTH_DEVIATION
}

impl EngineOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<Self>(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts.sanitized()
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("road-lane-engine"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("road_lane_engine.toml")
    }

    /// Klemmt eine gewünschte Fahrstreifenbreite in `[min_lane_width, max_lane_width]`.
    pub fn clamp_lane_width(&self, width: f64) -> f64 {
        width.clamp(self.min_lane_width, self.max_lane_width)
    }

    /// Korrigiert Werte, mit denen die Abtastung nicht arbeiten kann.
    ///
    /// Ungerade Kontrollpunkt-Intervalle werden auf die nächste gerade Zahl angehoben.
    fn sanitized(mut self) -> Self {
        if self.min_lane_width > self.max_lane_width {
            log::warn!(
                "min_lane_width {} > max_lane_width {}, verwende Standardgrenzen",
                self.min_lane_width,
                self.max_lane_width
            );
            self.min_lane_width = MIN_LANE_WIDTH;
            self.max_lane_width = MAX_LANE_WIDTH;
        }
        if self.tween_control_point_segment < 2 {
            self.tween_control_point_segment = TWEEN_CONTROL_POINT_SEGMENT;
        } else if self.tween_control_point_segment % 2 == 1 {
            self.tween_control_point_segment += 1;
        }
        self.tween_sample_segment = self.tween_sample_segment.max(2);
        self.tween_dense_samples = self.tween_dense_samples.max(2);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_werte_entsprechen_konstanten() {
        let opts = EngineOptions::default();
        assert_eq!(opts.lane_width, LANE_WIDTH);
        assert_eq!(opts.tween_control_point_segment, 10);
        assert_eq!(opts.tween_dense_samples, 500);
    }

    #[test]
    fn test_toml_roundtrip() {
        let opts = EngineOptions {
            lane_width: 3.75,
            ..EngineOptions::default()
        };
        let text = toml::to_string_pretty(&opts).expect("TOML-Serialisierung erwartet");
        let back: EngineOptions = toml::from_str(&text).expect("TOML-Parse erwartet");
        assert_eq!(back, opts);
    }

    #[test]
    fn test_fehlende_optionale_felder_nutzen_defaults() {
        let text = toml::to_string(&EngineOptions::default()).expect("TOML-Serialisierung erwartet");
        let mut table: toml::Table = toml::from_str(&text).expect("Tabelle erwartet");
        table.remove("default_speed_limit");
        table.remove("trend_width_deviation");
        let reduced = toml::to_string(&table).expect("TOML-Serialisierung erwartet");
        let back: EngineOptions = toml::from_str(&reduced).expect("Deserialisierung erwartet");
        assert_eq!(back.default_speed_limit, DEFAULT_SPEED_LIMIT);
        assert_eq!(back.trend_width_deviation, TREND_WIDTH_DEVIATION);
    }

    #[test]
    fn test_speichern_und_laden() {
        let path = std::env::temp_dir().join(format!(
            "road_lane_engine_options_{}.toml",
            std::process::id()
        ));
        let opts = EngineOptions {
            mark_gap_length: 9.0,
            ..EngineOptions::default()
        };
        opts.save_to_file(&path).expect("Speichern erwartet");
        let loaded = EngineOptions::load_from_file(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, opts);
    }

    #[test]
    fn test_clamp_lane_width() {
        let opts = EngineOptions::default();
        assert_eq!(opts.clamp_lane_width(0.1), MIN_LANE_WIDTH);
        assert_eq!(opts.clamp_lane_width(150.0), MAX_LANE_WIDTH);
        assert_eq!(opts.clamp_lane_width(4.0), 4.0);
    }

    #[test]
    fn test_ungerade_kontrollpunkte_werden_korrigiert() {
        let opts = EngineOptions {
            tween_control_point_segment: 7,
            ..EngineOptions::default()
        }
        .sanitized();
        assert_eq!(opts.tween_control_point_segment, 8);
    }
}
