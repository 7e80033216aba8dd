//! Parametrische 3D-Kurven: Fähigkeit (Trait) und Catmull-Rom-Implementierung.
//!
//! Alle Positionen werden über einen Bogenlängen-Prozentwert in `[0, 1]`
//! adressiert. Y ist die Höhe, XZ die Fahrbahnebene.

use glam::{DVec2, DVec3};
use std::fmt::Debug;
use std::sync::Arc;

/// Anzahl der Unterteilungen der Bogenlängen-Tabelle.
const ARC_LENGTH_DIVISIONS: usize = 200;

/// Schrittweite der Tangenten-Differenzenbildung im Kurvenparameter.
const TANGENT_DELTA: f64 = 0.0001;

/// Bogenlängen-parametrisierte 3D-Kurve.
///
/// Jede Kurve, die diesen Vertrag erfüllt, kann als Referenzlinie oder
/// Höhenprofil einer Straße dienen.
pub trait ParametricCurve: Debug + Send + Sync {
    /// Punkt bei `percent` der Bogenlänge.
    fn point_at(&self, percent: f64) -> DVec3;

    /// Normierte Tangente bei `percent` der Bogenlänge.
    fn tangent_at(&self, percent: f64) -> DVec3;

    /// Gesamtlänge der Kurve.
    fn length(&self) -> f64;

    /// `divisions + 1` Punkte in gleichen Bogenlängen-Abständen (inkl. beider Enden).
    fn densely_spaced_points(&self, divisions: usize) -> Vec<DVec3> {
        let divisions = divisions.max(1);
        (0..=divisions)
            .map(|i| self.point_at(i as f64 / divisions as f64))
            .collect()
    }
}

/// Geteilte, unveränderliche Kurve (Referenzlinie einer Straße).
pub type SharedCurve = Arc<dyn ParametricCurve>;

/// Horizontale Senkrechte zu einer Tangente: `normalize(-t.z, 0, t.x)`.
///
/// Bei entarteter Tangente (kein XZ-Anteil) wird `DVec3::ZERO` geliefert.
pub fn horizontal_perpendicular(tangent: DVec3) -> DVec3 {
    DVec3::new(-tangent.z, 0.0, tangent.x).normalize_or_zero()
}

/// Parametrisierung der Catmull-Rom-Kurve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CurveKind {
    /// Zentripetal (Knotenabstand = Distanz^0.5)
    Centripetal,
    /// Chordal (Knotenabstand = Distanz)
    Chordal,
    /// Uniform mit Spannung
    CatmullRom { tension: f64 },
}

/// Interpolierende Catmull-Rom-Kurve durch alle Kontrollpunkte.
///
/// An den Enden werden Phantom-Punkte gespiegelt (`2*p0 - p1`), damit die
/// Kurve exakt durch den ersten und letzten Punkt läuft.
#[derive(Debug, Clone)]
pub struct CatmullRomCurve3 {
    points: Vec<DVec3>,
    kind: CurveKind,
    /// Kumulierte Längen bei `i / ARC_LENGTH_DIVISIONS` im Kurvenparameter
    arc_lengths: Vec<f64>,
}

impl CatmullRomCurve3 {
    /// Erstellt eine Kurve und baut die Bogenlängen-Tabelle auf.
    pub fn new(points: Vec<DVec3>, kind: CurveKind) -> Self {
        let mut curve = Self {
            points,
            kind,
            arc_lengths: Vec::new(),
        };
        curve.arc_lengths = curve.build_arc_lengths();
        curve
    }

    /// Zentripetale Kurve (Standard für Randlinien-Striche).
    pub fn centripetal(points: Vec<DVec3>) -> Self {
        Self::new(points, CurveKind::Centripetal)
    }

    /// Chordale Kurve (Übergangskurven, Referenzlinien).
    pub fn chordal(points: Vec<DVec3>) -> Self {
        Self::new(points, CurveKind::Chordal)
    }

    /// Kontrollpunkte der Kurve.
    pub fn points(&self) -> &[DVec3] {
        &self.points
    }

    /// Parametrisierung der Kurve.
    pub fn kind(&self) -> CurveKind {
        self.kind
    }

    /// Punkt im (nicht bogenlängen-normierten) Kurvenparameter `t`.
    pub fn point(&self, t: f64) -> DVec3 {
        let n = self.points.len();
        match n {
            0 => return DVec3::ZERO,
            1 => return self.points[0],
            _ => {}
        }

        let p = (n - 1) as f64 * t.clamp(0.0, 1.0);
        let mut segment = p.floor() as usize;
        let mut weight = p - segment as f64;
        if segment >= n - 1 {
            segment = n - 2;
            weight = 1.0;
        }

        // Phantom-Punkte an den Rändern
        let p0 = if segment > 0 {
            self.points[segment - 1]
        } else {
            2.0 * self.points[0] - self.points[1]
        };
        let p1 = self.points[segment];
        let p2 = self.points[segment + 1];
        let p3 = if segment + 2 < n {
            self.points[segment + 2]
        } else {
            2.0 * self.points[n - 1] - self.points[n - 2]
        };

        match self.kind {
            CurveKind::CatmullRom { tension } => {
                let t1 = tension * (p2 - p0);
                let t2 = tension * (p3 - p1);
                hermite(p1, p2, t1, t2, weight)
            }
            CurveKind::Centripetal | CurveKind::Chordal => {
                let power = if self.kind == CurveKind::Chordal {
                    0.5
                } else {
                    0.25
                };
                let mut dt0 = p0.distance_squared(p1).powf(power);
                let mut dt1 = p1.distance_squared(p2).powf(power);
                let mut dt2 = p2.distance_squared(p3).powf(power);

                // Zusammenfallende Punkte
                if dt1 < 1e-4 {
                    dt1 = 1.0;
                }
                if dt0 < 1e-4 {
                    dt0 = dt1;
                }
                if dt2 < 1e-4 {
                    dt2 = dt1;
                }

                let t1 = ((p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1) + (p2 - p1) / dt1) * dt1;
                let t2 = ((p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2) + (p3 - p2) / dt2) * dt1;
                hermite(p1, p2, t1, t2, weight)
            }
        }
    }

    fn build_arc_lengths(&self) -> Vec<f64> {
        let mut lengths = Vec::with_capacity(ARC_LENGTH_DIVISIONS + 1);
        let mut last = self.point(0.0);
        let mut sum = 0.0;
        lengths.push(0.0);
        for i in 1..=ARC_LENGTH_DIVISIONS {
            let current = self.point(i as f64 / ARC_LENGTH_DIVISIONS as f64);
            sum += current.distance(last);
            lengths.push(sum);
            last = current;
        }
        lengths
    }

    /// Bildet einen Bogenlängen-Prozentwert auf den Kurvenparameter ab.
    fn u_to_t(&self, u: f64) -> f64 {
        let lengths = &self.arc_lengths;
        let last_index = lengths.len() - 1;
        let total = lengths[last_index];
        if total <= 0.0 {
            return u.clamp(0.0, 1.0);
        }
        let target = u.clamp(0.0, 1.0) * total;

        // Letzter Index mit lengths[i] <= target
        let i = lengths
            .partition_point(|&l| l <= target)
            .saturating_sub(1)
            .min(last_index);
        if lengths[i] == target || i == last_index {
            return i as f64 / last_index as f64;
        }

        let before = lengths[i];
        let segment_length = lengths[i + 1] - before;
        if segment_length <= 0.0 {
            return i as f64 / last_index as f64;
        }
        let fraction = (target - before) / segment_length;
        (i as f64 + fraction) / last_index as f64
    }

    /// Tangente im Kurvenparameter `t` (Differenzenquotient, normiert).
    fn tangent(&self, t: f64) -> DVec3 {
        let t1 = (t - TANGENT_DELTA).max(0.0);
        let t2 = (t + TANGENT_DELTA).min(1.0);
        (self.point(t2) - self.point(t1)).normalize_or_zero()
    }
}

/// Kubisches Hermite-Polynom zwischen `x0` und `x1` mit Tangenten `t0`, `t1`.
fn hermite(x0: DVec3, x1: DVec3, t0: DVec3, t1: DVec3, weight: f64) -> DVec3 {
    let c0 = x0;
    let c1 = t0;
    let c2 = -3.0 * x0 + 3.0 * x1 - 2.0 * t0 - t1;
    let c3 = 2.0 * x0 - 2.0 * x1 + t0 + t1;
    let w2 = weight * weight;
    let w3 = w2 * weight;
    c0 + c1 * weight + c2 * w2 + c3 * w3
}

impl ParametricCurve for CatmullRomCurve3 {
    fn point_at(&self, percent: f64) -> DVec3 {
        self.point(self.u_to_t(percent))
    }

    fn tangent_at(&self, percent: f64) -> DVec3 {
        self.tangent(self.u_to_t(percent))
    }

    fn length(&self) -> f64 {
        self.arc_lengths.last().copied().unwrap_or(0.0)
    }
}

/// Höhenprofil einer Straße: Kontrollpunkte `(s, höhe)` entlang der Straße.
///
/// Verbraucht wird nur die Y-Komponente von `point_at`.
#[derive(Debug, Clone)]
pub struct ElevationProfile {
    control_points: Vec<DVec2>,
    curve: CatmullRomCurve3,
}

impl ElevationProfile {
    /// Erstellt ein Profil aus `(s, höhe)`-Paaren.
    pub fn new(control_points: Vec<DVec2>) -> Self {
        let curve = CatmullRomCurve3::centripetal(
            control_points
                .iter()
                .map(|p| DVec3::new(p.x, p.y, 0.0))
                .collect(),
        );
        Self {
            control_points,
            curve,
        }
    }

    /// Kontrollpunkte `(s, höhe)`.
    pub fn control_points(&self) -> &[DVec2] {
        &self.control_points
    }

    /// Höhe bei `percent` der Profillänge.
    pub fn height_at(&self, percent: f64) -> f64 {
        self.curve.point_at(percent).y
    }

    /// Skaliert die s-Koordinaten auf eine neue Straßenlänge (Anteile bleiben erhalten).
    pub fn rescaled(&self, road_length: f64) -> Self {
        let Some(last_s) = self.control_points.last().map(|p| p.x) else {
            return self.clone();
        };
        if last_s <= 0.0 {
            return self.clone();
        }
        let points = self
            .control_points
            .iter()
            .map(|p| DVec2::new(crate::shared::fixed_length(road_length * p.x / last_s), p.y))
            .collect();
        Self::new(points)
    }
}

impl ParametricCurve for ElevationProfile {
    fn point_at(&self, percent: f64) -> DVec3 {
        self.curve.point_at(percent)
    }

    fn tangent_at(&self, percent: f64) -> DVec3 {
        self.curve.tangent_at(percent)
    }

    fn length(&self) -> f64 {
        self.curve.length()
    }
}
