//! Übergangs-Randlinien: weicher Verlauf zwischen zwei Versätzen.
//!
//! Aus eingebetteten Kontrollpunkten entsteht eine chordale Catmull-Rom-Kurve.
//! Diese wird anschließend entlang der Senkrechten der Referenzlinie
//! neu abgetastet, damit die Punkte zu den übrigen Randlinien passen.

use super::offset::OffsetSampler;
use crate::core::{CatmullRomCurve3, ParametricCurve};
use crate::shared::EngineOptions;
use glam::DVec3;
use std::f64::consts::FRAC_PI_2;

/// Beschreibung eines Übergangs über `[p_start, p_end]`.
///
/// Versätze sind vorzeichenbehaftet (Seite bereits eingerechnet).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaperRequest {
    pub p_start: f64,
    pub p_end: f64,
    /// Versatz am Anfang der Section
    pub start_offset: f64,
    /// Versatz am Ende der Section
    pub end_offset: f64,
    pub segment: usize,
}

impl TaperRequest {
    /// Seite des Übergangs relativ zur Referenzlinie (+1 oder -1).
    pub fn side_sign(&self) -> f64 {
        if self.start_offset + self.end_offset < 0.0 {
            -1.0
        } else {
            1.0
        }
    }
}

/// Kontrollpunkte der Übergangskurve.
///
/// Reihenfolge: Anfang, Kontrollpunkte der vorderen Hälfte, Mittelpunkt,
/// Kontrollpunkte der hinteren Hälfte, Ende.
pub fn taper_control_points(
    sampler: &OffsetSampler<'_>,
    request: &TaperRequest,
    options: &EngineOptions,
) -> Vec<DVec3> {
    let segment_count = options.tween_control_point_segment.max(2);
    let half = segment_count / 2;
    let exponent = options.tween_control_point_exponent;
    let percent_delta = (request.p_end - request.p_start) / segment_count as f64;
    let offset_delta = (request.end_offset - request.start_offset) / segment_count as f64;
    let eased = |i: usize| {
        let t = i as f64 / half as f64;
        offset_delta * i as f64 * t.powf(exponent)
    };

    let mut points = Vec::with_capacity(segment_count + 1);
    points.push(sampler.point_by_offset(request.p_start, request.start_offset));
    for i in 1..half {
        points.push(sampler.point_by_offset(
            request.p_start + percent_delta * i as f64,
            request.start_offset + eased(i),
        ));
    }
    points.push(sampler.point_by_offset(
        (request.p_start + request.p_end) / 2.0,
        (request.start_offset + request.end_offset) / 2.0,
    ));
    for i in (1..half).rev() {
        points.push(sampler.point_by_offset(
            request.p_end - percent_delta * i as f64,
            request.end_offset - eased(i),
        ));
    }
    points.push(sampler.point_by_offset(request.p_end, request.end_offset));
    points
}

/// Abtastpunkte einer Übergangs-Randlinie (`segment + 1` Punkte, Endpunkte exakt).
pub fn taper_boundary_samples(
    sampler: &OffsetSampler<'_>,
    request: &TaperRequest,
    options: &EngineOptions,
) -> Vec<DVec3> {
    let control_points = taper_control_points(sampler, request, options);
    let tween = CatmullRomCurve3::chordal(control_points);
    tween_samples_by_key_path(
        sampler,
        request.p_start,
        request.p_end,
        request.segment,
        request.side_sign(),
        &tween,
        options.tween_dense_samples,
    )
}

/// Winkel zwischen zwei Vektoren; für Nullvektoren `π/2`.
fn angle_between(a: DVec3, b: DVec3) -> f64 {
    let denominator = (a.length_squared() * b.length_squared()).sqrt();
    if denominator == 0.0 {
        return FRAC_PI_2;
    }
    (a.dot(b) / denominator).clamp(-1.0, 1.0).acos()
}

fn flatten(p: DVec3) -> DVec3 {
    DVec3::new(p.x, 0.0, p.z)
}

/// Projiziert die Übergangskurve auf die Senkrechten der inneren Abtastpunkte der Referenzlinie.
///
/// `side_sign` richtet die Senkrechte zur Seite des Übergangs aus.
/// Die Suche läuft nur vorwärts. Findet sie für einen Punkt keinen besseren
/// Kandidaten mehr, wird der letzte Kandidat genommen.
pub fn tween_samples_by_key_path(
    sampler: &OffsetSampler<'_>,
    p_start: f64,
    p_end: f64,
    segment: usize,
    side_sign: f64,
    tween: &CatmullRomCurve3,
    dense_samples: usize,
) -> Vec<DVec3> {
    let segment = segment.max(1);
    let percents = sampler.percents(p_start, p_end, segment);
    let key_path = sampler.key_path();

    let dense = tween.densely_spaced_points(dense_samples);
    let dense_flat: Vec<DVec3> = dense.iter().copied().map(flatten).collect();

    let mut result = Vec::with_capacity(segment + 1);
    result.push(tween.point_at(0.0));

    let mut sample_index = 0;
    for &percent in &percents[1..segment] {
        let base = sampler.point_by_offset(percent, 0.0);
        let perpendicular =
            crate::core::horizontal_perpendicular(key_path.tangent_at(percent)) * side_sign;
        let base_flat = flatten(base);

        let mut last_angle: Option<f64> = None;
        let mut chosen = None;
        let mut j = sample_index;
        while j < dense_flat.len() {
            let angle = angle_between(dense_flat[j] - base_flat, perpendicular);
            match last_angle {
                Some(last) if angle > last => {
                    chosen = Some(j - 1);
                    sample_index = j;
                    break;
                }
                _ => last_angle = Some(angle),
            }
            j += 1;
        }

        let index = chosen.unwrap_or_else(|| {
            log::debug!(
                "Übergangs-Suche erschöpft bei {:.8}, nehme letzten Kandidaten",
                percent
            );
            sample_index = dense.len();
            dense.len() - 1
        });
        let mut point = dense[index];
        point.y = base.y;
        result.push(point);
    }

    result.push(tween.point_at(1.0));
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn setup() -> (CatmullRomCurve3, EngineOptions) {
        (
            CatmullRomCurve3::chordal(vec![DVec3::ZERO, DVec3::new(100.0, 0.0, 0.0)]),
            EngineOptions::default(),
        )
    }

    #[test]
    fn test_kontrollpunkte_sind_monoton_und_symmetrisch() {
        let (curve, options) = setup();
        let sampler = OffsetSampler::new(&curve, None, &options);
        let request = TaperRequest {
            p_start: 0.2,
            p_end: 0.6,
            start_offset: 3.5,
            end_offset: 7.0,
            segment: 20,
        };
        let points = taper_control_points(&sampler, &request, &options);
        assert_eq!(points.len(), 11);
        assert!(points.windows(2).all(|w| w[1].z >= w[0].z && w[1].x > w[0].x));
        assert_relative_eq!(points[5].z, 5.25, epsilon = 1e-9);
        // Symmetrisch um den Mittelpunkt
        assert_relative_eq!(points[2].z - 3.5, 7.0 - points[8].z, epsilon = 1e-9);
    }

    #[test]
    fn test_verbreiterung_trifft_endpunkte_exakt() {
        let (curve, options) = setup();
        let sampler = OffsetSampler::new(&curve, None, &options);
        let request = TaperRequest {
            p_start: 0.3,
            p_end: 0.5,
            start_offset: 3.5,
            end_offset: 7.0,
            segment: 20,
        };
        let samples = taper_boundary_samples(&sampler, &request, &options);
        assert_eq!(samples.len(), 21);
        assert_relative_eq!(samples[0].x, 30.0, epsilon = 1e-6);
        assert_relative_eq!(samples[0].z, 3.5, epsilon = 1e-9);
        assert_relative_eq!(samples[20].x, 50.0, epsilon = 1e-6);
        assert_relative_eq!(samples[20].z, 7.0, epsilon = 1e-9);
        // Innere Punkte liegen zwischen den Versätzen und wachsen monoton
        assert!(samples.windows(2).all(|w| w[1].z >= w[0].z - 1e-9));
        assert!(samples.iter().all(|p| p.z >= 3.5 - 1e-9 && p.z <= 7.0 + 1e-9));
    }

    #[test]
    fn test_verengung_auf_rueckwaerts_seite() {
        let (curve, options) = setup();
        let sampler = OffsetSampler::new(&curve, None, &options);
        let request = TaperRequest {
            p_start: 0.0,
            p_end: 1.0,
            start_offset: -7.0,
            end_offset: -3.5,
            segment: 30,
        };
        let samples = taper_boundary_samples(&sampler, &request, &options);
        assert_eq!(samples.len(), 31);
        assert_relative_eq!(samples[0].z, -7.0, epsilon = 1e-9);
        assert_relative_eq!(samples[30].z, -3.5, epsilon = 1e-9);
        assert!(samples.windows(2).all(|w| w[1].z >= w[0].z - 1e-9));
    }

    #[test]
    fn test_winkel_fuer_nullvektor() {
        assert_relative_eq!(angle_between(DVec3::ZERO, DVec3::X), FRAC_PI_2);
        assert_relative_eq!(angle_between(DVec3::Z, DVec3::Z), 0.0);
    }
}
