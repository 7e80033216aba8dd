//! Parallel-Abtastung entlang der Referenzlinie und verkettete Randlinien.

use crate::core::{horizontal_perpendicular, ElevationProfile, LaneSide, ParametricCurve};
use crate::shared::{sample_percents, EngineOptions};
use glam::DVec3;

/// Referenzpunkte und dazu parallel versetzte Punkte.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParallelSamples {
    /// Punkte auf der Referenzlinie (Höhe ggf. aus dem Höhenprofil)
    pub ref_points: Vec<DVec3>,
    /// Um den Versatz verschobene Punkte, gleiche Reihenfolge
    pub offset_points: Vec<DVec3>,
}

/// Abtaster über Referenzlinie und optionalem Höhenprofil einer Straße.
#[derive(Debug, Clone, Copy)]
pub struct OffsetSampler<'a> {
    key_path: &'a dyn ParametricCurve,
    elevation: Option<&'a ElevationProfile>,
    precision: u32,
    degenerate_distance: f64,
}

impl<'a> OffsetSampler<'a> {
    pub fn new(
        key_path: &'a dyn ParametricCurve,
        elevation: Option<&'a ElevationProfile>,
        options: &EngineOptions,
    ) -> Self {
        Self {
            key_path,
            elevation,
            precision: options.offset_sample_precision,
            degenerate_distance: options.degenerate_normal_distance,
        }
    }

    pub fn key_path(&self) -> &'a dyn ParametricCurve {
        self.key_path
    }

    /// Abtast-Prozente für `segment` Intervalle in `[p_start, p_end]`.
    pub fn percents(&self, p_start: f64, p_end: f64, segment: usize) -> Vec<f64> {
        sample_percents(p_start, p_end, segment, self.precision)
    }

    /// Referenzpunkt und horizontale Senkrechte bei `percent`.
    fn frame_at(&self, percent: f64) -> (DVec3, DVec3) {
        let mut point = self.key_path.point_at(percent);
        if let Some(elevation) = self.elevation {
            point.y = elevation.height_at(percent);
        }
        let perpendicular = horizontal_perpendicular(self.key_path.tangent_at(percent));
        (point, perpendicular)
    }

    /// Parallele Abtastung mit Betrag `offset` auf der Seite `side`.
    pub fn parallel_samples(
        &self,
        p_start: f64,
        p_end: f64,
        segment: usize,
        offset: f64,
        side: LaneSide,
    ) -> ParallelSamples {
        let signed = side.sign() * offset;
        let (ref_points, offset_points) = self
            .percents(p_start, p_end, segment)
            .into_iter()
            .map(|percent| {
                let (point, perpendicular) = self.frame_at(percent);
                (point, point + perpendicular * signed)
            })
            .unzip();
        ParallelSamples {
            ref_points,
            offset_points,
        }
    }

    /// Punkt bei `percent`, um den vorzeichenbehafteten `offset` entlang der Senkrechten versetzt.
    pub fn point_by_offset(&self, percent: f64, offset: f64) -> DVec3 {
        let (point, perpendicular) = self.frame_at(percent.min(1.0));
        point + perpendicular * offset
    }

    /// Horizontale Senkrechten an den Abtast-Prozenten.
    pub fn path_normals(&self, p_start: f64, p_end: f64, segment: usize) -> Vec<DVec3> {
        self.percents(p_start, p_end, segment)
            .into_iter()
            .map(|percent| horizontal_perpendicular(self.key_path.tangent_at(percent)))
            .collect()
    }

    /// Äußere Randlinie mit konstanter Breite, Punkt für Punkt von der inneren Randlinie aus.
    ///
    /// Die Richtung ist `inner - ref`. Liegen beide Punkte zu dicht beieinander,
    /// wird die Senkrechte der Referenzlinie (mit Seitenvorzeichen) genutzt.
    #[allow(clippy::too_many_arguments)]
    pub fn chained_samples(
        &self,
        ref_points: &[DVec3],
        inner_points: &[DVec3],
        width: f64,
        side: LaneSide,
        p_start: f64,
        p_end: f64,
        segment: usize,
    ) -> Vec<DVec3> {
        let count = ref_points.len().min(inner_points.len());
        let mut path_normals: Option<Vec<DVec3>> = None;

        (0..count)
            .map(|i| {
                let inner = inner_points[i];
                let mut normal = inner - ref_points[i];
                if normal.length() < self.degenerate_distance {
                    let normals = path_normals
                        .get_or_insert_with(|| self.path_normals(p_start, p_end, segment));
                    normal = normals.get(i).copied().unwrap_or(DVec3::ZERO) * side.sign();
                }
                inner + normal.normalize_or_zero() * width
            })
            .collect()
    }
}
