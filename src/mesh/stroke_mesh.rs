//! Markierungs-Meshes (durchgezogen / gestrichelt) entlang einer Randlinie.
//!
//! Die Abtastpunkte der Randlinie werden erneut zentripetal interpoliert,
//! das Band liegt entlang der horizontalen Senkrechten dieser Kurve.

use super::lane_mesh::build_lane_mesh;
use super::types::{ensure_finite, MeshData, MeshError, MeshVertex};
use crate::core::{
    horizontal_perpendicular, BoundaryMark, CatmullRomCurve3, LineStyle, MarkColor,
    ParametricCurve,
};
use crate::shared::{fixed_precision, sample_percents, EngineOptions, PERCENT_PRECISION};
use glam::DVec3;

/// Nachkommastellen der Strich-/Lückenanteile.
const DASH_PERCENT_PRECISION: u32 = 4;

/// Mesh einer einzelnen Linie einer Markierung.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeMesh {
    pub style: LineStyle,
    pub color: MarkColor,
    pub bold: bool,
    pub mesh: MeshData,
}

/// Querschnitt eines Strichs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeProfile {
    pub width: f64,
    /// Versatz der Innenkante; nur bei Doppellinien relevant
    pub offset: f64,
    /// Einzellinie: mittig um die Randlinie
    pub single: bool,
}

impl StrokeProfile {
    /// Innen- und Außenkante bei `percent`.
    fn edges(&self, curve: &dyn ParametricCurve, percent: f64) -> (DVec3, DVec3) {
        let reference = curve.point_at(percent);
        let perpendicular = horizontal_perpendicular(curve.tangent_at(percent));
        if self.single {
            let half = self.width / 2.0;
            (reference - perpendicular * half, reference + perpendicular * half)
        } else {
            let outer = if self.offset > 0.0 {
                self.offset + self.width
            } else {
                self.offset - self.width
            };
            (
                reference + perpendicular * self.offset,
                reference + perpendicular * outer,
            )
        }
    }

    /// Vertex-Reihenfolge so, dass die Dreiecke nach oben zeigen.
    fn ordered(&self, inner: DVec3, outer: DVec3) -> (DVec3, DVec3) {
        if self.offset > 0.0 {
            (inner, outer)
        } else {
            (outer, inner)
        }
    }
}

/// Durchgezogene Linie: ein Punktpaar je Abtastpunkt der Kurve.
pub fn build_solid_stroke(
    curve: &dyn ParametricCurve,
    segment: usize,
    profile: &StrokeProfile,
) -> Result<MeshData, MeshError> {
    let mut first = Vec::with_capacity(segment + 1);
    let mut second = Vec::with_capacity(segment + 1);
    for percent in sample_percents(0.0, 1.0, segment, PERCENT_PRECISION) {
        let (inner, outer) = profile.edges(curve, percent);
        let (a, b) = profile.ordered(inner, outer);
        first.push(a);
        second.push(b);
    }
    build_lane_mesh(&first, &second)
}

/// Gestrichelte Linie: Striche der Länge `unit_length`, Lücken von `gap_length`.
///
/// Jeder Strich wird in `ceil(unit_length)` Schritte unterteilt; zwischen dem
/// letzten Punkt eines Strichs und dem ersten des nächsten entsteht kein Dreieck.
pub fn build_dashed_stroke(
    curve: &dyn ParametricCurve,
    profile: &StrokeProfile,
    unit_length: f64,
    gap_length: f64,
) -> Result<MeshData, MeshError> {
    let curve_length = fixed_precision(curve.length(), 0);
    if curve_length <= 0.0 {
        return Ok(MeshData::default());
    }
    let unit_space = fixed_precision(unit_length / curve_length, DASH_PERCENT_PRECISION);
    let gap_space = fixed_precision(gap_length / curve_length, DASH_PERCENT_PRECISION);
    let unit_segment = unit_length.ceil().max(1.0) as usize;
    let unit_delta = unit_space / unit_segment as f64;
    if unit_delta <= 0.0 && gap_space <= 0.0 {
        log::debug!("Strichmuster bei Länge {curve_length} nicht darstellbar");
        return Ok(MeshData::default());
    }

    let mut mesh = MeshData::default();
    let mut dash_starts = Vec::new();
    let mut percent = 0.0;
    let mut count = 0;
    while percent <= 1.0 {
        if count == 0 {
            dash_starts.push(mesh.vertices.len() / 2);
        }
        let (inner, outer) = profile.edges(curve, percent);
        let (a, b) = profile.ordered(inner, outer);
        let u = percent as f32;
        mesh.vertices.push(MeshVertex::new(a, [u, 0.0]));
        mesh.vertices.push(MeshVertex::new(b, [u, 1.0]));

        count += 1;
        if count > unit_segment {
            percent += gap_space;
            count = 0;
        } else {
            percent += unit_delta;
        }
    }

    let pairs = mesh.vertices.len() / 2;
    for i in 0..pairs.saturating_sub(1) {
        if dash_starts.binary_search(&(i + 1)).is_ok() {
            continue;
        }
        mesh.push_quad(i);
    }
    Ok(mesh)
}

/// Baut die Strich-Meshes aller Linien einer Markierung.
///
/// Einzellinien liegen mittig, bei Doppellinien die erste mit `+mark_offset`
/// und die zweite mit `-mark_offset`. Fette Markierungen sind doppelt so breit.
pub fn build_stroke_meshes(
    samples: &[DVec3],
    mark: BoundaryMark,
    options: &EngineOptions,
) -> Result<Vec<StrokeMesh>, MeshError> {
    let parsed = mark.parse();
    if parsed.line_styles.is_empty() || samples.len() < 2 {
        return Ok(Vec::new());
    }
    ensure_finite(samples)?;

    let curve = CatmullRomCurve3::centripetal(samples.to_vec());
    let single = parsed.line_styles.len() == 1;
    let width = if parsed.bold {
        options.mark_width * 2.0
    } else {
        options.mark_width
    };

    parsed
        .line_styles
        .iter()
        .enumerate()
        .map(|(i, style)| {
            let profile = StrokeProfile {
                width,
                offset: if i == 0 {
                    options.mark_offset
                } else {
                    -options.mark_offset
                },
                single,
            };
            let mesh = match style {
                LineStyle::Solid => build_solid_stroke(&curve, samples.len() - 1, &profile)?,
                LineStyle::Dash => build_dashed_stroke(
                    &curve,
                    &profile,
                    options.mark_unit_length,
                    options.mark_gap_length,
                )?,
            };
            Ok(StrokeMesh {
                style: *style,
                color: parsed.color,
                bold: parsed.bold,
                mesh,
            })
        })
        .collect()
}
