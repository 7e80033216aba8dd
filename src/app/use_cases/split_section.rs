//! Use-Case: Section teilen, ohne oder mit Übergang.
//!
//! - `Plain`: zwei Sections, Fahrstreifen unverändert
//! - `Widen`: vor dem Übergang fehlt der Fahrstreifen, im Übergang wird er breiter
//! - `Narrow`: im Übergang wird er schmaler, danach fehlt er
//!
//! Alle Teile entstehen als unabhängige Kopien der ursprünglichen Section und
//! ersetzen sie danach in einem Schritt.

use super::guards::{blocked, ensure_not_last_lane};
use crate::app::{BlockedEdit, EditError};
use crate::core::{LaneId, Road, Section};
use crate::geometry::derive_sections;
use crate::mesh::MeshScope;
use crate::shared::{fixed_length, fixed_percent, EngineOptions};

/// Schnitt in absoluten Straßen-Prozenten (8 Nachkommastellen).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SplitRequest {
    Plain { at: f64 },
    /// Übergang über `[from, to]`, danach ein Fahrstreifen mehr
    Widen { from: f64, to: f64 },
    /// Übergang über `[from, to]`, danach ein Fahrstreifen weniger
    Narrow { from: f64, to: f64 },
}

impl SplitRequest {
    /// Aus den Schnittpunkten der linken und rechten Randlinie.
    ///
    /// Links vor rechts ergibt eine Verbreiterung, rechts vor links eine
    /// Verengung, gleiche Schnitte einen einfachen Schnitt.
    pub fn from_boundary_cuts(left: f64, right: f64) -> Self {
        let (left, right) = (fixed_percent(left), fixed_percent(right));
        if left < right {
            SplitRequest::Widen {
                from: left,
                to: right,
            }
        } else if left > right {
            SplitRequest::Narrow {
                from: right,
                to: left,
            }
        } else {
            SplitRequest::Plain { at: left }
        }
    }

    /// Aus Schnitten der Form `index/gesamt` relativ zu den Abtastpunkten einer Section.
    pub fn from_index_cuts(section: &Section, left: &str, right: &str) -> Option<Self> {
        let left = index_cut_percent(section, left)?;
        let right = index_cut_percent(section, right)?;
        Some(Self::from_boundary_cuts(left, right))
    }

    /// Kleinster und größter Schnitt.
    pub fn bounds(&self) -> (f64, f64) {
        match *self {
            SplitRequest::Plain { at } => (at, at),
            SplitRequest::Widen { from, to } | SplitRequest::Narrow { from, to } => {
                (from.min(to), from.max(to))
            }
        }
    }
}

fn index_cut_percent(section: &Section, cut: &str) -> Option<f64> {
    let (index, total) = cut.split_once('/')?;
    let index: f64 = index.trim().parse().ok()?;
    let total: f64 = total.trim().parse().ok()?;
    if total < 2.0 {
        return None;
    }
    let delta = section.span() / (total - 1.0);
    Some(fixed_percent(section.p_start + delta * index))
}

fn set_range(section: &mut Section, p_start: f64, p_end: f64, road_length: f64) {
    section.p_start = p_start;
    section.p_end = p_end;
    section.length = fixed_length((p_end - p_start) * road_length);
}

/// Teilt die Section, die den Schnitt enthält.
///
/// Liegen die Schnitte genau auf den Grenzen der Section, wird keine neue
/// Section eingefügt. Ein wiederholter identischer Schnitt ändert nichts.
pub fn split_section(
    road: &mut Road,
    lane_id: LaneId,
    request: SplitRequest,
    options: &EngineOptions,
) -> Result<MeshScope, EditError> {
    let (from, to) = request.bounds();
    let index = road
        .sections
        .iter()
        .position(|s| s.p_start <= from && to <= s.p_end)
        .ok_or_else(|| blocked(BlockedEdit::CutOutOfRange { from, to }))?;
    let section = &road.sections[index];
    if !section.has_lane(lane_id) {
        return Err(EditError::LaneNotFound {
            section: section.id,
            lane: lane_id,
        });
    }

    match request {
        SplitRequest::Plain { at } => split_plain(road, index, at, options),
        SplitRequest::Widen { .. } => {
            split_with_transition(road, index, lane_id, (from, to), true, options)
        }
        SplitRequest::Narrow { .. } => {
            split_with_transition(road, index, lane_id, (from, to), false, options)
        }
    }
}

fn split_plain(
    road: &mut Road,
    index: usize,
    at: f64,
    options: &EngineOptions,
) -> Result<MeshScope, EditError> {
    let original = road.sections[index].clone();
    if at <= original.p_start || at >= original.p_end {
        log::debug!("Schnitt {at} liegt auf der Grenze von Section {}", original.id);
        return Ok(MeshScope::Nothing);
    }
    if original.has_transition() {
        return Err(blocked(BlockedEdit::TransitionInSplitRange {
            section: original.id,
        }));
    }

    let (p_start, p_end) = (original.p_start, original.p_end);
    let mut front = original.clone();
    set_range(&mut front, p_start, at, road.length);
    let mut back = original;
    set_range(&mut back, at, p_end, road.length);
    back.reassign_boundary_ids(&mut road.boundary_ids);

    road.sections.splice(index..=index, [front, back]);
    road.renumber_sections();
    derive_sections(road, &[index, index + 1], options);

    log::info!("Straße {}: Section {} bei {} geteilt", road.id, index, at);
    Ok(MeshScope::All)
}

fn split_with_transition(
    road: &mut Road,
    index: usize,
    lane_id: LaneId,
    (from, to): (f64, f64),
    extends: bool,
    options: &EngineOptions,
) -> Result<MeshScope, EditError> {
    let target = &road.sections[index];
    let (p_start, p_end) = (target.p_start, target.p_end);
    if from == p_start && to == p_end {
        let unchanged = target
            .lane(lane_id)
            .is_some_and(|l| l.is_transition && l.is_extends == extends);
        if unchanged {
            log::debug!("Übergang {lane_id} in Section {} besteht bereits", target.id);
            return Ok(MeshScope::Nothing);
        }
    }
    if to <= from {
        return Err(blocked(BlockedEdit::CutOutOfRange { from, to }));
    }

    // Sections vor (verbreitern) bzw. nach (verengen) dem Übergang verlieren den Fahrstreifen
    let outside: Vec<usize> = road
        .lane_block_range(index, lane_id)
        .indices(road.sections.len())
        .into_iter()
        .filter(|&i| if extends { i < index } else { i > index })
        .filter(|&i| road.sections[i].has_lane(lane_id))
        .collect();

    if let Some(&i) = outside
        .iter()
        .chain(std::iter::once(&index))
        .find(|&&i| road.sections[i].has_transition())
    {
        return Err(blocked(BlockedEdit::TransitionInSplitRange {
            section: road.sections[i].id,
        }));
    }
    let mut removals = outside.clone();
    let removes_in_target = if extends { from > p_start } else { to < p_end };
    if removes_in_target {
        removals.push(index);
    }
    ensure_not_last_lane(road, &removals, lane_id).map_err(blocked)?;

    // Ab hier keine Prüfungen mehr
    for &i in &outside {
        road.sections[i].remove_lane_merging(lane_id);
    }

    let original = road.sections[index].clone();
    let mut parts = Vec::with_capacity(3);
    if from > p_start {
        let mut front = original.clone();
        set_range(&mut front, p_start, from, road.length);
        if extends {
            front.remove_lane_merging(lane_id);
        }
        parts.push(front);
    }
    let mut middle = original.clone();
    set_range(&mut middle, from, to, road.length);
    if let Some(lane) = middle.lane_mut(lane_id) {
        lane.is_transition = true;
        lane.is_extends = extends;
    }
    parts.push(middle);
    if to < p_end {
        let mut back = original;
        set_range(&mut back, to, p_end, road.length);
        if !extends {
            back.remove_lane_merging(lane_id);
        }
        parts.push(back);
    }
    for part in parts.iter_mut().skip(1) {
        part.reassign_boundary_ids(&mut road.boundary_ids);
    }

    let inserted = parts.len() - 1;
    road.sections.splice(index..=index, parts);
    road.renumber_sections();

    let touched: Vec<usize> = outside
        .iter()
        .map(|&i| if i > index { i + inserted } else { i })
        .chain(index..=index + inserted)
        .collect();
    derive_sections(road, &touched, options);

    log::info!(
        "Straße {}: Übergang für Fahrstreifen {} über [{}, {}] ({} neue Sections)",
        road.id,
        lane_id,
        from,
        to,
        inserted
    );
    Ok(MeshScope::All)
}
