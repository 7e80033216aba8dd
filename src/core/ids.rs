//! Vergabe von Randlinien-IDs.

use serde::{Deserialize, Serialize};

/// ID einer Randlinie (eindeutig innerhalb einer Straße).
pub type BoundaryId = u64;
/// Vorzeichenbehaftete Fahrstreifen-ID (negativ = vorwärts, positiv = rückwärts).
pub type LaneId = i32;
/// Fortlaufende Section-ID (entspricht dem Index in der Straße).
pub type SectionId = u32;
/// ID einer Straße.
pub type RoadId = u64;

/// Liefert neue, noch nicht vergebene Randlinien-IDs.
pub trait BoundaryIdAllocator {
    /// Nächste freie ID.
    fn next_id(&mut self) -> BoundaryId;
}

/// Monoton steigender Zähler, an die Straße gebunden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MonotonicBoundaryIds {
    next: BoundaryId,
}

impl MonotonicBoundaryIds {
    /// Zähler, der bei `first` beginnt.
    pub fn starting_at(first: BoundaryId) -> Self {
        Self { next: first }
    }

    /// Setzt den Zähler hinter die größte vorhandene ID (z.B. nach dem Laden).
    pub fn resume_after<I>(existing: I) -> Self
    where
        I: IntoIterator<Item = BoundaryId>,
    {
        let next = existing
            .into_iter()
            .max()
            .map(|max| max + 1)
            .unwrap_or(0);
        Self { next }
    }

    /// Die ID, die als nächstes vergeben würde.
    pub fn peek(&self) -> BoundaryId {
        self.next
    }
}

impl BoundaryIdAllocator for MonotonicBoundaryIds {
    fn next_id(&mut self) -> BoundaryId {
        let id = self.next;
        self.next += 1;
        id
    }
}
