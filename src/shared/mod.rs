//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält die Engine-Konfiguration und numerische Hilfsfunktionen,
//! die von `core`, `geometry`, `app` und `mesh` gemeinsam genutzt werden.

pub mod options;
mod precision;

pub use options::EngineOptions;
pub use precision::{
    fixed_length, fixed_percent, fixed_precision, sample_percents, sample_space,
    within_deviation, LENGTH_PRECISION, PERCENT_PRECISION,
};
