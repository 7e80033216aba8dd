//! Use-Cases: je eine Bearbeitung einer einzelnen Straße.
//!
//! Jede Funktion prüft zuerst alle Vorbedingungen, mutiert danach die Straße
//! und meldet, welche Meshes neu erzeugt werden müssen.

mod add_lane;
mod boundary_mark;
mod guards;
mod key_path;
mod lane_attributes;
mod lane_width;
mod remove_lane;
mod split_section;

pub use add_lane::add_lane;
pub use boundary_mark::update_boundary_mark;
pub use key_path::{set_elevation, update_key_path};
pub use lane_attributes::update_lane_attribute;
pub use lane_width::resize_lane_width;
pub use remove_lane::remove_lane;
pub use split_section::{split_section, SplitRequest};
