//! Application-Layer: Commands, Editor und Use-Cases.

pub mod command_log;
pub mod commands;
pub mod editor;
pub mod error;
pub mod use_cases;

pub use command_log::CommandLog;
pub use commands::{EditCommand, LaneAttribute, LaneRef};
pub use editor::RoadEditor;
pub use error::{BlockedEdit, EditError};
pub use use_cases::SplitRequest;
