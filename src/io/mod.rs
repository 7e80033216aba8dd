//! JSON Import/Export des persistierten Straßenformats.

pub mod reader;
pub mod records;
pub mod writer;

pub use reader::{centerline_key_path, parse_road_json, road_from_record};
pub use records::RoadRecord;
pub use writer::{road_record, write_road_json};
