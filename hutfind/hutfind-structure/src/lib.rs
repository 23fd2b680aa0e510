extern crate hutfind_rng;
extern crate thiserror;

pub mod config;
pub mod placement;
pub mod position;
pub mod version;

pub use config::{StructureConfig, StructureKind};
pub use placement::place;
pub use position::{Position, RegionPosition};
pub use version::McVersion;
