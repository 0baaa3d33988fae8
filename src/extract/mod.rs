//! Module extraction: lift a subset of a framework module into a new
//! standalone module.
//!
//! The pipeline runs in phases: resolve paths, enumerate sources, walk
//! the include closure, materialize the destination tree, regenerate
//! build descriptors. Discovery is pure; only materialization and
//! descriptor generation write to disk.

pub mod descriptor;
pub mod headers;
pub mod materialize;
pub mod paths;
pub mod sources;

pub use descriptor::generate_descriptors;
pub use headers::{collect_headers, HeaderSet};
pub use materialize::materialize;
pub use paths::ModulePaths;
pub use sources::enumerate_sources;
