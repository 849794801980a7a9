//! Builder style entry points, one module per operation.

pub mod hide;
pub mod unveil;
pub mod unveil_raw;
