pub mod analyze;
pub mod capacity;
pub mod hide;
pub mod spectrum;
pub mod unveil;
pub mod unveil_raw;
