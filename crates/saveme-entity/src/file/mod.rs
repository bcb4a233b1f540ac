//! File domain entities.

pub mod model;
pub mod size;

pub use model::File;
pub use size::format_file_size;
