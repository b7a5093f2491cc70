//! Schema normalization and JSON output

mod normalize;
mod writer;

pub use normalize::*;
pub use writer::*;
