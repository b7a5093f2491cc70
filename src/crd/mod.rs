//! CustomResourceDefinition documents and their decoding

mod decoder;
mod document;

pub use decoder::*;
pub use document::*;
