//! Source reading for CRD inputs
//!
//! A source is either a local file path or an HTTP(S) URL.

mod reader;

pub use reader::*;
