//! CRD schema extraction
//!
//! Reads Kubernetes CustomResourceDefinition documents from files or URLs
//! and writes each embedded OpenAPI v3 schema as a standalone JSON Schema
//! file.

pub mod cli;
pub mod config;
pub mod crd;
pub mod error;
pub mod pipeline;
pub mod schema;
pub mod source;

pub use error::{Error, Result};
