//! Command line interface

use std::path::PathBuf;

use clap::Parser;

use crate::config::{Config, FilenameTemplate, FILENAME_FORMAT_ENV};

/// Extract OpenAPI v3 schemas from Kubernetes CRDs into JSON Schema files.
///
/// Each SOURCE is a local file or an http(s) URL holding one or more YAML
/// documents. One file is written per CRD version that carries a schema.
#[derive(Parser, Debug)]
#[command(name = "crd-schema-extract", version, about)]
pub struct Cli {
    /// CRD files or URLs to read
    #[arg(required = true, value_name = "SOURCE")]
    pub sources: Vec<String>,

    /// Output filename template; tokens: {kind}, {version}, {group}, {fullgroup}
    #[arg(long, env = FILENAME_FORMAT_ENV, value_name = "TEMPLATE")]
    pub filename_format: Option<String>,

    /// Directory output filenames are resolved against
    #[arg(long, default_value = ".", value_name = "DIR")]
    pub output_dir: PathBuf,
}

impl Cli {
    /// Build the run configuration from parsed arguments
    pub fn config(&self) -> Config {
        Config {
            filename_template: FilenameTemplate::new(
                self.filename_format.clone().unwrap_or_default(),
            ),
            output_dir: self.output_dir.clone(),
        }
    }
}
