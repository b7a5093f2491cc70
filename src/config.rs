//! Run configuration
//!
//! The filename template comes from `--filename-format` or the
//! `FILENAME_FORMAT` environment variable; empty means the default.

use std::path::PathBuf;

use crate::crd::ExtractedSchema;

/// Environment variable overriding the filename template
pub const FILENAME_FORMAT_ENV: &str = "FILENAME_FORMAT";

/// Template used when none is configured
pub const DEFAULT_FILENAME_FORMAT: &str = "{kind}_{version}";

/// Extension appended to every derived filename
const SCHEMA_EXTENSION: &str = ".json";

/// Output filename template
///
/// Supported tokens are replaced literally: `{kind}`, `{version}`,
/// `{fullgroup}` (the whole API group) and `{group}` (its first label).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameTemplate(String);

impl FilenameTemplate {
    /// Create a template, falling back to the default when empty
    pub fn new(template: impl Into<String>) -> Self {
        let template = template.into();
        if template.is_empty() {
            Self::default()
        } else {
            Self(template)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derive the lower-cased `.json` filename for a schema
    pub fn render(&self, schema: &ExtractedSchema) -> String {
        let short_group = schema.group.split('.').next().unwrap_or_default();
        let filename = self
            .0
            .replace("{kind}", &schema.kind)
            .replace("{version}", &schema.version)
            .replace("{fullgroup}", &schema.group)
            .replace("{group}", short_group);
        filename.to_lowercase() + SCHEMA_EXTENSION
    }
}

impl Default for FilenameTemplate {
    fn default() -> Self {
        Self(DEFAULT_FILENAME_FORMAT.to_string())
    }
}

/// Settings for one extraction run
#[derive(Debug, Clone)]
pub struct Config {
    /// Template for output filenames
    pub filename_template: FilenameTemplate,
    /// Directory relative filenames resolve against
    pub output_dir: PathBuf,
}
