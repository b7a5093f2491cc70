//! Schema file output
//!
//! Writes normalized schemas as two-space indented JSON. Existing files are
//! overwritten; a failed write may leave a truncated file behind.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{Error, Result};

/// Permission bits for new schema files (owner rw, others r)
#[cfg(unix)]
const SCHEMA_FILE_MODE: u32 = 0o644;

/// Writes schema files relative to an output directory
#[derive(Debug, Clone)]
pub struct SchemaWriter {
    output_dir: PathBuf,
}

impl SchemaWriter {
    /// Create a writer resolving filenames against `output_dir`
    ///
    /// Absolute filenames ignore the output directory.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Serialize `schema` and write it to `filename`
    ///
    /// Missing parent directories are created. Returns the path written.
    pub fn write(&self, schema: &Value, filename: &str) -> Result<PathBuf> {
        let json = serde_json::to_vec_pretty(schema)?;

        let path = self.output_dir.join(filename);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::write(parent, e))?;
        }

        write_file(&path, &json)?;
        Ok(path)
    }
}

/// Create or truncate `path` and write `content` to it
fn write_file(path: &Path, content: &[u8]) -> Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(SCHEMA_FILE_MODE);
    }

    let mut file = options.open(path).map_err(|e| Error::write(path, e))?;
    file.write_all(content).map_err(|e| Error::write(path, e))?;
    file.flush().map_err(|e| Error::write(path, e))?;
    Ok(())
}
