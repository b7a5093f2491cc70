//! Extraction pipeline
//!
//! Source reader -> document decoder -> normalizer and writer, one source at
//! a time. Failures are contained to the source, document or file they occur
//! in and counted in the [`RunReport`].

use tracing::{error, info, info_span, Instrument};

use crate::config::{Config, FilenameTemplate};
use crate::crd::{documents, CrdDocument, ExtractedSchema};
use crate::schema::{normalize, SchemaWriter};
use crate::source::SourceReader;

/// Outcome counters for one run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub sources_read: usize,
    pub sources_failed: usize,
    pub documents_decoded: usize,
    pub documents_failed: usize,
    pub files_written: usize,
    pub files_failed: usize,
}

impl RunReport {
    /// Whether any source, document or file was skipped
    pub fn has_failures(&self) -> bool {
        self.sources_failed + self.documents_failed + self.files_failed > 0
    }
}

/// Runs the extraction pipeline over a list of sources
#[derive(Debug, Clone)]
pub struct Extractor {
    reader: SourceReader,
    writer: SchemaWriter,
    template: FilenameTemplate,
}

impl Extractor {
    /// Create an extractor
    pub fn new(reader: SourceReader, config: &Config) -> Self {
        Self {
            reader,
            writer: SchemaWriter::new(&config.output_dir),
            template: config.filename_template.clone(),
        }
    }

    /// Process every source in order and log a summary
    pub async fn run<I, S>(&self, sources: I) -> RunReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut report = RunReport::default();
        for source in sources {
            let source = source.as_ref();
            self.process_source(source, &mut report)
                .instrument(info_span!("source", source))
                .await;
        }

        info!(
            sources_read = report.sources_read,
            sources_failed = report.sources_failed,
            documents_decoded = report.documents_decoded,
            documents_failed = report.documents_failed,
            files_written = report.files_written,
            files_failed = report.files_failed,
            "Extraction finished"
        );
        report
    }

    /// Read one source and extract every schema it holds
    pub async fn process_source(&self, source: &str, report: &mut RunReport) {
        let data = match self.reader.read(source).await {
            Ok(data) => data,
            Err(e) => {
                error!(error = %e, source, "Failed to read source, skipping");
                report.sources_failed += 1;
                return;
            }
        };
        report.sources_read += 1;

        self.process_bytes(&data, report);
    }

    /// Decode a YAML stream and extract every schema it holds
    pub fn process_bytes(&self, data: &[u8], report: &mut RunReport) {
        for document in documents(data) {
            match document {
                Ok(document) => {
                    report.documents_decoded += 1;
                    self.process_document(document, report);
                }
                Err(e) => {
                    error!(error = %e, "Failed to unmarshal YAML document, skipping");
                    report.documents_failed += 1;
                }
            }
        }
    }

    fn process_document(&self, document: CrdDocument, report: &mut RunReport) {
        for schema in document.into_schemas() {
            if self.emit(schema) {
                report.files_written += 1;
            } else {
                report.files_failed += 1;
            }
        }
    }

    /// Normalize and write one schema, returning whether it was written
    fn emit(&self, schema: ExtractedSchema) -> bool {
        let filename = self.template.render(&schema);
        let ExtractedSchema {
            kind,
            version,
            payload,
            ..
        } = schema;

        match self.writer.write(&normalize(payload), &filename) {
            Ok(path) => {
                info!(kind, version, filename = %path.display(), "JSON schema written");
                true
            }
            Err(e) => {
                error!(error = %e, kind, version, filename, "Failed to write schema, skipping");
                false
            }
        }
    }
}
