//! Multi-document YAML decoder
//!
//! Splits a byte stream on YAML document markers and decodes each document
//! independently, so a malformed document only costs that document.

use serde_yaml::Value;

use crate::error::{Error, Result};

use super::document::CrdDocument;

/// Decode every document in `input`, lazily and in order
///
/// Each call starts again from the beginning of the input.
pub fn documents(input: &[u8]) -> Documents<'_> {
    Documents {
        rest: input,
        index: 0,
    }
}

/// Iterator over the CRD documents of a YAML stream
///
/// Documents holding only whitespace, comments or directives are skipped
/// and do not advance the document index.
#[derive(Debug, Clone)]
pub struct Documents<'a> {
    rest: &'a [u8],
    index: usize,
}

impl<'a> Iterator for Documents<'a> {
    type Item = Result<CrdDocument>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.rest.is_empty() {
            let (chunk, rest) = split_document(self.rest);
            self.rest = rest;

            if !chunk.split(|&b| b == b'\n').any(has_content) {
                continue;
            }

            self.index += 1;
            let document = self.index;
            return Some(decode(chunk).map_err(|source| Error::Decode { document, source }));
        }
        None
    }
}

/// Decode one document, resolving `<<` merge keys first
fn decode(chunk: &[u8]) -> serde_yaml::Result<CrdDocument> {
    let mut value: Value = serde_yaml::from_slice(chunk)?;
    value.apply_merge()?;
    serde_yaml::from_value(value)
}

/// Split off the first document, returning it and the remaining input
///
/// A `---` line ends the current document only once it has content; an
/// earlier marker becomes the document's own header and anything before it
/// is dropped. A `...` line always ends the current document and is dropped.
fn split_document(input: &[u8]) -> (&[u8], &[u8]) {
    let mut start = 0;
    let mut offset = 0;
    let mut seen_content = false;

    while offset < input.len() {
        let line_end = input[offset..]
            .iter()
            .position(|&b| b == b'\n')
            .map_or(input.len(), |pos| offset + pos + 1);
        let line = &input[offset..line_end];

        if is_marker(line, b"---") {
            if seen_content {
                return (&input[start..offset], &input[offset..]);
            }
            start = offset;
        }
        if is_marker(line, b"...") {
            return (&input[start..offset], &input[line_end..]);
        }

        seen_content |= has_content(line);
        offset = line_end;
    }

    (&input[start..], &[])
}

/// Whether a line is the given three-character marker at column 0
fn is_marker(line: &[u8], marker: &[u8]) -> bool {
    line.strip_prefix(marker)
        .is_some_and(|rest| rest.first().map_or(true, |b| b.is_ascii_whitespace()))
}

/// Whether a line carries document content
///
/// Blank lines, comments, `%` directives and a bare `---` marker do not.
fn has_content(line: &[u8]) -> bool {
    let line = match line.strip_prefix(b"---") {
        Some(rest) if is_marker(line, b"---") => rest,
        _ => line,
    };
    let line = line.trim_ascii();
    !(line.is_empty() || line.starts_with(b"#") || line.starts_with(b"%"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<std::result::Result<String, usize>> {
        documents(input.as_bytes())
            .map(|doc| match doc {
                Ok(doc) => Ok(doc.spec.names.kind),
                Err(Error::Decode { document, .. }) => Err(document),
                Err(other) => panic!("unexpected error: {other}"),
            })
            .collect()
    }

    #[test]
    fn test_single_document_without_markers() {
        assert_eq!(kinds("spec:\n  names:\n    kind: Foo\n"), vec![Ok("Foo".to_string())]);
    }

    #[test]
    fn test_multiple_documents_in_order() {
        let input = "---\nspec:\n  names:\n    kind: A\n---\nspec:\n  names:\n    kind: B\n---\nspec:\n  names:\n    kind: C\n";
        assert_eq!(
            kinds(input),
            vec![Ok("A".to_string()), Ok("B".to_string()), Ok("C".to_string())]
        );
    }

    #[test]
    fn test_malformed_document_does_not_stop_stream() {
        let input = "spec:\n  names: [unclosed\n---\nspec:\n  names:\n    kind: Good\n";
        assert_eq!(kinds(input), vec![Err(1), Ok("Good".to_string())]);
    }

    #[test]
    fn test_shape_mismatch_is_per_document() {
        let input = "spec:\n  names:\n    kind: [a]\n---\nspec:\n  names:\n    kind: Next\n";
        assert_eq!(kinds(input), vec![Err(1), Ok("Next".to_string())]);
    }

    #[test]
    fn test_blank_and_comment_documents_are_skipped() {
        let input = "# header\n---\n\n---\n# only a comment\n---\nspec:\n  names:\n    kind: Real\n---\n";
        assert_eq!(kinds(input), vec![Ok("Real".to_string())]);
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        assert!(documents(b"").next().is_none());
        assert!(documents(b"\n\n").next().is_none());
    }

    #[test]
    fn test_document_end_marker_and_directives() {
        let input = "%YAML 1.2\n---\nspec:\n  names:\n    kind: A\n...\n---\nspec:\n  names:\n    kind: B\n";
        assert_eq!(kinds(input), vec![Ok("A".to_string()), Ok("B".to_string())]);
    }

    #[test]
    fn test_inline_content_after_marker() {
        let input = "--- {spec: {names: {kind: A}}}\n--- {spec: {names: {kind: B}}}\n";
        assert_eq!(kinds(input), vec![Ok("A".to_string()), Ok("B".to_string())]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let input = "spec:\r\n  names:\r\n    kind: A\r\n---\r\nspec:\r\n  names:\r\n    kind: B\r\n";
        assert_eq!(kinds(input), vec![Ok("A".to_string()), Ok("B".to_string())]);
    }

    #[test]
    fn test_merge_keys_are_resolved() {
        let input = r#"
spec:
  names:
    kind: Widget
  versions:
    - &v1
      name: v1
      schema:
        openAPIV3Schema:
          type: object
    - <<: *v1
      name: v2
"#;
        let doc = documents(input.as_bytes()).next().unwrap().unwrap();
        let versions: Vec<String> = doc.into_schemas().into_iter().map(|s| s.version).collect();

        assert_eq!(versions, vec!["v1", "v2"]);
    }

    #[test]
    fn test_invalid_merge_is_per_document() {
        let input = "spec:\n  names:\n    <<: 5\n---\nspec:\n  names:\n    kind: B\n";
        assert_eq!(kinds(input), vec![Err(1), Ok("B".to_string())]);
    }

    #[test]
    fn test_iteration_restarts_per_call() {
        let input = b"spec:\n  names:\n    kind: A\n";
        assert_eq!(documents(input).count(), 1);
        assert_eq!(documents(input).count(), 1);
    }
}
