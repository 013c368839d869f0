use std::ops::Range;

use crate::error::{Result, UpdaterError};

pub const START_MARKER: &str = "<!-- public-projects:start -->";
pub const END_MARKER: &str = "<!-- public-projects:end -->";

/// Literal strings delimiting the generated region of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    pub start: String,
    pub end: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            start: START_MARKER.to_string(),
            end: END_MARKER.to_string(),
        }
    }
}

impl Markers {
    /// Byte range of the first `start ... end` span, markers included.
    pub fn locate(&self, document: &str) -> Result<Range<usize>> {
        self.spans(document)
            .into_iter()
            .next()
            .ok_or_else(|| self.not_found(document))
    }

    fn not_found(&self, document: &str) -> UpdaterError {
        let missing = if document.contains(&self.start) {
            format!("missing end marker {} after {}", self.end, self.start)
        } else {
            format!("missing start marker {}", self.start)
        };
        UpdaterError::MarkersNotFound(missing)
    }

    /// Every non-overlapping `start ... end` span in document order. Each
    /// span ends at the first end marker after its start marker.
    pub fn spans(&self, document: &str) -> Vec<Range<usize>> {
        let mut spans = Vec::new();
        let mut cursor = 0;

        while let Some(offset) = document[cursor..].find(&self.start) {
            let start = cursor + offset;
            let after_start = start + self.start.len();
            let Some(end_offset) = document[after_start..].find(&self.end) else {
                break;
            };
            let end = after_start + end_offset + self.end.len();
            if end == cursor {
                break;
            }
            spans.push(start..end);
            cursor = end;
        }

        spans
    }
}

/// Replace every marker-delimited span of `document` with `section`, keeping
/// both markers on their own lines around it.
pub fn replace_block(document: &str, section: &str, markers: &Markers) -> Result<String> {
    let spans = markers.spans(document);
    if spans.is_empty() {
        return Err(markers.not_found(document));
    }

    let block = format!("{}\n{}\n{}", markers.start, section, markers.end);
    let mut updated = String::with_capacity(document.len() + block.len() * spans.len());
    let mut cursor = 0;
    for span in spans {
        updated.push_str(&document[cursor..span.start]);
        updated.push_str(&block);
        cursor = span.end;
    }
    updated.push_str(&document[cursor..]);

    Ok(updated)
}
