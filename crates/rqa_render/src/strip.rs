use rqa_core::config::Delimiters;

use crate::scan::scan;

/// Remove every complete citation marker from finished answer text.
///
/// Surrounding whitespace is left as is, and an unterminated opening delimiter
/// stays in place verbatim.
pub fn strip_citations(text: &str, delimiters: Delimiters) -> String {
    scan(text, false, delimiters).plain_text()
}
