use rqa_core::config::Delimiters;
use rqa_core::error::AppError;
use rqa_core::models::{ChatAppResponse, Feedback};
use serde::{Deserialize, Serialize};

use crate::citation::CitationRegistry;
use crate::scan::{scan, Segment};

pub const CITATION_CLASS: &str = "supContainer";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenderResult {
    pub html: String,
    /// Distinct keys in first-seen order; `citations[i]` is labelled `i + 1`.
    pub citations: Vec<String>,
}

impl RenderResult {
    /// Key shown with the 1-based `display_index`.
    pub fn key_for(&self, display_index: usize) -> Option<&str> {
        display_index
            .checked_sub(1)
            .and_then(|i| self.citations.get(i))
            .map(String::as_str)
    }
}

/// Append `s` to `out` with markup-special characters escaped.
///
/// Works per character, so escaping a prefix yields a prefix of the escaped whole.
pub fn push_escaped(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    push_escaped(&mut out, s);
    out
}

fn push_citation(out: &mut String, key: &str, display_index: usize) {
    out.push_str("<a class=\"");
    out.push_str(CITATION_CLASS);
    out.push_str("\" title=\"");
    push_escaped(out, key);
    out.push_str("\" data-citation=\"");
    push_escaped(out, key);
    out.push_str("\"><sup>");
    out.push_str(&display_index.to_string());
    out.push_str("</sup></a>");
}

/// Render scanned segments with a fresh registry.
pub fn render(segments: &[Segment<'_>]) -> RenderResult {
    let mut registry = CitationRegistry::new();
    let mut html = String::new();
    for seg in segments {
        match *seg {
            Segment::Text(t) => push_escaped(&mut html, t),
            Segment::Citation(key) => {
                let idx = registry.resolve(key);
                push_citation(&mut html, key, idx);
            }
        }
    }
    RenderResult {
        html,
        citations: registry.into_citations(),
    }
}

/// Scan and render `text` from scratch.
///
/// Call again with the longer text on every streamed update; nothing is carried
/// between calls, so successive prefixes render as non-retracting extensions.
pub fn parse_answer_to_html(text: &str, is_streaming: bool, delimiters: Delimiters) -> RenderResult {
    let scanned = scan(text, is_streaming, delimiters);
    if let Some(at) = scanned.unterminated_at {
        if scanned.held_back > 0 {
            log::debug!("holding back {} bytes of a partial citation", scanned.held_back);
        } else {
            log::warn!("unterminated citation marker at byte {at}; rendering as text");
        }
    }
    let result = render(&scanned.segments);
    log::debug!(
        "rendered {} segments, {} distinct citations",
        scanned.segments.len(),
        result.citations.len()
    );
    result
}

pub fn render_response(
    response: &ChatAppResponse,
    is_streaming: bool,
    delimiters: Delimiters,
) -> Result<RenderResult, AppError> {
    let text = response.answer_text()?;
    Ok(parse_answer_to_html(text, is_streaming, delimiters))
}

/// Stored feedback always carries a finished answer.
pub fn render_feedback(feedback: &Feedback, delimiters: Delimiters) -> Result<RenderResult, AppError> {
    render_response(&feedback.answer, false, delimiters)
}
