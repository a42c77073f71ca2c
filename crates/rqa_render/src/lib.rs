//! Citation-aware rendering of assistant answers.
//!
//! Raw answer text embeds source references as bracketed keys
//! (`See [report.pdf] for details.`). [`parse_answer_to_html`] turns that text,
//! complete or still streaming, into escaped markup with numbered citation
//! anchors plus the ordered list of cited keys. [`strip_citations`] produces
//! the same prose with markers removed.

pub mod citation;
pub mod followup;
pub mod render;
pub mod resolve;
pub mod scan;
pub mod sources;
pub mod strip;

pub use citation::CitationRegistry;
pub use followup::{compose_followup_email, FollowUpEmail};
pub use render::{
    escape_html, parse_answer_to_html, render, render_feedback, render_response, RenderResult,
    CITATION_CLASS,
};
pub use resolve::{CitationClickHandler, CitationPathResolver, ContentRouteResolver};
pub use rqa_core::config::Delimiters;
pub use scan::{scan, Scan, Segment};
pub use sources::{source_entries, SourceEntry};
pub use strip::strip_citations;
