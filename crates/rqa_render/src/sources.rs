use serde::{Deserialize, Serialize};

use crate::render::RenderResult;
use crate::resolve::CitationPathResolver;

/// One row of the "Citations:" list shown under an answer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceEntry {
    pub index: usize,
    pub key: String,
    pub path: String,
    pub label: String,
}

pub fn source_entries<R>(result: &RenderResult, resolver: &R) -> Vec<SourceEntry>
where
    R: CitationPathResolver + ?Sized,
{
    result
        .citations
        .iter()
        .enumerate()
        .map(|(i, key)| SourceEntry {
            index: i + 1,
            key: key.clone(),
            path: resolver.resolve_path(key),
            label: format!("{}. {}", i + 1, key),
        })
        .collect()
}
