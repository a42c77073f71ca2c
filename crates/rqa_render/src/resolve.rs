use crate::render::RenderResult;

/// Maps a citation key to the path or URL its source is served from.
///
/// Only called when a citation is clicked or a sources list is built, never
/// while scanning or rendering.
pub trait CitationPathResolver {
    fn resolve_path(&self, key: &str) -> String;
}

impl<F> CitationPathResolver for F
where
    F: Fn(&str) -> String,
{
    fn resolve_path(&self, key: &str) -> String {
        self(key)
    }
}

/// Resolves keys against the backend's `/content/` route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentRouteResolver {
    base: String,
}

impl ContentRouteResolver {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }
}

impl CitationPathResolver for ContentRouteResolver {
    fn resolve_path(&self, key: &str) -> String {
        format!("{}/content/{}", self.base, key)
    }
}

/// Turns a click on a rendered citation into one `on_citation_clicked(path)` call.
pub struct CitationClickHandler<R, F> {
    resolver: R,
    on_citation_clicked: F,
}

impl<R, F> CitationClickHandler<R, F>
where
    R: CitationPathResolver,
    F: FnMut(&str),
{
    pub fn new(resolver: R, on_citation_clicked: F) -> Self {
        Self {
            resolver,
            on_citation_clicked,
        }
    }

    /// `key` is the value of the clicked element's `data-citation` attribute.
    pub fn click(&mut self, key: &str) {
        let path = self.resolver.resolve_path(key);
        log::debug!("citation clicked: key={key} path={path}");
        (self.on_citation_clicked)(&path);
    }

    /// Click the citation labelled `display_index`. Returns false, without
    /// invoking the callback, when no such label was rendered.
    pub fn click_index(&mut self, result: &RenderResult, display_index: usize) -> bool {
        match result.key_for(display_index) {
            Some(key) => {
                self.click(key);
                true
            }
            None => false,
        }
    }
}
