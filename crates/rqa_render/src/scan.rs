use rqa_core::config::Delimiters;

/// A unit of scanned answer text, borrowed from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Prose to be escaped verbatim.
    Text(&'a str),
    /// A complete citation marker; holds the key without delimiters.
    Citation(&'a str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scan<'a> {
    pub segments: Vec<Segment<'a>>,
    /// Byte offset of the first opening delimiter with no closing delimiter after it.
    pub unterminated_at: Option<usize>,
    /// Byte length of the tail withheld while streaming; 0 when nothing was withheld.
    pub held_back: usize,
}

impl<'a> Scan<'a> {
    pub fn citation_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Citation(_)))
            .count()
    }

    /// Literal text only, markers dropped.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for seg in &self.segments {
            if let Segment::Text(t) = seg {
                out.push_str(t);
            }
        }
        out
    }
}

fn push_text<'a>(segments: &mut Vec<Segment<'a>>, text: &'a str) {
    if !text.is_empty() {
        segments.push(Segment::Text(text));
    }
}

/// Split `text` into prose and citation segments, left to right.
///
/// A marker is `open key close` where `key` is non-empty and contains no
/// `close`; the first `close` after an `open` ends it. `open` immediately
/// followed by `close` is literal text, as is any stray `close`.
///
/// When `is_streaming` is set, the first `open` that has no `close` anywhere
/// after it may still be growing into a marker, so it and everything after it
/// is withheld. Otherwise that span is emitted as literal text.
pub fn scan(text: &str, is_streaming: bool, delimiters: Delimiters) -> Scan<'_> {
    let open_len = delimiters.open.len_utf8();
    let close_len = delimiters.close.len_utf8();

    let mut segments = Vec::new();
    let mut text_start = 0usize;
    let mut pos = 0usize;

    while let Some(rel) = text[pos..].find(delimiters.open) {
        let open_at = pos + rel;
        let key_start = open_at + open_len;
        match text[key_start..].find(delimiters.close) {
            None => {
                // No close after this open means no close after any later open either.
                if is_streaming {
                    push_text(&mut segments, &text[text_start..open_at]);
                    return Scan {
                        segments,
                        unterminated_at: Some(open_at),
                        held_back: text.len() - open_at,
                    };
                }
                push_text(&mut segments, &text[text_start..]);
                return Scan {
                    segments,
                    unterminated_at: Some(open_at),
                    held_back: 0,
                };
            }
            Some(0) => {
                // Empty key.
                pos = key_start;
            }
            Some(key_len) => {
                push_text(&mut segments, &text[text_start..open_at]);
                segments.push(Segment::Citation(&text[key_start..key_start + key_len]));
                pos = key_start + key_len + close_len;
                text_start = pos;
            }
        }
    }

    push_text(&mut segments, &text[text_start..]);
    Scan {
        segments,
        unterminated_at: None,
        held_back: 0,
    }
}
