//! Placeholder templates resolved against a reading.
//!
//! A placeholder is a name between two [`DELIMITER`] characters, e.g.
//! `"Camera $num$"`. Rendering replaces it with the string form of the
//! reading's datapoint of that name. Also understood:
//!
//! - `$ASSET$` resolves to the reading's asset name when no datapoint is
//!   called `ASSET`.
//! - `$name|fallback$` inserts `fallback` when `name` does not resolve.
//!
//! Anything that does not resolve is copied through literally, delimiters
//! included.

use mf_types::Reading;

/// Placeholder delimiter.
pub const DELIMITER: char = '$';

/// Placeholder name that resolves to the reading's asset name.
pub const ASSET_PLACEHOLDER: &str = "ASSET";

/// Separator between a placeholder name and its fallback text.
const FALLBACK_SEPARATOR: char = '|';

/// Text between two delimiters, split once into name and fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Segment {
    text: String,
    fallback_at: Option<usize>,
}

impl Segment {
    fn parse(text: &str) -> Self {
        Self {
            text: text.to_string(),
            fallback_at: text.find(FALLBACK_SEPARATOR),
        }
    }

    fn resolve(&self, reading: &Reading) -> Option<String> {
        if let Some(value) = lookup(&self.text, reading) {
            return Some(value);
        }
        let at = self.fallback_at?;
        let name = &self.text[..at];
        let fallback = &self.text[at + FALLBACK_SEPARATOR.len_utf8()..];
        lookup(name, reading).or_else(|| Some(fallback.to_string()))
    }
}

/// A string value that may contain placeholders.
///
/// The text is split at every delimiter when the template is built. Which
/// delimiters pair up depends on what resolves, so pairing is decided while
/// rendering: a segment followed by a delimiter is a placeholder candidate,
/// and when it does not resolve its closing delimiter may open the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Parses a template from its source text.
    pub fn new(source: impl AsRef<str>) -> Self {
        let segments = source.as_ref().split(DELIMITER).map(Segment::parse).collect();
        Self { segments }
    }

    /// Returns true if the text cannot contain a placeholder.
    #[inline]
    pub fn is_static(&self) -> bool {
        self.segments.len() < 3
    }

    /// Renders the template against one reading.
    pub fn render(&self, reading: &Reading) -> String {
        let Some((head, rest)) = self.segments.split_first() else {
            return String::new();
        };

        let mut out = head.text.clone();
        let mut i = 0;

        // rest[i] sits right after a delimiter; it is a candidate when another
        // delimiter follows it.
        while i + 1 < rest.len() {
            match rest[i].resolve(reading) {
                Some(value) => {
                    out.push_str(&value);
                    out.push_str(&rest[i + 1].text);
                    i += 2;
                }
                None => {
                    out.push(DELIMITER);
                    out.push_str(&rest[i].text);
                    i += 1;
                }
            }
        }

        if let Some(tail) = rest.get(i) {
            out.push(DELIMITER);
            out.push_str(&tail.text);
        }
        out
    }
}

fn lookup(name: &str, reading: &Reading) -> Option<String> {
    if name.is_empty() {
        return None;
    }
    if let Some(dp) = reading.datapoint(name) {
        return Some(dp.value.to_string());
    }
    (name == ASSET_PLACEHOLDER).then(|| reading.asset_name().to_string())
}
