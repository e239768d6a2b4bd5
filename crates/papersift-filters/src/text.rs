//! Case-folded text matching helpers shared by the filters
//!
//! All inputs are expected to be lowercased already. Lengths and windows are
//! measured in characters, not bytes, so non-ASCII abstracts slice safely.

use regex::Regex;

/// Number of non-overlapping occurrences of `needle`
pub(crate) fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

/// Total occurrences of all `terms`
pub(crate) fn count_all(haystack: &str, terms: &[String]) -> usize {
    terms.iter().map(|term| count(haystack, term)).sum()
}

/// First term that occurs in the haystack
pub(crate) fn find_any<'a>(haystack: &str, terms: &'a [String]) -> Option<&'a str> {
    terms
        .iter()
        .map(String::as_str)
        .find(|term| haystack.contains(term))
}

/// Whether any term occurs in the haystack
pub(crate) fn contains_any(haystack: &str, terms: &[String]) -> bool {
    find_any(haystack, terms).is_some()
}

/// The first `n` characters of `text`
pub(crate) fn prefix(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// The span `[start, end)` widened by `radius` characters on each side
///
/// `start` and `end` are byte offsets on char boundaries (as returned by a
/// regex match).
pub(crate) fn window(text: &str, start: usize, end: usize, radius: usize) -> &str {
    let lo = if radius == 0 {
        start
    } else {
        text[..start]
            .char_indices()
            .rev()
            .nth(radius - 1)
            .map(|(i, _)| i)
            .unwrap_or(0)
    };
    let hi = text[end..]
        .char_indices()
        .nth(radius)
        .map(|(i, _)| end + i)
        .unwrap_or(text.len());
    &text[lo..hi]
}

/// `side_channel` → `Side Channel`
pub(crate) fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut at_word_start = true;
    for c in name.replace('_', " ").chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

/// Detects an action word (with any suffix) near the anchor term
///
/// `steal`, `stealing` and `steals` all count as the action `steal`; the
/// match is a compound term when the anchor occurs within `radius`
/// characters on either side of the whole word.
#[derive(Debug, Clone)]
pub(crate) struct CompoundMatcher {
    actions: Option<Regex>,
    anchor: String,
    radius: usize,
}

impl CompoundMatcher {
    pub(crate) fn new(
        action_words: &[String],
        anchor: &str,
        radius: usize,
    ) -> Result<Self, regex::Error> {
        let actions = if action_words.is_empty() {
            None
        } else {
            let alternation = action_words
                .iter()
                .map(|word| regex::escape(word))
                .collect::<Vec<_>>()
                .join("|");
            Some(Regex::new(&format!(r"\b(?:{})\w*\b", alternation))?)
        };
        Ok(Self {
            actions,
            anchor: anchor.to_string(),
            radius,
        })
    }

    /// Whether any action word in `text` has the anchor nearby
    pub(crate) fn is_match(&self, text: &str) -> bool {
        let Some(actions) = &self.actions else {
            return false;
        };
        actions
            .find_iter(text)
            .any(|m| window(text, m.start(), m.end(), self.radius).contains(&self.anchor))
    }
}
