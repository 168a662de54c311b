//! Segmentation of text into reveal units.

use serde::Deserialize;
use unicode_segmentation::UnicodeSegmentation;

/// The granularity at which text is revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealUnit {
    /// One Unicode scalar value per unit.
    Char,
    /// One extended grapheme cluster per unit (what a reader sees as a character).
    #[default]
    Grapheme,
    /// One word per unit, with trailing whitespace folded into the word.
    ///
    /// Used for streamed responses, where whole tokens appear at once.
    Word,
}

/// Byte offsets at which each successive unit of `text` ends.
///
/// Every offset is a char boundary and the sequence is strictly increasing,
/// so `&text[..ends[i]]` is the prefix shown after `i + 1` units. The last
/// offset is always `text.len()`. Empty text yields no units.
pub fn unit_ends(text: &str, unit: RevealUnit) -> Vec<usize> {
    match unit {
        RevealUnit::Char => text
            .char_indices()
            .map(|(start, ch)| start + ch.len_utf8())
            .collect(),
        RevealUnit::Grapheme => text
            .grapheme_indices(true)
            .map(|(start, g)| start + g.len())
            .collect(),
        RevealUnit::Word => word_ends(text),
    }
}

/// Number of units `text` splits into.
pub fn unit_count(text: &str, unit: RevealUnit) -> usize {
    match unit {
        RevealUnit::Char => text.chars().count(),
        RevealUnit::Grapheme => text.graphemes(true).count(),
        RevealUnit::Word => word_ends(text).len(),
    }
}

fn word_ends(text: &str) -> Vec<usize> {
    let mut ends: Vec<usize> = Vec::new();
    for (start, segment) in text.split_word_bound_indices() {
        let end = start + segment.len();
        let is_space = segment.chars().all(char::is_whitespace);
        match ends.last_mut() {
            // Whitespace rides along with the word before it
            Some(last) if is_space => *last = end,
            _ => ends.push(end),
        }
    }
    ends
}
