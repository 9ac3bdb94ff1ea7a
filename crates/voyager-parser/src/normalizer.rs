// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use unicode_normalization::UnicodeNormalization;

pub struct TextNormalizer;

impl TextNormalizer {
    /// Cleans raw text line by line. Line order is kept, blank lines are
    /// dropped entirely.
    pub fn normalize(text: &str) -> String {
        text.lines()
            .map(Self::normalize_line)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn normalize_line(line: &str) -> String {
        let mut out = String::with_capacity(line.len());
        let mut pending_space = false;

        for c in line.nfkc() {
            let c = match c {
                '\u{2014}' | '\u{2013}' | '\u{2012}' | '\u{2212}' => '-',
                '\u{2019}' | '\u{2018}' | '\u{02BC}' | '`' => '\'',
                other => other,
            };

            if c.is_whitespace() || !is_allowed(c) {
                pending_space = true;
                continue;
            }
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(c);
        }

        out
    }
}

fn is_allowed(c: char) -> bool {
    is_word_char(c)
        || matches!(
            c,
            '-' | '.' | ',' | ':' | ';' | '!' | '?' | '(' | ')' | '№' | '\'' | '•' | '*'
        )
}

/// Letters, digits and underscore; the same set `\w` covers.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Apostrophes belong to words so "п'ятий" stays one token.
fn is_token_char(c: char) -> bool {
    c.is_alphanumeric() || c == '\''
}

/// Splits `text` into word tokens with their byte offsets.
pub fn word_spans(text: &str) -> impl Iterator<Item = (usize, &str)> + '_ {
    let mut start: Option<usize> = None;
    let mut chars = text.char_indices().peekable();
    std::iter::from_fn(move || {
        while let Some((i, c)) = chars.next() {
            if is_token_char(c) {
                if start.is_none() {
                    start = Some(i);
                }
                let at_end = chars.peek().map_or(true, |&(_, next)| !is_token_char(next));
                if at_end {
                    let s = start.take()?;
                    let end = i + c.len_utf8();
                    return Some((s, &text[s..end]));
                }
            }
        }
        None
    })
}

/// True if any whole word of `text` satisfies `pred`.
pub fn contains_word<F>(text: &str, mut pred: F) -> bool
where
    F: FnMut(&str) -> bool,
{
    word_spans(text).any(|(_, w)| pred(w))
}

/// Removes whole words matching `pred`, leaving everything else untouched.
pub fn remove_words<F>(text: &str, mut pred: F) -> String
where
    F: FnMut(&str) -> bool,
{
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for (start, word) in word_spans(text) {
        if pred(word) {
            out.push_str(&text[last..start]);
            last = start + word.len();
        }
    }
    out.push_str(&text[last..]);
    out
}

/// Rough language guess from the dominant script: "uk" or "en".
pub fn detect_language(text: &str) -> Option<&'static str> {
    let (mut cyrillic, mut latin) = (0usize, 0usize);
    for c in text.chars().filter(|c| c.is_alphabetic()) {
        if ('\u{0400}'..='\u{04FF}').contains(&c) {
            cyrillic += 1;
        } else if c.is_ascii_alphabetic() || ('\u{00C0}'..='\u{024F}').contains(&c) {
            latin += 1;
        }
    }
    match (cyrillic, latin) {
        (0, 0) => None,
        (c, l) if c >= l => Some("uk"),
        _ => Some("en"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_text_basic() {
        let text = "  Line 1  \n\n  Line 2  \n   \n  Line 3  ";
        let result = TextNormalizer::normalize(text);
        let lines: Vec<&str> = result.split('\n').collect();
        assert_eq!(lines, vec!["Line 1", "Line 2", "Line 3"]);
    }

    #[test]
    fn test_normalize_dashes_and_spaces() {
        let result = TextNormalizer::normalize("Text—with–dashes\nAnd   multiple \t spaces");
        assert_eq!(result, "Text-with-dashes\nAnd multiple spaces");
    }

    #[test]
    fn test_normalize_strips_symbols() {
        assert_eq!(
            TextNormalizer::normalize("★ Visit café @ noon → 12:00"),
            "Visit café noon 12:00"
        );
        assert_eq!(TextNormalizer::normalize("@@@\n###"), "");
    }

    #[test]
    fn test_normalize_keeps_bullet_markers() {
        assert_eq!(
            TextNormalizer::normalize("• Opera\n* Music\n- Park"),
            "• Opera\n* Music\n- Park"
        );
    }

    #[test]
    fn test_normalize_keeps_cyrillic_and_apostrophes() {
        assert_eq!(
            TextNormalizer::normalize("П’ятий день: Софійський собор"),
            "П'ятий день: Софійський собор"
        );
    }

    #[test]
    fn test_normalize_applies_nfkc() {
        // fullwidth letters and the "ﬁ" ligature fold to plain ASCII
        assert_eq!(TextNormalizer::normalize("Ｄａｙ １: ﬁsh market"), "Day 1: fish market");
    }

    #[test]
    fn test_word_helpers() {
        assert!(contains_word("Visit today", |w| w.eq_ignore_ascii_case("today")));
        assert!(!contains_word("Visit today", |w| w.eq_ignore_ascii_case("day")));
        assert_eq!(
            remove_words("First day, first light", |w| w.eq_ignore_ascii_case("first")),
            " day,  light"
        );
        let spans: Vec<_> = word_spans("п'ятий день").collect();
        assert_eq!(spans, vec![(0, "п'ятий"), (12, "день")]);
    }

    #[test]
    fn test_detect_language() {
        assert_eq!(detect_language("День 1: Софійський собор"), Some("uk"));
        assert_eq!(detect_language("Day 1: Visit museum"), Some("en"));
        assert_eq!(detect_language("123 - 456"), None);
    }
}
