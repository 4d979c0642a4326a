use regex::Regex;
use std::sync::LazyLock;

/// Roman numerals up to 39, as used by `Type I` to `Type V` style variants.
static ROMAN_NUMERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^X{0,3}(?:IX|IV|V?I{0,3})$").unwrap());

/// Words kept lowercase unless they open or close the line.
const SMALL_WORDS: &[&str] = &[
    "a", "an", "and", "as", "at", "but", "by", "for", "if", "in", "nor", "of", "on", "or", "the",
    "to", "via", "vs",
];

/// Title-case an item name.
///
/// Small words stay lowercase except at either end and Roman numerals are
/// written in capitals. Every other word (and each part of a hyphenated
/// word) gets an uppercase first letter, keeping interior capitals. A line written entirely in
/// capitals is lowered first. Applying this twice gives the same result.
pub fn title_case(text: &str) -> String {
    let lowered;
    let source = if is_shouting(text) {
        lowered = text.to_lowercase();
        lowered.as_str()
    } else {
        text
    };

    let words: Vec<&str> = source.split(' ').collect();
    let first = words.iter().position(|w| !w.is_empty());
    let last = words.iter().rposition(|w| !w.is_empty());

    words
        .iter()
        .enumerate()
        .map(|(idx, word)| title_word(word, Some(idx) == first || Some(idx) == last))
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_shouting(text: &str) -> bool {
    let mut letters = text.chars().filter(|c| c.is_alphabetic()).peekable();
    letters.peek().is_some() && letters.all(|c| !c.is_lowercase())
}

fn title_word(word: &str, at_edge: bool) -> String {
    word.split('-')
        .enumerate()
        .map(|(idx, part)| {
            let bare = part
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase();
            if !bare.is_empty() && ROMAN_NUMERAL.is_match(&bare) {
                part.to_uppercase()
            } else if SMALL_WORDS.contains(&bare.as_str()) && !(at_edge && idx == 0) {
                part.to_lowercase()
            } else {
                capitalize_first(part)
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

/// Uppercase the first alphanumeric character when it is a letter.
fn capitalize_first(part: &str) -> String {
    let Some((pos, ch)) = part.char_indices().find(|(_, c)| c.is_alphanumeric()) else {
        return part.to_string();
    };
    if !ch.is_lowercase() {
        return part.to_string();
    }

    let mut out = String::with_capacity(part.len());
    out.push_str(&part[..pos]);
    out.extend(ch.to_uppercase());
    out.push_str(&part[pos + ch.len_utf8()..]);
    out
}
