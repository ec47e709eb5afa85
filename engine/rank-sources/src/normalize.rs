//! Player name normalization
//!
//! Every source spells names a little differently ("Deebo Samuel Sr." vs
//! "Deebo Samuel", curly vs straight apostrophes, HTML entities in embedded
//! data). Matching is done on a comparison key built by [`normalize_name`];
//! the display name is never modified.

use regex::Regex;
use std::sync::OnceLock;

/// Apostrophe look-alikes folded into `'`.
const APOSTROPHES: &[char] = &[
    '\u{2019}', '\u{2018}', '\u{201B}', '\u{275B}', '\u{275C}', '\u{02BB}', '\u{02BC}',
    '\u{02BD}', '\u{02BE}', '\u{02BF}', '\u{02C8}', '\u{02CA}',
];

fn suffix_pattern() -> &'static Regex {
    static SUFFIX: OnceLock<Regex> = OnceLock::new();
    SUFFIX.get_or_init(|| Regex::new(r"\b(?:jr\.?|sr\.?|ii|iii|iv|v)\b").expect("valid regex"))
}

fn punctuation_pattern() -> &'static Regex {
    static PUNCT: OnceLock<Regex> = OnceLock::new();
    PUNCT.get_or_init(|| Regex::new(r"[^\w\s']").expect("valid regex"))
}

/// Build the comparison key for a player name.
///
/// Steps, in order:
/// 1. decode HTML entities
/// 2. lowercase
/// 3. fold apostrophe variants into `'`
/// 4. drop generational suffixes (jr, sr, ii, iii, iv, v) as whole words
/// 5. drop punctuation other than apostrophes
/// 6. collapse whitespace and trim
///
/// Total over all inputs; empty or pure punctuation input yields `""`.
///
/// ```
/// use rank_sources::normalize_name;
///
/// assert_eq!(normalize_name("Deebo Samuel Sr."), normalize_name("deebo samuel sr"));
/// assert_eq!(normalize_name("Wan\u{2019}Dale Robinson"), "wan'dale robinson");
/// ```
pub fn normalize_name(raw: &str) -> String {
    let decoded = html_escape::decode_html_entities(raw);
    let lowered: String = decoded
        .to_lowercase()
        .chars()
        .map(|c| if APOSTROPHES.contains(&c) { '\'' } else { c })
        .collect();

    let without_suffix = suffix_pattern().replace_all(&lowered, "");
    let stripped = punctuation_pattern().replace_all(&without_suffix, "");

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}
