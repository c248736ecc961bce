//! Text cleaning primitives for brand and product-name display strings.
//!
//! Each transform is a plain function and also a [`TextStep`], so cleaning
//! pipelines are written as an ordered list of steps and run with
//! [`apply_steps`]. All functions collapse runs of whitespace to a single
//! space and trim both ends of their output.

use std::sync::LazyLock;

use regex::Regex;

static HAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{Han}？]").expect("valid Han regex"));
static NON_HAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{Han}？]").expect("valid non-Han regex"));

/// Bracket and punctuation glyphs removed by [`StripRules::Light`].
const LIGHT_GLYPHS: &[char] = &[
    '\\', '(', ')', '（', '）', '[', ']', '［', '］', '【', '】', ',', '、', '+', '＋',
];

/// Glyphs [`StripRules::Full`] removes on top of [`LIGHT_GLYPHS`].
const FULL_EXTRA_GLYPHS: &[char] = &['/', '／'];

/// Marketing filler removed from product names, applied in order.
///
/// Longer tokens come before any token they contain (`128GB` before `8GB`,
/// `移动4G` before `移动`) so the longer form is removed whole.
pub const NOISE_PHRASES: &[&str] = &[
    "新老包装",
    "包装",
    "随机",
    "派送",
    "发货",
    "颜色",
    "发放",
    "特惠装",
    "特惠",
    "性价比",
    "内存版",
    "大内存",
    "128GB",
    "16GB",
    "32GB",
    "64GB",
    "8GB",
    "128G",
    "16G",
    "32G",
    "64G",
    "8G",
    "2GB",
    "3GB",
    "4GB",
    "5GB",
    "RAM",
    "ROM",
    "移动4G",
    "移动",
    "联通4G",
    "联通",
    "双网通版",
    "双网通",
    "双通",
    "全网通",
    "电信4G",
    "电信",
    "双4G",
    "双卡双待",
    "包邮",
    "免邮",
    "已停产",
    "指纹解锁",
    "0元购机",
];

/// Which glyph set [`strip`] removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripRules {
    /// Whitespace cleanup only.
    None,
    /// Brackets, commas and plus signs, ASCII and full-width.
    Light,
    /// Everything in `Light` plus `/` and `／`.
    Full,
}

impl StripRules {
    fn removes(self, c: char) -> bool {
        match self {
            StripRules::None => false,
            StripRules::Light => LIGHT_GLYPHS.contains(&c),
            StripRules::Full => LIGHT_GLYPHS.contains(&c) || FULL_EXTRA_GLYPHS.contains(&c),
        }
    }
}

/// Script kept by [`extract_script`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    /// Han ideographs and the full-width question mark.
    Han,
    /// Everything except Han ideographs and the full-width question mark.
    NonHan,
}

/// One named cleaning step.
#[derive(Debug, Clone, Copy)]
pub enum TextStep<'a> {
    Strip(StripRules),
    RemovePhrases(&'a [&'a str]),
    Script(Script),
    TitleCase,
}

impl TextStep<'_> {
    #[must_use]
    pub fn apply(&self, input: &str) -> String {
        match *self {
            TextStep::Strip(rules) => strip(input, rules),
            TextStep::RemovePhrases(phrases) => remove_phrases(input, phrases),
            TextStep::Script(script) => extract_script(input, script),
            TextStep::TitleCase => title_case(input),
        }
    }
}

/// Runs `steps` over `input` in order.
#[must_use]
pub fn apply_steps(input: &str, steps: &[TextStep<'_>]) -> String {
    steps
        .iter()
        .fold(input.to_owned(), |acc, step| step.apply(&acc))
}

/// Collapses every whitespace run to one space and trims both ends.
#[must_use]
pub fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Removes the glyphs selected by `rules`, then collapses whitespace.
///
/// Idempotent: `strip(&strip(x, r), r) == strip(x, r)`.
#[must_use]
pub fn strip(input: &str, rules: StripRules) -> String {
    let kept: String = input.chars().filter(|&c| !rules.removes(c)).collect();
    collapse_whitespace(&kept)
}

/// Keeps only the characters of `script`, then collapses whitespace.
///
/// Splits a mixed token such as `"Apple苹果"` into `"Apple"` and `"苹果"`.
#[must_use]
pub fn extract_script(input: &str, script: Script) -> String {
    let filtered = match script {
        Script::Han => NON_HAN_RE.replace_all(input, ""),
        Script::NonHan => HAN_RE.replace_all(input, ""),
    };
    collapse_whitespace(&filtered)
}

/// Deletes every literal, case-sensitive occurrence of each phrase, in order.
///
/// Empty phrases are ignored.
#[must_use]
pub fn remove_phrases(input: &str, phrases: &[&str]) -> String {
    let removed = phrases
        .iter()
        .filter(|p| !p.is_empty())
        .fold(input.to_owned(), |acc, phrase| acc.replace(phrase, ""));
    collapse_whitespace(&removed)
}

/// Upper-cases the first letter of each word and lower-cases the rest.
///
/// A word runs while characters are cased letters; anything without case
/// (spaces, punctuation, digits, Han ideographs) ends it, except
/// apostrophes and periods, which are skipped over. Han text passes
/// through unchanged.
#[must_use]
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_word = false;
    for c in input.chars() {
        if in_word {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        if !is_case_ignorable(c) {
            in_word = c.is_lowercase() || c.is_uppercase();
        }
    }
    out
}

fn is_case_ignorable(c: char) -> bool {
    matches!(c, '\'' | '\u{2019}' | '.' | ':' | '\u{00B7}')
}

#[cfg(test)]
#[path = "text_test.rs"]
mod tests;
