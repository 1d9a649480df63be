// Paragraph rewriting from extracted page text to LaTeX.
//
// Each pass is a pure function of its input. `transform_paragraphs` runs
// them in order: spacing, drop cap (first paragraph only), verse colour,
// special characters, footnotes. Later passes rely on the `~` written by
// `normalize_spacing`.

use regex::{Captures, Regex};
use std::collections::HashSet;
use std::sync::LazyLock;
use vulgate_model::{Error, Result};

/// xcolor name the templates define for verse numbers.
pub const VERSE_COLOR: &str = "benred8";

static RE_VERSE_DOUBLE_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)  ").expect("valid verse spacing regex"));
static RE_DROP_CAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^1~([A-Za-z])([A-Za-z]*) ").expect("valid drop cap regex"));
static RE_VERSE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)~").expect("valid verse number regex"));
static RE_FOOTNOTE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[0-9]+\]").expect("valid footnote marker regex"));
static RE_FOOTNOTE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[0-9]+\] ").expect("valid footnote prefix regex"));

/// Unicode punctuation the site uses, and its LaTeX form.
const SPECIAL_CHARS: [(char, &str); 3] = [
    ('\u{2019}', r"\textquotesingle "),
    ('\u{2018}', r"\textasciigrave "),
    // ellipsis ends a line on the site
    ('\u{2026}', r"\ldots\\ "),
];

/// Where substituted text will end up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubstitutionContext {
    Body,
    /// Inside a `\footnote{...}` argument; commands get `\protect`.
    Footnote,
}

/// Collapse the site's irregular spacing into a `~` after each verse number.
///
/// The Latin column puts two spaces after a verse number, the English one a
/// non-breaking space. Any other doubled space becomes a single one.
pub fn normalize_spacing(paragraph: &str) -> String {
    let paragraph = RE_VERSE_DOUBLE_SPACE.replace_all(paragraph, "${1}~");
    paragraph.replace('\u{a0}', "~").replace("  ", " ")
}

/// Lines spanned by the opening initial: taller for the book's first chapter.
pub fn drop_cap_lines(chapter_number: u32) -> u8 {
    if chapter_number == 1 {
        3
    } else {
        2
    }
}

/// Turn a leading `1~Word ` into `\lettrine[lines=N]{W}{ord} `.
///
/// Paragraphs that don't open on verse 1 are returned unchanged.
pub fn drop_cap(paragraph: &str, lines: u8) -> String {
    RE_DROP_CAP
        .replace(paragraph, |caps: &Captures| {
            format!(r"\lettrine[lines={lines}]{{{}}}{{{}}} ", &caps[1], &caps[2])
        })
        .into_owned()
}

/// Wrap every `N~` verse number in the verse colour, keeping the `~`.
pub fn colorize_verse_numbers(paragraph: &str) -> String {
    RE_VERSE_NUMBER
        .replace_all(paragraph, |caps: &Captures| {
            format!(r"\textcolor{{{VERSE_COLOR}}}{{{}}}~", &caps[1])
        })
        .into_owned()
}

/// Replace curly quotes and ellipses with their LaTeX commands.
pub fn substitute_special_chars(text: &str, context: SubstitutionContext) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match SPECIAL_CHARS.iter().find(|(key, _)| *key == c) {
            Some((_, latex)) => {
                if context == SubstitutionContext::Footnote {
                    out.push_str(r"\protect");
                }
                out.push_str(latex);
            }
            None => out.push(c),
        }
    }
    out
}

/// Replace `[n]` markers with `\footnote[n]{...}` carrying footnote `n`.
///
/// The paragraph is scanned once, so markers quoted inside an inserted
/// footnote body are left alone. Only the first occurrence of a marker is
/// rewritten; a repeated marker keeps its later occurrences as plain `[n]`.
pub fn splice_footnotes(paragraph: &str, footnotes: &[String]) -> Result<String> {
    let mut out = String::with_capacity(paragraph.len());
    let mut seen: HashSet<&str> = HashSet::new();
    let mut last = 0;

    for found in RE_FOOTNOTE_MARKER.find_iter(paragraph) {
        let marker = found.as_str();
        out.push_str(&paragraph[last..found.start()]);
        if seen.insert(marker) {
            let body = footnote_body(marker, footnotes)?;
            out.push_str(&format!(r"\footnote{marker}{{{body}}}"));
        } else {
            out.push_str(marker);
        }
        last = found.end();
    }
    out.push_str(&paragraph[last..]);

    Ok(out)
}

/// Text of the footnote a `[n]` marker points at, without its own `[n] ` prefix.
fn footnote_body(marker: &str, footnotes: &[String]) -> Result<String> {
    // Only digits reach here, so a failed parse means the number overflowed.
    let number = marker[1..marker.len() - 1]
        .parse::<usize>()
        .unwrap_or(usize::MAX);
    let footnote = number
        .checked_sub(1)
        .and_then(|index| footnotes.get(index))
        .ok_or(Error::IndexOutOfRange {
            marker: number,
            available: footnotes.len(),
        })?;
    Ok(RE_FOOTNOTE_PREFIX.replace_all(footnote, "").into_owned())
}

/// Run the full pipeline over one language's paragraphs, in source order.
pub fn transform_paragraphs(
    paragraphs: &[String],
    footnotes: &[String],
    drop_cap_lines: u8,
) -> Result<Vec<String>> {
    paragraphs
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            let mut paragraph = normalize_spacing(raw);
            if index == 0 {
                paragraph = drop_cap(&paragraph, drop_cap_lines);
            }
            let paragraph = colorize_verse_numbers(&paragraph);
            let paragraph = substitute_special_chars(&paragraph, SubstitutionContext::Body);
            splice_footnotes(&paragraph, footnotes)
        })
        .collect()
}
