// Splicing chapter text into a LaTeX book template.
//
// Content is always inserted directly after an anchor, so chapters and
// paragraphs are walked last-to-first to come out in reading order.

use vulgate_model::{Book, Error, Language, Result};

use crate::roman::to_roman;

pub const LATIN_ANCHOR: &str = "\\StartOfLatin\n\n";
pub const ENGLISH_ANCHOR: &str = "\\StartOfEnglish\n\n";
pub const SINGLE_ANCHOR: &str = "\\chapter*{}\n\n";

/// Closes one reledpar paragraph and opens the next.
const PARAGRAPH_BREAK: &str = "\n\\pend\\pstart\n";

/// Which template layout the document uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateVariant {
    /// Latin and English facing pages, one anchor per language.
    Parallel,
    /// One language under a single `\chapter*{}` anchor.
    Single,
}

impl TemplateVariant {
    pub fn anchors(self) -> &'static [&'static str] {
        match self {
            TemplateVariant::Parallel => &[LATIN_ANCHOR, ENGLISH_ANCHOR],
            TemplateVariant::Single => &[SINGLE_ANCHOR],
        }
    }
}

/// Insert `content` immediately after every occurrence of `anchor`.
pub fn insert_after_anchor(template: &str, anchor: &str, content: &str) -> Result<String> {
    if !template.contains(anchor) {
        return Err(Error::Parse(format!(
            "template has no {:?} anchor",
            anchor.trim_end()
        )));
    }
    Ok(template.replace(anchor, &format!("{anchor}{content}")))
}

/// Centered Arabic chapter number used on the parallel pages.
pub fn number_heading(number: u32) -> String {
    format!("\\begin{{large}}\\begin{{center}}{number}\\end{{center}}\\end{{large}}\n")
}

/// Centered small-caps "Chapter iv" heading used by the single-language layout.
pub fn roman_heading(number: u32) -> Result<String> {
    let roman = to_roman(number)?;
    Ok(format!(
        "\\begin{{large}}\\begin{{center}}\\textsc{{Chapter {roman}}}\\end{{center}}\\end{{large}}\n"
    ))
}

/// Fill a two-anchor template with Latin and English text.
///
/// Each chapter's heading sits directly ahead of that chapter's first
/// paragraph, under both anchors.
pub fn compose_parallel(book: &Book, template: &str) -> Result<String> {
    let mut output = template.to_string();

    for chapter in book.chapters.iter().rev() {
        for (language, anchor) in [
            (Language::Latin, LATIN_ANCHOR),
            (Language::English, ENGLISH_ANCHOR),
        ] {
            for paragraph in chapter.paragraphs(language).iter().rev() {
                output = insert_after_anchor(
                    &output,
                    anchor,
                    &format!("{PARAGRAPH_BREAK}{paragraph}"),
                )?;
            }
            output = insert_after_anchor(&output, anchor, &number_heading(chapter.number))?;
        }
        tracing::debug!(chapter = chapter.number, "Inserted chapter");
    }

    Ok(output)
}

/// Fill a single-anchor template with one language, then title the chapter block.
pub fn compose_single(book: &Book, template: &str, language: Language) -> Result<String> {
    let mut output = template.to_string();

    for chapter in book.chapters.iter().rev() {
        for paragraph in chapter.paragraphs(language).iter().rev() {
            output = insert_after_anchor(&output, SINGLE_ANCHOR, &format!("{paragraph}\n"))?;
        }
        output = insert_after_anchor(&output, SINGLE_ANCHOR, &roman_heading(chapter.number)?)?;
        tracing::debug!(chapter = chapter.number, %language, "Inserted chapter");
    }

    Ok(output.replace("\\chapter*{", &format!("\\chapter*{{{}", book.title)))
}

/// Compose `book` into `template` using the given layout.
///
/// `language` only matters for [`TemplateVariant::Single`].
pub fn compose(
    book: &Book,
    template: &str,
    variant: TemplateVariant,
    language: Language,
) -> Result<String> {
    let output = match variant {
        TemplateVariant::Parallel => compose_parallel(book, template)?,
        TemplateVariant::Single => compose_single(book, template, language)?,
    };
    tracing::info!(
        book = %book.title,
        chapters = book.chapters.len(),
        ?variant,
        bytes = output.len(),
        "Composed document"
    );
    Ok(output)
}
