use thiserror::Error;
use vulgate_model::{Book, Language};
use vulgate_typeset::TemplateVariant;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("book has no chapters")]
    EmptyBook,

    #[error("chapter {found} is out of sequence (expected {expected})")]
    ChapterOutOfSequence { expected: u32, found: u32 },

    #[error("chapter {chapter} belongs to '{found}', not '{expected}'")]
    ForeignChapter {
        chapter: u32,
        expected: String,
        found: String,
    },

    #[error("chapter {chapter} has no {language} paragraphs")]
    MissingParagraphs { chapter: u32, language: Language },

    #[error("template is missing the {0:?} anchor")]
    MissingAnchor(String),
}

/// Languages a layout needs every chapter to carry.
pub fn required_languages(variant: TemplateVariant, language: Language) -> Vec<Language> {
    match variant {
        TemplateVariant::Parallel => vec![Language::Latin, Language::English],
        TemplateVariant::Single => vec![language],
    }
}

/// Run every check needed before composing `book` into `template`.
pub fn validate(
    book: &Book,
    template: &str,
    variant: TemplateVariant,
    language: Language,
) -> Vec<ValidationError> {
    let mut errors = validate_book(book, &required_languages(variant, language));
    errors.extend(validate_template(template, variant));
    errors
}

/// Check chapter numbering, ownership, and that each chapter has text.
pub fn validate_book(book: &Book, languages: &[Language]) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if book.chapters.is_empty() {
        errors.push(ValidationError::EmptyBook);
    }

    for (index, chapter) in book.chapters.iter().enumerate() {
        let expected = index as u32 + 1;
        if chapter.number != expected {
            errors.push(ValidationError::ChapterOutOfSequence {
                expected,
                found: chapter.number,
            });
        }
        if chapter.book_title != book.title {
            errors.push(ValidationError::ForeignChapter {
                chapter: chapter.number,
                expected: book.title.clone(),
                found: chapter.book_title.clone(),
            });
        }
        for &language in languages {
            if chapter.paragraphs(language).is_empty() {
                errors.push(ValidationError::MissingParagraphs {
                    chapter: chapter.number,
                    language,
                });
            }
        }
    }

    for e in &errors {
        tracing::warn!("{e}");
    }

    errors
}

/// Check that the template carries every anchor the layout inserts after.
pub fn validate_template(template: &str, variant: TemplateVariant) -> Vec<ValidationError> {
    let errors: Vec<ValidationError> = variant
        .anchors()
        .iter()
        .filter(|anchor| !template.contains(*anchor))
        .map(|anchor| ValidationError::MissingAnchor(anchor.trim_end().to_string()))
        .collect();

    for e in &errors {
        tracing::warn!("{e}");
    }

    errors
}

/// Chapters whose Latin and English columns have different paragraph counts.
///
/// Not fatal: each column is composed on its own, but facing pages drift.
pub fn alignment_warnings(book: &Book) -> Vec<String> {
    book.chapters
        .iter()
        .filter(|c| c.latin.len() != c.english.len())
        .map(|c| {
            format!(
                "chapter {}: {} latin vs {} english paragraphs",
                c.number,
                c.latin.len(),
                c.english.len()
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use vulgate_model::{Chapter, SourceInfo};

    fn chapter(number: u32, latin: usize, english: usize) -> Chapter {
        Chapter {
            reference: format!("tob{number:03}.htm"),
            number,
            book_title: "Tobit".to_string(),
            book_dirname: "tobit".to_string(),
            footnotes: Vec::new(),
            latin: vec!["L".to_string(); latin],
            english: vec!["E".to_string(); english],
            greek: Vec::new(),
        }
    }

    fn sample_book() -> Book {
        Book {
            source: SourceInfo {
                url: "https://www.newadvent.org/bible/tob001.htm".to_string(),
                site: "newadvent.org".to_string(),
                fetched_at: String::new(),
            },
            start_ref: "tob001.htm".to_string(),
            title: "Tobit".to_string(),
            dirname: "tobit".to_string(),
            chapters: vec![chapter(1, 2, 2), chapter(2, 1, 1)],
        }
    }

    const PARALLEL: &str = "\\StartOfLatin\n\n\\pend\n\\StartOfEnglish\n\n\\pend\n";

    #[test]
    fn test_valid_book() {
        let errors = validate(
            &sample_book(),
            PARALLEL,
            TemplateVariant::Parallel,
            Language::English,
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn test_empty_book() {
        let mut book = sample_book();
        book.chapters.clear();
        let errors = validate_book(&book, &[Language::Latin]);
        assert_eq!(errors, vec![ValidationError::EmptyBook]);
    }

    #[test]
    fn test_out_of_sequence() {
        let mut book = sample_book();
        book.chapters[1].number = 3;
        let errors = validate_book(&book, &[]);
        assert_eq!(
            errors,
            vec![ValidationError::ChapterOutOfSequence { expected: 2, found: 3 }]
        );
    }

    #[test]
    fn test_foreign_chapter() {
        let mut book = sample_book();
        book.chapters[0].book_title = "Judith".to_string();
        let errors = validate_book(&book, &[]);
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::ForeignChapter { chapter: 1, .. })));
    }

    #[test]
    fn test_missing_language() {
        let book = sample_book();
        let errors = validate_book(&book, &[Language::Greek]);
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| matches!(
            e,
            ValidationError::MissingParagraphs { language: Language::Greek, .. }
        )));
    }

    #[test]
    fn test_missing_anchor() {
        let errors = validate_template("\\StartOfLatin\n\n", TemplateVariant::Parallel);
        assert_eq!(
            errors,
            vec![ValidationError::MissingAnchor("\\StartOfEnglish".to_string())]
        );
        assert!(validate_template("\\chapter*{}\n\n", TemplateVariant::Single).is_empty());
    }

    #[test]
    fn test_alignment_warnings() {
        let mut book = sample_book();
        assert!(alignment_warnings(&book).is_empty());
        book.chapters[1].english.push("E".to_string());
        let warnings = alignment_warnings(&book);
        assert_eq!(warnings, vec!["chapter 2: 1 latin vs 2 english paragraphs"]);
    }
}
