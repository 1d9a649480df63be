use serde::{Deserialize, Serialize};

use crate::language::Language;

/// One book of the Bible, acquired chapter by chapter from its start page.
///
/// The title and chapter list are derived once from the start page and
/// are not changed afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub source: SourceInfo,
    /// Page reference of the first chapter (e.g., "1ma001.htm").
    pub start_ref: String,
    /// Display title with the chapter number removed (e.g., "1 Maccabees").
    pub title: String,
    /// Directory-safe name (e.g., "first_maccabees").
    pub dirname: String,
    pub chapters: Vec<Chapter>,
}

/// Provenance information about the acquisition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceInfo {
    pub url: String,
    pub site: String,
    pub fetched_at: String,
}

/// A single chapter with its paragraphs already converted to LaTeX.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chapter {
    /// Page reference this chapter was read from (e.g., "1ma002.htm").
    pub reference: String,
    /// 1-based position within the book.
    pub number: u32,
    pub book_title: String,
    pub book_dirname: String,
    /// Footnote bodies in page order, each still carrying its `[n] ` prefix.
    pub footnotes: Vec<String>,
    pub latin: Vec<String>,
    pub english: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub greek: Vec<String>,
}

impl Chapter {
    pub fn paragraphs(&self, language: Language) -> &[String] {
        match language {
            Language::Latin => &self.latin,
            Language::English => &self.english,
            Language::Greek => &self.greek,
        }
    }
}

impl Book {
    /// Page references of every chapter, in reading order.
    pub fn chapter_refs(&self) -> Vec<&str> {
        self.chapters.iter().map(|c| c.reference.as_str()).collect()
    }

    pub fn paragraph_count(&self, language: Language) -> usize {
        self.chapters
            .iter()
            .map(|c| c.paragraphs(language).len())
            .sum()
    }

    /// Generate a source.md provenance file.
    pub fn source_md(&self) -> String {
        format!(
            "# Source\n\n\
             - **Site:** {}\n\
             - **URL:** {}\n\
             - **Book:** {}\n\
             - **Fetched:** {}\n\
             - **Chapters:** {}\n\
             - **Paragraphs:** {} latin, {} english\n",
            self.source.site,
            self.source.url,
            self.title,
            self.source.fetched_at,
            self.chapters.len(),
            self.paragraph_count(Language::Latin),
            self.paragraph_count(Language::English),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_chapter(number: u32) -> Chapter {
        Chapter {
            reference: format!("1ma{number:03}.htm"),
            number,
            book_title: "1 Maccabees".to_string(),
            book_dirname: "first_maccabees".to_string(),
            footnotes: vec!["[1] A note.".to_string()],
            latin: vec!["Et factum est".to_string(), "Et regnavit".to_string()],
            english: vec!["Now it came to pass".to_string()],
            greek: Vec::new(),
        }
    }

    fn sample_book() -> Book {
        Book {
            source: SourceInfo {
                url: "https://www.newadvent.org/bible/1ma001.htm".to_string(),
                site: "newadvent.org".to_string(),
                fetched_at: "2026-01-01T00:00:00+00:00".to_string(),
            },
            start_ref: "1ma001.htm".to_string(),
            title: "1 Maccabees".to_string(),
            dirname: "first_maccabees".to_string(),
            chapters: vec![sample_chapter(1), sample_chapter(2)],
        }
    }

    #[test]
    fn test_chapter_refs_in_order() {
        let book = sample_book();
        assert_eq!(book.chapter_refs(), vec!["1ma001.htm", "1ma002.htm"]);
    }

    #[test]
    fn test_paragraphs_by_language() {
        let chapter = sample_chapter(1);
        assert_eq!(chapter.paragraphs(Language::Latin).len(), 2);
        assert_eq!(chapter.paragraphs(Language::English).len(), 1);
        assert!(chapter.paragraphs(Language::Greek).is_empty());
    }

    #[test]
    fn test_source_md_counts() {
        let md = sample_book().source_md();
        assert!(md.contains("- **Book:** 1 Maccabees"));
        assert!(md.contains("- **Chapters:** 2"));
        assert!(md.contains("4 latin, 2 english"));
    }

    #[test]
    fn test_greek_omitted_when_empty() {
        let json = serde_json::to_string(&sample_chapter(1)).unwrap();
        assert!(!json.contains("greek"));
        let back: Chapter = serde_json::from_str(&json).unwrap();
        assert!(back.greek.is_empty());
    }
}
