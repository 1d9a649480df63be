use anyhow::{Context, Result};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use vulgate_model::Book;

/// Extension of the composed document.
pub const DOCUMENT_EXTENSION: &str = "tex";

/// Write the acquired book to `<output_dir>/<dirname>/`.
///
/// Creates the directory if it doesn't exist, then writes:
/// - `book.json`: chapters with transformed paragraphs (typeset input)
/// - `source.md`: provenance info
pub fn write_book(book: &Book, output_dir: &Path) -> Result<PathBuf> {
    let dir = output_dir.join(&book.dirname);
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let json_path = dir.join("book.json");
    let json = serde_json::to_string_pretty(book)?;
    fs::write(&json_path, &json)?;
    tracing::info!(path = %json_path.display(), chapters = book.chapters.len(), "Wrote book JSON");

    fs::write(dir.join("source.md"), book.source_md())?;
    tracing::info!(path = %dir.join("source.md").display(), "Wrote source provenance");

    Ok(json_path)
}

/// Load a book previously written by [`write_book`].
pub fn read_book(path: &Path) -> Result<Book> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Cache one chapter's raw HTML so it can be re-examined without re-fetching.
///
/// The directory must already exist; only the file-name part of
/// `reference` is used.
pub fn cache_html(dir: &Path, reference: &str, html: &str) -> vulgate_model::Result<()> {
    let filename = Path::new(reference)
        .file_name()
        .unwrap_or_else(|| OsStr::new(reference));
    let path = dir.join(filename);
    fs::write(&path, html)?;
    tracing::debug!(path = %path.display(), bytes = html.len(), "Cached raw HTML");
    Ok(())
}

/// Default output path for a book: `<dirname>.tex`.
pub fn document_path(book: &Book) -> PathBuf {
    PathBuf::from(format!("{}.{DOCUMENT_EXTENSION}", book.dirname))
}

pub fn read_template(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read template {}", path.display()))
}

pub fn write_document(document: &str, path: &Path) -> Result<()> {
    fs::write(path, document).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = document.len(), "Wrote LaTeX document");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vulgate_model::SourceInfo;

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
            chapters: Vec::new(),
        }
    }

    #[test]
    fn test_document_path() {
        assert_eq!(document_path(&sample_book()), PathBuf::from("first_maccabees.tex"));
    }

    #[test]
    fn test_write_and_read_book() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        let path = write_book(&sample_book(), root).unwrap();
        assert_eq!(path, root.join("first_maccabees").join("book.json"));
        assert!(root.join("first_maccabees").join("source.md").exists());

        let back = read_book(&path).unwrap();
        assert_eq!(back.title, "1 Maccabees");
    }

    #[test]
    fn test_cache_html_uses_file_name() {
        let dir = tempfile::tempdir().unwrap();
        cache_html(dir.path(), "../bible/1ma002.htm", "<html></html>").unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join("1ma002.htm")).unwrap(),
            "<html></html>"
        );
    }
}
