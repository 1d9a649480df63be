use crate::normalize::clean_block;
use crate::output;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use vulgate_model::{Book, Chapter, Error, Language, Result, SourceInfo};
use vulgate_typeset::transform::{
    drop_cap_lines, substitute_special_chars, transform_paragraphs, SubstitutionContext,
};

/// Directory of the site's Bible pages; chapter references resolve against it.
pub const BASE_URL: &str = "https://www.newadvent.org/bible/";
const SITE: &str = "newadvent.org";
const USER_AGENT: &str = "vulgate/0.1 (bible typesetting tool)";

/// Ordinal words for books whose title starts with a number ("1 Maccabees").
const ORDINALS: [&str; 5] = ["First", "Second", "Third", "Fourth", "Fifth"];

static RE_TRAILING_CHAPTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*) [0-9]+$").expect("valid chapter suffix regex"));
static RE_LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)_").expect("valid leading number regex"));

/// Full URL of a page reference such as "1ma001.htm" under `base_url`.
pub fn page_url(base_url: &str, reference: &str) -> String {
    format!("{base_url}{reference}")
}

/// Acquire a whole book from the page of its first chapter.
///
/// Fetches the start page, discovers the sibling chapter links, then fetches
/// and parses each chapter in order. When `cache_root` is given, each raw
/// page is also saved under `<cache_root>/<dirname>/`.
///
/// `start_ref` should be the newadvent page of chapter 1 (e.g., "1ma001.htm").
pub async fn acquire_book(start_ref: &str, cache_root: Option<&Path>) -> Result<Book> {
    acquire_book_from(BASE_URL, start_ref, cache_root).await
}

/// [`acquire_book`] against another copy of the site rooted at `base_url`.
pub async fn acquire_book_from(
    base_url: &str,
    start_ref: &str,
    cache_root: Option<&Path>,
) -> Result<Book> {
    let client = build_client()?;
    let start_url = page_url(base_url, start_ref);

    tracing::info!(url = %start_url, "Fetching start page");
    let start_html = fetch_page(&client, &start_url).await?;
    tracing::info!(bytes = start_html.len(), "Received HTML");

    let (title, links) = {
        let document = Html::parse_document(&start_html);
        (book_title(&document)?, chapter_links(&document))
    };
    let dirname = title_to_dirname(&title)?;

    let references: Vec<String> = std::iter::once(start_ref.to_string())
        .chain(links)
        .collect();
    tracing::info!(title = %title, dirname = %dirname, chapters = references.len(), "Discovered book");

    let cache_dir = cache_root.map(|root| root.join(&dirname));
    if let Some(dir) = &cache_dir {
        fs::create_dir_all(dir)?;
    }

    let mut start_html = Some(start_html);
    let mut chapters = Vec::with_capacity(references.len());
    for (index, reference) in references.iter().enumerate() {
        let number = index as u32 + 1;
        let html = match start_html.take() {
            Some(html) => html,
            None => {
                let url = page_url(base_url, reference);
                tracing::info!(url = %url, chapter = number, "Fetching chapter");
                fetch_page(&client, &url).await?
            }
        };

        if let Some(dir) = &cache_dir {
            output::cache_html(dir, reference, &html)?;
        }

        let chapter = parse_chapter(&html, reference, number, &title, &dirname)?;
        tracing::info!(
            chapter = number,
            latin = chapter.latin.len(),
            english = chapter.english.len(),
            greek = chapter.greek.len(),
            footnotes = chapter.footnotes.len(),
            "Parsed chapter"
        );
        chapters.push(chapter);
    }

    Ok(Book {
        source: SourceInfo {
            url: start_url,
            site: SITE.to_string(),
            fetched_at: chrono::Utc::now().to_rfc3339(),
        },
        start_ref: start_ref.to_string(),
        title,
        dirname,
        chapters,
    })
}

fn build_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| Error::Network {
            url: BASE_URL.to_string(),
            message: e.to_string(),
        })
}

async fn fetch_page(client: &reqwest::Client, url: &str) -> Result<String> {
    let network = |e: reqwest::Error| Error::Network {
        url: url.to_string(),
        message: e.to_string(),
    };

    let response = client.get(url).send().await.map_err(network)?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::Network {
            url: url.to_string(),
            message: format!("HTTP {status}"),
        });
    }

    response.text().await.map_err(network)
}

/// Parse one chapter page into a [`Chapter`] with LaTeX-ready paragraphs.
pub fn parse_chapter(
    html: &str,
    reference: &str,
    number: u32,
    book_title: &str,
    book_dirname: &str,
) -> Result<Chapter> {
    let document = Html::parse_document(html);
    let footnotes = extract_footnotes(&document)?;
    let lines = drop_cap_lines(number);

    let paragraphs = |language: Language| {
        let raw = extract_paragraphs(&document, language);
        tracing::debug!(%language, chapter = number, paragraphs = raw.len(), "Extracted paragraphs");
        transform_paragraphs(&raw, &footnotes, lines)
    };
    let latin = paragraphs(Language::Latin)?;
    let english = paragraphs(Language::English)?;
    let greek = paragraphs(Language::Greek)?;

    Ok(Chapter {
        reference: reference.to_string(),
        number,
        book_title: book_title.to_string(),
        book_dirname: book_dirname.to_string(),
        footnotes,
        latin,
        english,
        greek,
    })
}

/// Footnotes from the list at the bottom of the page.
///
/// The last `<p>` of the list is the site's notice, not a footnote.
fn extract_footnotes(document: &Html) -> Result<Vec<String>> {
    let ul_sel = Selector::parse("ul.bibleul").expect("valid selector");
    let p_sel = Selector::parse("p").expect("valid selector");

    let list = document
        .select(&ul_sel)
        .next()
        .ok_or_else(|| Error::Parse("no footnote list (ul.bibleul) on page".to_string()))?;

    let mut footnotes: Vec<String> = list
        .select(&p_sel)
        .map(|p| {
            let text = clean_block(&element_text(p));
            substitute_special_chars(&text, SubstitutionContext::Footnote)
        })
        .collect();
    footnotes.pop();

    Ok(footnotes)
}

/// Raw text of every cell in one language column, in page order.
fn extract_paragraphs(document: &Html, language: Language) -> Vec<String> {
    let td_sel =
        Selector::parse(&format!("td.{}", language.cell_class())).expect("valid selector");
    document
        .select(&td_sel)
        .map(|td| clean_block(&element_text(td)))
        .collect()
}

/// Book title from the page heading, without the chapter number.
pub fn book_title(document: &Html) -> Result<String> {
    let h1_sel = Selector::parse("h1").expect("valid selector");
    let heading = document
        .select(&h1_sel)
        .next()
        .ok_or_else(|| Error::Parse("no <h1> heading on page".to_string()))?;

    let text = element_text(heading);
    Ok(RE_TRAILING_CHAPTER.replace(text.trim(), "$1").into_owned())
}

/// References of the other chapters linked from a chapter page.
///
/// The page being viewed isn't linked, so for chapter 1 this is
/// chapters 2..n in order.
pub fn chapter_links(document: &Html) -> Vec<String> {
    let link_sel = Selector::parse("a.biblechapter").expect("valid selector");
    document
        .select(&link_sel)
        .filter_map(|a| a.value().attr("href"))
        .map(|href| href.strip_prefix("./").unwrap_or(href).to_string())
        .collect()
}

/// Directory-safe book name: "1 Maccabees" -> "first_maccabees".
pub fn title_to_dirname(title: &str) -> Result<String> {
    let name = title.replace(' ', "_");

    let leading = RE_LEADING_NUMBER
        .captures(&name)
        .map(|caps| caps[1].to_string());

    let name = match leading {
        Some(digits) => {
            let ordinal = digits
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|index| ORDINALS.get(index))
                .ok_or_else(|| {
                    Error::InvalidArgument(format!("no ordinal word for {digits} in {title:?}"))
                })?;
            format!("{ordinal}{}", &name[digits.len()..])
        }
        None => name,
    };

    Ok(name.to_lowercase())
}

fn element_text(element: ElementRef) -> String {
    element.text().collect()
}
