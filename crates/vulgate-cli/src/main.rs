use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vulgate_model::{Book, Language};
use vulgate_typeset::TemplateVariant;

#[derive(Parser)]
#[command(name = "vulgate")]
#[command(about = "Typeset parallel Latin/English Bible books from newadvent.org as LaTeX")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_HASH"), ")"))]
struct Cli {
    /// Log level: error, warn, info, debug, trace
    #[arg(long, global = true, default_value = "info", value_enum)]
    log_level: LogLevel,

    /// Use UTC timestamps instead of local time
    #[arg(long, global = true)]
    utc: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a book and save it as book.json (plus the raw chapter pages)
    Fetch {
        /// Page of the book's first chapter (e.g., "1ma001.htm")
        #[arg(short, long)]
        start: String,

        /// Directory under which `<book>/` is created
        #[arg(short = 'O', long, default_value = ".")]
        output_dir: PathBuf,

        /// Don't keep the raw HTML of each chapter
        #[arg(long)]
        no_cache: bool,
    },

    /// Compose a previously fetched book.json into a LaTeX template
    Typeset {
        /// Path to book.json written by `fetch`
        #[arg(short, long)]
        book: PathBuf,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Fetch a book and compose it in one run
    Build {
        /// Page of the book's first chapter (e.g., "1ma001.htm")
        #[arg(short, long)]
        start: String,

        /// Also cache raw chapter pages under this directory
        #[arg(long)]
        cache_dir: Option<PathBuf>,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Check a book.json (and optionally a template) without composing
    Validate {
        /// Path to book.json written by `fetch`
        #[arg(short, long)]
        book: PathBuf,

        /// Template to check for anchors
        #[arg(short, long)]
        template: Option<PathBuf>,

        #[arg(long, default_value = "parallel", value_enum)]
        variant: VariantArg,

        #[arg(long, default_value = "english", value_enum)]
        language: LanguageArg,
    },

    /// Print a chapter number as a lowercase Roman numeral
    Roman {
        number: u32,
    },
}

#[derive(clap::Args)]
struct LayoutArgs {
    /// LaTeX template containing the insertion anchors
    #[arg(short, long)]
    template: PathBuf,

    /// Template layout
    #[arg(long, default_value = "parallel", value_enum)]
    variant: VariantArg,

    /// Language for the single-language layout
    #[arg(long, default_value = "english", value_enum)]
    language: LanguageArg,

    /// Output file (defaults to `<book>.tex`)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum VariantArg {
    /// Latin and English on facing pages (\StartOfLatin / \StartOfEnglish)
    Parallel,
    /// One language under \chapter*{} with Roman chapter headings
    Single,
}

impl From<VariantArg> for TemplateVariant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Parallel => TemplateVariant::Parallel,
            VariantArg::Single => TemplateVariant::Single,
        }
    }
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum LanguageArg {
    Latin,
    English,
    Greek,
}

impl From<LanguageArg> for Language {
    fn from(arg: LanguageArg) -> Self {
        match arg {
            LanguageArg::Latin => Language::Latin,
            LanguageArg::English => Language::English,
            LanguageArg::Greek => Language::Greek,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Map log level, suppressing noisy HTML-parsing crates at debug/trace
    let level = match cli.log_level {
        LogLevel::Error => "error",
        LogLevel::Warn  => "warn",
        LogLevel::Info  => "info",
        LogLevel::Debug => "debug,selectors=warn,html5ever=warn",
        LogLevel::Trace => "trace,selectors=warn,html5ever=warn",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // Timestamp format: 2026-02-14 19:44:09.123 -08:00
    let time_format = "%Y-%m-%d %H:%M:%S%.3f %:z";

    if cli.utc {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_timer(tracing_subscriber::fmt::time::ChronoUtc::new(time_format.to_string()))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_timer(tracing_subscriber::fmt::time::ChronoLocal::new(time_format.to_string()))
            .init();
    }

    match cli.command {
        Commands::Fetch {
            start,
            output_dir,
            no_cache,
        } => {
            tracing::info!(start = %start, "Fetching book");
            let cache_root = (!no_cache).then_some(output_dir.as_path());
            let book = vulgate_acquire::acquire_book(&start, cache_root).await?;
            warn_alignment(&book);
            vulgate_acquire::output::write_book(&book, &output_dir)?;
        }
        Commands::Typeset { book, layout } => {
            tracing::info!(book = %book.display(), template = %layout.template.display(), "Typesetting");
            let book = vulgate_acquire::output::read_book(&book)?;
            let template = vulgate_acquire::output::read_template(&layout.template)?;
            typeset(&book, &template, &layout)?;
        }
        Commands::Build {
            start,
            cache_dir,
            layout,
        } => {
            tracing::info!(start = %start, template = %layout.template.display(), "Building book");
            // Read the template first so a bad path fails before any fetching
            let template = vulgate_acquire::output::read_template(&layout.template)?;
            let book = vulgate_acquire::acquire_book(&start, cache_dir.as_deref()).await?;
            warn_alignment(&book);
            typeset(&book, &template, &layout)?;
        }
        Commands::Validate {
            book,
            template,
            variant,
            language,
        } => {
            tracing::info!(book = %book.display(), "Validating");
            let book = vulgate_acquire::output::read_book(&book)?;
            let variant = TemplateVariant::from(variant);
            let languages = vulgate_validate::required_languages(variant, language.into());
            let mut errors = vulgate_validate::validate_book(&book, &languages);
            if let Some(path) = template {
                let template = vulgate_acquire::output::read_template(&path)?;
                errors.extend(vulgate_validate::validate_template(&template, variant));
            }
            warn_alignment(&book);
            if !errors.is_empty() {
                anyhow::bail!("{} validation errors", errors.len());
            }
            tracing::info!(chapters = book.chapters.len(), "Book is valid");
        }
        Commands::Roman { number } => {
            println!("{}", vulgate_typeset::to_roman(number)?);
        }
    }

    Ok(())
}

/// Validate, compose, and write the document. Nothing is written on error.
///
/// Validation logs each problem itself; only the count is reported here.
fn typeset(book: &Book, template: &str, layout: &LayoutArgs) -> Result<()> {
    let variant = TemplateVariant::from(layout.variant);
    let language = Language::from(layout.language);

    let errors = vulgate_validate::validate(book, template, variant, language);
    if !errors.is_empty() {
        anyhow::bail!("{} validation errors, fix before typesetting", errors.len());
    }

    let document = vulgate_typeset::compose(book, template, variant, language)?;
    let path = layout
        .output
        .clone()
        .unwrap_or_else(|| vulgate_acquire::output::document_path(book));
    vulgate_acquire::output::write_document(&document, &path)
}

fn warn_alignment(book: &Book) {
    for w in vulgate_validate::alignment_warnings(book) {
        tracing::warn!("{w}");
    }
}
