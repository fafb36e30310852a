//! Command-line front end for home-library
//!
//! clap arguments <-> application::LibraryService / RenderService
//!
//! 8 commands: list, add, update, remove, show, genres, export, schema

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::application::render::{RenderFormat, RenderService};
use crate::application::service::LibraryService;
use crate::domain::model::book::{coerce_rating, BookDraft, ReadingStatus};
use crate::domain::model::id::BookId;
use crate::domain::model::query::{ListFilters, SortKey, StatusFilter};
use crate::infra::collation::CzechCollator;
use crate::infra::json_store::{storage_schema, JsonBookRepository};

// =============================================================================
// Arguments
// =============================================================================

#[derive(Debug, Parser)]
#[command(name = "home-library", version, about = "Personal book catalog")]
pub struct Cli {
    /// Directory holding the catalog file
    #[arg(long, env = "HOME_LIBRARY_DIR", default_value = ".")]
    pub data_dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search, filter and sort the catalog
    List {
        #[command(flatten)]
        filters: FilterArgs,
        #[arg(long, value_enum, default_value = "text")]
        format: FormatArg,
    },
    /// Add a book
    Add(BookArgs),
    /// Replace every field of an existing book
    Update {
        id: String,
        #[command(flatten)]
        book: BookArgs,
    },
    /// Delete a book
    Remove { id: String },
    /// Show one book
    Show { id: String },
    /// List genres in use
    Genres,
    /// Write the filtered list to a file
    Export {
        #[command(flatten)]
        filters: FilterArgs,
        #[arg(long, value_enum, default_value = "json")]
        format: FormatArg,
        #[arg(long)]
        output: PathBuf,
    },
    /// Print the JSON Schema of the stored catalog
    Schema,
}

#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Case-insensitive match on title or author
    #[arg(long, default_value = "")]
    pub search: String,
    #[arg(long, value_enum, default_value = "all")]
    pub status: StatusFilterArg,
    /// Exact genre match
    #[arg(long, default_value = "")]
    pub genre: String,
    #[arg(long, value_enum, default_value = "title")]
    pub sort: SortArg,
}

#[derive(Debug, Args)]
pub struct BookArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub author: String,
    #[arg(long, default_value = "")]
    pub genre: String,
    #[arg(long, value_enum, default_value = "wishlist")]
    pub status: StatusArg,
    /// Number from 0 to 5
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub rating: String,
    #[arg(long, default_value = "")]
    pub note: String,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusArg {
    Wishlist,
    Reading,
    Done,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusFilterArg {
    All,
    Wishlist,
    Reading,
    Done,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortArg {
    Title,
    Author,
    #[value(name = "rating_desc")]
    RatingDesc,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Text,
    Json,
}

impl From<StatusArg> for ReadingStatus {
    fn from(val: StatusArg) -> Self {
        match val {
            StatusArg::Wishlist => ReadingStatus::Wishlist,
            StatusArg::Reading => ReadingStatus::Reading,
            StatusArg::Done => ReadingStatus::Done,
        }
    }
}

impl From<StatusFilterArg> for StatusFilter {
    fn from(val: StatusFilterArg) -> Self {
        match val {
            StatusFilterArg::All => StatusFilter::All,
            StatusFilterArg::Wishlist => StatusFilter::Only(ReadingStatus::Wishlist),
            StatusFilterArg::Reading => StatusFilter::Only(ReadingStatus::Reading),
            StatusFilterArg::Done => StatusFilter::Only(ReadingStatus::Done),
        }
    }
}

impl From<SortArg> for SortKey {
    fn from(val: SortArg) -> Self {
        match val {
            SortArg::Title => SortKey::Title,
            SortArg::Author => SortKey::Author,
            SortArg::RatingDesc => SortKey::RatingDesc,
        }
    }
}

impl From<FormatArg> for RenderFormat {
    fn from(val: FormatArg) -> Self {
        match val {
            FormatArg::Text => RenderFormat::Text,
            FormatArg::Json => RenderFormat::Json,
        }
    }
}

impl From<FilterArgs> for ListFilters {
    fn from(args: FilterArgs) -> Self {
        ListFilters {
            search: args.search,
            status: args.status.into(),
            genre: args.genre,
            sort_by: args.sort.into(),
        }
    }
}

impl From<BookArgs> for BookDraft {
    fn from(args: BookArgs) -> Self {
        BookDraft {
            title: args.title,
            author: args.author,
            genre: args.genre,
            status: args.status.into(),
            rating: coerce_rating(&args.rating),
            note: args.note,
        }
    }
}

// =============================================================================
// Entry point
// =============================================================================

/// カタログを開く。読み込み警告はstderrに出す。
fn open_library(
    data_dir: &Path,
) -> anyhow::Result<LibraryService<JsonBookRepository, CzechCollator>> {
    let repo = JsonBookRepository::in_dir(data_dir);
    let service = LibraryService::new(repo, CzechCollator::new()?);
    if let Some(warning) = service.warning() {
        eprintln!("warning: {warning}");
    }
    Ok(service)
}

/// コマンドを実行し、結果を `out` に書く。
pub fn run(cli: Cli, out: &mut impl Write) -> anyhow::Result<()> {
    match cli.command {
        Command::List { filters, format } => {
            let service = open_library(&cli.data_dir)?;
            let books = service.list(&filters.into());
            let rendered = RenderService::render(&books, format.into())?;
            write!(out, "{rendered}")?;
            if !rendered.ends_with('\n') {
                writeln!(out)?;
            }
        }
        Command::Add(args) => {
            let mut service = open_library(&cli.data_dir)?;
            let book = service.add(args.into())?;
            writeln!(out, "Kniha přidána. ({})", book.id())?;
        }
        Command::Update { id, book } => {
            let mut service = open_library(&cli.data_dir)?;
            let id = BookId::from(id);
            if service.update(&id, book.into())? {
                writeln!(out, "Kniha upravena.")?;
            } else {
                writeln!(out, "Kniha {id} nenalezena, nic se nezměnilo.")?;
            }
        }
        Command::Remove { id } => {
            let mut service = open_library(&cli.data_dir)?;
            let id = BookId::from(id);
            if service.remove(&id)? {
                writeln!(out, "Kniha smazána.")?;
            } else {
                writeln!(out, "Kniha {id} nenalezena, nic se nezměnilo.")?;
            }
        }
        Command::Show { id } => {
            let service = open_library(&cli.data_dir)?;
            match service.get(&BookId::from(id.as_str())) {
                Some(book) => write!(out, "{}", RenderService::render_book(book))?,
                None => writeln!(out, "Kniha {id} nenalezena.")?,
            }
        }
        Command::Genres => {
            let service = open_library(&cli.data_dir)?;
            for genre in service.genres() {
                writeln!(out, "{genre}")?;
            }
        }
        Command::Export {
            filters,
            format,
            output,
        } => {
            let service = open_library(&cli.data_dir)?;
            let books = service.list(&filters.into());
            let path = RenderService::export(&books, format.into(), &output)?;
            writeln!(
                out,
                "{} ({})",
                RenderService::list_hint(books.len()),
                path.display()
            )?;
        }
        Command::Schema => {
            writeln!(out, "{}", serde_json::to_string_pretty(&storage_schema())?)?;
        }
    }
    Ok(())
}
