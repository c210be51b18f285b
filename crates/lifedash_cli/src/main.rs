//! Dump-box command line.
//!
//! # Responsibility
//! - Expose classify/capture/list flows of `lifedash_core` for quick local
//!   use and sanity checks.
//! - Keep output machine-readable (JSON) so it can be piped.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use lifedash_core::db::open_db;
use lifedash_core::{
    categorize, Category, DumpService, ItemListQuery, ItemRepository, SqliteItemRepository,
};
use std::path::{Path, PathBuf};

const DEFAULT_DB_FILE: &str = "lifedash.sqlite3";

#[derive(Parser)]
#[command(name = "lifedash", version, about = "Classify and capture free-text dashboard entries")]
struct Cli {
    /// SQLite database file for `add` and `list`.
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Directory for rolling log files; logging stays off when omitted.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify text and print the result as JSON, without saving.
    Classify {
        /// Free text; multiple words are joined with spaces.
        text: Vec<String>,
    },
    /// Classify text and save the materialized item into the store.
    Add {
        /// Override the predicted category (tasks|finances|health|notes|books).
        #[arg(long)]
        category: Option<String>,
        text: Vec<String>,
    },
    /// List stored items as JSON lines, newest first.
    List {
        #[arg(long)]
        category: Option<String>,
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        lifedash_core::init_logging(
            lifedash_core::default_log_level(),
            &log_dir.to_string_lossy(),
        )
        .map_err(|message| anyhow!(message))?;
    }

    match cli.command {
        Command::Classify { text } => run_classify(&joined(&text)?),
        Command::Add { category, text } => {
            run_add(&db_path(cli.db), category.as_deref(), &joined(&text)?)
        }
        Command::List { category, limit } => run_list(&db_path(cli.db), category.as_deref(), limit),
    }
}

fn run_classify(text: &str) -> Result<()> {
    let Some(result) = categorize(text) else {
        bail!("nothing to classify: input is empty");
    };
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn run_add(db: &Path, category: Option<&str>, text: &str) -> Result<()> {
    let conn = open_db(db).with_context(|| format!("failed to open database {}", db.display()))?;
    let repo = SqliteItemRepository::try_new(&conn)?;
    let service = DumpService::new(repo);

    let captured = match category {
        Some(name) => service.capture_as(text, parse_category(name)?)?,
        None => service.capture(text)?,
    };

    println!(
        "saved {} as {} (confidence: {})",
        captured.item_id, captured.classification.category, captured.classification.confidence
    );
    Ok(())
}

fn run_list(db: &Path, category: Option<&str>, limit: u32) -> Result<()> {
    let conn = open_db(db).with_context(|| format!("failed to open database {}", db.display()))?;
    let repo = SqliteItemRepository::try_new(&conn)?;

    let query = ItemListQuery {
        category: category.map(parse_category).transpose()?,
        limit: Some(limit),
        offset: 0,
    };
    for record in repo.list_items(&query)? {
        println!("{}", serde_json::to_string(&record)?);
    }
    Ok(())
}

fn joined(words: &[String]) -> Result<String> {
    let text = words.join(" ");
    if text.trim().is_empty() {
        bail!("no input text given");
    }
    Ok(text)
}

fn db_path(db: Option<PathBuf>) -> PathBuf {
    db.unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE))
}

fn parse_category(name: &str) -> Result<Category> {
    Category::parse(name).ok_or_else(|| {
        anyhow!("unknown category `{name}`; expected tasks|finances|health|notes|books")
    })
}
