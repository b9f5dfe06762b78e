// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{debug, info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use vocab_store::app_config::{Config, LogLevel};
use vocab_store::database::{
    DatabaseConnection, PreferenceStore, QueryExecutor, SchemaManager, WordEntry, WordRepository,
};
use vocab_store::StoreHydrator;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ThemeMode {
    Light,
    Dark,
}

/// Fields of a word entry settable from the command line
#[derive(Args, Debug)]
struct WordArgs {
    /// The word (natural key)
    #[arg(value_name = "WORD")]
    word: String,

    #[arg(long)]
    translation: Option<String>,

    /// Path or URI of an illustration
    #[arg(long)]
    image: Option<String>,

    #[arg(long)]
    date_forgets: Option<i64>,

    #[arg(long)]
    date_totally_forgets: Option<i64>,

    #[arg(long)]
    forgetting_span: Option<i64>,

    #[arg(long)]
    status: Option<i64>,

    #[arg(long, default_value = "")]
    phonetics: String,

    #[arg(long, default_value = "")]
    part_of_speech: String,

    #[arg(long, default_value = "")]
    meaning: String,
}

impl From<WordArgs> for WordEntry {
    fn from(args: WordArgs) -> Self {
        WordEntry {
            id: None,
            word: args.word,
            translation: args.translation,
            image: args.image,
            date_forgets: args.date_forgets,
            date_totally_forgets: args.date_totally_forgets,
            forgetting_span: args.forgetting_span,
            status: args.status,
            phonetics: args.phonetics,
            part_of_speech: args.part_of_speech,
            meaning: args.meaning,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the hydrated initial state as JSON
    Hydrate,

    /// Print all word entries as JSON
    List,

    /// Add a new word entry
    Add(WordArgs),

    /// Overwrite an existing word entry, matched by word
    Update(WordArgs),

    /// Delete a word entry
    Delete {
        #[arg(value_name = "WORD")]
        word: String,
    },

    /// Show or set the theme preference
    Theme {
        #[arg(value_enum)]
        mode: Option<ThemeMode>,
    },

    /// Generate shell completions for vocab-store
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// vocab-store - inspect and maintain a vocabulary store file
#[derive(Parser, Debug)]
#[command(name = "vocab-store")]
#[command(version)]
#[command(about = "Inspect and maintain a vocabulary store")]
#[command(long_about = "Operates on the SQLite file that backs the vocabulary app.

EXAMPLES:
    vocab-store hydrate                          # Print the initial app state
    vocab-store add dog --translation perro      # Add a word
    vocab-store update dog --meaning 'a pet'     # Overwrite a word's fields
    vocab-store theme dark                       # Switch to the dark theme
    vocab-store -d ./dictionary.db list          # Use a specific store file

CONFIGURATION:
    Configuration is stored in vocab-store.json by default. If the file doesn't
    exist, a default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "vocab-store.json", global = true)]
    config_path: PathBuf,

    /// Store file; overrides the configured path
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger { level: LevelFilter::Trace }))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and tag for a level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "ERROR"),
            Level::Warn => ("\x1B[1;33m", "WARN "),
            Level::Info => ("\x1B[1;32m", "INFO "),
            Level::Debug => ("\x1B[1;36m", "DEBUG"),
            Level::Trace => ("\x1B[1;35m", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, tag) = Self::style_for_level(record.level());

            let _ = writeln!(std::io::stderr(), "{}{} {} {}\x1B[0m", color, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The max level is raised or lowered once options and config are known
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "vocab-store", &mut std::io::stdout());
        return Ok(());
    }

    if let Some(level) = cli.log_level {
        log::set_max_level(LogLevel::from(level).into());
    }

    let mut config = Config::load(&cli.config_path)?;

    if let Some(database) = &cli.database {
        config.database.path = Some(database.clone());
    }
    if let Some(level) = cli.log_level {
        config.log_level = level.into();
    }

    config.validate().context("Configuration validation failed")?;
    log::set_max_level(config.log_level.into());

    let db_path = config.database.resolved_path()?;
    debug!("Using store at {}", db_path.display());

    if let Commands::Hydrate = cli.command {
        let (db, snapshot) = StoreHydrator::hydrate_path(&db_path, &config.database).await;
        println!("{}", serde_json::to_string_pretty(&snapshot)?);

        if let Some(db) = db {
            db.close()?;
        }
        return Ok(());
    }

    let db = DatabaseConnection::open_with(&db_path, &config.database)?;
    run_command(db.clone(), cli.command).await?;
    db.close()?;

    Ok(())
}

async fn run_command(db: DatabaseConnection, command: Commands) -> Result<()> {
    let exec = QueryExecutor::new(db);
    SchemaManager::new(exec.clone()).ensure().await?;

    let words = WordRepository::new(exec.clone());
    let preferences = PreferenceStore::new(exec);

    match command {
        Commands::List => {
            let entries = words.get_all().await?;
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        Commands::Add(args) => {
            let entry = WordEntry::from(args);
            let inserted = words.add(&entry).await?;
            info!("Added '{}' with id {}", entry.word, inserted.id);
        }
        Commands::Update(args) => {
            let entry = WordEntry::from(args);
            let changed = words.update(&entry).await?;
            if changed == 0 {
                info!("No entry for '{}', nothing updated", entry.word);
            } else {
                info!("Updated '{}'", entry.word);
            }
        }
        Commands::Delete { word } => {
            let removed = words.delete(&word).await?;
            info!("Removed {} entr{} for '{}'", removed, if removed == 1 { "y" } else { "ies" }, word);
        }
        Commands::Theme { mode: Some(mode) } => {
            preferences.set(matches!(mode, ThemeMode::Dark)).await?;
            info!("Theme set to {:?}", mode);
        }
        Commands::Theme { mode: None } => {
            let preference = preferences.get().await?.unwrap_or_default();
            println!("{}", if preference.is_dark { "dark" } else { "light" });
        }
        Commands::Hydrate | Commands::Completions { .. } => {}
    }

    Ok(())
}
