use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::BufRead;
use std::path::PathBuf;

use subject_tidy::compose::{ComposeEvent, ComposeOutcome, clean_subject_on_compose};
use subject_tidy::config::{load_config, resolve_db_path};
use subject_tidy::domain::settings::SettingKey;
use subject_tidy::mail::decoders::decode_subject;
use subject_tidy::mail::eml::EmlComposeHost;
use subject_tidy::store::repo::SettingsStore;
use subject_tidy::store::sqlite::SqliteSettingsStore;
use subject_tidy::{PrefixMode, SubjectNormalizer};

#[derive(Parser)]
#[command(name = "subject_tidy")]
#[command(about = "Strip external tags and tidy Re:/Fwd: chains in mail subjects", long_about = None)]
struct Cli {
    /// Settings database (defaults to the one named in config.toml)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Normalize subjects given as arguments, or one per stdin line
    Normalize {
        subjects: Vec<String>,

        #[arg(long, value_enum)]
        mode: Option<ModeArg>,

        /// Leave external tags in place
        #[arg(long)]
        keep_tags: bool,

        /// Leave the Re:/Fwd: chain as is
        #[arg(long)]
        keep_prefixes: bool,
    },

    /// Clean the subject of a draft stored as a message file
    Compose {
        #[arg(long, value_enum, default_value_t = EventArg::BeforeSend)]
        event: EventArg,

        file: PathBuf,
    },

    /// Inspect or change stored settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print all settings as JSON
    Show,
    Set { key: String, value: String },
    /// Restore the default value of one setting
    Reset { key: String },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Collapse,
    Overwrite,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum EventArg {
    Opened,
    BeforeSend,
}

fn open_store(db: Option<PathBuf>) -> Result<SqliteSettingsStore> {
    let path = match db {
        Some(p) => p,
        None => {
            let cfg = load_config().map_err(|e| anyhow!("Configuration error: {e}"))?;
            resolve_db_path(&cfg)?
        }
    };
    let store = SqliteSettingsStore::open(&path)?;
    store.seed_defaults()?;
    Ok(store)
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let store = open_store(cli.db)?;

    match cli.cmd {
        Command::Normalize {
            subjects,
            mode,
            keep_tags,
            keep_prefixes,
        } => {
            let mut config = store.load()?.to_configuration();
            if let Some(mode) = mode {
                config.prefix_mode = match mode {
                    ModeArg::Collapse => PrefixMode::Collapse,
                    ModeArg::Overwrite => PrefixMode::Overwrite,
                };
            }
            if keep_tags {
                config.extract_tags = false;
            }
            if keep_prefixes {
                config.normalize_prefixes = false;
            }

            let normalizer = SubjectNormalizer::new(&config)?;
            if subjects.is_empty() {
                for line in std::io::stdin().lock().lines() {
                    let line = line?;
                    println!("{}", normalizer.normalize(&decode_subject(line.as_bytes())));
                }
            } else {
                for s in subjects {
                    println!("{}", normalizer.normalize(&decode_subject(s.as_bytes())));
                }
            }
            Ok(())
        }

        Command::Compose { event, file } => {
            let event = match event {
                EventArg::Opened => ComposeEvent::WindowOpened,
                EventArg::BeforeSend => ComposeEvent::BeforeSend,
            };
            match clean_subject_on_compose(&EmlComposeHost, file.as_path(), &store, event) {
                ComposeOutcome::Updated { to, .. } => println!("Subject updated: {to}"),
                ComposeOutcome::Unchanged => println!("Subject unchanged"),
                ComposeOutcome::Failed => eprintln!("Subject left untouched (see log)"),
            }
            Ok(())
        }

        Command::Settings { action } => match action {
            SettingsAction::Show => {
                let settings = store.load()?;
                println!("{}", serde_json::to_string_pretty(&settings)?);
                Ok(())
            }
            SettingsAction::Set { key, value } => {
                let key = SettingKey::parse(&key)?;
                store.set(key, &value)?;
                println!("Saved {}", key.as_str());
                Ok(())
            }
            SettingsAction::Reset { key } => {
                let key = SettingKey::parse(&key)?;
                store.reset(key)?;
                println!("Reset {} to {:?}", key.as_str(), key.default_value());
                Ok(())
            }
        },
    }
}
