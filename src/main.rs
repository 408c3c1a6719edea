//! fluidscore — arrange a score or compile a clip from the command line.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use log::{LevelFilter, Log, Metadata, Record};

use fluidscore::osc::create_clip_from_node;
use fluidscore::score::{load_node, load_score};
use fluidscore::structure::{load_structure_file, StructureDefinition};
use fluidscore::{arrange, ArrangeConfig, Result};

#[derive(Debug, Parser)]
#[command(name = "fluidscore", version, about)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file (defaults to ~/.fluidscore/config.yaml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Apply a structure to a score and print the arranged sections as YAML.
    Arrange {
        /// YAML or JSON file holding the list of authored sections.
        score: PathBuf,
        /// Structure id in the structure library, or a path to a definition file.
        #[arg(short, long)]
        structure: String,
    },
    /// Compile a note list into a clip batch and print one message per line.
    Clip {
        track: String,
        clip: String,
        start_beats: f64,
        end_beats: f64,
        /// YAML or JSON file holding the list of notes.
        notes: PathBuf,
    },
}

/// Minimal stderr logger; the level filter is `log::max_level()`.
struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

fn load_structure(config: &ArrangeConfig, id_or_path: &str) -> Result<StructureDefinition> {
    let path = Path::new(id_or_path);
    if path.is_file() {
        load_structure_file(path)
    } else {
        config.library().load(id_or_path)
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => ArrangeConfig::from_path(path)?,
        None => ArrangeConfig::load().unwrap_or_default(),
    };

    match cli.command {
        Command::Arrange { score, structure } => {
            let sections = load_score(&score)?;
            let definition = load_structure(&config, &structure)?;
            let arranged = arrange(&sections, &definition, &config.markers)?;
            print!("{}", serde_yaml::to_string(&arranged.to_yaml())?);
            for entry in &arranged.keyed_entries {
                println!("# keyed entry: {entry}");
            }
        }
        Command::Clip {
            track,
            clip,
            start_beats,
            end_beats,
            notes,
        } => {
            let notes = load_node(&notes)?;
            for message in create_clip_from_node(&track, &clip, start_beats, end_beats, &notes)? {
                println!("{message}");
            }
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
