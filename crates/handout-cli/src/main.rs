//! handout CLI: restore, record and chart exercise answers.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "handout", version, about = "Exercise answers for course handouts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a page, restore stored answers and show the resulting state
    Restore {
        /// Page description (.toml)
        #[arg(long)]
        page: PathBuf,

        /// Answer file (overrides the configured path)
        #[arg(long)]
        answers: Option<PathBuf>,

        /// Write answers and telemetry back to disk
        #[arg(long)]
        save: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Answer one exercise and record it
    Answer {
        /// Page description (.toml)
        #[arg(long)]
        page: PathBuf,

        /// Exercise slug
        #[arg(long)]
        slug: String,

        /// Text for a text exercise
        #[arg(long, conflicts_with = "option")]
        text: Option<String>,

        /// Option value for a choice exercise
        #[arg(long)]
        option: Option<String>,

        /// Answer file (overrides the configured path)
        #[arg(long)]
        answers: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate page description files
    Validate {
        /// Path to a page file or a directory of them
        #[arg(long)]
        page: PathBuf,
    },

    /// Build a dashboard chart from a legacy answer mapping
    Chart {
        /// Exercise slug
        #[arg(long)]
        slug: String,

        /// Chart type: choice, parsons, word-cloud
        #[arg(long, default_value = "choice")]
        kind: String,

        /// Answer-to-count mapping as printed by the backend
        #[arg(long)]
        mapping: String,

        /// Correct code, for parsons charts
        #[arg(long, default_value = "")]
        correct: String,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Create starter config and example page
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("handout=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Restore {
            page,
            answers,
            save,
            config,
        } => commands::restore::execute(page, answers, save, config),
        Commands::Answer {
            page,
            slug,
            text,
            option,
            answers,
            config,
        } => commands::answer::execute(page, slug, text, option, answers, config),
        Commands::Validate { page } => commands::validate::execute(page),
        Commands::Chart {
            slug,
            kind,
            mapping,
            correct,
            pretty,
        } => commands::chart::execute(slug, kind, mapping, correct, pretty),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
