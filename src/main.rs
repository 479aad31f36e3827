//! # StudyBuddy CLI (`buddy`)
//!
//! The `buddy` binary answers study questions and generates quiz content
//! from a directory of personal notes. Every command rebuilds the
//! retrieval index from the note files at startup; nothing is persisted
//! between runs except the telemetry log.
//!
//! ## Usage
//!
//! ```bash
//! buddy --config ./buddy.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `buddy chat` | Interactive menu session (ask / quiz / quit) |
//! | `buddy ask "<question>"` | One-shot question answering |
//! | `buddy quiz "<topic>"` | One-shot quiz generation |
//! | `buddy search "<query>"` | Debug retrieval: top-k chunks with scores |
//! | `buddy eval` | Run the offline evaluation suite |
//!
//! `OPENAI_API_KEY` must be set in the environment. A missing config file
//! falls back to built-in defaults (`data/notes`, top-k 4, 800-char
//! chunks).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use studybuddy::assistant::{Assistant, Mode};
use studybuddy::config;
use studybuddy::engine::RagEngine;
use studybuddy::eval;
use studybuddy::repl;
use studybuddy::style;

/// StudyBuddy: a retrieval-augmented study assistant for your own notes.
#[derive(Parser)]
#[command(
    name = "buddy",
    about = "StudyBuddy — answer study questions and generate quizzes from your own notes",
    version,
    long_about = "StudyBuddy ingests the markdown and plain-text notes in a directory, \
    embeds them into an in-memory index, and answers questions or generates quiz content \
    grounded in the most relevant passages."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./buddy.toml`. A missing file is fine; built-in
    /// defaults apply.
    #[arg(long, global = true, default_value = "./buddy.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Start an interactive study session.
    ///
    /// Presents a menu: ask a question about your notes, generate quiz
    /// questions, or quit. Request failures are shown and the session
    /// continues.
    Chat,

    /// Ask a single question and print the answer.
    Ask {
        /// The study question.
        question: String,

        /// Number of note chunks to retrieve as context.
        #[arg(long)]
        k: Option<usize>,
    },

    /// Generate quiz questions for a topic.
    Quiz {
        /// The quiz topic.
        topic: String,
    },

    /// Debug retrieval: print the top-k chunks with similarity scores.
    ///
    /// Embeds the query, scores it against every indexed chunk, and
    /// prints the ranked excerpts. No chat model call is made.
    Search {
        /// The search query.
        query: String,

        /// Number of chunks to return.
        #[arg(long)]
        k: Option<usize>,
    },

    /// Run the offline evaluation suite.
    ///
    /// Replays each case in the tests file through the full request flow
    /// and prints PASS/FAIL per case plus the overall pass rate.
    Eval {
        /// Path to the JSON tests file.
        #[arg(long, default_value = "tests.json")]
        tests: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Chat => {
            let assistant = Assistant::new(cfg)?;
            print_index_summary(assistant.engine());
            repl::run(&assistant)?;
        }
        Commands::Ask { question, k } => {
            if let Some(k) = k {
                cfg.retrieval.top_k = k;
            }
            let assistant = Assistant::new(cfg)?;
            print_index_summary(assistant.engine());
            repl::run_once(&assistant, Mode::Qa, &question);
        }
        Commands::Quiz { topic } => {
            let assistant = Assistant::new(cfg)?;
            print_index_summary(assistant.engine());
            repl::run_once(&assistant, Mode::Quiz, &topic);
        }
        Commands::Search { query, k } => {
            let top_k = k.unwrap_or(cfg.retrieval.top_k);
            let engine = RagEngine::build(&cfg)?;
            print_index_summary(&engine);
            run_search(&engine, &query, top_k)?;
        }
        Commands::Eval { tests } => {
            let assistant = Assistant::new(cfg)?;
            print_index_summary(assistant.engine());
            eval::run_eval(&assistant, &tests)?;
        }
    }

    Ok(())
}

fn print_index_summary(engine: &RagEngine) {
    println!(
        "{}",
        style::cyan(&format!(
            "Indexed {} chunks from {} note files.",
            engine.num_chunks(),
            engine.num_files()
        ))
    );
}

fn run_search(engine: &RagEngine, query: &str, k: usize) -> anyhow::Result<()> {
    let results = engine.search_scored(query, k)?;

    if results.is_empty() {
        println!("No results.");
        return Ok(());
    }

    for (i, (chunk, score)) in results.iter().enumerate() {
        let excerpt: String = chunk.chars().take(240).collect();
        println!(
            "{}. [{:.3}] \"{}\"",
            i + 1,
            score,
            excerpt.replace('\n', " ")
        );
    }

    Ok(())
}
