//! CLI module for Murmur.

pub mod commands;
mod output;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Murmur - ask questions about comment threads and documents
///
/// Stores named corpora (one fragment per line), retrieves the fragments most
/// relevant to a question with TF-IDF, and asks a local LLM to answer from them.
#[derive(Parser, Debug)]
#[command(name = "murmur")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "MURMUR_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask a question about a stored corpus
    Ask {
        /// Corpus name
        corpus: String,

        /// The question to ask
        query: String,

        /// Number of fragments to retrieve (default: retrieval.top_k)
        #[arg(short, long)]
        k: Option<usize>,

        /// Model to use instead of backend.model
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Show the fragments most relevant to a query without calling the backend
    Search {
        /// Corpus name
        corpus: String,

        /// Search query
        query: String,

        /// Number of fragments to retrieve (default: retrieval.top_k)
        #[arg(short, long)]
        k: Option<usize>,
    },

    /// Manage stored corpora
    Corpus {
        #[command(subcommand)]
        action: CorpusAction,
    },

    /// Show or clear the question/answer history of a corpus
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// Manage stored backend API keys
    Keys {
        #[command(subcommand)]
        action: KeysAction,
    },

    /// List models served by the backend
    Models,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum CorpusAction {
    /// Import a text file (one fragment per non-empty line); use '-' for stdin
    Import {
        /// Name to store the corpus under
        name: String,

        /// File to read
        file: String,

        /// Optional human-readable title
        #[arg(short, long)]
        title: Option<String>,
    },

    /// List stored corpora
    List,

    /// Print the fragments of a corpus
    Show {
        /// Corpus name
        name: String,
    },

    /// Delete a corpus and its history
    Delete {
        /// Corpus name
        name: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum HistoryAction {
    /// Print the history as Markdown
    Show {
        /// Corpus name
        corpus: String,
    },

    /// Delete the history
    Clear {
        /// Corpus name
        corpus: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum KeysAction {
    /// Save an API key under a name
    Add {
        /// Reference name
        name: String,
        /// Key value
        value: String,
    },

    /// List saved key names
    List,

    /// Remove a saved key
    Remove {
        /// Reference name
        name: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Write the current configuration to the config file
    Init,
}
