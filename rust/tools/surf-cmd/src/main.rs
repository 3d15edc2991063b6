use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod utils;

#[derive(Parser)]
#[command(name = "surf-cmd")]
#[command(about = "Command-line utility for building and querying succinct trie indexes")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a trie from a file of newline-separated keys
    Build {
        /// Key file; each line is one key, its value is the line ordinal
        #[arg(short, long)]
        input: String,

        /// Output trie path
        output: String,
    },

    /// Look up one or more keys
    Get {
        /// Trie path
        trie_path: String,

        /// Keys to look up
        #[arg(required = true)]
        keys: Vec<String>,
    },

    /// Print entries in key order
    Scan {
        /// Only print keys starting with this prefix
        #[arg(short, long)]
        prefix: Option<String>,

        /// Start at the smallest key greater than or equal to this one
        #[arg(short, long, conflicts_with = "prefix")]
        from: Option<String>,

        /// Maximum number of entries to print
        #[arg(short, long)]
        limit: Option<usize>,

        /// Trie path
        trie_path: String,
    },

    /// Inspect a trie and display summary information
    Inspect {
        /// Increase verbosity (-v dumps the LOUDS-Sparse vectors)
        #[arg(short, long, action = clap::ArgAction::Count)]
        verbose: u8,

        /// Trie path
        trie_path: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, output } => commands::build::run(input, output),
        Commands::Get { trie_path, keys } => commands::get::run(trie_path, keys),
        Commands::Scan {
            prefix,
            from,
            limit,
            trie_path,
        } => commands::scan::run(prefix, from, limit, trie_path),
        Commands::Inspect { verbose, trie_path } => commands::inspect::run(verbose, trie_path),
    }
}
