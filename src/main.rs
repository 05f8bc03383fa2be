use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use ukkonen::{SuffixTree, TreeConfig};

#[derive(Parser, Debug)]
#[command(name = "ukkonen", about = "Suffix tree construction and substring search")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Report for each pattern whether it occurs in the text.
    Search {
        /// File holding the text to index.
        text: PathBuf,
        /// Patterns to look up.
        #[arg(required = true)]
        patterns: Vec<String>,
        /// Sentinel appended to the text (default: $).
        #[arg(long, default_value = "$")]
        sentinel: char,
    },
    /// Print the tree as an indented edge-label listing.
    Dump {
        /// File holding the text to index.
        text: PathBuf,
        /// Sentinel appended to the text (default: $).
        #[arg(long, default_value = "$")]
        sentinel: char,
    },
    /// Print node and leaf counts for the built tree.
    Stats {
        /// File holding the text to index.
        text: PathBuf,
        /// Sentinel appended to the text (default: $).
        #[arg(long, default_value = "$")]
        sentinel: char,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Search {
            text,
            patterns,
            sentinel,
        } => run_search(text, patterns, sentinel)?,
        Commands::Dump { text, sentinel } => run_dump(text, sentinel)?,
        Commands::Stats { text, sentinel } => run_stats(text, sentinel)?,
    }

    Ok(())
}

fn run_search(text_path: PathBuf, patterns: Vec<String>, sentinel: char) -> Result<()> {
    let tree = build_tree(&text_path, sentinel)?;

    for pattern in patterns {
        let found = tree
            .contains(pattern.as_bytes())
            .with_context(|| format!("query failed for pattern '{pattern}'"))?;
        if found {
            println!("pattern <{pattern}> is a substring");
        } else {
            println!("pattern <{pattern}> is NOT a substring");
        }
    }

    Ok(())
}

fn run_dump(text_path: PathBuf, sentinel: char) -> Result<()> {
    let tree = build_tree(&text_path, sentinel)?;
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    tree.write_dump(&mut lock).context("failed to render tree")?;
    lock.flush()?;
    Ok(())
}

fn run_stats(text_path: PathBuf, sentinel: char) -> Result<()> {
    let tree = build_tree(&text_path, sentinel)?;
    let stats = tree.stats();
    println!(
        "text={}\tnodes={}\tleaves={}\tinternal={}",
        stats.text_len, stats.node_count, stats.leaf_count, stats.internal_count
    );
    Ok(())
}

fn build_tree(text_path: &PathBuf, sentinel: char) -> Result<SuffixTree> {
    let sentinel = u8::try_from(sentinel as u32)
        .ok()
        .context("sentinel must be a single-byte character")?;

    let mut text = read_text_file(text_path)
        .with_context(|| format!("failed to read text from {}", text_path.display()))?;
    if text.last() != Some(&sentinel) {
        text.push(sentinel);
    }

    SuffixTree::build_with(&text, TreeConfig::with_sentinel(sentinel))
        .context("failed to build suffix tree")
}

fn read_text_file(path: &PathBuf) -> Result<Vec<u8>> {
    let mut contents = std::fs::read(path)?;
    // Drop one trailing newline so shell-created files index cleanly.
    if contents.last() == Some(&b'\n') {
        contents.pop();
        if contents.last() == Some(&b'\r') {
            contents.pop();
        }
    }
    Ok(contents)
}
