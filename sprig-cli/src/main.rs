//! Sprig CLI
//!
//! Scans a markup file (or a literal string) and dumps the node forest.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use owo_colors::OwoColorize;
use sprig_common::warning::clear_warnings;
use sprig_html::{Node, ScanOptions, parse_with_options, print_tree};

/// Scan markup into a node tree.
#[derive(Debug, Parser)]
#[command(name = "sprig", version, about)]
struct Cli {
    /// Markup file to scan.
    file: Option<PathBuf>,

    /// Scan this string instead of a file.
    #[arg(long, conflicts_with = "file")]
    html: Option<String>,

    /// Print the forest as JSON.
    #[arg(long)]
    json: bool,

    /// Stop scanning at this character offset.
    #[arg(long)]
    max_chars: Option<usize>,

    /// Do not turn the text left at end of input into a node.
    #[arg(long)]
    no_trailing_text: bool,
}

impl Cli {
    fn source(&self) -> Result<String> {
        match (&self.html, &self.file) {
            (Some(html), _) => Ok(html.clone()),
            (None, Some(path)) => fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display())),
            (None, None) => bail!("nothing to scan: pass a file or --html '<p>...</p>'"),
        }
    }

    fn options(&self) -> ScanOptions {
        let options = ScanOptions::new().with_trailing_text(!self.no_trailing_text);
        match self.max_chars {
            Some(max) => options.with_max_chars(max),
            None => options,
        }
    }
}

fn count_nodes(nodes: &[Node]) -> usize {
    nodes.iter().map(|node| node.descendants().count()).sum()
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let source = cli.source()?;

    clear_warnings();
    let nodes = parse_with_options(&source, cli.options());

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&nodes)?);
        return Ok(());
    }

    println!("{}", "=== Node Tree ===".bold());
    print_tree(&nodes);

    let open = nodes
        .iter()
        .flat_map(Node::descendants)
        .filter(|node| !node.is_closed())
        .count();
    println!(
        "\n{} roots, {} nodes, {} unterminated",
        nodes.len(),
        count_nodes(&nodes),
        open
    );

    Ok(())
}
