//! `snipdown` CLI - Convert HTML to markdown, collapsing GitHub code snippets

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use snipdown::rules::code_snippet;
use snipdown::{load_config, CodeBlockStyle, HeadingStyle};

#[derive(Parser)]
#[command(name = "snipdown")]
#[command(about = "Convert HTML to markdown, collapsing GitHub code snippets into permalinks")]
#[command(version)]
struct Cli {
    /// HTML file to convert (stdin when omitted or `-`)
    input: Option<PathBuf>,

    /// Write markdown to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Config file (default: ~/.config/snipdown/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Keep GitHub code-snippet widgets instead of collapsing them
    #[arg(long)]
    no_code_snippet: bool,

    /// Heading syntax for h1/h2
    #[arg(long, value_enum)]
    heading_style: Option<HeadingArg>,

    /// Code block syntax for <pre>
    #[arg(long, value_enum)]
    code_block_style: Option<CodeBlockArg>,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum HeadingArg {
    Setext,
    Atx,
}

#[derive(Clone, Copy, ValueEnum)]
enum CodeBlockArg {
    Indented,
    Fenced,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let mut config = load_config(cli.config.as_deref())?;
    if cli.no_code_snippet {
        config.rules.code_snippet = false;
    }
    if let Some(style) = cli.heading_style {
        config.options.heading_style = match style {
            HeadingArg::Setext => HeadingStyle::Setext,
            HeadingArg::Atx => HeadingStyle::Atx,
        };
    }
    if let Some(style) = cli.code_block_style {
        config.options.code_block_style = match style {
            CodeBlockArg::Indented => CodeBlockStyle::Indented,
            CodeBlockArg::Fenced => CodeBlockStyle::Fenced,
        };
    }

    let converter = config.converter();
    tracing::debug!(
        "Rules: {:?} (code-snippet {})",
        converter.rule_keys().collect::<Vec<_>>(),
        if converter.has_rule(code_snippet::RULE_KEY) { "on" } else { "off" }
    );

    let html = read_input(cli.input.as_deref())?;
    let result = converter.convert(&html)?;
    tracing::info!(
        "Converted in {:.2}ms, {} replacements",
        result.elapsed_ms,
        result.replacements
    );

    write_output(cli.output.as_deref(), &result.markdown)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p)
            .with_context(|| format!("failed to read {}", p.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&Path>, markdown: &str) -> Result<()> {
    if let Some(p) = path {
        std::fs::write(p, format!("{markdown}\n"))
            .with_context(|| format!("failed to write {}", p.display()))?;
        tracing::info!("Saved {} bytes to {}", markdown.len(), p.display());
        return Ok(());
    }

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{markdown}").context("failed to write stdout")?;
    Ok(())
}
