//! termdown - print HTML documents as wrapped, styled terminal text
//!
//! Reads an HTML file (or stdin), renders it with the configured theme and
//! wraps it to the terminal width.

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use termdown::pages::{default_page, error_page};
use termdown::{parse_html, Config, Document, TermdownService};
use tracing::{debug, warn};

const FALLBACK_WIDTH: usize = 80;

#[derive(Parser, Debug)]
#[command(name = "termdown", version)]
#[command(about = "Render HTML as wrapped, styled terminal text", long_about = None)]
struct Cli {
    /// HTML file to render; reads stdin when omitted or `-`
    file: Option<PathBuf>,

    /// Wrap to this many columns instead of the terminal width
    #[arg(long, short)]
    width: Option<usize>,

    /// TOML file with settings and styles
    #[arg(long, short, env = "TERMDOWN_CONFIG")]
    config: Option<PathBuf>,

    /// Maximum number of consecutive blank lines (1-10)
    #[arg(long)]
    max_gaps: Option<usize>,

    /// Print the rendered text without wrapping
    #[arg(long, conflicts_with = "width")]
    no_wrap: bool,

    /// Print the document title above the content
    #[arg(long)]
    title: bool,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => Config::default(),
    };
    let mut service = TermdownService::with_config(config);
    if let Some(gaps) = cli.max_gaps {
        service.set_gap_limit(gaps);
    }

    let width = if cli.no_wrap {
        0
    } else {
        cli.width.unwrap_or_else(terminal_width)
    };

    let (document, status) = match read_input(cli.file.as_deref()) {
        Ok(html) if html.trim().is_empty() => {
            debug!("empty input, showing the default page");
            (default_page(), ExitCode::SUCCESS)
        }
        Ok(html) => (parse_html(&html), ExitCode::SUCCESS),
        Err(err) => {
            warn!(error = %err, "could not read input");
            (error_page(&format!("{err:#}")), ExitCode::FAILURE)
        }
    };

    print_document(&service, &document, width, cli.title)?;
    Ok(status)
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut html = String::new();
            io::stdin()
                .read_to_string(&mut html)
                .context("failed to read stdin")?;
            Ok(html)
        }
    }
}

fn terminal_width() -> usize {
    match crossterm::terminal::size() {
        Ok((columns, _)) if columns > 0 => usize::from(columns),
        _ => FALLBACK_WIDTH,
    }
}

fn print_document(
    service: &TermdownService,
    document: &Document,
    width: usize,
    with_title: bool,
) -> Result<()> {
    let text = service.render_document(document, width);
    let mut stdout = io::stdout().lock();
    if with_title {
        if let Some(title) = &document.title {
            writeln!(stdout, "{title}\n")?;
        }
    }
    stdout.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        writeln!(stdout)?;
    }
    stdout.flush()?;
    Ok(())
}
