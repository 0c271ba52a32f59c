//! slides - compile slide markup into PostScript
//!
//! Reads a markup file (or stdin) where blank lines separate pages and
//! `#+name: value` lines change fonts, sizes, layout and images, and
//! writes one PostScript document.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use slides_core::{PageParams, compile};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, IsTerminal, Write};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Compile slide markup into PostScript pages.
#[derive(Parser, Debug)]
#[command(name = "slides")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Markup file to read; stdin when omitted or "-"
    file: Option<PathBuf>,

    /// Path to file where output is written, or "-" for stdout
    #[arg(short = 'o', long, default_value = "-")]
    outfile: String,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,

    // === Page defaults ===
    /// Page width in points
    #[arg(long, default_value = "400")]
    width: i32,

    /// Page height in points
    #[arg(long, default_value = "300")]
    height: i32,

    /// Font size in points
    #[arg(short = 's', long, default_value = "20")]
    size: i32,

    /// Border kept around images, in points
    #[arg(short = 'p', long, default_value = "0")]
    padding: i32,

    /// Font family
    #[arg(short = 'f', long, default_value = "Helvetica")]
    font: String,

    /// Fit images inside the page instead of covering it
    #[arg(long = "no-fill", action = ArgAction::SetTrue)]
    no_fill: bool,
}

fn init_logging(debug: bool) {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(level.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(io::stderr().is_terminal())
                .without_time()
                .with_target(false),
        )
        .init();
}

fn build_params(args: &Args) -> slides_core::Result<PageParams> {
    let params = PageParams::new(args.width, args.height, args.size, args.padding)?
        .with_font(args.font.clone())
        .with_fill(!args.no_fill);
    Ok(params)
}

fn open_input(file: Option<&PathBuf>) -> io::Result<Box<dyn BufRead>> {
    match file {
        Some(path) if path.as_os_str() != "-" => Ok(Box::new(BufReader::new(File::open(path)?))),
        _ => Ok(Box::new(io::stdin().lock())),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    let params = match build_params(&args) {
        Ok(params) => params,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    // Open the input first so a missing file produces no output at all
    let input = match open_input(args.file.as_ref()) {
        Ok(input) => input,
        Err(e) => {
            if let Some(path) = &args.file {
                eprintln!("Error: {}: {}", path.display(), e);
            } else {
                eprintln!("Error: {}", e);
            }
            std::process::exit(1);
        }
    };

    let mut output: Box<dyn Write> = if args.outfile == "-" {
        Box::new(BufWriter::new(io::stdout()))
    } else {
        let file = File::create(&args.outfile)
            .with_context(|| format!("Failed to create output file {}", args.outfile))?;
        Box::new(BufWriter::new(file))
    };

    let summary = compile(input, &mut output, &params).context("failed to write PostScript")?;
    tracing::debug!(
        pages = summary.pages,
        warnings = summary.diagnostics.len(),
        "done"
    );

    output.flush()?;
    Ok(())
}
