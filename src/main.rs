//! chordshift - transpose the chords in a song sheet
//!
//! Reads a sheet (optionally with `---` YAML frontmatter) from a file or
//! stdin and writes it back with every chord moved to the target key.

use anyhow::{Context, Result};
use chordshift::api::{ErrorResponse, TransposeResponse};
use chordshift::{chord_count, parse_sheet, SongSheet, TransposeError};
use clap::Parser;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chordshift")]
#[command(about = "Transpose the chords in a lyric sheet")]
#[command(version)]
struct Cli {
    /// Sheet to read ("-" or omitted for stdin)
    input: Option<PathBuf>,

    /// Key the sheet is written in (defaults to the frontmatter `key`)
    #[arg(long)]
    from: Option<String>,

    /// Key to transpose into
    #[arg(long)]
    to: String,

    /// Write the result here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print a JSON response instead of the sheet
    #[arg(long)]
    json: bool,
}

fn read_input(input: Option<&PathBuf>) -> Result<String> {
    match input {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
            .with_context(|| format!("Error reading file '{}'", path.display())),
        _ => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .context("Error reading stdin")?;
            Ok(source)
        }
    }
}

fn transpose_sheet(source: &str, cli: &Cli) -> Result<(SongSheet, SongSheet), TransposeError> {
    let sheet = parse_sheet(source)?;
    let moved = sheet.transpose(&cli.to, cli.from.as_deref())?;
    Ok((sheet, moved))
}

fn render_json(sheet: &SongSheet, moved: &SongSheet, cli: &Cli) -> Result<String> {
    let response = TransposeResponse {
        success: true,
        original: sheet.body.clone(),
        transposed: moved.body.clone(),
        original_key: cli
            .from
            .clone()
            .or_else(|| sheet.metadata.key.clone())
            .unwrap_or_default(),
        target_key: cli.to.clone(),
        title: sheet.metadata.title.clone(),
        artist: sheet.metadata.artist.clone(),
    };
    Ok(serde_json::to_string_pretty(&response)?)
}

fn write_output(text: &str, output: Option<&PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("Error writing to '{}'", path.display()))?;
            info!("wrote {}", path.display());
        }
        None => print!("{}", text),
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let source = read_input(cli.input.as_ref())?;

    let (sheet, moved) = match transpose_sheet(&source, cli) {
        Ok(pair) => pair,
        Err(e) if cli.json => {
            let body = serde_json::to_string_pretty(&ErrorResponse::from(&e))?;
            println!("{}", body);
            process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };
    if tracing::enabled!(Level::INFO) {
        info!(chords = chord_count(&sheet.body), to = %cli.to, "transposed");
    }

    let text = if cli.json {
        let mut json = render_json(&sheet, &moved, cli)?;
        json.push('\n');
        json
    } else {
        moved.render()?
    };
    write_output(&text, cli.output.as_ref())
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
