//! tablib - render a JSON guitar score as ASCII tablature.
//!
//! # Usage
//!
//! ```bash
//! tablib song.json                       # print track 0 to stdout
//! tablib song.json --track 1 -o out.txt  # write track 1 to a file
//! ```
//!
//! Set `RUST_LOG=tablib=debug` to trace the rendering pipeline on stderr.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tracing::info;

use tablib::{parse_file, render_song, HeaderConfig, LyricsPosition, RenderConfig};

/// Command-line options for the renderer.
struct CliOptions {
    /// Score to render.
    input: PathBuf,
    /// Write the tablature here instead of stdout.
    output: Option<PathBuf>,
    /// JSON render configuration applied before the flags below.
    config: Option<PathBuf>,
    track: Option<usize>,
    line_length: Option<usize>,
    no_lyrics: bool,
    no_bar_numbers: bool,
    lyrics_bottom: bool,
    no_header: bool,
}

impl CliOptions {
    /// Parses command-line arguments.
    ///
    /// Supports:
    /// - `<input>`: the JSON score (required)
    /// - `-o, --output <path>`: output file
    /// - `-t, --track <n>`: 0-based track index
    /// - `-c, --config <path>`: JSON render configuration
    /// - `--line-length <n>`: maximum measure width per line
    /// - `--no-lyrics`, `--no-bar-numbers`, `--lyrics-bottom`, `--no-header`
    /// - `--help` or `-h`: print help and exit
    fn parse() -> Result<Self> {
        let args: Vec<String> = std::env::args().collect();
        let mut input = None;
        let mut output = None;
        let mut config = None;
        let mut track = None;
        let mut line_length = None;
        let mut no_lyrics = false;
        let mut no_bar_numbers = false;
        let mut lyrics_bottom = false;
        let mut no_header = false;
        let mut i = 1;

        while i < args.len() {
            match args[i].as_str() {
                "-o" | "--output" => {
                    i += 1;
                    output = Some(PathBuf::from(arg_value(&args, i, "--output")?));
                }
                "-c" | "--config" => {
                    i += 1;
                    config = Some(PathBuf::from(arg_value(&args, i, "--config")?));
                }
                "-t" | "--track" => {
                    i += 1;
                    let raw = arg_value(&args, i, "--track")?;
                    track = Some(
                        raw.parse::<usize>()
                            .with_context(|| format!("invalid track index: {raw}"))?,
                    );
                }
                "--line-length" => {
                    i += 1;
                    let raw = arg_value(&args, i, "--line-length")?;
                    line_length = Some(
                        raw.parse::<usize>()
                            .with_context(|| format!("invalid line length: {raw}"))?,
                    );
                }
                "--no-lyrics" => no_lyrics = true,
                "--no-bar-numbers" => no_bar_numbers = true,
                "--lyrics-bottom" => lyrics_bottom = true,
                "--no-header" => no_header = true,
                "--help" | "-h" => {
                    print_help(args.first().map_or("tablib", String::as_str));
                    std::process::exit(0);
                }
                other if other.starts_with('-') => {
                    bail!("unknown option: {other} (use --help for usage information)");
                }
                other => {
                    if input.is_some() {
                        bail!("unexpected argument: {other}");
                    }
                    input = Some(PathBuf::from(other));
                }
            }
            i += 1;
        }

        let Some(input) = input else {
            bail!("missing input score (use --help for usage information)");
        };

        Ok(Self {
            input,
            output,
            config,
            track,
            line_length,
            no_lyrics,
            no_bar_numbers,
            lyrics_bottom,
            no_header,
        })
    }

    /// Build the render configuration: file first, then flag overrides.
    fn render_config(&self) -> Result<RenderConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read config {}", path.display()))?;
                RenderConfig::from_json(&json)
                    .with_context(|| format!("invalid config {}", path.display()))?
            }
            None => RenderConfig::default(),
        };

        if let Some(track) = self.track {
            config.track = track;
        }
        if let Some(line_length) = self.line_length {
            config.line.line_length = line_length;
        }
        if self.no_lyrics {
            config.line.show_lyrics = false;
        }
        if self.no_bar_numbers {
            config.line.show_bar_numbers = false;
        }
        if self.lyrics_bottom {
            config.line.lyrics_position = LyricsPosition::Bottom;
        }
        if self.no_header {
            config.header = HeaderConfig::hidden();
        }
        Ok(config)
    }
}

/// The argument following a flag.
fn arg_value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str> {
    args.get(i)
        .map(String::as_str)
        .with_context(|| format!("{flag} requires an argument"))
}

fn print_help(program: &str) {
    eprintln!("tablib - render a JSON guitar score as ASCII tablature");
    eprintln!();
    eprintln!("Usage: {program} <INPUT> [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -o, --output PATH     Write the tablature to PATH instead of stdout");
    eprintln!("  -t, --track N         Render track N (0-based, default 0)");
    eprintln!("  -c, --config PATH     Load a JSON render configuration");
    eprintln!("      --line-length N   Maximum measure width per line (default 60)");
    eprintln!("      --no-lyrics       Omit the lyric row");
    eprintln!("      --no-bar-numbers  Omit bar numbers");
    eprintln!("      --lyrics-bottom   Put lyrics below the strings");
    eprintln!("      --no-header       Omit the song header");
    eprintln!("  -h, --help            Print this help message");
}

fn main() -> Result<()> {
    let cli = CliOptions::parse()?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = cli.render_config()?;
    let song = parse_file(&cli.input)
        .with_context(|| format!("failed to load {}", cli.input.display()))?;
    info!(
        input = %cli.input.display(),
        tracks = song.tracks.len(),
        track = config.track,
        "loaded song"
    );

    let tab = render_song(&song, &config).context("failed to render tablature")?;

    match &cli.output {
        Some(path) => {
            std::fs::write(path, format!("{tab}\n"))
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(output = %path.display(), bytes = tab.len(), "wrote tablature");
        }
        None => println!("{tab}"),
    }

    Ok(())
}
