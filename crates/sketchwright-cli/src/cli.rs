//! Command-line interface for the sketchwright utility
//!
//! Draws Excalidraw documents from JSON specs, unpacks `.excalidraw.md`
//! notes into plain `.excalidraw` files, and summarises either form.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use sketchwright::core::logging::init_logging;
use sketchwright::{
    build_with, decode_file, decode_with_encoding, encode_document, to_json, DiagramSpec, Encoding,
    Generator,
};

const SPEC_SUFFIX: &str = ".json";

/// Sketchwright - Build Excalidraw drawings from JSON specs
#[derive(Parser)]
#[command(name = "sketchwright")]
#[command(about = "Build Excalidraw drawings from compact JSON specs")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error|off)
    #[arg(long, value_enum, default_value_t = LogLevel::Error, global = true)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a drawing from a JSON spec
    Draw {
        /// Spec file (use - for stdin)
        #[arg(conflicts_with = "inline")]
        spec: Option<PathBuf>,

        /// Spec JSON passed directly on the command line
        #[arg(long, value_name = "JSON")]
        inline: Option<String>,

        /// Output file (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write an Obsidian .excalidraw.md note instead of plain JSON
        #[arg(long)]
        markdown: bool,

        /// Seed ids and element seeds for a reproducible drawing
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Convert an .excalidraw.md note (or .excalidraw file) to plain JSON
    Decompress {
        /// Input file (use - for stdin)
        input: PathBuf,

        /// Output file (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Summarise the elements of a drawing
    Inspect {
        /// Input file (use - for stdin)
        input: PathBuf,

        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },
}

/// Summary printed by the inspect command
#[derive(Debug, Serialize, PartialEq)]
pub struct InspectReport {
    pub encoding: String,
    pub elements: usize,
    pub background: String,
    pub types: BTreeMap<String, usize>,
}

/// Main CLI application
pub struct SketchwrightApp {
    generator: Generator,
}

impl SketchwrightApp {
    /// Create a new application drawing from the system random source
    pub fn new() -> Self {
        Self::with_generator(Generator::system())
    }

    /// Create a new application with a fixed generator
    pub fn with_generator(generator: Generator) -> Self {
        Self { generator }
    }

    /// Run the application with the given CLI arguments
    pub fn run(&mut self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over the flag defaults
        let log_level_str = std::env::var("SKETCHWRIGHT_LOG_LEVEL")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| cli.log_level.as_str().to_string());

        let log_format_str = std::env::var("SKETCHWRIGHT_LOG_FORMAT")
            .ok()
            .unwrap_or_else(|| cli.log_format.as_str().to_string());

        if let Err(e) = init_logging(Some(&log_level_str), Some(&log_format_str)) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("Sketchwright v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Draw {
                spec,
                inline,
                output,
                markdown,
                seed,
            } => {
                if let Some(seed) = seed {
                    self.generator = Generator::seeded(seed);
                }
                self.draw_command(spec, inline, output, markdown, cli.verbose)
                    .map(|_| ())
            }
            Commands::Decompress { input, output } => {
                self.decompress_command(input, output, cli.verbose)
            }
            Commands::Inspect { input, json } => self.inspect_command(input, json, cli.verbose),
        }
    }

    /// Handle the draw command, returning where the drawing was written
    pub fn draw_command(
        &mut self,
        spec: Option<PathBuf>,
        inline: Option<String>,
        output: Option<PathBuf>,
        markdown: bool,
        verbose: bool,
    ) -> Result<PathBuf> {
        let encoding = if markdown {
            Encoding::CompressedMarkdown
        } else {
            Encoding::PlainJson
        };

        let (content, default_output) = match (spec, inline) {
            (_, Some(json)) => (json, timestamped_output(encoding)),
            (Some(path), None) if is_stdio(&path) => {
                (self.read_input(Some(path))?, timestamped_output(encoding))
            }
            (Some(path), None) => {
                let content = self.read_input(Some(path.clone()))?;
                (content, spec_output(&path, encoding))
            }
            (None, None) => bail!("Provide a spec file or --inline '<json>'"),
        };

        if verbose {
            eprintln!("Read {} bytes of spec", content.len());
        }

        let spec = DiagramSpec::from_json(&content).context("Invalid spec JSON")?;
        let built = build_with(&spec, &mut self.generator);
        for diagnostic in &built.diagnostics {
            eprintln!("Warning: {}", diagnostic);
        }

        let rendered = match encoding {
            Encoding::CompressedMarkdown => encode_document(&built.document)?,
            Encoding::PlainJson => to_json(&built.document)?,
        };

        let target = output.unwrap_or(default_output);
        self.write_output(Some(target.clone()), &rendered)?;

        let summary = format!(
            "Created {} element(s) → {}",
            built.document.len(),
            target.display()
        );
        if is_stdio(&target) {
            eprintln!("{}", summary);
        } else {
            println!("{}", summary);
        }
        Ok(target)
    }

    /// Handle the decompress command
    pub fn decompress_command(
        &self,
        input: PathBuf,
        output: Option<PathBuf>,
        verbose: bool,
    ) -> Result<()> {
        let content = self.read_input(Some(input.clone()))?;
        let (document, encoding) = decode_with_encoding(&content)?;

        if verbose {
            eprintln!(
                "Decoded {} elements from {}",
                document.len(),
                encoding
            );
        }

        let target = output.or_else(|| decompressed_output(&input));
        self.write_output(target.clone(), &to_json(&document)?)?;

        if let Some(path) = target.filter(|path| !is_stdio(path)) {
            println!("Decompressed {} element(s) → {}", document.len(), path.display());
        }
        Ok(())
    }

    /// Handle the inspect command
    pub fn inspect_command(&self, input: PathBuf, json: bool, verbose: bool) -> Result<()> {
        let report = self.inspect(&input)?;

        if verbose {
            eprintln!("Inspected {}", input.display());
        }

        if json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            println!("Found {} elements", report.elements);
            for (kind, count) in &report.types {
                println!("  {:<10} {}", kind, count);
            }
            println!("Encoding: {}", report.encoding);
            println!("Background: {}", report.background);
        }
        Ok(())
    }

    /// Decode `input` and summarise it
    pub fn inspect(&self, input: &Path) -> Result<InspectReport> {
        let (document, encoding) = if is_stdio(input) {
            decode_with_encoding(&self.read_input(None)?)?
        } else {
            decode_file(input)
                .with_context(|| format!("Failed to inspect '{}'", input.display()))?
        };
        Ok(InspectReport {
            encoding: encoding.to_string(),
            elements: document.len(),
            background: document.background().to_string(),
            types: document
                .count_by_type()
                .into_iter()
                .map(|(kind, count)| (kind.to_string(), count))
                .collect(),
        })
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) if !is_stdio(&path) => {
                debug!(path = %path.display(), "Reading input file");
                fs::read_to_string(&path)
                    .map_err(|e| anyhow!("Failed to read input file '{}': {}", path.display(), e))
            }
            _ => {
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        match output {
            Some(path) if !is_stdio(&path) => {
                debug!(path = %path.display(), bytes = content.len(), "Writing output file");
                fs::write(&path, content).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
            }
            _ => {
                let mut stdout = io::stdout();
                stdout.write_all(content.as_bytes())?;
                if !content.is_empty() && !content.ends_with('\n') {
                    stdout.write_all(b"\n")?;
                }
                stdout.flush()?;
            }
        }
        Ok(())
    }
}

impl Default for SketchwrightApp {
    fn default() -> Self {
        Self::new()
    }
}

fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// `drawing-<epoch-ms>` in the working directory
fn timestamped_output(encoding: Encoding) -> PathBuf {
    PathBuf::from(format!(
        "drawing-{}{}",
        chrono::Utc::now().timestamp_millis(),
        encoding.extension()
    ))
}

/// The spec path with its `.json` suffix swapped for the drawing's
fn spec_output(spec: &Path, encoding: Encoding) -> PathBuf {
    let name = spec.to_string_lossy();
    let stem = name.strip_suffix(SPEC_SUFFIX).unwrap_or(&name);
    PathBuf::from(format!("{}{}", stem, encoding.extension()))
}

/// `.excalidraw.md` inputs decompress next to themselves; anything else goes
/// to stdout
fn decompressed_output(input: &Path) -> Option<PathBuf> {
    let name = input.to_string_lossy();
    name.strip_suffix(Encoding::CompressedMarkdown.extension())
        .map(|stem| PathBuf::from(format!("{}{}", stem, Encoding::PlainJson.extension())))
}
