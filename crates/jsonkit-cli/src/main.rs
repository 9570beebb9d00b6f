//! `jsonkit` CLI: validate, normalize, and inspect JSON documents.
//!
//! ## Usage
//!
//! ```sh
//! # Validate a document (stdin → stdout)
//! echo '{"name":"Alice","age":30}' | jsonkit check
//!
//! # Reject empty array slots and trailing commas
//! jsonkit check --strict -i data.json
//!
//! # Re-encode compactly, from file to file
//! jsonkit normalize -i data.json -o data.min.json
//!
//! # Count values and nesting depth, as text or JSON
//! jsonkit stats -i data.json --json --strict
//!
//! # Debug logging on stderr
//! jsonkit -v normalize -i data.json
//! ```

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use jsonkit_core::options::DEFAULT_MAX_DEPTH;
use jsonkit_core::{
    encode_serialize, encode_to_writer, parse_reader_with, ParseOptions, Value, ValueFactory,
};
use serde::Serialize;
use tracing::Level;

#[derive(Parser)]
#[command(name = "jsonkit", version, about = "Single-pass JSON codec CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a document and report whether it is valid
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        #[command(flatten)]
        parse: ParseArgs,
    },
    /// Parse a document and re-encode it compactly
    Normalize {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        #[command(flatten)]
        parse: ParseArgs,
    },
    /// Count containers and scalars and measure nesting depth
    Stats {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Emit the statistics as a JSON object
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        parse: ParseArgs,
    },
}

#[derive(Args)]
struct ParseArgs {
    /// Reject empty array elements and trailing commas
    #[arg(long)]
    strict: bool,
    /// Maximum container nesting depth
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

impl ParseArgs {
    fn options(&self) -> ParseOptions {
        let options = ParseOptions::default().with_max_depth(self.max_depth);
        if self.strict {
            options.strict()
        } else {
            options
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Check { input, parse } => {
            read_document(input.as_deref(), &parse.options())?;
            println!("valid");
        }
        Commands::Normalize {
            input,
            output,
            parse,
        } => {
            let value = read_document(input.as_deref(), &parse.options())?;
            write_document(output.as_deref(), &value)?;
        }
        Commands::Stats { input, json, parse } => {
            let value = read_document(input.as_deref(), &parse.options())?;
            let stats = DocumentStats::collect(&value);
            if json {
                let text = encode_serialize(&stats).context("Failed to encode statistics")?;
                println!("{text}");
            } else {
                stats.print();
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

/// Value and depth counts for one document.
#[derive(Debug, Default, Serialize)]
struct DocumentStats {
    objects: usize,
    arrays: usize,
    strings: usize,
    integers: usize,
    floats: usize,
    booleans: usize,
    nulls: usize,
    /// Deepest container nesting; the root container is depth 1.
    max_depth: usize,
}

impl DocumentStats {
    fn collect(value: &Value) -> Self {
        let mut stats = Self::default();
        stats.visit(value, 1);
        stats
    }

    fn visit(&mut self, value: &Value, depth: usize) {
        match value {
            Value::Null => self.nulls += 1,
            Value::Bool(_) => self.booleans += 1,
            Value::Integer(_) => self.integers += 1,
            Value::Float(_) => self.floats += 1,
            Value::Text(_) => self.strings += 1,
            Value::List(items) => {
                self.arrays += 1;
                self.max_depth = self.max_depth.max(depth);
                for item in items {
                    self.visit(item, depth + 1);
                }
            }
            Value::Mapping(map) => {
                self.objects += 1;
                self.max_depth = self.max_depth.max(depth);
                for value in map.values() {
                    self.visit(value, depth + 1);
                }
            }
        }
    }

    fn print(&self) {
        println!("Objects:    {}", self.objects);
        println!("Arrays:     {}", self.arrays);
        println!("Strings:    {}", self.strings);
        println!("Integers:   {}", self.integers);
        println!("Floats:     {}", self.floats);
        println!("Booleans:   {}", self.booleans);
        println!("Nulls:      {}", self.nulls);
        println!("Max depth:  {}", self.max_depth);
    }
}

fn read_document(path: Option<&str>, options: &ParseOptions) -> Result<Value> {
    match path {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("Failed to read file: {}", path))?;
            parse_reader_with(BufReader::new(file), &ValueFactory, options)
                .with_context(|| format!("Failed to parse JSON from {}", path))
        }
        None => parse_reader_with(io::stdin().lock(), &ValueFactory, options)
            .context("Failed to parse JSON from stdin"),
    }
}

fn write_document(path: Option<&str>, value: &Value) -> Result<()> {
    match path {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("Failed to write file: {}", path))?;
            encode_to_writer(value, BufWriter::new(file))
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            encode_to_writer(value, &mut stdout).context("Failed to write to stdout")?;
            writeln!(stdout).context("Failed to write to stdout")?;
        }
    }
    Ok(())
}
