use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use schemaref_core::{
    inline_resolve, parse_document, resolve_all, resolve_to_definitions, ResolveOptions,
    SchemaTable,
};
use serde_json::{Map, Value};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(name = "schemaref")]
#[command(about = "Resolve OpenAPI component schemas into self-contained JSON Schema documents")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the component schema names of an OpenAPI document
    List {
        /// Input OpenAPI document (JSON or YAML)
        input: PathBuf,

        /// Only list names containing this text (case-insensitive)
        #[arg(long)]
        filter: Option<String>,
    },

    /// Resolve one or all component schemas
    Resolve {
        /// Input OpenAPI document (JSON or YAML)
        input: PathBuf,

        /// Schema to resolve (resolves every schema if not specified)
        #[arg(short, long)]
        schema: Option<String>,

        /// Resolution mode
        #[arg(short, long, value_enum, default_value_t = ModeArg::Defs)]
        mode: ModeArg,

        /// Output file (defaults to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// JSON file with resolve options (kebab-case keys)
        #[arg(long)]
        options: Option<PathBuf>,

        /// Max nesting depth walked per schema
        #[arg(long)]
        max_depth: Option<usize>,

        /// Max nodes copied per schema
        #[arg(long)]
        max_nodes: Option<usize>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum ModeArg {
    /// Self-contained document with a `$defs` table
    Defs,
    /// Single-level substitution of references
    Inline,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum OutputFormat {
    Pretty,
    Compact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for JSON
    let log_level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::List { input, filter } => {
            let table = load_table(&input)?;
            let stdout = io::stdout();
            let mut out = stdout.lock();
            for entry in table.filter(filter.as_deref().unwrap_or("")) {
                writeln!(out, "{}", entry.name).context("Failed to write output")?;
            }
        }
        Commands::Resolve {
            input,
            schema,
            mode,
            output,
            options: options_path,
            max_depth,
            max_nodes,
            format,
        } => {
            let table = load_table(&input)?;

            let mut options = match options_path {
                Some(path) => load_options(&path)?,
                None => ResolveOptions::default(),
            };
            if max_depth.is_some() {
                options.max_depth = max_depth;
            }
            if max_nodes.is_some() {
                options.max_nodes = max_nodes;
            }

            match schema {
                Some(name) => {
                    let Some(root) = table.find(&name) else {
                        bail!("Unknown schema: {name}");
                    };
                    match mode {
                        ModeArg::Defs => {
                            let resolution = resolve_to_definitions(&name, root, &table, &options);
                            write_json(&resolution, output.as_ref(), format)?;
                            if let Some(err) = resolution.error() {
                                bail!("Resolution of {name} failed: {}", err.message);
                            }
                        }
                        ModeArg::Inline => {
                            let inlined = inline_resolve(root, &table).unwrap_or(Value::Null);
                            write_json(&inlined, output.as_ref(), format)?;
                        }
                    }
                }
                None => {
                    let mut all = Map::new();
                    match mode {
                        ModeArg::Defs => {
                            for (name, resolution) in resolve_all(&table, &options) {
                                let value = serde_json::to_value(&resolution)
                                    .context("Failed to serialize resolution")?;
                                all.insert(name, value);
                            }
                        }
                        ModeArg::Inline => {
                            for entry in table.entries() {
                                let value =
                                    inline_resolve(&entry.schema, &table).unwrap_or(Value::Null);
                                all.insert(entry.name.clone(), value);
                            }
                        }
                    }
                    write_json(&all, output.as_ref(), format)?;
                }
            }
        }
    }

    Ok(())
}

fn load_table(input: &Path) -> Result<SchemaTable> {
    let text = fs::read_to_string(input)
        .with_context(|| format!("Failed to open input file: {}", input.display()))?;
    let document = parse_document(&text)
        .with_context(|| format!("Failed to parse document from: {}", input.display()))?;
    let schemas = document
        .component_schemas()
        .with_context(|| format!("No schemas to resolve in: {}", input.display()))?;
    Ok(SchemaTable::from_map(schemas))
}

fn load_options(path: &Path) -> Result<ResolveOptions> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open options file: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse options from: {}", path.display()))
}

fn write_json<T: serde::Serialize>(
    val: &T,
    path: Option<&PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    let mut writer: Box<dyn Write> = if let Some(p) = path {
        let file = File::create(p)
            .with_context(|| format!("Failed to create output file: {}", p.display()))?;
        Box::new(BufWriter::new(file))
    } else {
        Box::new(BufWriter::new(io::stdout()))
    };

    match format {
        OutputFormat::Pretty => {
            serde_json::to_writer_pretty(&mut writer, val).context("Failed to write JSON")?;
        }
        OutputFormat::Compact => {
            serde_json::to_writer(&mut writer, val).context("Failed to write JSON")?;
        }
    }

    writeln!(writer).context("Failed to write trailing newline")?;
    writer.flush().context("Failed to flush output")?;

    Ok(())
}
