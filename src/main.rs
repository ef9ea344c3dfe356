use anyhow::{bail, Context, Result};
use cer_citations::config::{
    default_config_path, find_config_file, get_config, load_config, sample_config, save_file,
    Config, LoggingConfig,
};
use cer_citations::models::{Citation, DocumentSpan, SpanKind, TextSegment};
use cer_citations::print_status;
use cer_citations::scanner::CitationScanner;
use cer_citations::ui::{
    citation_line, citation_table, legend_entries, legend_line, legend_table, paint_segments,
    paint_spans, print_section,
};
use cer_citations::utils::{is_terminal, terminal_width};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// CER Citations - Extract and highlight evidence citations in review transcripts
#[derive(Parser, Debug)]
#[command(name = "cer-citations")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Extract and highlight [Document, pg N, para M] citations", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error log output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the per-call citation match cap
    #[arg(long, global = true)]
    max_matches: Option<usize>,

    /// Show all environment variables
    #[arg(long)]
    env: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Automatic based on terminal (table if TTY, JSON otherwise)
    Auto,
    /// Table format (human-readable)
    Table,
    /// JSON format (machine-readable)
    Json,
    /// Plain text format
    Plain,
}

impl OutputFormat {
    fn resolve(self) -> Self {
        match self {
            OutputFormat::Auto if is_terminal() => OutputFormat::Table,
            OutputFormat::Auto => OutputFormat::Json,
            other => other,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the citations found in a text (stdin if FILE is omitted or "-")
    #[command(alias = "x")]
    Extract {
        /// Input file
        input: Option<PathBuf>,

        /// Keep only the first citation of each document/page/paragraph
        #[arg(long, short)]
        unique: bool,
    },

    /// Split a text into plain, citation and search-match segments
    #[command(alias = "r")]
    Render {
        /// Input file
        input: Option<PathBuf>,

        /// Highlight occurrences of this text (case-insensitive, literal)
        #[arg(long)]
        query: Option<String>,
    },

    /// Look up the highlight snippet for a citation location
    #[command(alias = "l")]
    Lookup {
        /// Document name
        document: String,

        /// Page number
        #[arg(long)]
        page: u32,

        /// Paragraph number
        #[arg(long = "para")]
        paragraph: u32,
    },

    /// Overlay a cited passage and search matches on a document's text
    #[command(alias = "hl")]
    Highlight {
        /// File containing the cited document's text
        document: PathBuf,

        /// Passage to mark as cited
        #[arg(long, conflicts_with = "cite", required_unless_present = "cite")]
        passage: Option<String>,

        /// Citation marker whose highlight snippet should be marked
        #[arg(long)]
        cite: Option<String>,

        /// Highlight occurrences of this text (case-insensitive, literal)
        #[arg(long)]
        query: Option<String>,
    },

    /// Show the icons and labels used for document types, activities and risk levels
    Legend,

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Write a starter configuration file
    Init {
        /// Where to write the file (default: user config directory)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },

    /// Print the effective configuration as TOML
    Show,

    /// Print the configuration file path in use
    Path,
}

/// Print all available environment variables
fn print_env_vars() {
    println!("CER Citations - Environment Variables");
    println!();
    println!("Scanner Settings:");
    println!("  CER_CITATIONS_SCANNER__MAX_MATCHES        Max citation matches per call (default: 50)");
    println!("  CER_CITATIONS_SCANNER__PATTERN            Custom marker pattern with document/page/paragraph groups");
    println!("  CER_CITATIONS_SCANNER__QUERY_SIZE_LIMIT   Compiled size limit for search text in bytes (default: 1048576)");
    println!();
    println!("Logging:");
    println!("  CER_CITATIONS_LOGGING__LEVEL              Log level when no -v/-q flag is given (default: info)");
    println!("  CER_CITATIONS_LOGGING__FORMAT             \"json\" for structured log output");
    println!("  RUST_LOG                                  Full tracing filter, overrides everything above");
    println!();
    println!("Highlight snippets are read from the [highlights] table of the configuration file.");
    println!();
    println!("Example:");
    println!("  export CER_CITATIONS_SCANNER__MAX_MATCHES=\"100\"");
}

fn init_tracing(verbose: u8, quiet: bool, logging: &LoggingConfig) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => logging.level.as_str(),
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("cer_citations={}", level)));

    let registry = tracing_subscriber::registry().with(filter);
    if logging.is_json() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Show environment variables and exit if requested
    if cli.env {
        print_env_vars();
        return Ok(());
    }

    // Load configuration from file if specified or found in default locations
    let config_path = cli.config.clone().or_else(find_config_file);
    let config = match &config_path {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config file {}", path.display()))?,
        None => get_config(),
    };

    init_tracing(cli.verbose, cli.quiet, &config.logging);
    if let Some(path) = &config_path {
        tracing::info!("Using config file: {}", path.display());
    }

    let mut scanner_config = config.scanner.clone();
    if let Some(max_matches) = cli.max_matches {
        scanner_config.max_matches = max_matches;
    }
    let scanner = CitationScanner::from_config(&scanner_config, config.highlights.clone())
        .context("Invalid scanner configuration")?;

    let format = cli.output.resolve();

    match cli.command {
        Some(Commands::Extract { input, unique }) => {
            let text = read_input(input.as_deref())?;
            let citations = if unique {
                scanner.unique_citations(&text)
            } else {
                scanner.extract_citations(&text)
            };
            output_citations(&citations, format)?;
        }

        Some(Commands::Render { input, query }) => {
            let text = read_input(input.as_deref())?;
            let segments = scanner.render_segments(&text, query.as_deref());
            output_segments(&segments, format)?;
        }

        Some(Commands::Lookup {
            document,
            page,
            paragraph,
        }) => {
            let snippet = scanner.find_associated_document(&document, page, paragraph);
            let citation = Citation::new(document.as_str(), page, paragraph).with_highlight(snippet);

            if format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&citation)?);
            } else if snippet.is_empty() {
                print_status!(
                    cer_citations::ui::Status::Warning,
                    format!("No highlight for {}", citation)
                );
                if let Some(suggestion) = scanner
                    .highlights()
                    .suggest(&document)
                    .filter(|s| *s != citation.document_name)
                {
                    print_status!(
                        cer_citations::ui::Status::Info,
                        format!("Did you mean \"{}\"?", suggestion)
                    );
                }
            } else {
                println!("{}", citation_line(&citation));
                println!("  {}", snippet);
            }
        }

        Some(Commands::Highlight {
            document,
            passage,
            cite,
            query,
        }) => {
            let text = std::fs::read_to_string(&document)
                .with_context(|| format!("Failed to read {}", document.display()))?;

            let spans = match (&cite, &passage) {
                (Some(marker), _) => {
                    let Some(citation) = scanner.extract_citations(marker).into_iter().next() else {
                        bail!("No citation marker found in --cite value: {}", marker);
                    };
                    scanner.highlight_citation(&text, &citation, query.as_deref())
                }
                (None, Some(passage)) => scanner.highlight_document(&text, passage, query.as_deref()),
                (None, None) => bail!("Either --passage or --cite is required"),
            };

            if !spans.iter().any(|s| s.kind == SpanKind::CitedPassage) {
                tracing::warn!("Cited passage not found in {}", document.display());
            }
            output_spans(&spans, format)?;
        }

        Some(Commands::Legend) => {
            let entries = legend_entries();
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
                OutputFormat::Table => println!("{}", legend_table(&entries)),
                _ => {
                    for entry in &entries {
                        println!("{:<9} {}", entry.category, legend_line(entry, is_terminal()));
                    }
                }
            }
        }

        Some(Commands::Config { command }) => match command {
            ConfigCommands::Init { path, force } => {
                let Some(path) = path.or_else(default_config_path) else {
                    bail!("Could not determine a config directory; pass --path");
                };
                if path.exists() && !force {
                    bail!(
                        "Config file already exists at {} (use --force to overwrite)",
                        path.display()
                    );
                }
                save_file(&sample_config(), &path)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                print_status!(
                    cer_citations::ui::Status::Success,
                    format!("Wrote config file to {}", path.display())
                );
            }
            ConfigCommands::Show => {
                print!("{}", render_config(&config)?);
            }
            ConfigCommands::Path => match (&config_path, default_config_path()) {
                (Some(path), _) => println!("{}", path.display()),
                (None, Some(default)) => println!("{} (not found)", default.display()),
                (None, None) => println!("(no config directory)"),
            },
        },

        Some(Commands::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "cer-citations", &mut std::io::stdout());
        }

        None => {
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

/// Read a file, or stdin when the path is missing or "-"
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

fn render_config(config: &Config) -> Result<String> {
    toml::to_string_pretty(config).context("Failed to serialize configuration")
}

fn output_citations(citations: &[Citation], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(citations)?);
        }
        OutputFormat::Plain => {
            for citation in citations {
                println!("{}", citation_line(citation));
                if citation.has_highlight() {
                    println!("  {}", citation.highlight_text);
                }
            }
        }
        OutputFormat::Table => {
            if citations.is_empty() {
                print_status!(cer_citations::ui::Status::Info, "No citations found");
            } else {
                println!("{}", citation_table(citations, terminal_width()));
            }
        }
        OutputFormat::Auto => unreachable!(),
    }
    Ok(())
}

fn output_segments(segments: &[TextSegment], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(segments)?);
        }
        OutputFormat::Plain => {
            println!("{}", paint_segments(segments, is_terminal()));
        }
        OutputFormat::Table => {
            println!("{}", paint_segments(segments, is_terminal()));

            let citations: Vec<Citation> = segments
                .iter()
                .filter_map(|s| s.citation_ref().cloned())
                .collect();
            if !citations.is_empty() {
                print_section("Citations");
                println!("{}", citation_table(&citations, terminal_width()));
            }
        }
        OutputFormat::Auto => unreachable!(),
    }
    Ok(())
}

fn output_spans(spans: &[DocumentSpan], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(spans)?);
        }
        OutputFormat::Plain | OutputFormat::Table => {
            println!("{}", paint_spans(spans, is_terminal()));
        }
        OutputFormat::Auto => unreachable!(),
    }
    Ok(())
}
