//! sbom-conformance: round-trip conformance testing for SBOM formats
//!
//! Verifies that converting an SBOM into another format and back preserves
//! its dependency graph.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use sbom_conformance::{
    cli,
    config::{self, AppConfig, ConfigPreset},
    diff::RootOrderPolicy,
    formats::{FormatDescriptor, FormatRegistry},
    reports::{exit_codes, ReportFormat},
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build long version string with format support info
const fn build_long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\n\nSupported Formats:",
        "\n  CycloneDX: 1.4, 1.5, 1.6 (JSON)",
        "\n  SPDX:      2.2, 2.3 (JSON)",
        "\n  Graph:     1 (JSON, YAML)",
        "\n\nOutput Formats:",
        "\n  summary, json"
    )
}

#[derive(Parser)]
#[command(name = "sbom-conformance")]
#[command(author = "Binarly.io")]
#[command(version, long_version = build_long_version())]
#[command(about = "Round-trip conformance testing for SBOM formats", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Every round trip preserved the graph (or graphs are equivalent)
    1  Conformance failures detected
    3  Error occurred

EXAMPLES:
    # Run the cases from .sbom-conformance.yaml
    sbom-conformance run

    # Every format against every format, JSON report
    sbom-conformance run --full-matrix -o json -O conformance.json

    # One fixture through one format pair
    sbom-conformance roundtrip testdata/bom-1.5.json --from cyclonedx-1.5 --to spdx-2.3

    # Compare a golden graph with a converted document
    sbom-conformance diff bom-1.5.json.graph.json converted.spdx.json")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = "SBOM_CONFORMANCE_CONFIG")]
    config: Option<PathBuf>,

    /// Start from a named preset (default, strict, ci) instead of the config file
    #[arg(long, global = true)]
    preset: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

// ============================================================================
// Command argument structs
// ============================================================================

/// Output options shared by report-producing commands
#[derive(Parser)]
struct OutputArgs {
    /// Output format
    #[arg(short, long)]
    output: Option<ReportFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

/// Diff options shared by commands that compare graphs
#[derive(Parser)]
struct DiffArgs {
    /// Compare root elements positionally instead of as a set
    #[arg(long)]
    ordered_roots: bool,

    /// Property key to mask before comparison; a trailing `*` matches a prefix
    #[arg(long = "ignore-property", value_name = "KEY")]
    ignore_properties: Vec<String>,
}

/// Arguments for the `run` subcommand
#[derive(Parser)]
struct RunArgs {
    /// Only run the named cases (repeatable)
    #[arg(long = "case", value_name = "NAME")]
    cases: Vec<String>,

    /// Add every registered format pair for the configured fixtures
    #[arg(long)]
    full_matrix: bool,

    /// Fixture paths for the full matrix (repeatable)
    #[arg(long = "fixture", value_name = "PATH")]
    fixtures: Vec<PathBuf>,

    /// Directory relative fixture paths are resolved against
    #[arg(long)]
    fixture_dir: Option<PathBuf>,

    /// Evidence root directory
    #[arg(long)]
    evidence_dir: Option<PathBuf>,

    /// Do not persist evidence for failing round trips
    #[arg(long)]
    no_evidence: bool,

    /// Run units one at a time
    #[arg(long)]
    sequential: bool,

    /// Worker threads (0 = one per core)
    #[arg(long)]
    threads: Option<usize>,

    #[command(flatten)]
    diff: DiffArgs,

    #[command(flatten)]
    output: OutputArgs,
}

/// Arguments for the `roundtrip` subcommand
#[derive(Parser)]
struct RoundtripArgs {
    /// Fixture path; its golden graph is the path plus the fixture suffix
    fixture: PathBuf,

    /// Format the fixture is written in
    #[arg(long)]
    from: FormatDescriptor,

    /// Format to round-trip the golden graph through
    #[arg(long)]
    to: FormatDescriptor,

    /// Evidence root directory
    #[arg(long)]
    evidence_dir: Option<PathBuf>,

    /// Do not persist evidence
    #[arg(long)]
    no_evidence: bool,

    #[command(flatten)]
    diff: DiffArgs,

    #[command(flatten)]
    output: OutputArgs,
}

/// Arguments for the `diff` subcommand
#[derive(Parser)]
struct GraphDiffArgs {
    /// Golden document (usually a canonical graph)
    golden: PathBuf,

    /// Candidate document in any registered format
    candidate: PathBuf,

    /// Format of the candidate (detected from content if omitted)
    #[arg(long)]
    format: Option<FormatDescriptor>,

    #[command(flatten)]
    diff: DiffArgs,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the configured conformance matrix
    Run(RunArgs),

    /// Round-trip a single fixture through one format pair
    Roundtrip(RoundtripArgs),

    /// Compare a golden graph with another document
    Diff(GraphDiffArgs),

    /// List registered formats
    Formats {
        /// Output format
        #[arg(short, long, default_value = "summary")]
        output: ReportFormat,
    },

    /// Generate an example .sbom-conformance.yaml in the current directory
    ConfigInit {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration (defaults + file)
    ConfigShow,

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(io::stderr))
        .init();

    match dispatch(cli) {
        Ok(code) => {
            if code != exit_codes::SUCCESS {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_codes::ERROR);
        }
    }
}

/// Run the selected command, returning the exit code.
fn dispatch(cli: Cli) -> Result<i32> {
    let registry = FormatRegistry::with_builtin();

    match cli.command {
        Commands::Run(args) => {
            let mut overrides = base_overrides(cli.quiet, cli.no_color, &args.diff, &args.output);
            overrides.runner.parallel = !args.sequential;
            overrides.runner.full_matrix = args.full_matrix;
            if let Some(threads) = args.threads {
                overrides.runner.threads = threads;
            }
            overrides.fixtures.paths = args.fixtures;
            overrides.fixtures.base_dir = args.fixture_dir;
            apply_evidence_args(&mut overrides, args.evidence_dir, args.no_evidence);

            let config = effective_config(&cli.config, cli.preset.as_deref(), &overrides)?;
            cli::run_conformance(&config, registry, &args.cases)
        }

        Commands::Roundtrip(args) => {
            let mut overrides = base_overrides(cli.quiet, cli.no_color, &args.diff, &args.output);
            apply_evidence_args(&mut overrides, args.evidence_dir, args.no_evidence);

            let config = effective_config(&cli.config, cli.preset.as_deref(), &overrides)?;
            cli::run_roundtrip(&config, registry, &args.fixture, &args.from, &args.to)
        }

        Commands::Diff(args) => {
            let overrides = base_overrides(cli.quiet, cli.no_color, &args.diff, &args.output);
            let config = effective_config(&cli.config, cli.preset.as_deref(), &overrides)?;
            cli::run_diff(
                &config,
                &registry,
                &args.golden,
                &args.candidate,
                args.format.as_ref(),
            )
        }

        Commands::Formats { output } => {
            println!("{}", cli::run_formats(&registry, output)?);
            Ok(exit_codes::SUCCESS)
        }

        Commands::ConfigInit { force } => {
            let target = std::env::current_dir()
                .context("cannot determine current directory")?
                .join(".sbom-conformance.yaml");
            if target.exists() && !force {
                anyhow::bail!(
                    "{} already exists. Remove it or pass --force to re-initialize.",
                    target.display()
                );
            }
            std::fs::write(&target, config::generate_full_example_config())
                .with_context(|| format!("failed to write {}", target.display()))?;
            eprintln!("Created {}", target.display());
            Ok(exit_codes::SUCCESS)
        }

        Commands::ConfigShow => {
            let config = effective_config(&cli.config, cli.preset.as_deref(), &AppConfig::default())?;
            let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
            print!("{yaml}");
            Ok(exit_codes::SUCCESS)
        }

        Commands::ConfigSchema { output } => {
            let schema = config::generate_json_schema();
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => println!("{schema}"),
            }
            Ok(exit_codes::SUCCESS)
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "sbom-conformance", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }
    }
}

/// CLI values shared by every graph-comparing command, as a config overlay.
fn base_overrides(quiet: bool, no_color: bool, diff: &DiffArgs, output: &OutputArgs) -> AppConfig {
    let mut overrides = AppConfig::default();
    overrides.output.quiet = quiet;
    overrides.output.no_color = no_color;
    if let Some(format) = output.output {
        overrides.output.format = format;
    }
    overrides.output.file.clone_from(&output.output_file);
    if diff.ordered_roots {
        overrides.diff.root_order = RootOrderPolicy::Ordered;
    }
    overrides.diff.ignored_properties.clone_from(&diff.ignore_properties);
    overrides
}

fn apply_evidence_args(overrides: &mut AppConfig, dir: Option<PathBuf>, disabled: bool) {
    if let Some(dir) = dir {
        overrides.evidence.dir = dir;
    }
    overrides.evidence.enabled = !disabled;
}

/// Preset or discovered config file, with CLI overrides layered on top.
fn effective_config(
    config_path: &Option<PathBuf>,
    preset: Option<&str>,
    overrides: &AppConfig,
) -> Result<AppConfig> {
    let mut config = match preset {
        Some(name) => {
            let preset = ConfigPreset::from_name(name).with_context(|| {
                let known: Vec<&str> = ConfigPreset::all().iter().map(ConfigPreset::name).collect();
                format!("unknown preset '{name}' (known: {})", known.join(", "))
            })?;
            AppConfig::from_preset(preset)
        }
        None => {
            let (config, loaded_from) = config::load_or_default(config_path.as_deref());
            if let Some(path) = loaded_from {
                tracing::debug!("Loaded config from {}", path.display());
            }
            config
        }
    };
    config.merge(overrides);
    Ok(config)
}
