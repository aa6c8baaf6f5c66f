use anyhow::Result;
use clap::{Parser, ValueEnum};
use projviz::{ExportFormat, RunOptions, VisualizerConfig, run};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliFormat {
    Png,
    Pdf,
    Svg,
}

impl From<CliFormat> for ExportFormat {
    fn from(f: CliFormat) -> Self {
        match f {
            CliFormat::Png => ExportFormat::Png,
            CliFormat::Pdf => ExportFormat::Pdf,
            CliFormat::Svg => ExportFormat::Svg,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Render a styled graph of a project's directory structure", long_about = None)]
struct Args {
    /// Directory to analyze
    path: Option<PathBuf>,

    /// Output image path (default: project_structure.<format>)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Image format
    #[arg(short, long, value_enum)]
    format: Option<CliFormat>,

    /// Exclude folders with this exact name (repeatable)
    #[arg(short, long = "exclude", value_name = "NAME")]
    exclude: Vec<String>,

    /// Rendering resolution (clamped to the configured maximum)
    #[arg(long)]
    dpi: Option<u32>,

    /// Print statistics and structure as JSON
    #[arg(long)]
    json: bool,

    /// Print the DOT graph description instead of rendering
    #[arg(long)]
    dot: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    // 1. Load from file or default
    let mut config = VisualizerConfig::load_from_file().unwrap_or_default();

    // 2. Override with CLI args
    if let Some(p) = args.path {
        config.path = p;
    }
    if let Some(o) = args.output {
        config.output = Some(o);
    }
    if let Some(f) = args.format {
        config.format = f.into();
    }
    if !args.exclude.is_empty() {
        // CLI excludes ADD to config excludes
        config.exclude_folders.extend(args.exclude);
    }
    if let Some(d) = args.dpi {
        config.render.dpi = d;
    }
    if args.verbose {
        config.verbose = true;
    }

    init_logging(config.verbose);

    run(
        config,
        RunOptions {
            dot_only: args.dot,
            json: args.json,
        },
    )
}
