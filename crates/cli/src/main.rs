use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use memotree_catalog::ProjectScanner;
use memotree_memo::format_report;
use std::fs;
use std::path::PathBuf;

mod render;

#[derive(Parser)]
#[command(name = "memotree")]
#[command(about = "Project structure explorer with declaration memos", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a project tree and print its declaration structure
    Scan(ScanArgs),
    /// Format an annotation file into the exported text report
    Report(ReportArgs),
}

#[derive(Args)]
struct ScanArgs {
    /// Project root to scan
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Comma-separated folder names excluded at any depth
    #[arg(long, default_value = "__pycache__,.venv,.git,node_modules,target")]
    exclude: String,

    /// Emit the catalog as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Show each declaration's canonical annotation key
    #[arg(long)]
    keys: bool,
}

#[derive(Args)]
struct ReportArgs {
    /// JSON file mapping canonical keys to memo text
    #[arg(long)]
    annotations: PathBuf,

    /// Write the report here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    match cli.command {
        Commands::Scan(args) => run_scan(args),
        Commands::Report(args) => run_report(args),
    }
}

fn init_logging(cli: &Cli) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}

fn run_scan(args: ScanArgs) -> Result<()> {
    // surface a missing root before scanning starts
    if !args.root.exists() {
        bail!("project root {} does not exist", args.root.display());
    }

    let exclude = parse_exclude(&args.exclude);
    log::debug!("Excluding segments: {exclude:?}");

    let catalog = ProjectScanner::new(&args.root)
        .exclude_segments(exclude)
        .scan()
        .with_context(|| format!("failed to scan {}", args.root.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
    } else {
        println!("{}", render::render_catalog(&catalog, args.keys));
    }
    Ok(())
}

fn run_report(args: ReportArgs) -> Result<()> {
    let raw = fs::read_to_string(&args.annotations)
        .with_context(|| format!("failed to read {}", args.annotations.display()))?;

    // serde_json preserves object order, which becomes the report's
    // insertion order
    let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a JSON object", args.annotations.display()))?;

    let mut pairs = Vec::with_capacity(map.len());
    for (key, value) in &map {
        let Some(text) = value.as_str() else {
            bail!("annotation for key {key} is not a string");
        };
        pairs.push((key.as_str(), text));
    }

    // the report is assembled fully before anything is written
    let report = format_report(pairs)?;

    match args.output {
        Some(path) => {
            fs::write(&path, &report)
                .with_context(|| format!("failed to write {}", path.display()))?;
            log::info!("Wrote report to {}", path.display());
        }
        None => print!("{report}"),
    }
    Ok(())
}

fn parse_exclude(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
