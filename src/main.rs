use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use lsystem_turtle::{EpsDocument, LSystemConfig};
use tracing_subscriber::EnvFilter;

/// Render an L-System grammar file as Encapsulated PostScript.
#[derive(Debug, Parser)]
#[command(name = "lsystem-turtle", version, about)]
struct Args {
    /// JSON grammar file.
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Number of rewriting rounds.
    #[arg(value_name = "ITERATIONS", allow_negative_numbers = true)]
    iterations: i32,

    /// Write the document here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Seed for picking between alternative rules (overrides the file).
    #[arg(long)]
    seed: Option<u64>,

    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = LSystemConfig::from_path(&args.config)
        .with_context(|| format!("failed to load {}", args.config.display()))?;
    let (mut grammar, start) = config.build().context("invalid grammar file")?;
    if let Some(seed) = args.seed {
        grammar.set_seed(seed);
    }

    let document = EpsDocument::new(args.config.display().to_string());
    let bbox = match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let (_, bbox) =
                document.render(&grammar, &start, args.iterations, BufWriter::new(file))?;
            bbox
        }
        None => {
            let stdout = BufWriter::new(io::stdout().lock());
            let (_, bbox) = document.render(&grammar, &start, args.iterations, stdout)?;
            bbox
        }
    };

    tracing::info!(
        min_x = bbox.min.x,
        min_y = bbox.min.y,
        max_x = bbox.max.x,
        max_y = bbox.max.y,
        "rendered"
    );
    Ok(())
}
