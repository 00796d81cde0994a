use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use bloomdex_core::{IndexFilter, IndexTracker, Shape, TrackerCost, TrackerKind};

#[derive(Parser)]
#[command(name = "bloomdex", version, about = "bloomdex CLI — Bloom index deduplication")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Args)]
struct ShapeArgs {
    /// Number of bits in the Bloom filter
    #[arg(long, required_unless_present = "shape")]
    bits: Option<u32>,
    /// Number of hash functions (indices per insertion)
    #[arg(long, required_unless_present = "shape")]
    hashes: Option<u32>,
    /// JSON shape file; overrides --bits/--hashes
    #[arg(long, value_name = "FILE")]
    shape: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy)]
enum CliTracker {
    Auto,
    Array,
    Bitmap,
}

#[derive(Subcommand)]
enum Cmd {
    /// Print the first occurrence of every index, in input order
    Filter {
        #[command(flatten)]
        shape: ShapeArgs,
        #[arg(long, value_enum, default_value_t = CliTracker::Auto)]
        tracker: CliTracker,
        /// Stop after this many unique indices
        #[arg(long)]
        limit: Option<usize>,
        /// Indices to filter; read from stdin when empty
        #[arg(value_delimiter = ',', allow_negative_numbers = true)]
        indices: Vec<i64>,
    },

    /// Show which tracker a shape selects and what each layout costs
    Select {
        #[command(flatten)]
        shape: ShapeArgs,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[derive(Serialize)]
struct Selection {
    shape: Shape,
    tracker: TrackerKind,
    #[serde(flatten)]
    cost: TrackerCost,
}

fn load_shape(args: &ShapeArgs) -> Result<Shape> {
    if let Some(path) = &args.shape {
        return read_shape_file(path);
    }
    match (args.bits, args.hashes) {
        (Some(bits), Some(hashes)) => Ok(Shape::new(bits, hashes)?),
        _ => bail!("--bits and --hashes are required without --shape"),
    }
}

fn read_shape_file(path: &Path) -> Result<Shape> {
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("reading shape file {}", path.display()))?;
    serde_json::from_str(&s).with_context(|| format!("parsing shape file {}", path.display()))
}

fn read_stdin_indices() -> Result<Vec<i64>> {
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf).context("reading indices from stdin")?;
    buf.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(|t| t.parse::<i64>().with_context(|| format!("invalid index {t:?}")))
        .collect()
}

fn run_filter(shape: &Shape, tracker: CliTracker, limit: Option<usize>, indices: Vec<i64>) -> Result<Vec<u32>> {
    let indices = if indices.is_empty() { read_stdin_indices()? } else { indices };
    debug!(count = indices.len(), "filtering indices");

    let mut unique = Vec::new();
    let mut sink = |i: u32| {
        unique.push(i);
        limit.map_or(true, |l| unique.len() < l)
    };
    let mut filter = match tracker {
        CliTracker::Auto => IndexFilter::new(shape, &mut sink),
        CliTracker::Array => IndexFilter::with_tracker(shape, &mut sink, IndexTracker::with_kind(TrackerKind::Array, shape)),
        CliTracker::Bitmap => IndexFilter::with_tracker(shape, &mut sink, IndexTracker::with_kind(TrackerKind::Bitmap, shape)),
    };
    let finished = filter.filter_all(indices).context("filtering indices")?;
    if !finished {
        info!(limit = ?limit, "consumer stopped the pass");
    }
    Ok(unique)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();
    let cli = Cli::parse();

    match cli.cmd {
        Cmd::Filter { shape, tracker, limit, indices } => {
            let shape = load_shape(&shape)?;
            if limit == Some(0) {
                bail!("--limit must be at least 1");
            }
            let unique = run_filter(&shape, tracker, limit, indices)?;
            let stdout = io::stdout();
            let mut out = stdout.lock();
            for i in unique {
                writeln!(out, "{i}")?;
            }
        }

        Cmd::Select { shape, json } => {
            let shape = load_shape(&shape)?;
            let cost = TrackerCost::for_shape(&shape);
            let sel = Selection { shape, tracker: cost.kind(), cost };
            if json {
                println!("{}", serde_json::to_string_pretty(&sel)?);
            } else {
                println!(
                    "bits={} hashes={} tracker={:?} array_bytes={} bitmap_bytes={}",
                    shape.number_of_bits(),
                    shape.number_of_hash_functions(),
                    sel.tracker,
                    cost.array_bytes,
                    cost.bitmap_bytes,
                );
            }
        }
    }
    Ok(())
}
