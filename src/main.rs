mod frameworks;
mod input;
mod model;
mod pipeline;
mod report;
mod stats;

use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::fmt;
use tracing_subscriber::EnvFilter;

use crate::input::InputError;
use crate::model::settings::{
    DEFAULT_DRAWS, DEFAULT_EPSILON, DEFAULT_K_MAX, DEFAULT_K_MIN, DEFAULT_MIN_PAIRS,
    DEFAULT_MIN_SIZE, DEFAULT_SEED, DEFAULT_STEP,
};
use crate::pipeline::cluster::{run_cluster, ClusterParams};
use crate::pipeline::completeness::{run_check, CheckParams};
use crate::pipeline::convert::{run_convert, ConvertParams};
use crate::pipeline::group_stats::{run_stats, StatsParams};
use crate::pipeline::reliability::{run_reliability, ReliabilityParams};
use crate::pipeline::saturation::{run_saturation, SaturationParams};
use crate::pipeline::select::{run_select, SelectParams};
use crate::pipeline::violin::{run_violin, ViolinParams};
use crate::stats::kmedoids::DistanceKind;

/// Deterministic statistics over LLM-scored sermon corpora.
#[derive(Parser, Debug)]
#[command(name = "homilostat")]
#[command(version)]
#[command(
    about = "Rubric-score tables, saturation curves, clustering and inter-run reliability",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Flatten a directory of analysis JSONs into a scores.tsv table
    Convert {
        /// Directory with *.json / *.json.gz analysis files
        #[arg(long)]
        input: PathBuf,

        /// Output directory
        #[arg(long)]
        out: PathBuf,
    },

    /// Report missing files and empty critical fields per sermon
    Check {
        /// Directory with *.json / *.json.gz analysis files
        #[arg(long)]
        input: PathBuf,

        /// Output directory
        #[arg(long)]
        out: PathBuf,
    },

    /// Per-preacher mean, population sd and count for every metric
    Stats {
        /// scores.tsv produced by convert
        #[arg(long)]
        table: PathBuf,

        /// Output directory
        #[arg(long)]
        out: PathBuf,

        /// Include the detailed sub-metric columns
        #[arg(long)]
        detailed: bool,
    },

    /// Plot-ready violin series per metric and preacher
    Violin {
        /// scores.tsv produced by convert
        #[arg(long)]
        table: PathBuf,

        /// Output directory
        #[arg(long)]
        out: PathBuf,

        /// Include the detailed sub-metric columns
        #[arg(long)]
        detailed: bool,
    },

    /// Keep the top N preachers and write a filtered score table
    Select {
        /// scores.tsv produced by convert
        #[arg(long)]
        table: PathBuf,

        /// Output directory
        #[arg(long)]
        out: PathBuf,

        /// Number of preachers to keep
        #[arg(long)]
        top: usize,

        /// Rank by the mean of this metric instead of sermon count
        #[arg(long)]
        by: Option<String>,
    },

    /// Subsample saturation curves: how many sermons are enough
    Saturation {
        /// scores.tsv produced by convert
        #[arg(long)]
        table: PathBuf,

        /// Output directory
        #[arg(long)]
        out: PathBuf,

        /// Metric column to resample (repeatable; default: every composite)
        #[arg(long = "metric")]
        metrics: Vec<String>,

        /// Smallest subsample size
        #[arg(long, default_value_t = DEFAULT_MIN_SIZE)]
        min_size: usize,

        /// Largest subsample size (default: all available scores)
        #[arg(long)]
        max_size: Option<usize>,

        /// Step between subsample sizes
        #[arg(long, default_value_t = DEFAULT_STEP)]
        step: usize,

        /// Random subsamples drawn per size
        #[arg(long, default_value_t = DEFAULT_DRAWS)]
        draws: usize,

        /// Root seed for the deterministic draw streams
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,

        /// Saturation band width on the subsample means
        #[arg(long, default_value_t = DEFAULT_EPSILON)]
        epsilon: f64,

        /// Resample within groups instead of the whole corpus
        #[arg(long, value_enum)]
        group_by: Option<GroupByArg>,
    },

    /// PAM k-medoids clustering of sermons, k chosen by silhouette
    Cluster {
        /// scores.tsv produced by convert
        #[arg(long)]
        table: PathBuf,

        /// Output directory
        #[arg(long)]
        out: PathBuf,

        /// Metric column to cluster on (repeatable; default: every composite)
        #[arg(long = "metric")]
        metrics: Vec<String>,

        /// Smallest k to try
        #[arg(long, default_value_t = DEFAULT_K_MIN)]
        k_min: usize,

        /// Largest k to try
        #[arg(long, default_value_t = DEFAULT_K_MAX)]
        k_max: usize,

        /// Distance between z-scored sermon profiles
        #[arg(long, value_enum, default_value_t = DistanceArg::Euclidean)]
        distance: DistanceArg,
    },

    /// Inter-run agreement (Pearson r, ICC) between the A and B scorings
    Reliability {
        /// scores.tsv produced by convert
        #[arg(long)]
        table: PathBuf,

        /// Output directory
        #[arg(long)]
        out: PathBuf,

        /// Smallest number of complete pairs per metric
        #[arg(long, default_value_t = DEFAULT_MIN_PAIRS)]
        min_pairs: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum DistanceArg {
    Euclidean,
    Manhattan,
}

impl From<DistanceArg> for DistanceKind {
    fn from(arg: DistanceArg) -> Self {
        match arg {
            DistanceArg::Euclidean => DistanceKind::Euclidean,
            DistanceArg::Manhattan => DistanceKind::Manhattan,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum GroupByArg {
    Preacher,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    match run(cli) {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<i32, InputError> {
    match cli.command {
        Commands::Convert { input, out } => {
            run_convert(&ConvertParams {
                input_dir: input,
                out_dir: out,
            })?;
            Ok(0)
        }
        Commands::Check { input, out } => {
            let issues = run_check(&CheckParams {
                input_dir: input,
                out_dir: out,
            })?;
            Ok(if issues > 0 { 1 } else { 0 })
        }
        Commands::Stats {
            table,
            out,
            detailed,
        } => {
            run_stats(&StatsParams {
                table_path: table,
                out_dir: out,
                detailed,
            })?;
            Ok(0)
        }
        Commands::Violin {
            table,
            out,
            detailed,
        } => {
            run_violin(&ViolinParams {
                table_path: table,
                out_dir: out,
                detailed,
            })?;
            Ok(0)
        }
        Commands::Select {
            table,
            out,
            top,
            by,
        } => {
            run_select(&SelectParams {
                table_path: table,
                out_dir: out,
                top,
                by,
            })?;
            Ok(0)
        }
        Commands::Saturation {
            table,
            out,
            metrics,
            min_size,
            max_size,
            step,
            draws,
            seed,
            epsilon,
            group_by,
        } => {
            run_saturation(&SaturationParams {
                table_path: table,
                out_dir: out,
                metrics,
                min_size,
                max_size,
                step,
                draws,
                seed,
                epsilon,
                group_by_preacher: group_by == Some(GroupByArg::Preacher),
            })?;
            Ok(0)
        }
        Commands::Cluster {
            table,
            out,
            metrics,
            k_min,
            k_max,
            distance,
        } => {
            run_cluster(&ClusterParams {
                table_path: table,
                out_dir: out,
                metrics,
                k_min,
                k_max,
                distance: distance.into(),
            })?;
            Ok(0)
        }
        Commands::Reliability {
            table,
            out,
            min_pairs,
        } => {
            run_reliability(&ReliabilityParams {
                table_path: table,
                out_dir: out,
                min_pairs,
            })?;
            Ok(0)
        }
    }
}
