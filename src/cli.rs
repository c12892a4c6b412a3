use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::ctx::RunConfig;
use crate::io::table::{
    ColumnSpec, DEFAULT_LATERALITY_COL, DEFAULT_POINT_PREFIX, DEFAULT_SUBJECT_COL,
    DEFAULT_VISIT_COL,
};
use crate::progression::{DEFAULT_DROP_DB, DEFAULT_MIN_POINTS, ProgressionParams};

#[derive(Debug, Parser)]
#[command(
    name = "kira-vfprogress",
    version,
    about = "Visit-wise visual-field progression labelling"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(about = "Label every visit and write the augmented table")]
    Run(RunArgs),
    #[command(about = "Check the input and classify without writing anything")]
    Validate(ValidateArgs),
}

#[derive(Debug, Args)]
pub struct RunArgs {
    #[arg(long, help = "Input table (.csv, .tsv, optionally .gz)")]
    pub input: PathBuf,

    #[arg(long, help = "Output directory")]
    pub out: PathBuf,

    #[command(flatten)]
    pub columns: ColumnArgs,

    #[command(flatten)]
    pub params: ParamArgs,

    #[arg(long, default_value_t = false, help = "Also write vfprogress.json")]
    pub json: bool,

    #[arg(long, default_value_t = 0, help = "Number of threads (0 = auto)")]
    pub threads: usize,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    #[arg(long, help = "Input table (.csv, .tsv, optionally .gz)")]
    pub input: PathBuf,

    #[command(flatten)]
    pub columns: ColumnArgs,

    #[command(flatten)]
    pub params: ParamArgs,
}

#[derive(Debug, Clone, Args)]
pub struct ColumnArgs {
    #[arg(long, default_value = DEFAULT_SUBJECT_COL)]
    pub subject_col: String,

    #[arg(long, default_value = DEFAULT_LATERALITY_COL)]
    pub laterality_col: String,

    #[arg(long, default_value = DEFAULT_VISIT_COL)]
    pub visit_col: String,

    #[arg(
        long,
        default_value = DEFAULT_POINT_PREFIX,
        help = "Columns starting with this prefix are VF test points"
    )]
    pub point_prefix: String,
}

impl ColumnArgs {
    pub fn to_spec(&self) -> ColumnSpec {
        ColumnSpec {
            subject: self.subject_col.clone(),
            laterality: self.laterality_col.clone(),
            visit: self.visit_col.clone(),
            point_prefix: self.point_prefix.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, Args)]
pub struct ParamArgs {
    #[arg(long, default_value_t = DEFAULT_DROP_DB, help = "Per-point drop threshold (dB)")]
    pub drop_db: f64,

    #[arg(
        long,
        default_value_t = DEFAULT_MIN_POINTS,
        help = "Minimum number of worsened points for an event"
    )]
    pub min_points: usize,
}

impl ParamArgs {
    pub fn to_params(&self) -> ProgressionParams {
        ProgressionParams {
            drop_db: self.drop_db,
            min_points: self.min_points,
        }
    }
}

impl RunArgs {
    pub fn to_config(&self) -> RunConfig {
        RunConfig {
            columns: self.columns.to_spec(),
            params: self.params.to_params(),
            threads: self.threads,
            write_json: self.json,
        }
    }
}

impl ValidateArgs {
    pub fn to_config(&self) -> RunConfig {
        RunConfig {
            columns: self.columns.to_spec(),
            params: self.params.to_params(),
            threads: 1,
            write_json: false,
        }
    }
}
