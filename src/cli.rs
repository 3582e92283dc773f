use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::model::{DEFAULT_BASELINE_METHOD, DEFAULT_CANDIDATE_METHOD};

#[derive(Parser, Debug)]
#[command(
    name = "ragdelta",
    version,
    about = "Compare baseline and candidate RAG methods from an evaluation run log"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Compare(CompareArgs),
    Inspect(InspectArgs),
}

#[derive(Args, Debug, Clone)]
pub struct CompareArgs {
    /// Run log CSV, or `-` for stdin
    #[arg(long)]
    pub csv: PathBuf,

    #[arg(long, default_value = DEFAULT_BASELINE_METHOD)]
    pub baseline_method: String,

    #[arg(long, default_value = DEFAULT_CANDIDATE_METHOD)]
    pub candidate_method: String,

    /// Blended candidate precision, as a percentage (0-100)
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub precision_override: String,

    /// Lower bound for the blended recall target, as a percentage (0-100)
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub recall_floor_override: String,

    /// Baseline precision shown in the blended view and KPI line (0-100)
    #[arg(long, allow_hyphen_values = true)]
    pub baseline_precision_override: Option<String>,

    #[arg(long)]
    pub projection_config: Option<PathBuf>,

    #[arg(long)]
    pub report_path: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    #[arg(long)]
    pub csv: PathBuf,
}
