//! CLI argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "quizblock")]
#[command(about = "Convert question sheets into NewQuestion import blocks")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a question CSV (header + 9 columns) into import blocks
    Convert {
        input: PathBuf,
        /// Output file (default: <output_dir>/<stem>_d2l.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Convert every *.csv file in a directory
    ConvertDir {
        input_dir: PathBuf,
        /// Output directory (default: output_dir from config)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
    /// Convert a bullet-list text sheet into import blocks
    Text {
        input: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Question id prefix (default: text_id_prefix from config)
        #[arg(long)]
        prefix: Option<String>,
    },
    /// Regroup an encoded file so every block ends with one blank row
    Resegment {
        input: PathBuf,
        output: PathBuf,
        /// First-field marker that opens a block
        #[arg(long)]
        marker: Option<String>,
    },
    /// Build and export a single question interactively
    Form {
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
    /// Build several questions interactively and export them together
    Session {
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
}
