use clap::Subcommand;
use std::path::PathBuf;

mod execute;
pub mod xac;

#[derive(Subcommand)]
pub enum Commands {
    /// Print a summary of an XAC file
    Inspect {
        /// XAC file
        file: PathBuf,

        /// Write the summary as JSON instead of printing it
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the chunks of an XAC file without decoding them
    Chunks {
        /// XAC file
        file: PathBuf,
    },

    /// Write the full decoded scene as JSON
    Dump {
        /// XAC file
        file: PathBuf,

        /// Output JSON file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Inspect every XAC file under a directory in parallel
    Batch {
        /// Directory to search
        dir: PathBuf,

        /// Write all summaries as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Suppress progress bar
        #[arg(short, long)]
        quiet: bool,
    },
}
