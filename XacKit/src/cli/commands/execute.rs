//! Command execution implementations

use super::Commands;
use super::xac;
use crate::formats::xac::DecodeOptions;

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the underlying command fails.
    pub fn execute(&self, options: &DecodeOptions) -> anyhow::Result<()> {
        match self {
            Commands::Inspect { file, output } => xac::inspect(file, output.as_deref(), options),
            Commands::Chunks { file } => xac::chunks(file),
            Commands::Dump { file, output } => xac::dump(file, output, options),
            Commands::Batch { dir, output, quiet } => xac::batch(dir, output.as_deref(), *quiet, options),
        }
    }
}
