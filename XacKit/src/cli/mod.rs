//! `XacKit` CLI - Command-line interface for XAC actor files

pub mod commands;
pub mod progress;

use clap::Parser;
use commands::Commands;

use crate::formats::xac::DecodeOptions;

#[derive(Parser)]
#[command(name = "xackit")]
#[command(version = crate::VERSION)]
#[command(about = "XacKit: inspect and dump EMotion FX actor files", long_about = None)]
struct Cli {
    /// Fail short mesh chunks instead of substituting a placeholder triangle
    #[arg(long, global = true)]
    no_mesh_fallback: bool,

    /// Keep meshes whose submesh vertex counts don't add up
    #[arg(long, global = true)]
    allow_vertex_mismatch: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn decode_options(&self) -> DecodeOptions {
        DecodeOptions::new()
            .with_mesh_fallback(!self.no_mesh_fallback)
            .with_require_submesh_vertex_total(!self.allow_vertex_mismatch)
    }
}

/// Run the `XacKit` CLI
pub fn run_cli() -> anyhow::Result<()> {
    // Setup logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    cli.command.execute(&cli.decode_options())?;

    Ok(())
}
