use std::path::PathBuf;

use clap::Parser;

/// Command-line arguments. Values given here override `blockdump.toml`.
#[derive(Parser, Debug, Default)]
#[command(
    name = "blockdump",
    about = "Compact a block registry snapshot into a block state JSON document"
)]
pub struct CliArgs {
    /// Registry snapshot (TOML) written by the game-side dumper.
    pub registry: Option<PathBuf>,

    /// Output file.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Material name table (TOML); the built-in table is used when absent.
    #[arg(long)]
    pub materials: Option<PathBuf>,

    /// Run configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Leave out occlusion shapes and the shape table.
    #[arg(long)]
    pub no_shapes: bool,

    /// Prepare blocks on the calling thread only.
    #[arg(long)]
    pub sequential: bool,

    /// Keep the pretty-printer's one-element-per-line arrays.
    #[arg(long)]
    pub no_compact: bool,

    /// Log filter (error, warn, info, debug, trace or an env_logger spec).
    #[arg(long)]
    pub log_level: Option<String>,
}
