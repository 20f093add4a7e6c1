use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::engine::{DEFAULT_BATCH_SIZE, DEFAULT_CHUNK_SIZE, OutlineMode};

/// Upload limit inherited from the book service: 20 MiB.
pub const DEFAULT_MAX_FILE_BYTES: u64 = 20 * 1024 * 1024;

#[derive(Parser, Debug)]
#[command(
    name = "booksplit",
    version,
    about = "Split PDF books into chapter trees using their outlines"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Inventory(InventoryArgs),
    Segment(SegmentArgs),
    Outline(OutlineArgs),
    Status(StatusArgs),
}

#[derive(Args, Debug, Clone)]
pub struct InventoryArgs {
    #[arg(long, default_value = ".cache/booksplit")]
    pub cache_root: PathBuf,

    #[arg(long)]
    pub library_root: Option<PathBuf>,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone)]
pub struct SegmentArgs {
    #[arg(long)]
    pub pdf: PathBuf,

    #[arg(long, default_value = ".cache/booksplit")]
    pub cache_root: PathBuf,

    #[arg(long)]
    pub output_path: Option<PathBuf>,

    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    #[arg(long, value_enum, default_value_t = OutlineMode::Nested)]
    pub outline_mode: OutlineMode,

    /// Largest accepted input in bytes; 0 disables the check.
    #[arg(long, default_value_t = DEFAULT_MAX_FILE_BYTES)]
    pub max_file_bytes: u64,

    #[arg(long, default_value_t = false)]
    pub omit_text: bool,
}

#[derive(Args, Debug, Clone)]
pub struct OutlineArgs {
    #[arg(long)]
    pub pdf: PathBuf,

    #[arg(long, value_enum, default_value_t = OutlineMode::Nested)]
    pub outline_mode: OutlineMode,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    #[arg(long, default_value = ".cache/booksplit")]
    pub cache_root: PathBuf,
}
