use std::path::PathBuf;

use clap::Parser;

/// eaf-host: renders embedded view buffers on an owner thread.
#[derive(Parser, Debug)]
#[command(name = "eaf-host", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log filter override (e.g. `debug`, `eaf_buffer=trace`).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Source locator of the demo buffer.
    #[arg(long, default_value = "about:blank")]
    pub url: String,

    /// Buffer width; defaults to `buffer.default_width`.
    #[arg(long)]
    pub width: Option<u32>,

    /// Buffer height; defaults to `buffer.default_height`.
    #[arg(long)]
    pub height: Option<u32>,

    /// Worker threads requesting updates.
    #[arg(long, default_value_t = 2)]
    pub workers: usize,

    /// Updates requested by each worker.
    #[arg(long, default_value_t = 10)]
    pub updates: usize,
}

pub fn parse() -> Args {
    Args::parse()
}
