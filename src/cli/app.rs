use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "ibdstat")]
#[command(about = "Page-layout statistics for InnoDB tablespace files")]
#[command(version)]
pub struct Cli {
    /// Control colored output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Write output to a file instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<String>,

    /// Diagnostic log level on stderr (error, warn, info, debug, trace); RUST_LOG overrides
    #[arg(long = "log-level", default_value = "warn", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan every page and report page-type and per-index statistics
    Stats {
        /// Path to InnoDB data file (.ibd or ibdata1)
        #[arg(short, long)]
        file: String,

        /// Output in JSON format
        #[arg(long)]
        json: bool,

        /// Override page size (default: 16384)
        #[arg(long = "page-size")]
        page_size: Option<u32>,
    },

    /// Dump the file, index and segment headers of one page
    Header {
        /// Path to InnoDB data file (.ibd or ibdata1)
        #[arg(short, long)]
        file: String,

        /// Page number to inspect (1-based)
        #[arg(short, long)]
        page: u32,

        /// Output in JSON format
        #[arg(long)]
        json: bool,

        /// Override page size (default: 16384)
        #[arg(long = "page-size")]
        page_size: Option<u32>,
    },
}
