use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hushcut")]
#[command(author, version, about = "Denoise the audio track of a video file")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Denoise the audio of a video file and write a new container
    Denoise {
        /// Input video file
        #[arg(required = true)]
        input: PathBuf,

        /// Output video file (overwritten if it exists)
        #[arg(required = true)]
        output: PathBuf,

        /// Maximum noise suppression in dB (1-60)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=60))]
        atten_lim: Option<u32>,

        /// Directory containing custom model weights
        #[arg(long)]
        model_dir: Option<PathBuf>,

        /// Show the ffmpeg commands that would run without executing them
        #[arg(long)]
        dry_run: bool,

        /// Emit progress and the outcome as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// Probe a media file and display information
    Probe {
        /// File to probe
        #[arg(required = true)]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that required external tools are available
    CheckTools,

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
