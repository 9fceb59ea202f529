// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "hero-scene")]
#[command(about = "Animated 3D portfolio hero background", long_about = None)]
pub struct Cli {
    /// JSON settings file; flags below override its values
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Clear to an opaque background instead of a transparent one
    #[arg(long)]
    pub opaque: bool,

    /// Number of points in the particle field
    #[arg(long, value_name = "N")]
    pub particles: Option<usize>,

    /// Seed for float phases and particle positions
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Disable multisample anti-aliasing
    #[arg(long = "no-msaa")]
    pub no_msaa: bool,

    #[arg(long)]
    pub width: Option<u32>,

    #[arg(long)]
    pub height: Option<u32>,

    /// Only log warnings and errors (unless RUST_LOG is set)
    #[arg(long)]
    pub quiet: bool,

    /// Print the scene topology as JSON and exit
    #[arg(long = "dump-scene")]
    pub dump_scene: bool,
}
