//! Root CLI structure for rigpose

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "rigpose")]
#[command(about = "Inspect and drive skeletal animations from an imported scene", long_about = None)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the skeleton tree and the clips of a scene
    Info(crate::commands::info::InfoArgs),

    /// Print skinning matrices of a clip at a point in time
    Pose(crate::commands::pose::PoseArgs),

    /// Drive a character controller with a scripted input timeline
    Simulate(crate::commands::simulate::SimulateArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
