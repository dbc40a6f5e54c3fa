//! `rigpose info`: skeleton and clip overview

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::utils::{TreeOptions, clip_table, load_library, render_tree, skeleton_tree};

#[derive(Args)]
pub struct InfoArgs {
    /// Path to the scene JSON file
    pub file: PathBuf,

    /// Maximum tree depth to display
    #[arg(short, long)]
    pub depth: Option<usize>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

pub fn execute(args: InfoArgs) -> Result<()> {
    let library = load_library(&args.file)?;
    let skeleton = library.skeleton();

    println!("Scene: {}", args.file.display());
    println!(
        "Nodes: {}  Bones: {}  Clips: {}",
        skeleton.node_count(),
        skeleton.bone_count(),
        library.clips().len()
    );

    println!("\n=== Skeleton ===");
    let options = TreeOptions {
        max_depth: args.depth,
        no_color: args.no_color,
    };
    print!("{}", render_tree(&skeleton_tree(skeleton), &options));

    println!("\n=== Clips ===");
    if library.clips().is_empty() {
        println!("(none)");
        return Ok(());
    }

    let table = clip_table(library.clips());
    table.printstd();

    Ok(())
}
