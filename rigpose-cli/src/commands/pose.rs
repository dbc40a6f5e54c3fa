//! `rigpose pose`: skinning matrices of one clip at one moment

use anyhow::{Context, Result, bail};
use clap::Args;
use rigpose::{Animator, AnimatorOptions, MAX_BONES};
use std::path::PathBuf;

use crate::utils::{format_matrix_rows, format_seconds, load_library};

#[derive(Args)]
pub struct PoseArgs {
    /// Path to the scene JSON file
    pub file: PathBuf,

    /// Clip to play
    #[arg(short, long)]
    pub clip: String,

    /// Seconds to advance from the start of the clip
    #[arg(short, long, default_value = "0")]
    pub time: f32,

    /// Only print this bone
    #[arg(short, long)]
    pub bone: Option<String>,

    /// Size of the final bone matrix array
    #[arg(long, default_value_t = MAX_BONES)]
    pub capacity: usize,
}

pub fn execute(args: PoseArgs) -> Result<()> {
    if !args.time.is_finite() || args.time < 0.0 {
        bail!("--time must be a non-negative number of seconds");
    }

    let library = load_library(&args.file)?;
    let clip = library
        .clip(&args.clip)
        .with_context(|| format!("No clip named '{}' in {}", args.clip, args.file.display()))?;
    let skeleton = library.skeleton();

    let options = AnimatorOptions {
        bone_capacity: args.capacity,
    };
    let mut animator = Animator::with_options(clip, &options);
    animator
        .update_animation(args.time)
        .context("Failed to evaluate pose")?;

    let bones: Vec<usize> = match &args.bone {
        Some(name) => vec![skeleton.index_of(name)?],
        None => (0..skeleton.bone_count()).collect(),
    };

    println!(
        "Clip: {}  t = {} ({} ticks)",
        args.clip,
        format_seconds(args.time),
        animator.current_time_ticks()
    );

    for index in bones {
        let name = skeleton.bone(index).map_or("?", |b| b.name.as_str());
        let Some(matrix) = animator.final_bone_matrices().get(index) else {
            bail!("Bone {index} ({name}) is beyond the matrix capacity {}", args.capacity);
        };

        println!("\n[{index}] {name}");
        for row in format_matrix_rows(matrix) {
            println!("  {row}");
        }
    }

    Ok(())
}
