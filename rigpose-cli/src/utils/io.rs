//! Scene loading

use anyhow::{Context, Result};
use rigpose::{AnimationLibrary, ClipLoadOptions, SceneDescription};
use std::{fs::File, io::BufReader, path::Path};

/// Read a JSON scene description from disk
pub fn read_scene(path: &Path) -> Result<SceneDescription> {
    let file =
        File::open(path).with_context(|| format!("Failed to open scene {}", path.display()))?;
    SceneDescription::from_json_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse scene {}", path.display()))
}

/// Read a scene and bind its clips to its skeleton
pub fn load_library(path: &Path) -> Result<AnimationLibrary> {
    let scene = read_scene(path)?;
    AnimationLibrary::load(&scene, &ClipLoadOptions::default())
        .with_context(|| format!("Failed to load animations from {}", path.display()))
}
