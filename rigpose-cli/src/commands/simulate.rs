//! `rigpose simulate`: scripted character controller run

use anyhow::{Context, Result, anyhow, bail};
use clap::Args;
use rigpose::{AnimatorOptions, CharacterController, ClipSet, ControlInput};
use std::path::PathBuf;
use std::str::FromStr;

use crate::utils::{format_seconds, load_library};

#[derive(Args)]
pub struct SimulateArgs {
    /// Path to the scene JSON file
    pub file: PathBuf,

    /// Clip played while idle
    #[arg(long, default_value = "Standing")]
    pub stand: String,

    /// Clip played while moving
    #[arg(long, default_value = "Walking")]
    pub walk: String,

    /// One-shot clip played on death
    #[arg(long, default_value = "Dying")]
    pub die: String,

    /// One-shot clip played when dancing
    #[arg(long, default_value = "Silly_Dancing")]
    pub dance: String,

    /// Input timeline, e.g. "die@1.0,dance@2.5,walk@4.0-5.0"
    #[arg(short, long, default_value = "")]
    pub script: String,

    /// Frames per second
    #[arg(long, default_value = "60")]
    pub fps: f32,

    /// Seconds to simulate
    #[arg(short, long, default_value = "5")]
    pub duration: f32,
}

pub fn execute(args: SimulateArgs) -> Result<()> {
    if !args.fps.is_finite() || args.fps <= 0.0 {
        bail!("--fps must be a positive number");
    }
    if !args.duration.is_finite() || args.duration < 0.0 {
        bail!("--duration must be a non-negative number of seconds");
    }

    let script: Script = args.script.parse().context("Invalid --script")?;
    let library = load_library(&args.file)?;
    let clips = ClipSet::from_library(&library, &args.stand, &args.walk, &args.die, &args.dance)
        .context("Failed to resolve controller clips")?;

    let mut controller = CharacterController::new(clips, &AnimatorOptions::default());
    let delta = 1.0 / args.fps;
    let frames = (args.duration * args.fps).ceil() as usize;

    println!("{:>9}  {}", format_seconds(0.0), controller.action());

    let mut last = controller.action();
    for frame in 0..frames {
        let time = frame as f32 * delta;
        controller
            .frame(script.input_at(time, delta), delta)
            .with_context(|| format!("Frame {frame} failed"))?;

        let action = controller.action();
        if action != last {
            println!("{:>9}  {action}", format_seconds(time));
            last = action;
        }
    }

    log::info!("Simulated {frames} frames");
    Ok(())
}

/// Control a script event drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Key {
    Walk,
    Die,
    Dance,
}

/// A key tapped at one instant or held over a span
#[derive(Debug, Clone, Copy, PartialEq)]
struct ScriptEvent {
    key: Key,
    start: f32,
    end: Option<f32>,
}

impl ScriptEvent {
    /// Whether the key is down during the frame `[time, time + delta)`
    fn is_down(&self, time: f32, delta: f32) -> bool {
        match self.end {
            Some(end) => self.start <= time && time < end,
            None => time <= self.start && self.start < time + delta,
        }
    }
}

impl FromStr for ScriptEvent {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (key, when) = s
            .split_once('@')
            .ok_or_else(|| anyhow!("event '{s}' is missing '@'"))?;

        let key = match key.trim() {
            "walk" | "move" => Key::Walk,
            "die" => Key::Die,
            "dance" => Key::Dance,
            other => bail!("unknown key '{other}'"),
        };

        let parse_time = |text: &str| -> Result<f32> {
            let value: f32 = text
                .trim()
                .parse()
                .with_context(|| format!("bad time '{text}' in '{s}'"))?;
            if !value.is_finite() || value < 0.0 {
                bail!("time '{text}' in '{s}' must be a non-negative number");
            }
            Ok(value)
        };

        let (start, end) = match when.split_once('-') {
            Some((start, end)) => (parse_time(start)?, Some(parse_time(end)?)),
            None => (parse_time(when)?, None),
        };

        if let Some(end) = end
            && end < start
        {
            bail!("span in '{s}' ends before it starts");
        }

        Ok(Self { key, start, end })
    }
}

/// Parsed input timeline
#[derive(Debug, Clone, Default, PartialEq)]
struct Script {
    events: Vec<ScriptEvent>,
}

impl Script {
    /// Key state for the frame starting at `time`
    fn input_at(&self, time: f32, delta: f32) -> ControlInput {
        let mut input = ControlInput::default();
        for event in self.events.iter().filter(|e| e.is_down(time, delta)) {
            match event.key {
                Key::Walk => input.moving = true,
                Key::Die => input.die_requested = true,
                Key::Dance => input.dance_requested = true,
            }
        }
        input
    }
}

impl FromStr for Script {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let events = s
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(str::parse)
            .collect::<Result<Vec<ScriptEvent>>>()?;
        Ok(Self { events })
    }
}
