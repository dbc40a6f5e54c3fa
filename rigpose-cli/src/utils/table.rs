//! Clip listing table

use prettytable::{Cell, Row, Table, format::consts::FORMAT_NO_LINESEP_WITH_TITLE};
use rigpose::AnimationClip;
use std::sync::Arc;

use super::format_seconds;

/// One row per clip: name, tick rate, length in ticks and seconds, track count
pub fn clip_table(clips: &[Arc<AnimationClip>]) -> Table {
    let mut table = Table::new();
    table.set_format(*FORMAT_NO_LINESEP_WITH_TITLE);
    table.set_titles(Row::new(
        ["Name", "Ticks/s", "Ticks", "Duration", "Tracks"]
            .into_iter()
            .map(|title| Cell::new(title).style_spec("b"))
            .collect(),
    ));

    for clip in clips {
        table.add_row(Row::new(vec![
            Cell::new(clip.name()),
            Cell::new(&clip.ticks_per_second().to_string()).style_spec("r"),
            Cell::new(&clip.duration_ticks().to_string()).style_spec("r"),
            Cell::new(&format_seconds(clip.duration_seconds())).style_spec("r"),
            Cell::new(&clip.track_count().to_string()).style_spec("r"),
        ]));
    }

    table
}
