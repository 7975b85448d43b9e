//! Plain-text renderings used by the non-interactive subcommands.

use std::fmt::Write;

use crate::calendar::{Cell, MonthGrid};
use crate::locale::Strings;
use crate::model::Note;

pub fn notes_text(notes: &[Note], strings: &Strings) -> String {
    let mut out = String::new();
    if notes.is_empty() {
        let _ = writeln!(out, "{}", strings.empty_title);
        let _ = writeln!(out, "{}", strings.empty_hint);
        return out;
    }

    for (i, note) in notes.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "# {} ({}) [{}]", note.title, note.color.as_str(), note.id);
        for task in &note.tasks {
            let mark = if task.is_completed { 'x' } else { ' ' };
            let _ = writeln!(out, "  [{}] {}", mark, task.content);
        }
    }
    out
}

/// Month grid with 4-wide columns; today is wrapped in `*`.
pub fn calendar_text(grid: &MonthGrid) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:^28}", grid.title);
    for row in grid.rows() {
        let line: String = row
            .iter()
            .map(|cell| match cell {
                Cell::Header(label) => format!("{:>4}", label),
                Cell::Blank => "    ".to_string(),
                Cell::Day { day, today: true } => format!("{:>4}", format!("*{}*", day)),
                Cell::Day { day, .. } => format!("{:>4}", day),
            })
            .collect();
        let _ = writeln!(out, "{}", line.trim_end());
    }
    out
}
