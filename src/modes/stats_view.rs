use std::io::{self, BufRead, Write};

use crossterm::style::{Color, Stylize};

use crate::prompt::{clear_screen, read_line};
use crate::stats::LeaderboardRow;

pub const EMPTY_MESSAGE: &str = "No statistics yet. Complete a session to see stats!";

fn rank_color(rank: usize) -> Option<Color> {
    match rank {
        1 => Some(Color::Yellow),
        2 | 3 => Some(Color::Green),
        _ => None,
    }
}

pub fn write_leaderboard<W: Write>(out: &mut W, rows: &[LeaderboardRow]) -> io::Result<()> {
    writeln!(out, "{}\n", "📊 LEADERBOARD 📊".yellow())?;

    if rows.is_empty() {
        return writeln!(out, "{}", EMPTY_MESSAGE.dark_grey());
    }

    let header = format!(
        "{:<6} {:<20} {:<15} {:<15} {:<12} {:<10}",
        "Rank", "Name", "Distance", "Time", "Sessions", "Completed"
    );
    let rule = "-".repeat(header.len());
    writeln!(out, "{}", header.cyan())?;
    writeln!(out, "{rule}")?;

    for row in rows {
        let line = format!(
            "{:<6} {:<20} {:<15} {:<15} {:<12} {:<10}",
            row.rank,
            row.name,
            format!("{:.0}m", row.total_distance),
            row.time,
            row.sessions,
            row.completed
        );
        match rank_color(row.rank) {
            Some(color) => writeln!(out, "{}", line.with(color))?,
            None => writeln!(out, "{line}")?,
        }
    }
    Ok(())
}

/// Show the leaderboard and wait for Enter.
pub fn run<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    rows: &[LeaderboardRow],
) -> io::Result<()> {
    clear_screen(out)?;
    write_leaderboard(out, rows)?;
    write!(out, "\nPress ENTER to go back...")?;
    out.flush()?;
    read_line(input)?;
    Ok(())
}
