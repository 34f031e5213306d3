use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use crossterm::style::Stylize;

use crate::prompt::read_line;
use crate::theme::Background;

/// Offer the six backgrounds. `None` keeps the current one.
///
/// `linger` holds the confirmation on screen before the timer view redraws.
pub fn run<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    current: Background,
    linger: Duration,
) -> io::Result<Option<Background>> {
    writeln!(out, "\n{}", "🎨 Choose Background:".yellow())?;
    for (i, background) in Background::ALL.iter().enumerate() {
        let marker = if *background == current { " *" } else { "" };
        writeln!(out, "{}. {}{marker}", i + 1, background.label())?;
    }
    write!(out, "\nEnter choice (1-{}): ", Background::ALL.len())?;
    out.flush()?;

    let choice = read_line(input)?.and_then(|line| Background::from_choice(&line));
    match choice {
        Some(background) => {
            log::info!("background changed to {background}");
            writeln!(out, "{}", "Color changed!".green())?;
        }
        None => writeln!(out, "Keeping {}", current.label())?,
    }
    out.flush()?;
    thread::sleep(linger);
    Ok(choice)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn pick(input: &str) -> (Option<Background>, String) {
        let mut out = Vec::new();
        let choice = run(
            &mut Cursor::new(input),
            &mut out,
            Background::DeepSpace,
            Duration::ZERO,
        )
        .unwrap();
        (choice, String::from_utf8(out).unwrap())
    }

    #[test]
    fn lists_every_background() {
        let (_, text) = pick("\n");
        for background in Background::ALL {
            assert!(text.contains(background.label()));
        }
        assert!(text.contains("2. Deep Space Blue *"));
    }

    #[test]
    fn valid_digit_selects() {
        let (choice, text) = pick("3\n");
        assert_eq!(choice, Some(Background::Nebula));
        assert!(text.contains("Color changed!"));
    }

    #[test]
    fn anything_else_keeps_current() {
        for input in ["0\n", "7\n", "blue\n", ""] {
            let (choice, text) = pick(input);
            assert_eq!(choice, None, "input {input:?}");
            assert!(text.contains("Keeping Deep Space Blue"));
        }
    }
}
