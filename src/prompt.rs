//! Line-buffered prompts shown before the timer view takes over.

use std::io::{self, BufRead, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::Stylize,
    terminal::{Clear, ClearType},
};

pub const DEFAULT_NAME: &str = "Guest";
pub const FAREWELL: &str = "👋 Goodbye! May your path be guided by wisdom.";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GoalError {
    #[error("Please enter a valid number")]
    NotANumber,
    #[error("Please enter a distance greater than zero")]
    NotPositive,
}

pub fn parse_goal(input: &str) -> Result<u32, GoalError> {
    let trimmed = input.trim();
    // Negative numbers are numbers, just not usable ones.
    if let Ok(n) = trimmed.parse::<i64>() {
        if n <= 0 {
            return Err(GoalError::NotPositive);
        }
    }
    match trimmed.parse::<u32>() {
        Ok(0) => Err(GoalError::NotPositive),
        Ok(n) => Ok(n),
        Err(_) => Err(GoalError::NotANumber),
    }
}

/// Read one line without its terminator. `None` on end of input.
pub fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

pub fn clear_screen<W: Write>(out: &mut W) -> io::Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    out.flush()
}

pub fn welcome_banner<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "{}\n",
        "🌟 Welcome to Cosmic Pomodoro Timer 🌟".yellow()
    )
}

/// Ask for a display name; blank input (or end of input) means "Guest".
pub fn ask_name<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<String> {
    write!(out, "Enter your name: ")?;
    out.flush()?;
    let name = read_line(input)?.unwrap_or_default();
    Ok(if name.is_empty() {
        DEFAULT_NAME.to_string()
    } else {
        name
    })
}

pub fn greet<W: Write>(out: &mut W, name: &str, quote: &str) -> io::Result<()> {
    writeln!(out, "\n{}", format!("Welcome, {name}!").cyan())?;
    writeln!(out, "\n✨ {quote}\n")
}

/// Ask for a distance goal until a positive integer is entered.
/// Returns `None` if input ends first.
pub fn ask_goal<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    meters_per_minute: f64,
) -> io::Result<Option<u32>> {
    loop {
        write!(
            out,
            "\n{}",
            format!("Enter distance goal in meters ({meters_per_minute}m = 1min): ").green()
        )?;
        out.flush()?;

        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        match parse_goal(&line) {
            Ok(goal) => return Ok(Some(goal)),
            Err(e) => {
                log::debug!("rejected goal input {line:?}: {e}");
                writeln!(out, "{}", e.to_string().red())?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn parse_goal_accepts_positive_integers() {
        assert_eq!(parse_goal("100"), Ok(100));
        assert_eq!(parse_goal("  42 \n"), Ok(42));
    }

    #[test]
    fn parse_goal_rejects_everything_else() {
        assert_eq!(parse_goal("abc"), Err(GoalError::NotANumber));
        assert_eq!(parse_goal(""), Err(GoalError::NotANumber));
        assert_eq!(parse_goal("12.5"), Err(GoalError::NotANumber));
        assert_eq!(parse_goal("0"), Err(GoalError::NotPositive));
        assert_eq!(parse_goal("-5"), Err(GoalError::NotPositive));
    }

    #[test]
    fn blank_name_becomes_guest() {
        let mut out = Vec::new();
        let name = ask_name(&mut Cursor::new("\n"), &mut out).unwrap();
        assert_eq!(name, DEFAULT_NAME);

        let name = ask_name(&mut Cursor::new(""), &mut out).unwrap();
        assert_eq!(name, DEFAULT_NAME);

        let name = ask_name(&mut Cursor::new("  Ada \n"), &mut out).unwrap();
        assert_eq!(name, "Ada");
    }

    #[test]
    fn goal_is_reprompted_until_valid() {
        let mut input = Cursor::new("ten\n0\n-3\n250\n");
        let mut out = Vec::new();
        let goal = ask_goal(&mut input, &mut out, 10.0).unwrap();

        assert_eq!(goal, Some(250));
        let text = output(out);
        assert_eq!(text.matches("Enter distance goal").count(), 4);
        assert!(text.contains("Please enter a valid number"));
        assert!(text.contains("greater than zero"));
    }

    #[test]
    fn goal_prompt_gives_up_at_end_of_input() {
        let mut out = Vec::new();
        let goal = ask_goal(&mut Cursor::new("nope\n"), &mut out, 10.0).unwrap();
        assert_eq!(goal, None);
    }

    #[test]
    fn greeting_includes_name_and_quote() {
        let mut out = Vec::new();
        greet(&mut out, "Ada", "Understanding yourself is the key.").unwrap();
        let text = output(out);
        assert!(text.contains("Welcome, Ada!"));
        assert!(text.contains("Understanding yourself is the key."));
    }
}
