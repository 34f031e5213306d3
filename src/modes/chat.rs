use std::io::{self, BufRead, Write};

use crossterm::style::Stylize;
use itertools::Itertools;
use rand::Rng;

use crate::chat::{Category, ChatBot, ChatLog};
use crate::prompt::read_line;

/// Converse until the user types `back` or input ends.
pub fn run<R, W, G>(
    input: &mut R,
    out: &mut W,
    bot: &mut ChatBot<G>,
    log: &mut ChatLog,
) -> io::Result<()>
where
    R: BufRead,
    W: Write,
    G: Rng,
{
    writeln!(out, "\n{}", "💬 Chat with Wisdom Bot".cyan())?;
    writeln!(out, "Categories: {}", Category::ALL.iter().join(", "))?;
    writeln!(out, "Type 'back' to return to timer\n")?;

    loop {
        write!(out, "{}", "You: ".green())?;
        out.flush()?;

        let Some(message) = read_line(input)? else {
            break;
        };
        if message.eq_ignore_ascii_case("back") {
            break;
        }
        if message.is_empty() {
            continue;
        }

        let reply = bot.respond(&message);
        log.push_exchange(&message, reply);
        writeln!(out, "\n{}\n", format!("Bot: {reply}").cyan())?;
    }
    Ok(())
}
