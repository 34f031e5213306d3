use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::quotes::{quotes, BREAK_ADVICE};

/// How much of each chat line is kept for the timer view's chat pane.
pub const LOG_LINE_CHARS: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Category {
    Iro,
    Heroic,
    Bronte,
    Kant,
    Lyrics,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Iro,
        Category::Heroic,
        Category::Bronte,
        Category::Kant,
        Category::Lyrics,
    ];

    /// Keyword match order; earlier entries win.
    const PRIORITY: [(Category, &'static [&'static str]); 5] = [
        (Category::Iro, &["iro", "tea", "wisdom", "uncle"]),
        (Category::Bronte, &["bronte", "emily", "love", "soul"]),
        (Category::Kant, &["kant", "moral", "reason", "science"]),
        (Category::Lyrics, &["song", "music", "sing", "lyric"]),
        (Category::Heroic, &["hero", "courage", "brave", "strong"]),
    ];

    /// First category whose keywords appear anywhere in `message`.
    pub fn detect(message: &str) -> Option<Category> {
        let lower = message.to_lowercase();
        Self::PRIORITY
            .iter()
            .find(|(_, words)| words.iter().any(|w| lower.contains(w)))
            .map(|(category, _)| *category)
    }
}

/// Canned-quote responder. The random source is injected so callers can
/// seed it.
#[derive(Debug)]
pub struct ChatBot<R: Rng = StdRng> {
    rng: R,
}

impl ChatBot<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> ChatBot<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn respond(&mut self, message: &str) -> &'static str {
        let category = match Category::detect(message) {
            Some(category) => category,
            None => self.random_category(),
        };
        self.quote_from(category)
    }

    pub fn quote_from(&mut self, category: Category) -> &'static str {
        quotes(category).choose(&mut self.rng).copied().unwrap_or("")
    }

    /// Quote from a uniformly chosen category.
    pub fn wisdom(&mut self) -> &'static str {
        let category = self.random_category();
        self.quote_from(category)
    }

    pub fn break_advice(&mut self) -> &'static str {
        BREAK_ADVICE.choose(&mut self.rng).copied().unwrap_or("")
    }

    fn random_category(&mut self) -> Category {
        *Category::ALL.choose(&mut self.rng).unwrap_or(&Category::Iro)
    }
}

/// Append-only record of chat exchanges shown in the timer view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatLog {
    messages: Vec<String>,
}

impl ChatLog {
    pub fn push_exchange(&mut self, user: &str, bot: &str) {
        self.messages
            .push(format!("You: {}", truncate_chars(user, LOG_LINE_CHARS)));
        self.messages
            .push(format!("Bot: {}", truncate_chars(bot, LOG_LINE_CHARS)));
    }

    /// Up to `n` messages, newest first.
    pub fn tail(&self, n: usize) -> impl Iterator<Item = &str> {
        self.messages.iter().rev().take(n).map(String::as_str)
    }
}

fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
