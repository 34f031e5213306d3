// Library surface for headless/integration tests and reuse.
// The binary in main.rs only wires these together around real stdin/stdout.
pub mod app;
pub mod app_dirs;
pub mod chat;
pub mod config;
#[cfg(unix)]
pub mod interrupt;
pub mod logging;
pub mod modes;
pub mod notify;
pub mod prompt;
pub mod quotes;
pub mod runtime;
pub mod session;
pub mod stats;
pub mod terminal;
pub mod theme;
pub mod timer;
pub mod ui;

/// Period of the background ticker and of foreground redraws.
pub const TICK_RATE_MS: u64 = 100;
