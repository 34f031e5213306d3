use std::io::{self, Stdout};
use std::sync::Once;

use crossterm::{
    cursor, execute,
    style::ResetColor,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal, TerminalOptions, Viewport};

pub const FALLBACK_WIDTH: u16 = 80;
pub const FALLBACK_HEIGHT: u16 = 24;

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Terminal dimensions, or 80x24 when they cannot be queried.
pub fn size_or_default() -> (u16, u16) {
    usable_size(terminal::size().ok()).unwrap_or((FALLBACK_WIDTH, FALLBACK_HEIGHT))
}

fn usable_size(reported: Option<(u16, u16)>) -> Option<(u16, u16)> {
    reported.filter(|&(w, h)| w > 0 && h > 0)
}

fn enter_raw() -> io::Result<()> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen, cursor::Hide)
}

/// Put the terminal back into cooked mode on the main screen.
///
/// Safe to call any number of times and from any thread.
pub fn restore() -> io::Result<()> {
    let raw = disable_raw_mode();
    execute!(io::stdout(), ResetColor, LeaveAlternateScreen, cursor::Show)?;
    raw
}

/// Raw mode + alternate screen for as long as the value lives.
pub struct TerminalSession {
    terminal: Tui,
}

impl TerminalSession {
    pub fn enter() -> io::Result<Self> {
        if let Err(e) = enter_raw() {
            let _ = restore();
            return Err(e);
        }

        let backend = CrosstermBackend::new(io::stdout());
        let viewport = if usable_size(terminal::size().ok()).is_some() {
            Viewport::Fullscreen
        } else {
            let (w, h) = size_or_default();
            log::warn!("terminal size unavailable, using {w}x{h}");
            Viewport::Fixed(Rect::new(0, 0, w, h))
        };
        match Terminal::with_options(backend, TerminalOptions { viewport }) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(e) => {
                let _ = restore();
                Err(e)
            }
        }
    }

    pub fn terminal(&mut self) -> &mut Tui {
        &mut self.terminal
    }

    /// Hand the terminal back to line-buffered I/O until the returned guard
    /// is dropped, at which point raw mode is re-entered and the next frame
    /// is redrawn from scratch.
    pub fn suspend(&mut self) -> io::Result<Suspended<'_>> {
        restore()?;
        Ok(Suspended { session: self })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(e) = restore() {
            log::error!("failed to restore terminal: {e}");
        }
    }
}

/// Cooked-mode window inside a [`TerminalSession`].
pub struct Suspended<'a> {
    session: &'a mut TerminalSession,
}

impl Drop for Suspended<'_> {
    fn drop(&mut self) {
        if let Err(e) = enter_raw() {
            log::error!("failed to re-enter raw mode: {e}");
        }
        if let Err(e) = self.session.terminal.clear() {
            log::warn!("failed to clear terminal after sub-mode: {e}");
        }
    }
}

/// Restore the terminal before the default hook prints a panic message.
pub fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = restore();
            log::error!("panic: {info}");
            default_panic(info);
        }));
    });
}
