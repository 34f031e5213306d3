//! SIGINT handling for the stretches where the terminal is in cooked mode.
//!
//! In raw mode Ctrl-C arrives as a key event. While a prompt or sub-mode is
//! blocked reading a line it arrives as a signal instead, and the foreground
//! cannot react, so this thread ends the cycle on its behalf.

use std::io;
use std::thread::JoinHandle;

use signal_hook::consts::signal::{SIGINT, SIGTERM};
use signal_hook::iterator::{Handle, Signals};

use crate::app::AbandonHandle;
use crate::prompt::FAREWELL;
use crate::terminal;

pub struct InterruptGuard {
    handle: Handle,
    thread: Option<JoinHandle<()>>,
}

impl InterruptGuard {
    /// Persist an abandonment for any running cycle, restore the terminal
    /// and exit when SIGINT or SIGTERM arrives.
    pub fn install(abandon: AbandonHandle) -> io::Result<Self> {
        let mut signals = Signals::new([SIGINT, SIGTERM])?;
        let handle = signals.handle();
        let thread = std::thread::Builder::new()
            .name("interrupt".into())
            .spawn(move || {
                if let Some(signal) = signals.forever().next() {
                    log::info!("signal {signal} received, shutting down");
                    abandon.abandon();
                    let _ = terminal::restore();
                    println!("\n\n{FAREWELL}");
                    std::process::exit(0);
                }
            })?;
        Ok(Self {
            handle,
            thread: Some(thread),
        })
    }
}

impl Drop for InterruptGuard {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}
