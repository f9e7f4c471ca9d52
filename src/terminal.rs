use std::io::{self, Stdout};
use std::panic;

use crossterm::{
    ExecutableCommand,
    cursor::{Hide, Show},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::debug;

pub type QuizTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Switch to raw mode on the alternate screen.
///
/// A panic hook is installed first so a crash leaves the shell usable.
pub fn init() -> io::Result<QuizTerminal> {
    install_panic_hook();
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?.execute(Hide)?;
    debug!("terminal initialised");
    Terminal::new(CrosstermBackend::new(stdout))
}

pub fn restore() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(Show)?.execute(LeaveAlternateScreen)?;
    debug!("terminal restored");
    Ok(())
}

fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore();
        original_hook(panic_info);
    }));
}
