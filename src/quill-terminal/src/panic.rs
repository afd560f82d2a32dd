//! Panic hook that gives the terminal back before reporting.

use std::io::{self, Write};
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};

use crossterm::terminal::disable_raw_mode;

static PANIC_HOOK_INSTALLED: AtomicBool = AtomicBool::new(false);

/// Installs a panic hook that leaves raw mode, then runs the previous hook.
///
/// Installing more than once is a no-op.
pub fn install_panic_hook() {
    if PANIC_HOOK_INSTALLED.swap(true, Ordering::SeqCst) {
        return;
    }

    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        original_hook(panic_info);
    }));
}

/// Leaves raw mode and moves stderr to a fresh line.
pub fn restore_terminal() {
    let _ = disable_raw_mode();
    let mut stderr = io::stderr();
    let _ = stderr.write_all(b"\r\n");
    let _ = stderr.flush();
}
