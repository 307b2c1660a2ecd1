//! Line-based control console read from stdin.
//!
//! ```text
//! m        toggle mute
//! +N / -N  nudge carrier pitch by N Hz
//! c HZ     set carrier pitch
//! f HZ     set modulator pitch
//! g X      set output gain (0..1)
//! s        print status
//! q        quit
//! ```

use std::io::BufRead;
use std::sync::mpsc;
use std::thread;

/// One parsed console line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    ToggleMute,
    Nudge(i32),
    SetCarrier(u32),
    SetModulator(u32),
    Gain(f32),
    Status,
    Quit,
}

/// Parse one line; `None` for blank or unrecognised input.
pub fn parse_line(line: &str) -> Option<Action> {
    let line = line.trim();
    if let Some(rest) = line.strip_prefix('+') {
        return rest.trim().parse().ok().map(Action::Nudge);
    }
    if line.starts_with('-') {
        return line.replace(' ', "").parse().ok().map(Action::Nudge);
    }

    let mut parts = line.split_whitespace();
    let cmd = parts.next()?;
    let arg = parts.next();
    if parts.next().is_some() {
        return None;
    }
    match (cmd, arg) {
        ("m" | "mute", None) => Some(Action::ToggleMute),
        ("s" | "status", None) => Some(Action::Status),
        ("q" | "quit" | "exit", None) => Some(Action::Quit),
        ("c" | "carrier", Some(hz)) => hz.parse().ok().map(Action::SetCarrier),
        ("f" | "modulator", Some(hz)) => hz.parse().ok().map(Action::SetModulator),
        ("g" | "gain", Some(g)) => g.parse().ok().map(Action::Gain),
        _ => None,
    }
}

/// Read stdin on a helper thread and hand lines over a channel.
/// The channel disconnects when stdin closes.
pub fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}
