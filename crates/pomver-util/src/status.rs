//! Cargo-style status lines on stderr: a right-aligned, coloured label
//! followed by a plain message, e.g. `   Resolving shop (4 modules)`.

use console::{Style, Term};

const LABEL_WIDTH: usize = 12;

/// Colour of a status label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Something is being done (bold green).
    Action,
    /// Plain information (bold cyan).
    Info,
    /// Something needs attention (bold yellow).
    Warn,
}

impl Tone {
    fn style(self) -> Style {
        let style = Style::new().bold();
        match self {
            Tone::Action => style.green(),
            Tone::Info => style.cyan(),
            Tone::Warn => style.yellow(),
        }
    }
}

/// Render a status line without printing it.
pub fn format_status(tone: Tone, label: &str, message: &str) -> String {
    format!(
        "{:>width$} {message}",
        tone.style().apply_to(label),
        width = LABEL_WIDTH
    )
}

pub fn status(label: &str, message: &str) {
    emit(Tone::Action, label, message);
}

pub fn status_info(label: &str, message: &str) {
    emit(Tone::Info, label, message);
}

pub fn status_warn(label: &str, message: &str) {
    emit(Tone::Warn, label, message);
}

fn emit(tone: Tone, label: &str, message: &str) {
    let _ = Term::stderr().write_line(&format_status(tone, label, message));
}
