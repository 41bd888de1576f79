use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::{GlobalFlags, OutputFormat};

/// Terminal capabilities resolved once per process.
#[derive(Clone, Copy, Debug, Default)]
pub struct UiPrefs {
    /// Highlight `enabled`/`disabled` cells in table output.
    pub color: bool,
    /// Show a spinner while a request is in flight.
    pub spinner: bool,
    pub width: Option<usize>,
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();

pub fn init(flags: &GlobalFlags) {
    let _ = UI_PREFS.set(resolve(flags, std::io::stderr().is_terminal()));
}

fn resolve(flags: &GlobalFlags, interactive: bool) -> UiPrefs {
    let color = interactive
        && flags.format == OutputFormat::Table
        && std::env::var_os("NO_COLOR").is_none();
    let width = std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|width| *width >= 40);

    UiPrefs {
        color,
        spinner: interactive && !flags.quiet,
        width,
    }
}

#[must_use]
pub fn prefs() -> UiPrefs {
    UI_PREFS.get().copied().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::resolve;
    use crate::cli::{GlobalFlags, OutputFormat};

    fn flags(format: OutputFormat, quiet: bool) -> GlobalFlags {
        GlobalFlags {
            format,
            quiet,
            verbose: false,
            tab: None,
        }
    }

    #[test]
    fn non_interactive_output_has_no_spinner() {
        let prefs = resolve(&flags(OutputFormat::Table, false), false);
        assert!(!prefs.spinner);
        assert!(!prefs.color);
    }

    #[test]
    fn quiet_suppresses_spinner() {
        let prefs = resolve(&flags(OutputFormat::Json, true), true);
        assert!(!prefs.spinner);
        assert!(!prefs.color);
    }
}
