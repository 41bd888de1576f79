//! Tab-scoped session storage configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_tab() -> String {
    "default".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Name of the tab scope. Each tab keeps its own token.
    #[serde(default = "default_tab")]
    pub tab: String,

    /// Directory holding session files. Empty means the platform state dir.
    #[serde(default)]
    pub state_dir: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tab: default_tab(),
            state_dir: String::new(),
        }
    }
}

impl SessionConfig {
    /// Resolved state directory, `None` when no platform directory exists.
    #[must_use]
    pub fn state_dir(&self) -> Option<PathBuf> {
        if !self.state_dir.trim().is_empty() {
            return Some(PathBuf::from(self.state_dir.trim()));
        }
        dirs::state_dir()
            .or_else(dirs::data_local_dir)
            .map(|dir| dir.join("evt"))
    }

    /// File holding the token of the configured tab.
    #[must_use]
    pub fn token_file(&self) -> Option<PathBuf> {
        let tab = sanitize_tab(&self.tab);
        self.state_dir()
            .map(|dir| dir.join("sessions").join(format!("{tab}.token")))
    }
}

/// Keep tab names usable as file names.
fn sanitize_tab(tab: &str) -> String {
    let cleaned: String = tab
        .trim()
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_') {
                ch
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        default_tab()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_state_dir_wins() {
        let config = SessionConfig {
            tab: "work".into(),
            state_dir: "/tmp/evt-state".into(),
        };
        assert_eq!(
            config.token_file(),
            Some(PathBuf::from("/tmp/evt-state/sessions/work.token"))
        );
    }

    #[test]
    fn tab_names_are_sanitized() {
        assert_eq!(sanitize_tab("../etc/passwd"), "___etc_passwd");
        assert_eq!(sanitize_tab("   "), "default");
        assert_eq!(sanitize_tab("tab-2_b"), "tab-2_b");
    }
}
