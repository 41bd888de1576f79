use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::ui;

/// Loading indicator on stderr. A no-op when stderr is not a terminal.
pub struct Spinner {
    bar: Option<ProgressBar>,
}

impl Spinner {
    #[must_use]
    pub fn start(message: &str) -> Self {
        if !ui::prefs().spinner {
            return Self { bar: None };
        }

        let bar = ProgressBar::new_spinner();
        bar.enable_steady_tick(Duration::from_millis(100));
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());
        Self { bar: Some(bar) }
    }

    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }

    pub fn fail(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.abandon_with_message(message.to_string());
        }
    }

    /// Await `fut` with the spinner shown, clearing it on success and
    /// leaving `failed` behind on error.
    pub async fn wrap<T, E>(
        message: &str,
        failed: &str,
        fut: impl Future<Output = Result<T, E>>,
    ) -> Result<T, E> {
        let spinner = Self::start(message);
        let result = fut.await;
        match &result {
            Ok(_) => spinner.finish(),
            Err(_) => spinner.fail(failed),
        }
        result
    }
}
