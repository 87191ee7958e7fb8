use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Bar for batch file operations. Draws nothing when stderr is not a terminal.
pub fn batch_bar(len: u64, verb: &str) -> ProgressBar {
    let bar = ProgressBar::new(len);
    bar.set_style(
        ProgressStyle::with_template(&format!(
            "{verb} [{{bar:40.cyan/blue}}] {{percent}}% | {{pos}}/{{len}} | Duration: {{elapsed}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=>-"),
    );
    bar
}

/// Spinner shown while an external command runs.
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let s = ProgressBar::new_spinner();
    s.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    s.set_message(message.into());
    s.enable_steady_tick(Duration::from_millis(80));
    s
}

pub fn succeed(spinner: &ProgressBar, message: impl Into<String>) {
    finish_plain(spinner, format!("{} {}", console::style("✔").green(), message.into()));
}

pub fn fail(spinner: &ProgressBar, message: impl Into<String>) {
    finish_plain(spinner, format!("{} {}", console::style("✖").red(), message.into()));
}

fn finish_plain(spinner: &ProgressBar, line: String) {
    spinner.set_style(
        ProgressStyle::with_template("{msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.finish_with_message(line);
}
