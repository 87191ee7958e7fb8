//! # contract: seams between the workflows and the outside world
//!
//! The `gen` and `upload` workflows talk to two collaborators only:
//!
//! - [`VcsRunner`]: the version-control executable. Each call runs one
//!   command in the repository and returns its exit code and captured output.
//!   Exit codes are the only success signal.
//! - [`Prompter`]: the operator. Supplies paths (with defaults), answers
//!   confirmations and picks from lists.
//!
//! Both traits are annotated for `mockall` so tests can drive the workflows
//! without a terminal or a real repository. The mocks are exported through the
//! default `test-export-mocks` feature for use in `tests/`.

use async_trait::async_trait;
use mockall::automock;

use crate::error::Result;

/// Captured result of one external command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// `-1` when the process could not be spawned or was killed by a signal.
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn ok(stdout: impl Into<String>) -> Self {
        CommandOutput {
            code: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        CommandOutput {
            code,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.code == 0
    }

    /// stdout followed by stderr.
    pub fn combined(&self) -> String {
        match (self.stdout.trim().is_empty(), self.stderr.trim().is_empty()) {
            (false, false) => format!("{}\n{}", self.stdout.trim_end(), self.stderr.trim_end()),
            (false, true) => self.stdout.trim_end().to_string(),
            (true, _) => self.stderr.trim_end().to_string(),
        }
    }
}

/// Narrow interface over the version-control executable, bound to one
/// working copy.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait VcsRunner: Send + Sync {
    /// Whether the executable can be launched at all.
    async fn check_installed(&self) -> bool;

    /// `git remote -v`
    async fn list_remotes(&self) -> CommandOutput;

    /// `git add --all`
    async fn stage_all(&self) -> CommandOutput;

    /// `git commit -am <message>`
    async fn commit(&self, message: &str) -> CommandOutput;

    /// `git tag -l`
    async fn list_tags(&self) -> CommandOutput;

    /// `git push <remote>`
    async fn push(&self, remote: &str) -> CommandOutput;

    /// `git tag <tag>`
    async fn create_tag(&self, tag: &str) -> CommandOutput;

    /// `git push <remote> <tag>`
    async fn push_tag(&self, remote: &str, tag: &str) -> CommandOutput;
}

/// Operator interaction. Implemented by the terminal prompter and by mocks.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
pub trait Prompter {
    /// Free text answer, `default` when the operator just hits enter.
    fn input(&self, prompt: &str, default: &str) -> Result<String>;

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool>;

    /// Index into `choices`. There is no preselected entry.
    fn select(&self, prompt: &str, choices: &[String]) -> Result<usize>;
}
