use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;

use crate::contract::{CommandOutput, VcsRunner};

/// [`VcsRunner`] backed by the `git` executable, run inside `repo`.
pub struct GitCli {
    repo: PathBuf,
    program: String,
}

impl GitCli {
    pub fn new(repo: impl Into<PathBuf>) -> Self {
        Self {
            repo: repo.into(),
            program: "git".to_string(),
        }
    }

    /// Use a different executable name or path.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn repo(&self) -> &Path {
        &self.repo
    }

    async fn run(&self, args: &[&str]) -> CommandOutput {
        tracing::debug!(program = %self.program, ?args, repo = %self.repo.display(), "Running git");
        let output = Command::new(&self.program)
            .args(args)
            .current_dir(&self.repo)
            .output()
            .await;

        match output {
            Ok(out) => {
                let result = CommandOutput {
                    code: out.status.code().unwrap_or(-1),
                    stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
                };
                if result.success() {
                    tracing::debug!(?args, "git exited successfully");
                } else {
                    tracing::debug!(?args, code = result.code, stderr = %result.stderr.trim(), "git exited with failure");
                }
                result
            }
            Err(e) => {
                tracing::error!(error = ?e, ?args, "Failed to launch git");
                CommandOutput::failed(-1, format!("failed to launch {}: {e}", self.program))
            }
        }
    }
}

#[async_trait]
impl VcsRunner for GitCli {
    async fn check_installed(&self) -> bool {
        // Probe without a working directory so a missing repo does not look
        // like a missing executable.
        match Command::new(&self.program).arg("--version").output().await {
            Ok(out) => out.status.success(),
            Err(e) => {
                tracing::error!(error = ?e, program = %self.program, "git executable not found");
                false
            }
        }
    }

    async fn list_remotes(&self) -> CommandOutput {
        self.run(&["remote", "-v"]).await
    }

    async fn stage_all(&self) -> CommandOutput {
        self.run(&["add", "--all"]).await
    }

    async fn commit(&self, message: &str) -> CommandOutput {
        self.run(&["commit", "-am", message]).await
    }

    async fn list_tags(&self) -> CommandOutput {
        self.run(&["tag", "-l"]).await
    }

    async fn push(&self, remote: &str) -> CommandOutput {
        self.run(&["push", remote]).await
    }

    async fn create_tag(&self, tag: &str) -> CommandOutput {
        self.run(&["tag", tag]).await
    }

    async fn push_tag(&self, remote: &str, tag: &str) -> CommandOutput {
        self.run(&["push", remote, tag]).await
    }
}
