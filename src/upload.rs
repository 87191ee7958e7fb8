//! `upload`: copy dated images into the hosting repository, commit, push and
//! cut a release tag.

use std::fs;
use std::path::PathBuf;

use console::style;
use tracing::{error, info};

use crate::config::{log_name, Settings, UploadConfig};
use crate::contract::{Prompter, VcsRunner};
use crate::error::{ClgError, Result};
use crate::progress;
use crate::remote::{qualifying_remotes, select_remote};
use crate::scan::scan_images;

/// Phrase git prints when a push had nothing to send.
pub const UP_TO_DATE: &str = "Everything up-to-date";

/// How far the git phase of an upload got.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// No remote on the hosting provider; nothing was pushed.
    NoRemote,
    PushFailed { remote: String, message: String },
    /// The push had nothing to send, so no release was cut.
    UpToDate { remote: String },
    Released { remote: String, tag: String },
    ReleaseFailed { remote: String, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReport {
    /// Destination paths of the copied images.
    pub copied: Vec<PathBuf>,
    pub committed: bool,
    pub outcome: UploadOutcome,
}

/// Copies every dated image into `Log-{date}/` under the repository's image
/// directory, then stages, commits, pushes and tags.
///
/// Validation failures, a missing git executable and a failing `git add`
/// are errors. A failing commit is tolerated; push and release failures end
/// up in [`UploadOutcome`].
pub async fn upload_images<R, P>(
    config: &UploadConfig,
    settings: &Settings,
    runner: &R,
    prompter: &P,
) -> Result<UploadReport>
where
    R: VcsRunner + ?Sized,
    P: Prompter + ?Sized,
{
    if !config.repo.exists() {
        return Err(ClgError::RepoMissing(config.repo.clone()));
    }
    if !config.source_dir.exists() {
        return Err(ClgError::SourceMissing(config.source_dir.clone()));
    }

    let copied = copy_images(config, settings)?;

    if !runner.check_installed().await {
        return Err(ClgError::GitMissing);
    }
    if !config.repo.join(".git").exists() {
        return Err(ClgError::NotARepository(config.repo.clone()));
    }

    stage(runner).await?;
    let committed = commit(runner, &settings.hosting.commit_message).await;
    let outcome = push_changes(runner, prompter, settings).await?;

    info!(copied = copied.len(), committed, ?outcome, "Upload finished");
    Ok(UploadReport {
        copied,
        committed,
        outcome,
    })
}

fn copy_images(config: &UploadConfig, settings: &Settings) -> Result<Vec<PathBuf>> {
    let dest_dir = config.dest_dir();
    if !dest_dir.exists() {
        let spinner = progress::spinner(format!("Creating output directory at {}", dest_dir.display()));
        fs::create_dir_all(&dest_dir).map_err(|e| {
            progress::fail(&spinner, format!("Failed creating directory {}", dest_dir.display()));
            ClgError::io(&dest_dir, e)
        })?;
        progress::succeed(&spinner, "Directory Created Successfully");
    }

    let scan = scan_images(&config.source_dir, settings)?;
    let bar = progress::batch_bar(scan.images.len() as u64, "Copying");
    let mut copied = Vec::with_capacity(scan.images.len());
    for image in &scan.images {
        let folder = dest_dir.join(log_name(&image.name.date));
        fs::create_dir_all(&folder).map_err(|e| ClgError::io(&folder, e))?;
        let target = folder.join(&image.file_name);
        fs::copy(&image.path, &target).map_err(|e| ClgError::io(&target, e))?;
        copied.push(target);
        bar.inc(1);
    }
    bar.finish_and_clear();
    info!(count = copied.len(), dest = %dest_dir.display(), "Copied images into repository");
    Ok(copied)
}

async fn stage<R: VcsRunner + ?Sized>(runner: &R) -> Result<()> {
    let spinner = progress::spinner("Staging changes");
    let out = runner.stage_all().await;
    if !out.success() {
        progress::fail(&spinner, "Git add error. Please solve the problem.");
        error!(code = out.code, stderr = %out.stderr.trim(), "git add failed");
        return Err(ClgError::StageFailed(out.combined()));
    }
    progress::succeed(&spinner, "Changes staged");
    Ok(())
}

async fn commit<R: VcsRunner + ?Sized>(runner: &R, message: &str) -> bool {
    let spinner = progress::spinner("Committing changes");
    let out = runner.commit(message).await;
    if out.success() {
        progress::succeed(&spinner, "Changes committed");
        true
    } else {
        // Usually "nothing to commit"; the push may still have work to do.
        progress::fail(&spinner, format!("Commit skipped: {}", out.combined()));
        info!(code = out.code, output = %out.combined(), "git commit failed, continuing");
        false
    }
}

async fn push_changes<R, P>(runner: &R, prompter: &P, settings: &Settings) -> Result<UploadOutcome>
where
    R: VcsRunner + ?Sized,
    P: Prompter + ?Sized,
{
    let listing = runner.list_remotes().await;
    if !listing.success() {
        eprintln!("Git command error: {}", listing.combined());
        error!(stderr = %listing.stderr.trim(), "git remote -v failed");
        return Ok(UploadOutcome::NoRemote);
    }

    let remotes = qualifying_remotes(&listing.stdout, &settings.hosting.host);
    let Some(remote) = select_remote(&remotes, prompter)? else {
        println!("No {} remote added. Skipping push...", settings.hosting.host);
        info!(host = %settings.hosting.host, "No qualifying remote");
        return Ok(UploadOutcome::NoRemote);
    };

    let spinner = progress::spinner(format!("Pushing commits to remote: {}", style(&remote).blue()));
    let out = runner.push(&remote).await;
    let message = out.combined();
    if !out.success() {
        progress::fail(&spinner, format!("Push to {} failed", style(&remote).blue()));
        eprintln!("{message}");
        error!(remote = %remote, code = out.code, output = %message, "git push failed");
        return Ok(UploadOutcome::PushFailed { remote, message });
    }
    progress::succeed(
        &spinner,
        format!("{} {}", style("Successfully pushed to remote").green(), style(&remote).blue()),
    );
    if !message.is_empty() {
        println!("{message}");
    }

    if message.contains(UP_TO_DATE) {
        println!("{} Already the latest version, skipped release!", style("✔").green());
        info!(remote = %remote, "Remote already up to date, skipping release");
        return Ok(UploadOutcome::UpToDate { remote });
    }

    Ok(release(runner, remote, &settings.hosting.default_tag).await)
}

async fn release<R: VcsRunner + ?Sized>(runner: &R, remote: String, default_tag: &str) -> UploadOutcome {
    let tags = runner.list_tags().await;
    if !tags.success() {
        let message = tags.combined();
        error!(output = %message, "git tag -l failed");
        return UploadOutcome::ReleaseFailed { remote, message };
    }

    let Some(tag) = next_tag(&tags.stdout, default_tag) else {
        let message = format!("cannot derive the next version from tags:\n{}", tags.stdout.trim());
        error!(%message, "Release skipped");
        return UploadOutcome::ReleaseFailed { remote, message };
    };

    let created = runner.create_tag(&tag).await;
    if !created.success() {
        let message = created.combined();
        eprintln!("Git command error: {message}");
        error!(tag = %tag, output = %message, "git tag failed");
        return UploadOutcome::ReleaseFailed { remote, message };
    }

    let spinner = progress::spinner(format!(
        "Pushing {} release to remote: {}",
        tag,
        style(&remote).blue()
    ));
    let out = runner.push_tag(&remote, &tag).await;
    if !out.success() {
        let message = out.combined();
        progress::fail(&spinner, "Push failed");
        eprintln!("{message}");
        error!(tag = %tag, remote = %remote, output = %message, "git push of tag failed");
        return UploadOutcome::ReleaseFailed { remote, message };
    }
    progress::succeed(
        &spinner,
        format!(
            "{} {} {} {}",
            style("Successfully pushed").green(),
            style(&tag).blue(),
            style("to remote").green(),
            style(&remote).blue()
        ),
    );
    info!(tag = %tag, remote = %remote, "Release pushed");
    UploadOutcome::Released { remote, tag }
}

/// Next release tag from a `git tag -l` listing.
///
/// Takes the lexically greatest tag, or `default_tag` when there are none,
/// and bumps the number at the start of its last dot-separated component.
/// Anything after that number is dropped. `None` if there is no number.
pub fn next_tag(listing: &str, default_tag: &str) -> Option<String> {
    let latest = listing
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .max()
        .unwrap_or(default_tag);

    let (head, last) = match latest.rsplit_once('.') {
        Some((head, last)) => (Some(head), last),
        None => (None, latest),
    };
    let digits: String = last.chars().take_while(|c| c.is_ascii_digit()).collect();
    let bumped = digits.parse::<u64>().ok()?.checked_add(1)?;

    Some(match head {
        Some(head) => format!("{head}.{bumped}"),
        None => bumped.to_string(),
    })
}
