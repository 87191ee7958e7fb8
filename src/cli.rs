//! Command-line surface: `clg gen`, `clg upload`, `clg --version`.
//!
//! Paths are not flags; both commands ask for them interactively, offering
//! the defaults from the settings file. The workflows themselves live in
//! [`crate::markdown`] and [`crate::upload`].

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use crate::config::{GenerateConfig, Settings, UploadConfig};
use crate::git::GitCli;
use crate::load_config::load_settings;
use crate::markdown::{generate_markdown, GenerateOutcome, GenerateReport};
use crate::prompt::TerminalPrompter;
use crate::upload::{upload_images, UploadOutcome, UploadReport};

/// Class Log Generator: Markdown logs and image hosting for dated class photos.
#[derive(Parser)]
#[clap(name = "clg", version, about, disable_version_flag = true)]
pub struct Cli {
    /// YAML settings file overriding the built-in defaults
    #[clap(long, global = true, env = "CLG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print version
    #[clap(short = 'v', long = "version", action = ArgAction::Version)]
    pub version: Option<bool>,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate Markdown files from source images
    Gen,
    /// Upload images to GitHub Image Hosting repository
    Upload,
}

/// CLI entrypoint shared by `main` and the integration tests.
pub async fn run(cli: Cli) -> Result<()> {
    let settings = load_settings(cli.config.as_deref())?;
    let prompter = TerminalPrompter;

    match cli.command {
        Commands::Gen => {
            let config = GenerateConfig::prompt(&prompter, &settings)?;
            tracing::info!(command = "gen", ?config, "Starting generation");
            match generate_markdown(&config, &settings, &prompter)? {
                GenerateOutcome::Aborted => println!("Abort!"),
                GenerateOutcome::Completed(report) => print_generate_summary(&report),
            }
        }
        Commands::Upload => {
            let config = UploadConfig::prompt(&prompter, &settings)?;
            tracing::info!(command = "upload", ?config, "Starting upload");
            let git = GitCli::new(&config.repo);
            let report = upload_images(&config, &settings, &git, &prompter).await?;
            print_upload_summary(&report, &settings);
        }
    }

    Ok(())
}

fn print_generate_summary(report: &GenerateReport) {
    println!("Generation Completed!");
    println!("{} invalid images", report.invalid);
    println!("Overwrote {} output files:", report.overwritten.len());
    for path in &report.overwritten {
        println!("{}", absolute(path).display());
    }
    if !report.superseded.is_empty() {
        println!(
            "{} images shared a date with a later image and were replaced:",
            report.superseded.len()
        );
        for name in &report.superseded {
            println!("{name}");
        }
    }
    println!("Have a nice day! ");
}

fn print_upload_summary(report: &UploadReport, settings: &Settings) {
    println!("Copied {} images", report.copied.len());
    match &report.outcome {
        UploadOutcome::NoRemote => {
            println!("Nothing pushed: no {} remote", settings.hosting.host)
        }
        UploadOutcome::PushFailed { remote, .. } => println!("Push to {remote} failed"),
        UploadOutcome::UpToDate { remote } => println!("{remote} is already up to date"),
        UploadOutcome::Released { remote, tag } => println!("Released {tag} to {remote}"),
        UploadOutcome::ReleaseFailed { remote, message } => {
            println!("Pushed to {remote}, release failed: {message}")
        }
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
