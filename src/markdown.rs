//! `gen`: one Markdown log per date found in the source directory.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::config::{GenerateConfig, Settings};
use crate::contract::Prompter;
use crate::error::{ClgError, Result};
use crate::progress;
use crate::scan::scan_images;
use crate::template::render_log;

/// What a completed generation run did.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct GenerateReport {
    /// Valid images that were rendered.
    pub candidates: usize,
    /// Output files, one per distinct date, in write order.
    pub written: Vec<PathBuf>,
    /// Output files that already existed before this run.
    pub overwritten: Vec<PathBuf>,
    /// Images whose log was replaced later in the same run by another image
    /// with the same date.
    pub superseded: Vec<String>,
    /// Supported images whose name carries no date.
    pub invalid: usize,
}

#[derive(Debug, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// The operator declined; nothing was written.
    Aborted,
    Completed(GenerateReport),
}

/// Renders `Log-{date}.md` for every dated image in the source directory.
///
/// The operator confirms the candidate count before anything is touched.
/// Existing logs are overwritten and reported; when several images share a
/// date the last one (in filename order) wins.
pub fn generate_markdown<P: Prompter + ?Sized>(
    config: &GenerateConfig,
    settings: &Settings,
    prompter: &P,
) -> Result<GenerateOutcome> {
    if !config.source_dir.exists() {
        return Err(ClgError::SourceMissing(config.source_dir.clone()));
    }

    let scan = scan_images(&config.source_dir, settings)?;
    let total = scan.images.len();

    let proceed = prompter.confirm(
        &format!("{total} images to process, are you sure to continue?"),
        true,
    )?;
    if !proceed {
        info!(candidates = total, "Generation declined by operator");
        return Ok(GenerateOutcome::Aborted);
    }

    if !config.dest_dir.exists() {
        let spinner = progress::spinner(format!(
            "Creating output directory at {}",
            config.dest_dir.display()
        ));
        fs::create_dir_all(&config.dest_dir).map_err(|e| {
            progress::fail(&spinner, format!("Failed creating directory {}", config.dest_dir.display()));
            ClgError::io(&config.dest_dir, e)
        })?;
        progress::succeed(&spinner, "Directory Created Successfully");
    }

    let mut report = GenerateReport {
        candidates: total,
        invalid: scan.invalid.len(),
        ..GenerateReport::default()
    };
    // date -> image that currently owns the log
    let mut owners: HashMap<String, String> = HashMap::new();

    let bar = progress::batch_bar(total as u64, "Generating");
    for image in &scan.images {
        let date = &image.name.date;
        let url = settings.image_url(date, &image.file_name);
        let doc = render_log(image.name.author.as_deref(), date, &url);
        let save_path = config.dest_dir.join(&doc.file_name);

        match owners.insert(date.clone(), image.file_name.clone()) {
            Some(previous) => {
                warn!(date = %date, previous = %previous, file = %image.file_name, "Same date rendered twice in one run, last one wins");
                report.superseded.push(previous);
            }
            None => {
                if save_path.exists() {
                    debug!(path = %save_path.display(), "Overwriting existing log");
                    report.overwritten.push(save_path.clone());
                }
                report.written.push(save_path.clone());
            }
        }

        fs::write(&save_path, doc.body.as_bytes()).map_err(|e| ClgError::io(&save_path, e))?;
        bar.inc(1);
    }
    bar.finish_and_clear();

    info!(
        written = report.written.len(),
        overwritten = report.overwritten.len(),
        superseded = report.superseded.len(),
        invalid = report.invalid,
        "Generation completed"
    );
    Ok(GenerateOutcome::Completed(report))
}
