use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::Settings;
use crate::error::{ClgError, Result};
use crate::parse_name::{parse_name, DatedName};

/// A dated image found in the source directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub path: PathBuf,
    pub name: DatedName,
}

/// Classification of one source directory listing.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Supported extension and a parsable name, in filename order.
    pub images: Vec<ImageFile>,
    /// Supported extension but the name carries no date.
    pub invalid: Vec<String>,
    /// Anything else, directories excluded.
    pub unsupported: usize,
}

/// Extension of `file_name` including the leading dot, `""` if none.
pub fn extension_of(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(0) | None => "",
        Some(idx) => &file_name[idx..],
    }
}

/// Lists `dir` (not recursively) and classifies every regular file.
pub fn scan_images(dir: &Path, settings: &Settings) -> Result<ScanResult> {
    let entries = fs::read_dir(dir).map_err(|e| ClgError::io(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ClgError::io(dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            debug!(path = %path.display(), "Skipping non-file entry");
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            debug!(path = %path.display(), "Skipping non UTF-8 filename");
            continue;
        };
        files.push((file_name.to_string(), path.clone()));
    }
    files.sort_by(|a, b| a.0.cmp(&b.0));

    let mut result = ScanResult::default();
    for (file_name, path) in files {
        if !settings.is_supported(extension_of(&file_name)) {
            result.unsupported += 1;
            continue;
        }
        match parse_name(&file_name).into_dated() {
            Some(name) => result.images.push(ImageFile {
                file_name,
                path,
                name,
            }),
            None => {
                debug!(file = %file_name, "Image name carries no date");
                result.invalid.push(file_name);
            }
        }
    }

    info!(
        dir = %dir.display(),
        images = result.images.len(),
        invalid = result.invalid.len(),
        unsupported = result.unsupported,
        "Scanned source directory"
    );
    Ok(result)
}
