// clg/src/config.rs

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Tool-wide settings. Every component receives these explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Extensions (with leading dot) accepted as images. Matched case-sensitively.
    pub extensions: Vec<String>,
    pub hosting: HostingSettings,
    pub defaults: PromptDefaults,
}

/// Where the images end up and how releases are cut.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HostingSettings {
    /// Remotes whose URL host equals this are candidates for push.
    pub host: String,
    /// `{date}` and `{filename}` are substituted.
    pub url_template: String,
    pub default_tag: String,
    pub commit_message: String,
}

/// Defaults offered by the path prompts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptDefaults {
    pub source_dir: String,
    pub output_dir: String,
    pub repo: String,
    pub img_dir: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            extensions: [".jpg", ".png", ".jpeg", ".HEIC", ".svg", ".bmp"]
                .into_iter()
                .map(String::from)
                .collect(),
            hosting: HostingSettings::default(),
            defaults: PromptDefaults::default(),
        }
    }
}

impl Default for HostingSettings {
    fn default() -> Self {
        HostingSettings {
            host: "github.com".to_string(),
            url_template:
                "https://cdn.jsdelivr.net/gh/EthanGeekFan/OurMemories-ImgHosting/img/Log-{date}/{filename}"
                    .to_string(),
            default_tag: "v0.1.0".to_string(),
            commit_message: "Auto Update Images".to_string(),
        }
    }
}

impl Default for PromptDefaults {
    fn default() -> Self {
        let repo = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("Documents/AppDev/OurMemories-ImgHosting");
        PromptDefaults {
            source_dir: "./source".to_string(),
            output_dir: "./output".to_string(),
            repo: repo.display().to_string(),
            img_dir: "img/".to_string(),
        }
    }
}

impl Settings {
    pub fn trace_loaded(&self) {
        info!(
            extensions = self.extensions.len(),
            host = %self.hosting.host,
            default_tag = %self.hosting.default_tag,
            "Loaded settings"
        );
        debug!(?self, "Settings loaded (full debug)");
    }

    pub fn is_supported(&self, extension: &str) -> bool {
        self.extensions.iter().any(|e| e == extension)
    }

    /// Fill the hosting URL template for one image.
    pub fn image_url(&self, date: &str, file_name: &str) -> String {
        self.hosting
            .url_template
            .replace("{date}", date)
            .replace("{filename}", file_name)
    }
}

/// Inputs of the `gen` command.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    pub source_dir: PathBuf,
    pub dest_dir: PathBuf,
}

/// Inputs of the `upload` command.
#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub source_dir: PathBuf,
    pub repo: PathBuf,
    /// Relative to `repo`.
    pub img_dir: PathBuf,
}

impl UploadConfig {
    pub fn dest_dir(&self) -> PathBuf {
        self.repo.join(&self.img_dir)
    }
}

/// Expand a leading `~/` (or a lone `~`) to the home directory.
pub fn expand_home(input: &str) -> PathBuf {
    let home = dirs::home_dir();
    match (input, home) {
        ("~", Some(home)) => home,
        (s, Some(home)) if s.starts_with("~/") => home.join(&s[2..]),
        (s, _) => Path::new(s).to_path_buf(),
    }
}

/// Name of the per-date folder / Markdown stem.
pub fn log_name(date: &str) -> String {
    format!("Log-{date}")
}
