use std::path::PathBuf;

use dialoguer::{Confirm, Input, Select};

use crate::config::{expand_home, GenerateConfig, Settings, UploadConfig};
use crate::contract::Prompter;
use crate::error::Result;

/// [`Prompter`] on the controlling terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn input(&self, prompt: &str, default: &str) -> Result<String> {
        let answer: String = Input::new()
            .with_prompt(prompt)
            .default(default.to_string())
            .interact_text()?;
        Ok(answer)
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        Ok(Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()?)
    }

    fn select(&self, prompt: &str, choices: &[String]) -> Result<usize> {
        Ok(Select::new()
            .with_prompt(prompt)
            .items(choices)
            .interact()?)
    }
}

fn ask_path<P: Prompter + ?Sized>(prompter: &P, prompt: &str, default: &str) -> Result<PathBuf> {
    let answer = prompter.input(prompt, default)?;
    let answer = answer.trim();
    Ok(expand_home(if answer.is_empty() { default } else { answer }))
}

impl GenerateConfig {
    /// Asks for the source and output directories.
    pub fn prompt<P: Prompter + ?Sized>(prompter: &P, settings: &Settings) -> Result<Self> {
        let defaults = &settings.defaults;
        Ok(GenerateConfig {
            source_dir: ask_path(prompter, "Images source directory?", &defaults.source_dir)?,
            dest_dir: ask_path(prompter, "Output directory?", &defaults.output_dir)?,
        })
    }
}

impl UploadConfig {
    /// Asks for the source directory, the hosting repository and its image directory.
    pub fn prompt<P: Prompter + ?Sized>(prompter: &P, settings: &Settings) -> Result<Self> {
        let defaults = &settings.defaults;
        let source_dir = ask_path(prompter, "Images source directory?", &defaults.source_dir)?;
        let repo = ask_path(prompter, "Local GitHub image hosting repo?", &defaults.repo)?;
        let img_dir = prompter.input("Image directory in repo?", &defaults.img_dir)?;
        let img_dir = match img_dir.trim() {
            "" => defaults.img_dir.clone(),
            other => other.to_string(),
        };
        Ok(UploadConfig {
            source_dir,
            repo,
            img_dir: PathBuf::from(img_dir),
        })
    }
}
