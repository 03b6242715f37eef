use anyhow::{Context, Result};
use hangman_core::BankStore;
use hangman_types::BankData;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_HANGMAN_FILE: &str = "config/chat-plugins/hangman.json";

/// Word bank kept as a single JSON document, `{room: {phrase: [hints]}}`.
///
/// Saves go to a sibling temp file that is then renamed over the target, so a
/// crash mid-write leaves the previous document intact.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| "hangman.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl BankStore for JsonFileStore {
    fn load(&self) -> Result<BankData> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No hangman file at {}, starting empty", self.path.display());
                return Ok(BankData::new());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read {}", self.path.display()));
            }
        };

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", self.path.display()))
    }

    fn save(&self, data: &BankData) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }

        let json = serde_json::to_string(data).context("Failed to serialize hangman words")?;
        let temp = self.temp_path();
        fs::write(&temp, json).with_context(|| format!("Failed to write {}", temp.display()))?;
        fs::rename(&temp, &self.path)
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;

        debug!("Saved hangman words for {} rooms", data.len());
        Ok(())
    }
}
