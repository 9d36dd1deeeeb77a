use crate::error::{RefdexError, Result};
use crate::store::{to_pretty_json, write_atomic};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
pub const DEFAULT_PDF_FILENAME: &str = "SANS_Index.pdf";

/// Configuration for refdex, stored as `config.json` in the storage root
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RefdexConfig {
    /// Index used when no `--index` is given; set by `refdex load`/`create`
    #[serde(default)]
    pub active_index: Option<String>,

    /// Default output name for PDF exports
    #[serde(default = "default_pdf_filename")]
    pub pdf_filename: String,

    /// Reject entries whose book is above the index's book count
    #[serde(default = "default_enforce_book_range")]
    pub enforce_book_range: bool,
}

fn default_pdf_filename() -> String {
    DEFAULT_PDF_FILENAME.to_string()
}

fn default_enforce_book_range() -> bool {
    true
}

impl Default for RefdexConfig {
    fn default() -> Self {
        Self {
            active_index: None,
            pdf_filename: default_pdf_filename(),
            enforce_book_range: default_enforce_book_range(),
        }
    }
}

/// Keys settable through `refdex config <key> <value>`
pub const CONFIG_KEYS: [&str; 2] = ["pdf-filename", "enforce-book-range"];

impl RefdexConfig {
    /// Load config from the given directory, or return defaults if not found.
    ///
    /// A file that does not parse is reported and replaced by defaults, so
    /// `refdex config` can still run and overwrite it.
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(RefdexError::Io)?;
        match serde_json::from_str(&content) {
            Ok(config) => Ok(config),
            Err(e) => {
                tracing::warn!(
                    path = %config_path.display(),
                    error = %e,
                    "unreadable config, using defaults"
                );
                Ok(Self::default())
            }
        }
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(RefdexError::Io)?;
        }

        let content = to_pretty_json(self)?;
        write_atomic(&config_dir.join(CONFIG_FILENAME), &content)
    }

    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "pdf-filename" => Ok(self.pdf_filename.clone()),
            "enforce-book-range" => Ok(self.enforce_book_range.to_string()),
            other => Err(RefdexError::Config(format!("Unknown config key: {}", other))),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "pdf-filename" => {
                let value = value.trim();
                if value.is_empty() {
                    return Err(RefdexError::Config("pdf-filename cannot be empty".into()));
                }
                self.pdf_filename = if value.to_lowercase().ends_with(".pdf") {
                    value.to_string()
                } else {
                    format!("{}.pdf", value)
                };
            }
            "enforce-book-range" => {
                self.enforce_book_range = match value.trim().to_lowercase().as_str() {
                    "true" | "yes" | "on" | "1" => true,
                    "false" | "no" | "off" | "0" => false,
                    other => {
                        return Err(RefdexError::Config(format!(
                            "Expected true/false for enforce-book-range, got {}",
                            other
                        )))
                    }
                };
            }
            other => {
                return Err(RefdexError::Config(format!("Unknown config key: {}", other)));
            }
        }
        Ok(())
    }
}
