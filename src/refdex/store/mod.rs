//! # Storage Layer
//!
//! This module defines the storage abstraction for refdex. The [`IndexStore`] trait
//! lets the session and commands work against different backends.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production storage, one folder per index under a root directory
//! - [`memory::InMemoryStore`]: In-memory storage for testing
//!
//! ## Storage Format
//!
//! For `FileStore`:
//! ```text
//! <root>/
//! ├── config.json            # CLI configuration (see config.rs)
//! └── <title>/
//!     ├── settings.json      # {"books": 5, "workbooks": 1, "last_book": 3}
//!     └── data.json          # [{"term", "category", "page", "desc"}, ...]
//! ```
//!
//! Both files are pretty-printed with 4-space indentation. Entries are stored in
//! insertion order; sorting only ever happens on the way out (see `group.rs`).

use crate::error::{RefdexError, Result};
use crate::model::{Entry, Settings};
use serde::Serialize;
use std::path::Path;

pub mod fs;
pub mod memory;

/// Abstract interface for index storage.
///
/// Titles passed in are expected to be validated already (see `validation.rs`).
pub trait IndexStore {
    /// Create a new, empty index. Fails with `Conflict` if the title is taken.
    fn create_index(&mut self, title: &str, settings: &Settings) -> Result<()>;

    /// Whether an index with this title exists
    fn index_exists(&self, title: &str) -> bool;

    /// Read the settings of an index. Fails with `NotFound` if it has none.
    fn load_settings(&self, title: &str) -> Result<Settings>;

    /// Read all entries of an index, in insertion order
    fn load_entries(&self, title: &str) -> Result<Vec<Entry>>;

    /// Overwrite the settings of an index
    fn save_settings(&mut self, title: &str, settings: &Settings) -> Result<()>;

    /// Overwrite the full entry list of an index
    fn save_entries(&mut self, title: &str, entries: &[Entry]) -> Result<()>;

    /// Append a single entry to the end of an index.
    ///
    /// The default rewrites the whole list; backends with an append-friendly
    /// format should override it.
    fn append_entry(&mut self, title: &str, entry: &Entry) -> Result<()> {
        let mut entries = self.load_entries(title)?;
        entries.push(entry.clone());
        self.save_entries(title, &entries)
    }

    /// Titles of all indexes in the store, sorted by name
    fn list_indexes(&self) -> Result<Vec<String>>;
}

/// Pretty JSON with 4-space indentation, the format of every file refdex writes.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    // serde_json only ever emits UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Writes `content` next to `path` first and renames it into place, so a
/// crash leaves either the previous file or the new one.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| RefdexError::Store(format!("Bad file path: {}", path.display())))?;
    let tmp = path.with_file_name(format!(".{}.tmp", file_name));
    std::fs::write(&tmp, content).map_err(RefdexError::Io)?;
    std::fs::rename(&tmp, path).map_err(RefdexError::Io)?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "wrote file");
    Ok(())
}
