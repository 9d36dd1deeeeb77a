//! # Session API
//!
//! [`Session`] is the single entry point for all refdex operations, whatever
//! the UI. It is a **thin facade** over the command layer that also carries the
//! one piece of state an index workflow needs: which index is active.
//!
//! ## Explicit Active Index
//!
//! The active index lives inside the session value, not in globals. Two
//! sessions never see each other's state; a server would keep one session per
//! client, the CLI builds a fresh one per invocation and restores the active
//! index from its config.
//!
//! ## Generic Over IndexStore
//!
//! `Session<S: IndexStore>` works with any backend:
//! - Production: `Session<FileStore>`
//! - Testing: `Session<InMemoryStore>`
//!
//! ## What the Session Does NOT Do
//!
//! - Business logic (that lives in `commands/*.rs`)
//! - Printing, exit codes, or writing export files (the caller decides)

use crate::commands::{self, CmdResult, EntryInput, IndexSummary};
use crate::config::RefdexConfig;
use crate::error::{RefdexError, Result};
use crate::model::Index;
use crate::store::IndexStore;
use std::path::PathBuf;

pub struct Session<S: IndexStore> {
    store: S,
    config_dir: PathBuf,
    config: RefdexConfig,
    active: Option<Index>,
}

impl<S: IndexStore> Session<S> {
    pub fn new(store: S, config_dir: PathBuf, config: RefdexConfig) -> Self {
        Self {
            store,
            config_dir,
            config,
            active: None,
        }
    }

    /// Creates an index and makes it the active one.
    pub fn create_index(&mut self, title: &str, books: u32, workbooks: u32) -> Result<CmdResult> {
        let (title, mut result) = commands::create::run(&mut self.store, title, books, workbooks)?;
        let loaded = self.load_index(&title)?;
        result.index = loaded.index;
        Ok(result)
    }

    /// Reads an index from the store and makes it the active one.
    pub fn load_index(&mut self, title: &str) -> Result<CmdResult> {
        let index = commands::load::run(&self.store, title)?;
        let result = CmdResult::default().with_index(IndexSummary::from(&index));
        self.active = Some(index);
        Ok(result)
    }

    pub fn active(&self) -> Result<&Index> {
        self.active.as_ref().ok_or(RefdexError::NoActiveIndex)
    }

    pub fn add_entry(&mut self, input: EntryInput) -> Result<CmdResult> {
        let index = self.active.as_mut().ok_or(RefdexError::NoActiveIndex)?;
        commands::add::run(
            &mut self.store,
            index,
            input,
            self.config.enforce_book_range,
        )
    }

    pub fn list_indexes(&self) -> Result<CmdResult> {
        commands::list::run(&self.store)
    }

    pub fn show(&self) -> Result<CmdResult> {
        Ok(commands::show::run(self.active()?))
    }

    pub fn export_json(&self) -> Result<CmdResult> {
        commands::export::json(self.active()?)
    }

    pub fn export_pdf(&self) -> Result<CmdResult> {
        commands::export::pdf(self.active()?, &self.config.pdf_filename)
    }

    pub fn config(&mut self, action: ConfigAction) -> Result<CmdResult> {
        let result = commands::config::run(&self.config_dir, action)?;
        if let Some(config) = &result.config {
            self.config = config.clone();
        }
        Ok(result)
    }

    /// Stores the active index title in config so later sessions restore it.
    pub fn remember_active(&mut self) -> Result<()> {
        let title = self.active()?.title.clone();
        self.config.active_index = Some(title);
        self.config.save(&self.config_dir)
    }
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::{CmdMessage, ExportDocument, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;
    use tempfile::TempDir;

    fn session() -> (TempDir, Session<InMemoryStore>) {
        let temp = TempDir::new().unwrap();
        let session = Session::new(
            InMemoryStore::new(),
            temp.path().to_path_buf(),
            RefdexConfig::default(),
        );
        (temp, session)
    }

    #[test]
    fn test_operations_need_active_index() {
        let (_temp, mut session) = session();
        assert!(matches!(session.show(), Err(RefdexError::NoActiveIndex)));
        assert!(matches!(
            session.add_entry(EntryInput::new("RDP", 1)),
            Err(RefdexError::NoActiveIndex)
        ));
        assert!(matches!(session.export_json(), Err(RefdexError::NoActiveIndex)));
        assert!(matches!(session.export_pdf(), Err(RefdexError::NoActiveIndex)));
    }

    #[test]
    fn test_create_activates_index() {
        let (_temp, mut session) = session();
        let result = session.create_index("FOR508", 5, 1).unwrap();
        assert_eq!(result.index.unwrap().title, "FOR508");
        assert_eq!(session.active().unwrap().title, "FOR508");
    }

    #[test]
    fn test_load_switches_active_index() {
        let (_temp, mut session) = session();
        session.create_index("FOR508", 5, 1).unwrap();
        session.add_entry(EntryInput::new("RDP", 2)).unwrap();
        session.create_index("FOR500", 4, 1).unwrap();
        assert!(session.active().unwrap().entries.is_empty());

        session.load_index("FOR508").unwrap();
        assert_eq!(session.active().unwrap().entries.len(), 1);
        assert_eq!(session.active().unwrap().settings.last_book, 2);
    }

    #[test]
    fn test_sessions_are_isolated() {
        let (_a, mut first) = session();
        let (_b, second) = session();
        first.create_index("FOR508", 5, 1).unwrap();
        assert!(second.active().is_err());
    }

    #[test]
    fn test_failed_load_keeps_previous_index() {
        let (_temp, mut session) = session();
        session.create_index("FOR508", 5, 1).unwrap();
        assert!(matches!(
            session.load_index("missing"),
            Err(RefdexError::NotFound(_))
        ));
        assert_eq!(session.active().unwrap().title, "FOR508");
    }

    #[test]
    fn test_config_change_applies_to_session() {
        let (_temp, mut session) = session();
        session.create_index("FOR508", 2, 1).unwrap();
        assert!(session.add_entry(EntryInput::new("x", 9)).is_err());

        session
            .config(ConfigAction::Set("enforce-book-range".into(), "false".into()))
            .unwrap();
        session.add_entry(EntryInput::new("x", 9)).unwrap();

        session
            .config(ConfigAction::Set("pdf-filename".into(), "out".into()))
            .unwrap();
        assert_eq!(session.export_pdf().unwrap().export.unwrap().filename, "out.pdf");
    }

    #[test]
    fn test_remember_active_persists_title() {
        let (temp, mut session) = session();
        assert!(session.remember_active().is_err());
        session.create_index("FOR508", 5, 1).unwrap();
        session.remember_active().unwrap();
        let config = RefdexConfig::load(temp.path()).unwrap();
        assert_eq!(config.active_index.as_deref(), Some("FOR508"));
    }
}
