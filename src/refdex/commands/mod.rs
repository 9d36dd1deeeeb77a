use crate::config::RefdexConfig;
use crate::group::CategoryGroup;
use crate::model::{Index, Settings};

pub mod add;
pub mod config;
pub mod create;
pub mod export;
pub mod list;
pub mod load;
pub mod show;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

/// Title and settings of an index, without its entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSummary {
    pub title: String,
    pub settings: Settings,
    pub entry_count: usize,
}

impl From<&Index> for IndexSummary {
    fn from(index: &Index) -> Self {
        Self {
            title: index.title.clone(),
            settings: index.settings,
            entry_count: index.entries.len(),
        }
    }
}

/// A rendered export, ready to be written or served.
#[derive(Debug, Clone)]
pub struct ExportDocument {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub groups: Vec<CategoryGroup>,
    pub indexes: Vec<String>,
    pub index: Option<IndexSummary>,
    pub export: Option<ExportDocument>,
    pub config: Option<RefdexConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_groups(mut self, groups: Vec<CategoryGroup>) -> Self {
        self.groups = groups;
        self
    }

    pub fn with_indexes(mut self, indexes: Vec<String>) -> Self {
        self.indexes = indexes;
        self
    }

    pub fn with_index(mut self, index: IndexSummary) -> Self {
        self.index = Some(index);
        self
    }

    pub fn with_export(mut self, export: ExportDocument) -> Self {
        self.export = Some(export);
        self
    }

    pub fn with_config(mut self, config: RefdexConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// Raw form input for a new entry, before validation.
#[derive(Debug, Clone, Default)]
pub struct EntryInput {
    pub term: String,
    pub category: Option<String>,
    pub book: u32,
    pub page: Option<String>,
    pub desc: String,
}

impl EntryInput {
    pub fn new(term: impl Into<String>, book: u32) -> Self {
        Self {
            term: term.into(),
            book,
            ..Default::default()
        }
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn page(mut self, page: impl Into<String>) -> Self {
        self.page = Some(page.into());
        self
    }

    pub fn desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = desc.into();
        self
    }
}
