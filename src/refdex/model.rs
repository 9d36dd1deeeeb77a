use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Per-index settings, persisted as `settings.json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub books: u32,
    pub workbooks: u32,
    pub last_book: u32,
}

impl Settings {
    pub fn new(books: u32, workbooks: u32) -> Self {
        Self {
            books,
            workbooks,
            last_book: 1,
        }
    }
}

/// One row of the index. Field names are the on-disk and export format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub term: String,
    pub category: String,
    pub page: String,
    pub desc: String,
}

impl Entry {
    pub fn new(
        term: impl Into<String>,
        category: impl Into<String>,
        page: &PageRef,
        desc: impl Into<String>,
    ) -> Self {
        Self {
            term: term.into(),
            category: category.into(),
            page: page.to_string(),
            desc: desc.into(),
        }
    }
}

/// An index held in memory: its title plus everything stored in its folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Index {
    pub title: String,
    pub settings: Settings,
    pub entries: Vec<Entry>,
}

/// A book number plus optional in-book page, rendered as `"3:12"` or `"3"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRef {
    pub book: u32,
    pub page: Option<String>,
}

impl PageRef {
    pub fn new(book: u32, page: Option<&str>) -> Self {
        let page = page
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string);
        Self { book, page }
    }
}

impl fmt::Display for PageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.page {
            Some(page) => write!(f, "{}:{}", self.book, page),
            None => write!(f, "{}", self.book),
        }
    }
}

/// The fixed category vocabulary offered when submitting entries.
///
/// Entries store the display label (`Category::label`), and the empty string
/// stands for "uncategorized".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    IncidentResponse,
    WindowsProcess,
    Artifacts,
    Tools,
    AttackTechniques,
    LogonAccounts,
    FileSystem,
    CredentialTheft,
    Registry,
    PersistenceMechanisms,
    CredentialAccess,
    EventLogs,
    MemoryAnalysis,
    Commands,
    LateralMovement,
}

impl Category {
    /// All categories in the order they are offered to the user.
    pub const ALL: [Category; 15] = [
        Category::IncidentResponse,
        Category::WindowsProcess,
        Category::Artifacts,
        Category::Tools,
        Category::AttackTechniques,
        Category::LogonAccounts,
        Category::FileSystem,
        Category::CredentialTheft,
        Category::Registry,
        Category::PersistenceMechanisms,
        Category::CredentialAccess,
        Category::EventLogs,
        Category::MemoryAnalysis,
        Category::Commands,
        Category::LateralMovement,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::IncidentResponse => "Incident Response",
            Category::WindowsProcess => "Windows Process",
            Category::Artifacts => "Artifacts",
            Category::Tools => "Tools",
            Category::AttackTechniques => "Attack Techniques",
            Category::LogonAccounts => "Logon/Accounts",
            Category::FileSystem => "File System",
            Category::CredentialTheft => "Credential Theft",
            Category::Registry => "Registry",
            Category::PersistenceMechanisms => "Persistence Mechanisms",
            Category::CredentialAccess => "Credential Access",
            Category::EventLogs => "Event Logs",
            Category::MemoryAnalysis => "Memory Analysis",
            Category::Commands => "Commands",
            Category::LateralMovement => "Lateral Movement",
        }
    }

    /// Shell-friendly form of the label, e.g. `logon-accounts`.
    pub fn slug(&self) -> String {
        slugify(self.label())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    /// Accepts the display label or its slug, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = slugify(s);
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.slug() == wanted)
            .ok_or_else(|| s.to_string())
    }
}

fn slugify(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.trim().chars() {
        if c.is_alphanumeric() {
            out.extend(c.to_lowercase());
        } else if !out.ends_with('-') && !out.is_empty() {
            out.push('-');
        }
    }
    out.trim_end_matches('-').to_string()
}
