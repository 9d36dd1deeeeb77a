use crate::error::Result;
use crate::model::Index;
use crate::store::IndexStore;
use crate::validation::validate_title;

/// Reads settings and entries of an existing index into memory.
pub fn run<S: IndexStore>(store: &S, title: &str) -> Result<Index> {
    let title = validate_title(title)?;
    let settings = store.load_settings(&title)?;
    let entries = store.load_entries(&title)?;
    tracing::debug!(title = %title, entries = entries.len(), "loaded index");
    Ok(Index {
        title,
        settings,
        entries,
    })
}
