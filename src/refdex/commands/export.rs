use crate::commands::{CmdResult, ExportDocument};
use crate::error::Result;
use crate::group::group_entries;
use crate::model::Index;
use crate::pdf::{render_index, PDF_CONTENT_TYPE};
use crate::store::to_pretty_json;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Raw dump of the entries: insertion order, no grouping.
pub fn json(index: &Index) -> Result<CmdResult> {
    let body = to_pretty_json(&index.entries)?;
    tracing::info!(index = %index.title, entries = index.entries.len(), "exported json");
    Ok(CmdResult::default().with_export(ExportDocument {
        filename: format!("{}.json", index.title),
        content_type: JSON_CONTENT_TYPE,
        bytes: body.into_bytes(),
    }))
}

/// Category-grouped tables as a PDF named `filename`.
pub fn pdf(index: &Index, filename: &str) -> Result<CmdResult> {
    let groups = group_entries(&index.entries);
    let bytes = render_index(&groups, &index.title)?;
    Ok(CmdResult::default().with_export(ExportDocument {
        filename: filename.to_string(),
        content_type: PDF_CONTENT_TYPE,
        bytes,
    }))
}
