use crate::commands::{CmdResult, IndexSummary};
use crate::group::group_entries;
use crate::model::Index;

/// Preview of the index: its summary plus entries grouped by category.
pub fn run(index: &Index) -> CmdResult {
    CmdResult::default()
        .with_index(IndexSummary::from(index))
        .with_groups(group_entries(&index.entries))
}
