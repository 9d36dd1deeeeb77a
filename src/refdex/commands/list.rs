use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::IndexStore;

pub fn run<S: IndexStore>(store: &S) -> Result<CmdResult> {
    let indexes = store.list_indexes()?;
    let mut result = CmdResult::default();
    if indexes.is_empty() {
        result.add_message(CmdMessage::info(
            "No indexes yet. Create one with `refdex create <title> --books N --workbooks N`.",
        ));
    }
    Ok(result.with_indexes(indexes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn test_lists_all_indexes() {
        let store = StoreFixture::new()
            .with_index("FOR508", 5)
            .with_index("FOR500", 4)
            .store;
        let result = run(&store).unwrap();
        assert_eq!(result.indexes, vec!["FOR500", "FOR508"]);
        assert!(result.messages.is_empty());
    }

    #[test]
    fn test_empty_store_hints() {
        let result = run(&StoreFixture::new().store).unwrap();
        assert!(result.indexes.is_empty());
        assert_eq!(result.messages.len(), 1);
    }
}
