use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Settings;
use crate::store::IndexStore;
use crate::validation::{validate_counts, validate_title};

/// Creates a new empty index. Returns the validated title alongside the result.
pub fn run<S: IndexStore>(
    store: &mut S,
    title: &str,
    books: u32,
    workbooks: u32,
) -> Result<(String, CmdResult)> {
    let title = validate_title(title)?;
    validate_counts(books, workbooks)?;

    store.create_index(&title, &Settings::new(books, workbooks))?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Created index \"{}\" ({} books, {} workbooks)",
        title, books, workbooks
    )));
    Ok((title, result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RefdexError;
    use crate::store::memory::InMemoryStore;
    use crate::validation::ValidationError;

    #[test]
    fn test_create_initial_state() {
        let mut store = InMemoryStore::new();
        let (title, _) = run(&mut store, " FOR508 ", 5, 2).unwrap();
        assert_eq!(title, "FOR508");

        let settings = store.load_settings("FOR508").unwrap();
        assert_eq!(settings, Settings { books: 5, workbooks: 2, last_book: 1 });
        assert!(store.load_entries("FOR508").unwrap().is_empty());
    }

    #[test]
    fn test_create_rejects_zero_books() {
        let mut store = InMemoryStore::new();
        let err = run(&mut store, "FOR508", 0, 1).unwrap_err();
        assert!(matches!(
            err,
            RefdexError::Validation(ValidationError::ZeroBooks)
        ));
        assert!(!store.index_exists("FOR508"));
    }

    #[test]
    fn test_create_twice_conflicts() {
        let mut store = InMemoryStore::new();
        run(&mut store, "FOR508", 5, 1).unwrap();
        let err = run(&mut store, "FOR508", 5, 1).unwrap_err();
        assert!(matches!(err, RefdexError::Conflict(_)));
    }

    #[test]
    fn test_create_rejects_bad_title() {
        let mut store = InMemoryStore::new();
        assert!(matches!(
            run(&mut store, "a/b", 1, 1),
            Err(RefdexError::Validation(ValidationError::InvalidTitle(_)))
        ));
    }
}
