use crate::commands::{CmdMessage, CmdResult, EntryInput};
use crate::error::Result;
use crate::model::{Entry, Index, PageRef};
use crate::store::IndexStore;
use crate::validation::{normalize_category, validate_book, validate_term};

/// Validates `input`, appends it to `index` and persists settings and entries.
///
/// Nothing is written when validation fails. On success `last_book` is set to
/// the entry's book.
pub fn run<S: IndexStore>(
    store: &mut S,
    index: &mut Index,
    input: EntryInput,
    enforce_book_range: bool,
) -> Result<CmdResult> {
    let term = validate_term(&input.term)?;
    let category = normalize_category(input.category.as_deref())?;
    validate_book(input.book, &index.settings, enforce_book_range)?;

    let page = PageRef::new(input.book, input.page.as_deref());
    let entry = Entry::new(term, category, &page, input.desc);

    // Entry first: a failed append must not leave a last_book pointing at nothing.
    store.append_entry(&index.title, &entry)?;
    let mut settings = index.settings;
    settings.last_book = input.book;
    store.save_settings(&index.title, &settings)?;

    index.settings = settings;
    index.entries.push(entry.clone());
    tracing::info!(
        index = %index.title,
        term = %entry.term,
        page = %entry.page,
        total = index.entries.len(),
        "added entry"
    );

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Added \"{}\" ({})",
        entry.term, entry.page
    )));
    if input.book > index.settings.books {
        result.add_message(CmdMessage::warning(format!(
            "Book {} is beyond the {} books of \"{}\"",
            input.book, index.settings.books, index.title
        )));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{load, MessageLevel};
    use crate::model::Settings;
    use crate::store::fs::FileStore;
    use crate::error::RefdexError;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;
    use crate::validation::ValidationError;

    fn setup(books: u32) -> (InMemoryStore, Index) {
        let store = StoreFixture::new().with_index("FOR508", books).store;
        let index = load::run(&store, "FOR508").unwrap();
        (store, index)
    }

    #[test]
    fn test_page_strings() {
        let (mut store, mut index) = setup(5);
        run(
            &mut store,
            &mut index,
            EntryInput::new("RDP", 3)
                .category("Lateral Movement")
                .page("12")
                .desc("Remote login"),
            true,
        )
        .unwrap();
        run(
            &mut store,
            &mut index,
            EntryInput::new("PsExec", 3).category("Lateral Movement").page(""),
            true,
        )
        .unwrap();

        let stored = store.load_entries("FOR508").unwrap();
        assert_eq!(stored[0].page, "3:12");
        assert_eq!(stored[1].page, "3");
        assert_eq!(stored, index.entries);
    }

    #[test]
    fn test_count_and_last_book_follow_appends() {
        let (mut store, mut index) = setup(5);
        let books = [2, 5, 1, 4, 4, 3];
        for (i, book) in books.iter().enumerate() {
            run(
                &mut store,
                &mut index,
                EntryInput::new(format!("term {}", i), *book),
                true,
            )
            .unwrap();
            assert_eq!(store.load_settings("FOR508").unwrap().last_book, *book);
        }
        assert_eq!(store.load_entries("FOR508").unwrap().len(), books.len());
        assert_eq!(index.settings.last_book, 3);
    }

    #[test]
    fn test_category_is_canonicalized() {
        let (mut store, mut index) = setup(5);
        run(
            &mut store,
            &mut index,
            EntryInput::new("Run key", 1).category("registry"),
            true,
        )
        .unwrap();
        assert_eq!(index.entries[0].category, "Registry");
    }

    #[test]
    fn test_empty_term_writes_nothing() {
        let (mut store, mut index) = setup(5);
        let err = run(&mut store, &mut index, EntryInput::new("  ", 4), true).unwrap_err();
        assert!(matches!(
            err,
            RefdexError::Validation(ValidationError::EmptyTerm)
        ));
        assert!(store.load_entries("FOR508").unwrap().is_empty());
        assert_eq!(store.load_settings("FOR508").unwrap().last_book, 1);
    }

    #[test]
    fn test_book_out_of_range() {
        let (mut store, mut index) = setup(5);
        let err = run(&mut store, &mut index, EntryInput::new("x", 6), true).unwrap_err();
        assert!(matches!(
            err,
            RefdexError::Validation(ValidationError::BookOutOfRange { book: 6, books: 5 })
        ));
        assert!(index.entries.is_empty());

        let result = run(&mut store, &mut index, EntryInput::new("x", 6), false).unwrap();
        assert_eq!(index.entries[0].page, "6");
        assert_eq!(result.messages.len(), 2);
        assert_eq!(result.messages[1].level, MessageLevel::Warning);
    }

    #[test]
    fn test_in_range_book_has_no_warning() {
        let (mut store, mut index) = setup(5);
        let result = run(&mut store, &mut index, EntryInput::new("x", 5), true).unwrap();
        assert_eq!(result.messages.len(), 1);
        assert_eq!(result.messages[0].level, MessageLevel::Success);
    }

    #[test]
    fn test_failed_append_keeps_last_book() {
        let temp = tempfile::TempDir::new().unwrap();
        let mut store = FileStore::new(temp.path());
        store.create_index("FOR508", &Settings::new(5, 1)).unwrap();
        let mut index = load::run(&store, "FOR508").unwrap();

        // A directory where data.json should be makes the append fail.
        let data = store.index_dir("FOR508").join("data.json");
        std::fs::remove_file(&data).unwrap();
        std::fs::create_dir(&data).unwrap();

        assert!(run(&mut store, &mut index, EntryInput::new("RDP", 3), true).is_err());
        assert_eq!(store.load_settings("FOR508").unwrap().last_book, 1);
        assert_eq!(index.settings.last_book, 1);
        assert!(index.entries.is_empty());
    }

    #[test]
    fn test_unknown_category_rejected() {
        let (mut store, mut index) = setup(5);
        let err = run(
            &mut store,
            &mut index,
            EntryInput::new("x", 1).category("Gardening"),
            true,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            RefdexError::Validation(ValidationError::UnknownCategory(_))
        ));
    }

    #[test]
    fn test_description_newlines_kept() {
        let (mut store, mut index) = setup(5);
        run(
            &mut store,
            &mut index,
            EntryInput::new("Prefetch", 1).desc("line one\nline two"),
            true,
        )
        .unwrap();
        assert_eq!(
            store.load_entries("FOR508").unwrap()[0].desc,
            "line one\nline two"
        );
    }
}
