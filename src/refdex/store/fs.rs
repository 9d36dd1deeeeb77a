use super::{to_pretty_json, write_atomic, IndexStore};
use crate::error::{RefdexError, Result};
use crate::model::{Entry, Settings};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const SETTINGS_FILE: &str = "settings.json";
const DATA_FILE: &str = "data.json";

/// File-based storage: each index is a folder under `root`.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn index_dir(&self, title: &str) -> PathBuf {
        self.root.join(title)
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(RefdexError::Io)?;
        }
        Ok(())
    }
}

fn write_initial_files(dir: &Path, settings: &Settings) -> Result<()> {
    write_atomic(&dir.join(SETTINGS_FILE), &to_pretty_json(settings)?)?;
    write_atomic(&dir.join(DATA_FILE), &to_pretty_json::<[Entry]>(&[])?)
}

impl IndexStore for FileStore {
    fn create_index(&mut self, title: &str, settings: &Settings) -> Result<()> {
        self.ensure_dir(&self.root)?;
        let dir = self.index_dir(title);

        // create_dir (not create_dir_all) so an existing folder is a conflict
        match fs::create_dir(&dir) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(RefdexError::Conflict(title.to_string()));
            }
            Err(e) => return Err(RefdexError::Io(e)),
        }

        if let Err(e) = write_initial_files(&dir, settings) {
            // A half-made folder would make the title neither loadable nor creatable.
            if let Err(cleanup) = fs::remove_dir_all(&dir) {
                tracing::warn!(dir = %dir.display(), error = %cleanup, "could not remove partial index");
            }
            return Err(e);
        }
        tracing::info!(title, dir = %dir.display(), "created index");
        Ok(())
    }

    fn index_exists(&self, title: &str) -> bool {
        self.index_dir(title).join(SETTINGS_FILE).is_file()
    }

    fn load_settings(&self, title: &str) -> Result<Settings> {
        let path = self.index_dir(title).join(SETTINGS_FILE);
        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(RefdexError::NotFound(title.to_string()));
            }
            Err(e) => return Err(RefdexError::Io(e)),
        };
        let settings = serde_json::from_str(&content).map_err(RefdexError::Serialization)?;
        Ok(settings)
    }

    fn load_entries(&self, title: &str) -> Result<Vec<Entry>> {
        let path = self.index_dir(title).join(DATA_FILE);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&path).map_err(RefdexError::Io)?;
        let entries = serde_json::from_str(&content).map_err(RefdexError::Serialization)?;
        Ok(entries)
    }

    fn save_settings(&mut self, title: &str, settings: &Settings) -> Result<()> {
        let dir = self.index_dir(title);
        self.ensure_dir(&dir)?;
        write_atomic(&dir.join(SETTINGS_FILE), &to_pretty_json(settings)?)
    }

    fn save_entries(&mut self, title: &str, entries: &[Entry]) -> Result<()> {
        let dir = self.index_dir(title);
        self.ensure_dir(&dir)?;
        write_atomic(&dir.join(DATA_FILE), &to_pretty_json(entries)?)
    }

    fn list_indexes(&self) -> Result<Vec<String>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut titles = Vec::new();
        for dir_entry in fs::read_dir(&self.root).map_err(RefdexError::Io)? {
            let dir_entry = dir_entry.map_err(RefdexError::Io)?;
            if !dir_entry.file_type().map_err(RefdexError::Io)?.is_dir() {
                continue;
            }
            let Some(name) = dir_entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if !name.starts_with('.') && self.index_exists(&name) {
                titles.push(name);
            }
        }
        titles.sort();
        Ok(titles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PageRef;
    use tempfile::TempDir;

    fn setup() -> (TempDir, FileStore) {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path().join("indexes"));
        (temp, store)
    }

    #[test]
    fn test_create_writes_both_files() {
        let (_temp, mut store) = setup();
        store.create_index("FOR508", &Settings::new(5, 1)).unwrap();

        let dir = store.index_dir("FOR508");
        let settings = fs::read_to_string(dir.join("settings.json")).unwrap();
        assert!(settings.contains("    \"books\": 5"));
        assert_eq!(fs::read_to_string(dir.join("data.json")).unwrap(), "[]");
    }

    #[test]
    fn test_create_existing_is_conflict() {
        let (_temp, mut store) = setup();
        store.create_index("FOR508", &Settings::new(5, 1)).unwrap();
        let err = store.create_index("FOR508", &Settings::new(2, 2)).unwrap_err();
        assert!(matches!(err, RefdexError::Conflict(t) if t == "FOR508"));

        // Original settings untouched
        assert_eq!(store.load_settings("FOR508").unwrap().books, 5);
    }

    #[test]
    fn test_create_over_plain_folder_is_conflict() {
        let (_temp, mut store) = setup();
        fs::create_dir_all(store.index_dir("stray")).unwrap();
        assert!(matches!(
            store.create_index("stray", &Settings::new(1, 1)),
            Err(RefdexError::Conflict(_))
        ));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_failed_create_removes_partial_folder() {
        // Size the root so the index folder fits PATH_MAX but its files do not.
        let temp = TempDir::new().unwrap();
        let title = "FOR508";
        let target = 4085 - 1 - title.len();
        let mut root = temp.path().to_path_buf();
        while root.as_os_str().len() < target {
            let left = target - root.as_os_str().len() - 1;
            root.push("a".repeat(left.min(200).max(1)));
        }
        let mut store = FileStore::new(&root);

        assert!(store.create_index(title, &Settings::new(5, 1)).is_err());
        assert!(!store.index_dir(title).exists());
    }

    #[test]
    fn test_load_missing_settings_is_not_found() {
        let (_temp, store) = setup();
        assert!(matches!(
            store.load_settings("nope"),
            Err(RefdexError::NotFound(t)) if t == "nope"
        ));
    }

    #[test]
    fn test_missing_data_file_loads_empty() {
        let (_temp, mut store) = setup();
        store.create_index("FOR500", &Settings::new(4, 1)).unwrap();
        fs::remove_file(store.index_dir("FOR500").join("data.json")).unwrap();
        assert!(store.load_entries("FOR500").unwrap().is_empty());
    }

    #[test]
    fn test_append_and_reload_preserves_order() {
        let (_temp, mut store) = setup();
        store.create_index("FOR508", &Settings::new(5, 1)).unwrap();

        let first = Entry::new("RDP", "Lateral Movement", &PageRef::new(3, Some("12")), "");
        let second = Entry::new("Amcache", "Artifacts", &PageRef::new(1, None), "");
        store.append_entry("FOR508", &first).unwrap();
        store.append_entry("FOR508", &second).unwrap();

        let entries = store.load_entries("FOR508").unwrap();
        assert_eq!(entries, vec![first, second]);
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_file() {
        let (_temp, mut store) = setup();
        store.create_index("FOR508", &Settings::new(5, 1)).unwrap();
        store.save_settings("FOR508", &Settings::new(6, 1)).unwrap();

        let names: Vec<String> = fs::read_dir(store.index_dir("FOR508"))
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert!(names.iter().all(|n| !n.ends_with(".tmp")), "{:?}", names);
    }

    #[test]
    fn test_list_only_index_folders() {
        let (_temp, mut store) = setup();
        store.create_index("b-index", &Settings::new(1, 1)).unwrap();
        store.create_index("a-index", &Settings::new(1, 1)).unwrap();
        fs::create_dir_all(store.index_dir("not-an-index")).unwrap();
        fs::write(store.root().join("config.json"), "{}").unwrap();

        assert_eq!(store.list_indexes().unwrap(), vec!["a-index", "b-index"]);
    }

    #[test]
    fn test_list_missing_root_is_empty() {
        let (_temp, store) = setup();
        assert!(store.list_indexes().unwrap().is_empty());
    }
}
