use crate::api::Session;
use crate::config::RefdexConfig;
use crate::error::{RefdexError, Result};
use crate::store::fs::FileStore;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Storage root: an explicit path wins, otherwise the per-user data dir.
pub fn resolve_root(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(root) = explicit {
        return Ok(root.to_path_buf());
    }
    let proj_dirs = ProjectDirs::from("com", "refdex", "refdex")
        .ok_or_else(|| RefdexError::Config("Could not determine data dir".into()))?;
    Ok(proj_dirs.data_dir().join("indexes"))
}

/// Builds a session over `root` and activates an index.
///
/// `index` names the index to load and must exist. Without it, the index
/// remembered in config is restored if it is still present.
pub fn initialize(root: &Path, index: Option<&str>) -> Result<Session<FileStore>> {
    let config = RefdexConfig::load(root)?;
    let remembered = config.active_index.clone();
    let mut session = Session::new(FileStore::new(root), root.to_path_buf(), config);

    match (index, remembered) {
        (Some(title), _) => {
            session.load_index(title)?;
        }
        (None, Some(title)) => {
            if let Err(e) = session.load_index(&title) {
                tracing::warn!(index = %title, error = %e, "remembered index unavailable");
            }
        }
        (None, None) => {}
    }

    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_root_wins() {
        let temp = TempDir::new().unwrap();
        assert_eq!(resolve_root(Some(temp.path())).unwrap(), temp.path());
    }

    #[test]
    fn test_fresh_root_has_no_active_index() {
        let temp = TempDir::new().unwrap();
        let session = initialize(temp.path(), None).unwrap();
        assert!(session.active().is_err());
    }

    #[test]
    fn test_remembered_index_is_restored() {
        let temp = TempDir::new().unwrap();
        let mut session = initialize(temp.path(), None).unwrap();
        session.create_index("FOR508", 5, 1).unwrap();
        session.remember_active().unwrap();

        let session = initialize(temp.path(), None).unwrap();
        assert_eq!(session.active().unwrap().title, "FOR508");
    }

    #[test]
    fn test_missing_remembered_index_is_ignored() {
        let temp = TempDir::new().unwrap();
        let config = RefdexConfig {
            active_index: Some("gone".into()),
            ..Default::default()
        };
        config.save(temp.path()).unwrap();

        let session = initialize(temp.path(), None).unwrap();
        assert!(session.active().is_err());
    }

    #[test]
    fn test_corrupt_config_does_not_block_startup() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("config.json"), "]]").unwrap();
        let mut session = initialize(temp.path(), None).unwrap();
        session.create_index("FOR508", 5, 1).unwrap();
        session.remember_active().unwrap();
        assert_eq!(
            RefdexConfig::load(temp.path()).unwrap().active_index.as_deref(),
            Some("FOR508")
        );
    }

    #[test]
    fn test_missing_explicit_index_errors() {
        let temp = TempDir::new().unwrap();
        assert!(matches!(
            initialize(temp.path(), Some("gone")),
            Err(RefdexError::NotFound(_))
        ));
    }
}
