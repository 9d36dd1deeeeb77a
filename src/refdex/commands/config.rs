use crate::commands::{CmdMessage, CmdResult};
use crate::config::RefdexConfig;
use crate::error::Result;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(config_dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    let mut config = RefdexConfig::load(config_dir)?;
    let mut result = CmdResult::default();

    match action {
        ConfigAction::ShowAll => {}
        ConfigAction::ShowKey(key) => {
            let value = config.get(&key)?;
            result.add_message(CmdMessage::info(format!("{} = {}", key, value)));
        }
        ConfigAction::Set(key, value) => {
            config.set(&key, &value)?;
            config.save(config_dir)?;
            result.add_message(CmdMessage::success(format!(
                "{} set to {}",
                key,
                config.get(&key)?
            )));
        }
    }

    Ok(result.with_config(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_set_persists() {
        let temp = TempDir::new().unwrap();
        run(
            temp.path(),
            ConfigAction::Set("pdf-filename".into(), "FOR508".into()),
        )
        .unwrap();
        let config = RefdexConfig::load(temp.path()).unwrap();
        assert_eq!(config.pdf_filename, "FOR508.pdf");
    }

    #[test]
    fn test_show_key() {
        let temp = TempDir::new().unwrap();
        let result = run(temp.path(), ConfigAction::ShowKey("enforce-book-range".into())).unwrap();
        assert_eq!(result.messages[0].content, "enforce-book-range = true");
    }

    #[test]
    fn test_show_unknown_key_errors() {
        let temp = TempDir::new().unwrap();
        assert!(run(temp.path(), ConfigAction::ShowKey("nope".into())).is_err());
    }
}
