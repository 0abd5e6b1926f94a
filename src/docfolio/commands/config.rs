use crate::commands::{CmdMessage, CmdResult};
use crate::config::DocfolioConfig;
use crate::error::Result;
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

/// Show or change configuration. `dir` is where `config.json` lives; when it
/// is `None` changes only apply to the in-memory value.
pub fn run(config: &mut DocfolioConfig, dir: Option<&Path>, action: ConfigAction) -> Result<CmdResult> {
    match action {
        ConfigAction::ShowAll => Ok(CmdResult::default().with_config(config.clone())),
        ConfigAction::ShowKey(key) => {
            let mut result = CmdResult::default();
            match config.get(&key) {
                Some(val) => result.add_message(CmdMessage::info(val)),
                None => result.add_message(CmdMessage::error(format!("Unknown config key: {}", key))),
            }
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            let mut updated = config.clone();
            updated.set(&key, &value)?;
            if let Some(dir) = dir {
                updated.save(dir)?;
            }
            *config = updated;

            let display_val = config.get(&key).unwrap_or(value);
            let mut result = CmdResult::default().with_config(config.clone());
            result.add_message(CmdMessage::success(format!("{} set to {}", key, display_val)));
            Ok(result)
        }
    }
}
