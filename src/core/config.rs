use crate::config::Config;
use crate::errors::{AppError, AppResult};
use std::fs;
use std::path::Path;
use std::process::Command;

pub struct ConfigLogic;

impl ConfigLogic {
    /// Print the configuration file, or the effective defaults when the
    /// file does not exist yet.
    pub fn print(path: &Path, cfg: &Config) -> AppResult<()> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            println!("{}", content);
        } else {
            println!("{}", cfg.to_yaml()?);
        }
        Ok(())
    }

    pub fn edit(path: &Path, editor: &Option<String>) -> AppResult<()> {
        let ed = editor
            .clone()
            .or_else(|| std::env::var("EDITOR").ok())
            .or_else(|| std::env::var("VISUAL").ok())
            .unwrap_or_else(|| {
                if cfg!(target_os = "windows") {
                    "notepad".into()
                } else {
                    "nano".into()
                }
            });

        let status = Command::new(&ed)
            .arg(path)
            .status()
            .map_err(|e| AppError::Config(format!("cannot start editor '{}': {}", ed, e)))?;

        if !status.success() {
            return Err(AppError::Config(format!("editor '{}' exited with {}", ed, status)));
        }

        // re-parse so a broken file is reported right away
        Config::load_from(path)?;
        Ok(())
    }
}
