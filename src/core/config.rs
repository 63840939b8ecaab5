use crate::config::Config;
use crate::config::migrate::{check_config, migrate_config};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use std::path::Path;
use std::process::Command;

pub struct ConfigLogic;

impl ConfigLogic {
    /// Print the effective configuration (file values plus CLI overrides).
    pub fn print(cfg: &Config) -> AppResult<()> {
        println!("📄 Current configuration:\n");
        println!("{}", cfg.to_yaml()?);
        Ok(())
    }

    pub fn default_editor() -> String {
        std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(target_os = "windows") {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            })
    }

    /// Open the config file in `editor`, falling back to the default editor.
    pub fn edit(path: &Path, editor: Option<&str>) -> AppResult<()> {
        let fallback = Self::default_editor();
        let requested = editor.map(str::to_string).unwrap_or_else(|| fallback.clone());

        match Command::new(&requested).arg(path).status() {
            Ok(s) if s.success() => {
                success(format!("Configuration edited with '{}'", requested));
                return Ok(());
            }
            _ if requested == fallback => {
                return Err(AppError::Config(format!(
                    "editor '{}' failed or is not available",
                    requested
                )));
            }
            _ => warning(format!(
                "Editor '{}' not available, falling back to '{}'",
                requested, fallback
            )),
        }

        match Command::new(&fallback).arg(path).status() {
            Ok(s) if s.success() => {
                success(format!("Configuration edited with '{}'", fallback));
                Ok(())
            }
            _ => Err(AppError::Config(format!(
                "editor '{}' failed or is not available",
                fallback
            ))),
        }
    }

    pub fn check(path: &Path) -> AppResult<()> {
        let missing = check_config(path)?;
        if missing.is_empty() {
            success("Configuration is up to date.");
        } else {
            warning(format!("Missing keys: {}", missing.join(", ")));
            info("Run `rtutorlog config --migrate` to add them with defaults.");
        }
        Ok(())
    }

    pub fn migrate(path: &Path) -> AppResult<()> {
        if migrate_config(path)? {
            success(format!("Configuration updated: {}", path.display()));
        } else {
            info("Configuration already up to date.");
        }
        Ok(())
    }
}
