//! Config file upgrades: keys added in newer releases are filled in with
//! their defaults, existing values are never overwritten.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Dotted paths (`sync.max_attempts`) present in `defaults` but not in `current`.
fn missing_keys(current: &Mapping, defaults: &Mapping, prefix: &str, out: &mut Vec<String>) {
    for (key, default_value) in defaults {
        let Some(name) = key.as_str() else { continue };
        let path = if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{prefix}.{name}")
        };

        match (current.get(key), default_value) {
            (None, _) => out.push(path),
            (Some(Value::Mapping(cur)), Value::Mapping(def)) => {
                missing_keys(cur, def, &path, out)
            }
            _ => {}
        }
    }
}

/// Copy missing entries of `defaults` into `current`. Returns true on change.
fn fill_missing(current: &mut Mapping, defaults: &Mapping) -> bool {
    let mut changed = false;
    for (key, default_value) in defaults {
        match current.get_mut(key) {
            None => {
                current.insert(key.clone(), default_value.clone());
                changed = true;
            }
            Some(Value::Mapping(cur)) => {
                if let Value::Mapping(def) = default_value {
                    changed |= fill_missing(cur, def);
                }
            }
            Some(_) => {}
        }
    }
    changed
}

fn defaults_mapping() -> AppResult<Mapping> {
    match serde_yaml::to_value(Config::default())? {
        Value::Mapping(m) => Ok(m),
        _ => Err(AppError::Config("default config is not a mapping".into())),
    }
}

fn read_mapping(path: &Path) -> AppResult<Mapping> {
    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
    match serde_yaml::from_str::<Value>(&content)? {
        Value::Mapping(m) => Ok(m),
        Value::Null => Ok(Mapping::new()),
        _ => Err(AppError::Config(format!(
            "{} is not a YAML mapping",
            path.display()
        ))),
    }
}

/// Keys the config file at `path` lacks compared to the current release.
pub fn check_config(path: &Path) -> AppResult<Vec<String>> {
    let current = read_mapping(path)?;
    let mut out = Vec::new();
    missing_keys(&current, &defaults_mapping()?, "", &mut out);
    Ok(out)
}

/// Add the missing keys to the config file at `path`.
/// Returns `Ok(true)` when the file was rewritten.
pub fn migrate_config(path: &Path) -> AppResult<bool> {
    let mut current = read_mapping(path)?;
    if !fill_missing(&mut current, &defaults_mapping()?) {
        return Ok(false);
    }

    let serialized = serde_yaml::to_string(&Value::Mapping(current))?;
    fs::write(path, serialized).map_err(|_| AppError::ConfigSave)?;
    Ok(true)
}
