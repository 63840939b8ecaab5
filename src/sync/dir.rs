//! Directory mirror: the remote document is `<dir>/<sync-code>.json`.
//!
//! Pointing several installs at the same shared folder with the same code
//! makes them share one document, which is what a sync code is for.

use super::{Snapshot, SyncMirror};
use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use regex::Regex;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::OnceLock;

fn sync_code_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]{4,64}$").expect("static regex"))
}

pub fn validate_sync_code(code: &str) -> AppResult<()> {
    if sync_code_re().is_match(code) {
        Ok(())
    } else {
        Err(AppError::InvalidSyncCode(code.to_string()))
    }
}

#[derive(Debug, Clone)]
pub struct DirMirror {
    root: PathBuf,
    code: String,
}

impl DirMirror {
    pub fn new(dir: &str, code: &str) -> AppResult<Self> {
        validate_sync_code(code)?;
        Ok(Self {
            root: expand_tilde(dir),
            code: code.to_string(),
        })
    }

    pub fn document_path(&self) -> PathBuf {
        self.root.join(format!("{}.json", self.code))
    }
}

impl SyncMirror for DirMirror {
    fn upload(&self, snapshot: &Snapshot) -> AppResult<()> {
        fs::create_dir_all(&self.root)?;

        let target = self.document_path();
        let tmp = target.with_extension("json.tmp");

        let json = serde_json::to_string_pretty(snapshot)?;
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &target)?;
        Ok(())
    }

    fn download(&self) -> AppResult<Option<Snapshot>> {
        match fs::read_to_string(self.document_path()) {
            Ok(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| AppError::Sync(format!("unreadable remote document: {e}"))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn describe(&self) -> String {
        self.document_path().display().to_string()
    }
}
