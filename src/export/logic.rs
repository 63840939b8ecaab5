// src/export/logic.rs

use crate::core::state::AppState;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::build_sheet;
use crate::export::xlsx::export_xlsx;
use crate::ui::messages::warning;
use crate::utils::date::month_title;
use crate::utils::path::expand_tilde;
use std::path::PathBuf;

pub struct ExportLogic;

impl ExportLogic {
    /// Export the sessions of `month` (`YYYY-MM`).
    ///
    /// `file` must be absolute (a leading `~` is expanded). Returns the
    /// written path, or `None` when the month has no sessions.
    pub fn export(
        state: &AppState,
        format: ExportFormat,
        file: &str,
        month: &str,
        force: bool,
    ) -> AppResult<Option<PathBuf>> {
        let path = expand_tilde(file);
        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        let sheet = build_sheet(state, month);
        if sheet.is_empty() {
            warning(format!("No sessions in {}, nothing exported.", month_title(month)));
            return Ok(None);
        }

        ensure_writable(&path, force)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        match format {
            ExportFormat::Csv => export_csv(&sheet, &path)?,
            ExportFormat::Json => export_json(&sheet, &path)?,
            ExportFormat::Xlsx => export_xlsx(&sheet, &path)?,
        }

        Ok(Some(path))
    }
}
