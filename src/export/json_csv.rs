// src/export/json_csv.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::{ExportSheet, get_headers, row_to_cells, totals_to_cells};
use crate::export::notify_export_success;
use crate::ui::messages::info;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// JSON document `{ month, rows, totals }`, pretty-printed.
pub(crate) fn export_json(sheet: &ExportSheet, path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let json_data = serde_json::to_string_pretty(sheet)?;
    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;

    notify_export_success("JSON", path);
    Ok(())
}

/// Header, one line per session, a blank line, then the totals line.
pub(crate) fn export_csv(sheet: &ExportSheet, path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let mut wtr = csv::Writer::from_path(path).map_err(csv_err)?;

    wtr.write_record(get_headers()).map_err(csv_err)?;
    for row in &sheet.rows {
        wtr.write_record(row_to_cells(row).iter().map(|c| c.to_string()))
            .map_err(csv_err)?;
    }

    let blank = vec![String::new(); get_headers().len()];
    wtr.write_record(&blank).map_err(csv_err)?;
    wtr.write_record(totals_to_cells(&sheet.totals).iter().map(|c| c.to_string()))
        .map_err(csv_err)?;

    wtr.flush()?;

    notify_export_success("CSV", path);
    Ok(())
}

fn csv_err(e: csv::Error) -> AppError {
    AppError::Export(format!("CSV write error: {e}"))
}
