// src/export/xlsx.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::{Cell, ExportSheet, get_headers, row_to_cells, totals_to_cells};
use crate::export::notify_export_success;
use crate::ui::messages::info;
use crate::utils::date::month_title;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

/// Styled workbook: banded rows, frozen header, bold totals line.
pub(crate) fn export_xlsx(sheet: &ExportSheet, path: &Path) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(sheet.month.as_str())
        .map_err(to_app_error)?;

    // ---------------------------
    // Title + header
    // ---------------------------
    let title_format = Format::new().set_bold().set_font_size(14);
    worksheet
        .write_with_format(0, 0, month_title(&sheet.month), &title_format)
        .map_err(to_app_error)?;

    let headers = get_headers();
    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_with_format(2, col as u16, *header, &header_format)
            .map_err(to_app_error)?;
    }
    worksheet.set_freeze_panes(3, 0).ok();

    let mut col_widths: Vec<usize> = headers.iter().map(|h| UnicodeWidthStr::width(*h)).collect();

    // ---------------------------
    // Rows
    // ---------------------------
    let band1 = Color::RGB(0xEAF3FB);
    let band2 = Color::RGB(0xFFFFFF);

    let mut row = 3u32;
    for (i, r) in sheet.rows.iter().enumerate() {
        let bg = if i % 2 == 0 { band1 } else { band2 };
        for (col, cell) in row_to_cells(r).iter().enumerate() {
            write_cell(worksheet, row, col as u16, cell, base_format(bg))?;
            col_widths[col] = col_widths[col].max(cell.to_string().width());
        }
        row += 1;
    }

    // blank separator, then totals
    row += 1;
    for (col, cell) in totals_to_cells(&sheet.totals).iter().enumerate() {
        let fmt = base_format(Color::RGB(0xDDEBF7)).set_bold();
        write_cell(worksheet, row, col as u16, cell, fmt)?;
        col_widths[col] = col_widths[col].max(cell.to_string().width());
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet
            .set_column_width(c as u16, *w as f64 + 2.0)
            .map_err(to_app_error)?;
    }

    workbook.save(path).map_err(to_app_error)?;

    notify_export_success("XLSX", path);
    Ok(())
}

fn base_format(bg: Color) -> Format {
    Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin)
}

fn write_cell(ws: &mut Worksheet, row: u32, col: u16, cell: &Cell, fmt: Format) -> AppResult<()> {
    match cell {
        Cell::Text(s) => ws.write_with_format(row, col, s.as_str(), &fmt),
        Cell::Int(n) => ws.write_with_format(row, col, *n, &fmt.set_align(FormatAlign::Right)),
        Cell::Number(v, decimals) => {
            let num_format = if *decimals == 0 {
                "0".to_string()
            } else {
                format!("0.{}", "0".repeat(*decimals))
            };
            ws.write_with_format(
                row,
                col,
                *v,
                &fmt.set_align(FormatAlign::Right).set_num_format(num_format),
            )
        }
    }
    .map_err(to_app_error)?;
    Ok(())
}

fn to_app_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(e.to_string())
}
