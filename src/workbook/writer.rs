//! XLSX emission.
//!
//! An XLSX workbook is a ZIP archive of OOXML parts. This writer emits the
//! minimal part set a spreadsheet application needs: content types, package
//! relationships, the workbook part with its sheet list, a stylesheet, and
//! one worksheet part per sheet. All cell values are inline strings, so no
//! shared-strings part is required.

use std::io::{Cursor, Write};

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::writer::Writer;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use super::{Sheet, Workbook};
use crate::error::Result;

const MAIN_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const DOC_REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const PKG_REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const CONTENT_TYPES_NS: &str = "http://schemas.openxmlformats.org/package/2006/content-types";

const WORKBOOK_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml";
const WORKSHEET_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml";
const STYLES_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml";

/// Serialize a workbook into XLSX bytes.
pub(super) fn write_workbook(workbook: &Workbook) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    zip.start_file("[Content_Types].xml", part_options())?;
    zip.write_all(&content_types_part(workbook)?)?;

    zip.start_file("_rels/.rels", part_options())?;
    zip.write_all(&package_rels_part()?)?;

    zip.start_file("xl/workbook.xml", part_options())?;
    zip.write_all(&workbook_part(workbook)?)?;

    zip.start_file("xl/_rels/workbook.xml.rels", part_options())?;
    zip.write_all(&workbook_rels_part(workbook)?)?;

    zip.start_file("xl/styles.xml", part_options())?;
    zip.write_all(&styles_part()?)?;

    for (idx, sheet) in workbook.sheets.iter().enumerate() {
        zip.start_file(format!("xl/worksheets/sheet{}.xml", idx + 1), part_options())?;
        zip.write_all(&worksheet_part(sheet)?)?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

fn part_options() -> SimpleFileOptions {
    SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated)
}

fn new_part() -> Result<Writer<Vec<u8>>> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    Ok(writer)
}

fn empty_with(name: &str, attrs: &[(&str, &str)]) -> Event<'static> {
    let mut el = BytesStart::new(name.to_string());
    for attr in attrs {
        el.push_attribute(*attr);
    }
    Event::Empty(el)
}

fn start_with(name: &str, attrs: &[(&str, &str)]) -> Event<'static> {
    let mut el = BytesStart::new(name.to_string());
    for attr in attrs {
        el.push_attribute(*attr);
    }
    Event::Start(el)
}

fn content_types_part(workbook: &Workbook) -> Result<Vec<u8>> {
    let mut w = new_part()?;
    w.write_event(start_with("Types", &[("xmlns", CONTENT_TYPES_NS)]))?;

    w.write_event(empty_with(
        "Default",
        &[
            ("Extension", "rels"),
            (
                "ContentType",
                "application/vnd.openxmlformats-package.relationships+xml",
            ),
        ],
    ))?;
    w.write_event(empty_with(
        "Default",
        &[("Extension", "xml"), ("ContentType", "application/xml")],
    ))?;
    w.write_event(empty_with(
        "Override",
        &[
            ("PartName", "/xl/workbook.xml"),
            ("ContentType", WORKBOOK_CONTENT_TYPE),
        ],
    ))?;
    w.write_event(empty_with(
        "Override",
        &[
            ("PartName", "/xl/styles.xml"),
            ("ContentType", STYLES_CONTENT_TYPE),
        ],
    ))?;
    for idx in 0..workbook.sheets.len() {
        let part = format!("/xl/worksheets/sheet{}.xml", idx + 1);
        w.write_event(empty_with(
            "Override",
            &[
                ("PartName", part.as_str()),
                ("ContentType", WORKSHEET_CONTENT_TYPE),
            ],
        ))?;
    }

    w.write_event(Event::End(BytesEnd::new("Types")))?;
    Ok(w.into_inner())
}

fn package_rels_part() -> Result<Vec<u8>> {
    let mut w = new_part()?;
    w.write_event(start_with("Relationships", &[("xmlns", PKG_REL_NS)]))?;
    w.write_event(empty_with(
        "Relationship",
        &[
            ("Id", "rId1"),
            (
                "Type",
                "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument",
            ),
            ("Target", "xl/workbook.xml"),
        ],
    ))?;
    w.write_event(Event::End(BytesEnd::new("Relationships")))?;
    Ok(w.into_inner())
}

fn workbook_part(workbook: &Workbook) -> Result<Vec<u8>> {
    let mut w = new_part()?;
    w.write_event(start_with(
        "workbook",
        &[("xmlns", MAIN_NS), ("xmlns:r", DOC_REL_NS)],
    ))?;
    w.write_event(Event::Start(BytesStart::new("sheets")))?;
    for (idx, sheet) in workbook.sheets.iter().enumerate() {
        let sheet_id = (idx + 1).to_string();
        let rel_id = format!("rId{}", idx + 1);
        w.write_event(empty_with(
            "sheet",
            &[
                ("name", sheet.name.as_str()),
                ("sheetId", sheet_id.as_str()),
                ("r:id", rel_id.as_str()),
            ],
        ))?;
    }
    w.write_event(Event::End(BytesEnd::new("sheets")))?;
    w.write_event(Event::End(BytesEnd::new("workbook")))?;
    Ok(w.into_inner())
}

fn workbook_rels_part(workbook: &Workbook) -> Result<Vec<u8>> {
    let mut w = new_part()?;
    w.write_event(start_with("Relationships", &[("xmlns", PKG_REL_NS)]))?;
    for idx in 0..workbook.sheets.len() {
        let rel_id = format!("rId{}", idx + 1);
        let target = format!("worksheets/sheet{}.xml", idx + 1);
        w.write_event(empty_with(
            "Relationship",
            &[
                ("Id", rel_id.as_str()),
                (
                    "Type",
                    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet",
                ),
                ("Target", target.as_str()),
            ],
        ))?;
    }
    let styles_id = format!("rId{}", workbook.sheets.len() + 1);
    w.write_event(empty_with(
        "Relationship",
        &[
            ("Id", styles_id.as_str()),
            (
                "Type",
                "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles",
            ),
            ("Target", "styles.xml"),
        ],
    ))?;
    w.write_event(Event::End(BytesEnd::new("Relationships")))?;
    Ok(w.into_inner())
}

/// Minimal stylesheet. Spreadsheet applications require the part to exist
/// and to declare at least one font, fill, border, and cell format.
fn styles_part() -> Result<Vec<u8>> {
    let mut w = new_part()?;
    w.write_event(start_with("styleSheet", &[("xmlns", MAIN_NS)]))?;

    w.write_event(start_with("fonts", &[("count", "1")]))?;
    w.write_event(Event::Start(BytesStart::new("font")))?;
    w.write_event(empty_with("sz", &[("val", "11")]))?;
    w.write_event(empty_with("name", &[("val", "Calibri")]))?;
    w.write_event(Event::End(BytesEnd::new("font")))?;
    w.write_event(Event::End(BytesEnd::new("fonts")))?;

    w.write_event(start_with("fills", &[("count", "2")]))?;
    for pattern in ["none", "gray125"] {
        w.write_event(Event::Start(BytesStart::new("fill")))?;
        w.write_event(empty_with("patternFill", &[("patternType", pattern)]))?;
        w.write_event(Event::End(BytesEnd::new("fill")))?;
    }
    w.write_event(Event::End(BytesEnd::new("fills")))?;

    w.write_event(start_with("borders", &[("count", "1")]))?;
    w.write_event(empty_with("border", &[]))?;
    w.write_event(Event::End(BytesEnd::new("borders")))?;

    w.write_event(start_with("cellStyleXfs", &[("count", "1")]))?;
    w.write_event(empty_with("xf", &[]))?;
    w.write_event(Event::End(BytesEnd::new("cellStyleXfs")))?;

    w.write_event(start_with("cellXfs", &[("count", "1")]))?;
    w.write_event(empty_with("xf", &[("xfId", "0")]))?;
    w.write_event(Event::End(BytesEnd::new("cellXfs")))?;

    w.write_event(Event::End(BytesEnd::new("styleSheet")))?;
    Ok(w.into_inner())
}

fn worksheet_part(sheet: &Sheet) -> Result<Vec<u8>> {
    let mut w = new_part()?;
    w.write_event(start_with("worksheet", &[("xmlns", MAIN_NS)]))?;

    if let Some(width) = sheet.column_width {
        let span = sheet
            .rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(sheet.columns.len()))
            .max()
            .unwrap_or(1)
            .max(1);
        let max = span.to_string();
        let width = width.to_string();
        w.write_event(Event::Start(BytesStart::new("cols")))?;
        w.write_event(empty_with(
            "col",
            &[
                ("min", "1"),
                ("max", max.as_str()),
                ("width", width.as_str()),
                ("customWidth", "1"),
            ],
        ))?;
        w.write_event(Event::End(BytesEnd::new("cols")))?;
    }

    w.write_event(Event::Start(BytesStart::new("sheetData")))?;
    let mut row_num = 0;
    if !sheet.columns.is_empty() {
        row_num += 1;
        write_row(&mut w, row_num, &sheet.columns)?;
    }
    for row in &sheet.rows {
        row_num += 1;
        write_row(&mut w, row_num, row)?;
    }
    w.write_event(Event::End(BytesEnd::new("sheetData")))?;

    w.write_event(Event::End(BytesEnd::new("worksheet")))?;
    Ok(w.into_inner())
}

fn write_row(w: &mut Writer<Vec<u8>>, row_num: usize, cells: &[String]) -> Result<()> {
    let row_ref = row_num.to_string();
    w.write_event(start_with("row", &[("r", row_ref.as_str())]))?;
    for (col, value) in cells.iter().enumerate() {
        let cell = cell_ref(row_num, col);
        w.write_event(start_with("c", &[("r", cell.as_str()), ("t", "inlineStr")]))?;
        w.write_event(Event::Start(BytesStart::new("is")))?;
        w.write_event(Event::Start(BytesStart::new("t")))?;
        w.write_event(Event::Text(BytesText::new(value)))?;
        w.write_event(Event::End(BytesEnd::new("t")))?;
        w.write_event(Event::End(BytesEnd::new("is")))?;
        w.write_event(Event::End(BytesEnd::new("c")))?;
    }
    w.write_event(Event::End(BytesEnd::new("row")))?;
    Ok(())
}

/// A1-style reference for a cell; `row_num` is 1-based, `col` 0-based.
fn cell_ref(row_num: usize, col: usize) -> String {
    format!("{}{}", column_letters(col), row_num)
}

/// Spreadsheet column letters for a 0-based index: 0 → A, 25 → Z, 26 → AA.
fn column_letters(mut col: usize) -> String {
    let mut letters = String::new();
    loop {
        letters.insert(0, (b'A' + (col % 26) as u8) as char);
        if col < 26 {
            break;
        }
        col = col / 26 - 1;
    }
    letters
}
