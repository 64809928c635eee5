//! XLSX reader

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::dates::{parse_iso_datetime, serial_to_datetime};
use crate::error::{XlsxError, XlsxResult};
use crate::styles::{read_date_styles, DateStyles};
use sheet_review_core::{CellAddress, CellValue, SharedString, Table, Workbook};

/// Decode Excel's `_xHHHH_` escape sequences in strings.
///
/// Excel uses this format to encode special characters in XML:
/// - `_x000d_` = CR (carriage return)
/// - `_x000a_` = LF (line feed)
/// - `_x0009_` = Tab
/// - `_x005f_` = Underscore (escaped underscore)
fn decode_excel_escapes(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(pos) = rest.find("_x") {
        result.push_str(&rest[..pos]);
        let candidate = &rest[pos..];

        let decoded = candidate
            .get(2..6)
            .filter(|hex| hex.chars().all(|c| c.is_ascii_hexdigit()))
            .filter(|_| candidate.as_bytes().get(6) == Some(&b'_'))
            .and_then(|hex| u32::from_str_radix(hex, 16).ok())
            .and_then(char::from_u32);

        match decoded {
            Some(c) => {
                result.push(c);
                rest = &candidate[7..];
            }
            None => {
                result.push_str("_x");
                rest = &candidate[2..];
            }
        }
    }

    result.push_str(rest);
    result
}

/// Sheet entry from workbook.xml
struct SheetEntry {
    name: String,
    r_id: String,
}

/// Cell being assembled while walking `<c>` children
#[derive(Default)]
struct PendingCell {
    reference: Option<String>,
    cell_type: Option<String>,
    style: Option<u32>,
    value: Option<String>,
    inline_text: Option<String>,
}

/// Shared lookups needed to turn raw cell text into values
struct CellContext<'a> {
    shared_strings: &'a [SharedString],
    date_styles: &'a DateStyles,
    date_1904: bool,
}

/// XLSX file reader
pub struct XlsxReader;

impl XlsxReader {
    /// Read a workbook from a file path
    pub fn read_file<P: AsRef<Path>>(path: P) -> XlsxResult<Workbook> {
        let file = File::open(path)?;
        Self::read(BufReader::new(file))
    }

    /// Read a workbook from a reader
    pub fn read<R: Read + Seek>(reader: R) -> XlsxResult<Workbook> {
        let mut archive = zip::ZipArchive::new(reader)?;

        // Verify this is an XLSX file
        if archive.by_name("[Content_Types].xml").is_err() {
            return Err(XlsxError::InvalidFormat(
                "Missing [Content_Types].xml".into(),
            ));
        }

        let shared_strings = Self::read_shared_strings(&mut archive)?;
        let date_styles = Self::read_styles(&mut archive)?;
        let (sheets, date_1904) = Self::read_workbook_xml(&mut archive)?;
        let sheet_paths = Self::read_workbook_rels(&mut archive)?;

        log::debug!(
            "workbook lists {} sheets, {} shared strings, date1904={}",
            sheets.len(),
            shared_strings.len(),
            date_1904
        );

        let ctx = CellContext {
            shared_strings: &shared_strings,
            date_styles: &date_styles,
            date_1904,
        };

        let mut workbook = Workbook::new();

        for sheet in sheets {
            let Some(path) = sheet_paths.get(&sheet.r_id) else {
                log::warn!(
                    "sheet '{}' has no worksheet relationship '{}', skipping",
                    sheet.name,
                    sheet.r_id
                );
                continue;
            };

            let grid = Self::read_worksheet(&mut archive, path, &ctx)?;
            workbook.push_table(Table::from_grid(sheet.name, grid)?);
        }

        Ok(workbook)
    }

    /// Read the shared strings table
    fn read_shared_strings<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<Vec<SharedString>> {
        let mut strings = Vec::new();

        let file = match archive.by_name("xl/sharedStrings.xml") {
            Ok(f) => f,
            Err(_) => return Ok(strings), // No shared strings is valid
        };

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(false);

        let mut buf = Vec::new();
        let mut current_string = String::new();
        let mut in_si = false;
        let mut in_t = false;
        // Phonetic runs repeat the text as furigana and are not part of the value
        let mut in_phonetic = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"si" => {
                        in_si = true;
                        current_string.clear();
                    }
                    b"rPh" => in_phonetic = true,
                    b"t" if in_si && !in_phonetic => in_t = true,
                    _ => {}
                },
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"si" => {
                        strings.push(SharedString::new(decode_excel_escapes(&current_string)));
                        in_si = false;
                    }
                    b"rPh" => in_phonetic = false,
                    b"t" => in_t = false,
                    _ => {}
                },
                // Self-closing <si/> is an empty string entry
                Ok(Event::Empty(e)) if e.name().as_ref() == b"si" => {
                    strings.push(SharedString::new(""));
                }
                Ok(Event::Text(e)) if in_t => {
                    let text = e.unescape()?;
                    current_string.push_str(&text);
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(strings)
    }

    fn read_styles<R: Read + Seek>(archive: &mut zip::ZipArchive<R>) -> XlsxResult<DateStyles> {
        match archive.by_name("xl/styles.xml") {
            Ok(file) => read_date_styles(file),
            Err(_) => Ok(DateStyles::default()),
        }
    }

    /// Read workbook.xml to get sheet names, rIds and the date system
    fn read_workbook_xml<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<(Vec<SheetEntry>, bool)> {
        let file = archive
            .by_name("xl/workbook.xml")
            .map_err(|_| XlsxError::MissingPart("xl/workbook.xml".into()))?;

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut sheets = Vec::new();
        let mut date_1904 = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"workbookPr" => {
                        date_1904 = attr_value(&e, b"date1904")
                            .map_or(false, |v| v == "1" || v.eq_ignore_ascii_case("true"));
                    }
                    b"sheet" => {
                        if let (Some(name), Some(r_id)) =
                            (attr_value(&e, b"name"), attr_value(&e, b"r:id"))
                        {
                            sheets.push(SheetEntry { name, r_id });
                        }
                    }
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok((sheets, date_1904))
    }

    /// Read workbook.xml.rels to get sheet file paths
    fn read_workbook_rels<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<HashMap<String, String>> {
        let file = archive
            .by_name("xl/_rels/workbook.xml.rels")
            .map_err(|_| XlsxError::MissingPart("xl/_rels/workbook.xml.rels".into()))?;

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut rels = HashMap::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e))
                    if e.name().as_ref() == b"Relationship" =>
                {
                    let id = attr_value(&e, b"Id");
                    let target = attr_value(&e, b"Target");
                    let rel_type = attr_value(&e, b"Type");

                    // Only include worksheet relationships
                    if let (Some(id), Some(target), Some(rel_type)) = (id, target, rel_type) {
                        if rel_type.ends_with("/worksheet") {
                            // Target is relative to xl/ folder
                            let full_path = match target.strip_prefix('/') {
                                Some(absolute) => absolute.to_string(),
                                None => format!("xl/{}", target),
                            };
                            rels.insert(id, full_path);
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(rels)
    }

    /// Read a worksheet's `sheetData` into a row-major cell grid
    fn read_worksheet<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
        path: &str,
        ctx: &CellContext<'_>,
    ) -> XlsxResult<Vec<Vec<CellValue>>> {
        let file = archive
            .by_name(path)
            .map_err(|_| XlsxError::MissingPart(path.to_string()))?;

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(false);

        let mut buf = Vec::new();
        let mut grid: Vec<Vec<CellValue>> = Vec::new();

        // Position used when `r` attributes are omitted
        let mut row_idx: u32 = 0;
        let mut next_col: u16 = 0;
        let mut seen_row = false;

        let mut cell: Option<PendingCell> = None;
        let mut in_value = false;
        let mut in_inline_text = false;
        let mut in_phonetic = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"row" => {
                        Self::enter_row(&e, &mut row_idx, &mut next_col, &mut seen_row);
                    }
                    b"c" => cell = Some(Self::start_cell(&e)),
                    b"v" if cell.is_some() => in_value = true,
                    b"rPh" => in_phonetic = true,
                    b"t" if cell.is_some() && !in_phonetic => in_inline_text = true,
                    _ => {}
                },
                Ok(Event::Empty(e)) => match e.name().as_ref() {
                    b"row" => {
                        Self::enter_row(&e, &mut row_idx, &mut next_col, &mut seen_row);
                    }
                    // A cell without children carries no value, only a position
                    b"c" => {
                        let pending = Self::start_cell(&e);
                        let addr = Self::cell_address(&pending, row_idx, next_col)?;
                        next_col = addr.col.saturating_add(1);
                    }
                    _ => {}
                },
                Ok(Event::Text(e)) => {
                    if let Some(pending) = cell.as_mut() {
                        if in_value {
                            pending
                                .value
                                .get_or_insert_with(String::new)
                                .push_str(&e.unescape()?);
                        } else if in_inline_text {
                            pending
                                .inline_text
                                .get_or_insert_with(String::new)
                                .push_str(&e.unescape()?);
                        }
                    }
                }
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"c" => {
                        if let Some(pending) = cell.take() {
                            let addr = Self::cell_address(&pending, row_idx, next_col)?;
                            next_col = addr.col.saturating_add(1);

                            let value = Self::process_cell(&pending, ctx);
                            // Empty strings count as blank cells
                            let blank = value.is_empty() || value.as_string() == Some("");
                            if !blank {
                                Self::place(&mut grid, addr, value);
                            }
                        }
                        in_value = false;
                        in_inline_text = false;
                        in_phonetic = false;
                    }
                    b"v" => in_value = false,
                    b"rPh" => in_phonetic = false,
                    b"t" => in_inline_text = false,
                    b"sheetData" => break,
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        log::debug!("read {} rows from {}", grid.len(), path);
        Ok(grid)
    }

    /// Track the current row from a `<row>` element
    fn enter_row(e: &BytesStart, row_idx: &mut u32, next_col: &mut u16, seen_row: &mut bool) {
        match attr_value(e, b"r").and_then(|r| r.parse::<u32>().ok()) {
            Some(r) => *row_idx = r.saturating_sub(1), // 1-based to 0-based
            None if *seen_row => *row_idx += 1,
            None => {}
        }
        *seen_row = true;
        *next_col = 0;
    }

    fn start_cell(e: &BytesStart) -> PendingCell {
        PendingCell {
            reference: attr_value(e, b"r"),
            cell_type: attr_value(e, b"t"),
            style: attr_value(e, b"s").and_then(|s| s.parse().ok()),
            ..Default::default()
        }
    }

    fn cell_address(cell: &PendingCell, row_idx: u32, next_col: u16) -> XlsxResult<CellAddress> {
        match cell.reference.as_deref() {
            Some(r) => CellAddress::parse(r).map_err(|e| {
                XlsxError::Parse(format!("Invalid cell reference '{}': {}", r, e))
            }),
            None => Ok(CellAddress::new(row_idx, next_col)),
        }
    }

    /// Convert a cell's raw text to a value.
    ///
    /// Formula cells arrive here with their cached `<v>` result; the formula
    /// text itself is not needed.
    fn process_cell(cell: &PendingCell, ctx: &CellContext<'_>) -> CellValue {
        let cell_type = cell.cell_type.as_deref();

        if cell_type == Some("inlineStr") {
            return match cell.inline_text.as_deref() {
                Some(text) => CellValue::string(decode_excel_escapes(text)),
                None => CellValue::Empty,
            };
        }

        let Some(value) = cell.value.as_deref() else {
            return CellValue::Empty;
        };

        match cell_type {
            // Shared string
            Some("s") => match value.trim().parse::<usize>() {
                Ok(idx) => match ctx.shared_strings.get(idx) {
                    Some(s) => CellValue::String(s.clone()),
                    None => {
                        log::warn!("shared string index {} out of bounds", idx);
                        CellValue::Empty
                    }
                },
                Err(_) => {
                    log::warn!("invalid shared string index '{}'", value);
                    CellValue::Empty
                }
            },
            // Boolean
            Some("b") => CellValue::Boolean(value == "1" || value.eq_ignore_ascii_case("true")),
            // #N/A marks a missing value; other errors keep their text
            Some("e") if value.trim() == "#N/A" => CellValue::Empty,
            Some("e") => CellValue::string(value),
            // Formula string result
            Some("str") => CellValue::string(decode_excel_escapes(value)),
            // ISO 8601 date
            Some("d") => match parse_iso_datetime(value) {
                Some(dt) => CellValue::DateTime(dt),
                None => CellValue::string(value),
            },
            // Number (default type or explicit "n")
            None | Some("n") => match value.trim().parse::<f64>() {
                Ok(n) => {
                    let is_date = cell.style.map_or(false, |s| ctx.date_styles.is_date(s));
                    match is_date.then(|| serial_to_datetime(n, ctx.date_1904)).flatten() {
                        Some(dt) => CellValue::DateTime(dt),
                        None => CellValue::Number(n),
                    }
                }
                Err(_) => {
                    log::warn!("non-numeric value '{}' in numeric cell", value);
                    CellValue::string(value)
                }
            },
            // Unknown type - treat as string
            Some(other) => {
                log::warn!("unknown cell type '{}', reading as text", other);
                CellValue::string(value)
            }
        }
    }

    fn place(grid: &mut Vec<Vec<CellValue>>, addr: CellAddress, value: CellValue) {
        let row = addr.row as usize;
        let col = addr.col as usize;
        if grid.len() <= row {
            grid.resize_with(row + 1, Vec::new);
        }
        let cells = &mut grid[row];
        if cells.len() <= col {
            cells.resize(col + 1, CellValue::Empty);
        }
        cells[col] = value;
    }
}

/// Unescaped value of the attribute named `key`, if present
fn attr_value(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .and_then(|attr| attr.unescape_value().ok().map(|s| s.to_string()))
}
