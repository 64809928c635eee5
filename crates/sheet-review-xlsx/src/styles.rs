//! Number format lookup from styles.xml
//!
//! The loader only cares whether a cell style formats its number as a date,
//! so this reads `numFmts` and the `numFmtId` of each `cellXfs` entry and
//! nothing else.

use std::collections::HashMap;
use std::io::{BufReader, Read};

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};

/// Per-style date flags, indexed by the cell's `s` attribute
#[derive(Debug, Clone, Default)]
pub(crate) struct DateStyles {
    is_date: Vec<bool>,
}

impl DateStyles {
    /// Whether the cell style at `index` displays numbers as dates
    pub(crate) fn is_date(&self, index: u32) -> bool {
        self.is_date.get(index as usize).copied().unwrap_or(false)
    }
}

/// Read styles.xml into per-style date flags
pub(crate) fn read_date_styles<R: Read>(reader: R) -> XlsxResult<DateStyles> {
    let mut xml_reader = Reader::from_reader(BufReader::new(reader));
    xml_reader.trim_text(true);

    let mut buf = Vec::new();
    let mut custom_formats: HashMap<u32, String> = HashMap::new();
    let mut xf_formats: Vec<u32> = Vec::new();
    let mut in_cell_xfs = false;

    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"cellXfs" => in_cell_xfs = true,
                b"xf" if in_cell_xfs => xf_formats.push(num_fmt_id(&e)),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"numFmt" => {
                    let mut code = None;
                    for attr in e.attributes().flatten() {
                        if attr.key.as_ref() == b"formatCode" {
                            code = attr.unescape_value().ok().map(|s| s.to_string());
                        }
                    }
                    if let Some(code) = code {
                        custom_formats.insert(num_fmt_id(&e), code);
                    }
                }
                b"xf" if in_cell_xfs => xf_formats.push(num_fmt_id(&e)),
                _ => {}
            },
            Ok(Event::End(e)) if e.name().as_ref() == b"cellXfs" => in_cell_xfs = false,
            Ok(Event::Eof) => break,
            Err(e) => return Err(XlsxError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    let is_date = xf_formats
        .iter()
        .map(|id| is_date_format(*id, custom_formats.get(id).map(String::as_str)))
        .collect();

    Ok(DateStyles { is_date })
}

fn num_fmt_id(e: &BytesStart) -> u32 {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == b"numFmtId")
        .and_then(|attr| attr.unescape_value().ok().and_then(|s| s.parse().ok()))
        .unwrap_or(0)
}

/// Check if a number format displays dates or times.
///
/// Built-in ids 14-22 and 45-47 are date/time formats. Custom codes are
/// classified by their date/time placeholders once quoted literals,
/// bracketed sections (`[Red]`, `[$-409]`) and escaped characters are removed.
pub(crate) fn is_date_format(id: u32, custom: Option<&str>) -> bool {
    match custom {
        Some(code) => custom_code_is_date(code),
        None => matches!(id, 14..=22 | 45..=47),
    }
}

fn custom_code_is_date(code: &str) -> bool {
    let mut stripped = String::with_capacity(code.len());
    let mut chars = code.chars();
    let mut in_quotes = false;

    while let Some(c) = chars.next() {
        match c {
            '"' => in_quotes = !in_quotes,
            _ if in_quotes => {}
            '\\' | '_' | '*' => {
                chars.next();
            }
            '[' => {
                // [h], [m], [s] are elapsed-time markers and count as time
                let inner: String = chars.by_ref().take_while(|&c| c != ']').collect();
                let inner = inner.to_ascii_lowercase();
                if matches!(inner.as_str(), "h" | "hh" | "m" | "mm" | "s" | "ss") {
                    stripped.push_str(&inner);
                }
            }
            // Only the first section applies to positive numbers
            ';' => break,
            _ => stripped.push(c.to_ascii_lowercase()),
        }
    }

    if stripped == "general" {
        return false;
    }
    stripped
        .chars()
        .any(|c| matches!(c, 'y' | 'm' | 'd' | 'h' | 's'))
}
