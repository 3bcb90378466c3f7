//! DOCX text and table extraction using zip and quick-xml.

use std::io::{Cursor, Read};

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::{debug, trace};
use zip::ZipArchive;

use super::{DocumentContent, DocumentLoader, Result, Table};
use crate::error::DocumentError;

/// Main document part inside the OOXML container.
const DOCUMENT_PART: &str = "word/document.xml";

/// DOCX loader.
///
/// Collects the body paragraphs (not paragraphs inside tables or text boxes)
/// and the top-level tables of `word/document.xml`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxLoader;

impl DocxLoader {
    /// Create a new DOCX loader.
    pub fn new() -> Self {
        Self
    }

    fn read_document_part(&self, data: &[u8]) -> Result<String> {
        let mut archive = ZipArchive::new(Cursor::new(data))
            .map_err(|e| DocumentError::Archive(e.to_string()))?;

        let mut part = archive
            .by_name(DOCUMENT_PART)
            .map_err(|_| DocumentError::MissingPart(DOCUMENT_PART.to_string()))?;

        let mut xml = String::with_capacity(part.size() as usize);
        part.read_to_string(&mut xml)
            .map_err(|e| DocumentError::Archive(e.to_string()))?;
        Ok(xml)
    }
}

impl DocumentLoader for DocxLoader {
    fn load(&self, data: &[u8]) -> Result<DocumentContent> {
        let xml = self.read_document_part(data)?;
        let content = parse_document_xml(&xml)?;

        debug!(
            "DOCX: {} chars of body text, {} tables",
            content.text.len(),
            content.tables.len()
        );

        Ok(content)
    }
}

/// Parse the XML of `word/document.xml`.
pub(crate) fn parse_document_xml(xml: &str) -> Result<DocumentContent> {
    let mut reader = Reader::from_str(xml);
    let mut walker = BodyWalker::default();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => walker.open(&e),
            Ok(Event::Empty(e)) => {
                walker.open(&e);
                walker.close();
            }
            Ok(Event::End(_)) => walker.close(),
            Ok(Event::Text(t)) if walker.in_run_text() => {
                let text = t
                    .unescape()
                    .map_err(|e| DocumentError::Xml(e.to_string()))?;
                walker.push_text(&text);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(DocumentError::Xml(format!(
                    "at byte {}: {}",
                    reader.buffer_position(),
                    e
                )));
            }
            _ => {}
        }
    }

    Ok(walker.finish())
}

/// Where a paragraph's text ends up once the paragraph closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Owner {
    Body,
    Cell,
    Other,
}

#[derive(Debug)]
struct ParagraphBuf {
    owner: Owner,
    text: String,
}

#[derive(Debug, Default)]
struct CellBuf {
    paragraphs: Vec<String>,
    span: usize,
    /// Continuation of a vertical merge: the text comes from the cell above.
    merged_above: bool,
}

#[derive(Debug, Default)]
struct TableBuf {
    rows: Table,
    row: Option<Vec<String>>,
    cell: Option<CellBuf>,
    /// Resolved text per grid column of the last finished row.
    previous_row: Vec<String>,
}

/// Streaming state over the document element tree.
#[derive(Debug, Default)]
struct BodyWalker {
    /// Local names of the currently open elements.
    stack: Vec<Vec<u8>>,
    paragraphs: Vec<ParagraphBuf>,
    body_paragraphs: Vec<String>,
    tables: Vec<TableBuf>,
    finished_tables: Vec<Table>,
}

impl BodyWalker {
    fn parent_is(&self, name: &[u8]) -> bool {
        self.stack.last().is_some_and(|p| p.as_slice() == name)
    }

    fn in_run_text(&self) -> bool {
        let n = self.stack.len();
        n >= 2 && self.stack[n - 1] == b"t" && self.stack[n - 2] == b"r"
    }

    fn push_text(&mut self, text: &str) {
        if let Some(paragraph) = self.paragraphs.last_mut() {
            paragraph.text.push_str(text);
        }
    }

    fn open(&mut self, e: &BytesStart<'_>) {
        let name = e.local_name().as_ref().to_vec();

        match name.as_slice() {
            b"p" => {
                let owner = if self.parent_is(b"body") {
                    Owner::Body
                } else if self.parent_is(b"tc") {
                    Owner::Cell
                } else {
                    Owner::Other
                };
                self.paragraphs.push(ParagraphBuf {
                    owner,
                    text: String::new(),
                });
            }
            b"tbl" => self.tables.push(TableBuf::default()),
            b"tr" => {
                if let Some(table) = self.tables.last_mut() {
                    table.row = Some(Vec::new());
                }
            }
            b"tc" => {
                if let Some(table) = self.tables.last_mut() {
                    table.cell = Some(CellBuf {
                        paragraphs: Vec::new(),
                        span: 1,
                        merged_above: false,
                    });
                }
            }
            b"gridSpan" if self.parent_is(b"tcPr") => {
                let span = attribute_value(e, b"val")
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .filter(|&n| n > 0);
                if let (Some(span), Some(cell)) = (
                    span,
                    self.tables.last_mut().and_then(|t| t.cell.as_mut()),
                ) {
                    cell.span = span;
                }
            }
            b"vMerge" if self.parent_is(b"tcPr") => {
                // No val attribute means "continue".
                let merged_above = attribute_value(e, b"val").is_none_or(|v| v == "continue");
                if let Some(cell) = self.tables.last_mut().and_then(|t| t.cell.as_mut()) {
                    cell.merged_above = merged_above;
                }
            }
            b"tab" if self.parent_is(b"r") => self.push_text("\t"),
            b"br" | b"cr" if self.parent_is(b"r") => self.push_text("\n"),
            _ => {}
        }

        self.stack.push(name);
    }

    fn close(&mut self) {
        let Some(name) = self.stack.pop() else {
            return;
        };

        match name.as_slice() {
            b"p" => {
                let Some(paragraph) = self.paragraphs.pop() else {
                    return;
                };
                match paragraph.owner {
                    Owner::Body => self.body_paragraphs.push(paragraph.text),
                    Owner::Cell => {
                        if let Some(cell) = self.tables.last_mut().and_then(|t| t.cell.as_mut()) {
                            cell.paragraphs.push(paragraph.text);
                        }
                    }
                    Owner::Other => trace!("Dropping nested paragraph: {:?}", paragraph.text),
                }
            }
            b"tc" => {
                if let Some(table) = self.tables.last_mut() {
                    if let Some(cell) = table.cell.take() {
                        let row = table.row.get_or_insert_with(Vec::new);
                        let text = if cell.merged_above {
                            table.previous_row.get(row.len()).cloned().unwrap_or_default()
                        } else {
                            cell.paragraphs.join("\n").trim().to_string()
                        };
                        for _ in 0..cell.span {
                            row.push(text.clone());
                        }
                    }
                }
            }
            b"tr" => {
                if let Some(table) = self.tables.last_mut() {
                    if let Some(row) = table.row.take() {
                        table.previous_row = row.clone();
                        table.rows.push(row);
                    }
                }
            }
            b"tbl" => {
                if let Some(table) = self.tables.pop() {
                    // Nested tables do not surface as separate grids.
                    if self.tables.is_empty() {
                        self.finished_tables.push(table.rows);
                    }
                }
            }
            _ => {}
        }
    }

    fn finish(self) -> DocumentContent {
        DocumentContent {
            text: self.body_paragraphs.join("\n"),
            tables: self.finished_tables,
        }
    }
}

fn attribute_value(e: &BytesStart<'_>, local: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.local_name().as_ref() == local)
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn wrap_body(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}<w:sectPr/></w:body></w:document>"#,
            body
        )
    }

    fn para(text: &str) -> String {
        format!(r#"<w:p><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#, text)
    }

    fn build_docx(xml: &str) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file(DOCUMENT_PART, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_body_paragraphs_joined_with_newlines() {
        let xml = wrap_body(&format!(
            "{}{}{}",
            para("ANNUAL MAINTENANCE CONTRACT"),
            "<w:p/>",
            para("Customer Name: Ravi &amp; Co")
        ));
        let content = parse_document_xml(&xml).unwrap();

        assert_eq!(content.text, "ANNUAL MAINTENANCE CONTRACT\n\nCustomer Name: Ravi & Co");
        assert!(content.tables.is_empty());
    }

    #[test]
    fn test_runs_tabs_and_breaks() {
        let xml = wrap_body(
            r#"<w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr><w:r><w:t>AMC</w:t><w:tab/><w:t>PERIOD</w:t><w:br/><w:t>next</w:t></w:r><w:hyperlink><w:r><w:t>!</w:t></w:r></w:hyperlink></w:p>"#,
        );
        let content = parse_document_xml(&xml).unwrap();

        assert_eq!(content.text, "AMC\tPERIOD\nnext!");
    }

    #[test]
    fn test_tables_are_separate_from_text() {
        let xml = wrap_body(&format!(
            r#"{}<w:tbl><w:tr><w:tc>{}</w:tc><w:tc>{}</w:tc></w:tr><w:tr><w:tc>{}</w:tc><w:tc>{}{}</w:tc></w:tr></w:tbl>{}"#,
            para("Before"),
            para(" Brand "),
            para("Qty"),
            para("Voltas"),
            para("2"),
            para("units"),
            para("After")
        ));
        let content = parse_document_xml(&xml).unwrap();

        assert_eq!(content.text, "Before\nAfter");
        assert_eq!(
            content.tables,
            vec![vec![
                vec!["Brand".to_string(), "Qty".to_string()],
                vec!["Voltas".to_string(), "2\nunits".to_string()],
            ]]
        );
    }

    #[test]
    fn test_grid_span_repeats_cell() {
        let xml = wrap_body(&format!(
            r#"<w:tbl><w:tr><w:tc><w:tcPr><w:gridSpan w:val="2"/></w:tcPr>{}</w:tc><w:tc>{}</w:tc></w:tr></w:tbl>"#,
            para("TOTAL"),
            para("5000")
        ));
        let content = parse_document_xml(&xml).unwrap();

        assert_eq!(content.tables[0][0], vec!["TOTAL", "TOTAL", "5000"]);
    }

    #[test]
    fn test_vertical_merge_repeats_cell_above() {
        let restart = r#"<w:tcPr><w:vMerge w:val="restart"/></w:tcPr>"#;
        let xml = wrap_body(&format!(
            concat!(
                "<w:tbl>",
                "<w:tr><w:tc>{}</w:tc><w:tc>{}</w:tc></w:tr>",
                "<w:tr><w:tc>{}{}</w:tc><w:tc>{}</w:tc></w:tr>",
                "<w:tr><w:tc><w:tcPr><w:vMerge/></w:tcPr>{}</w:tc><w:tc>{}</w:tc></w:tr>",
                r#"<w:tr><w:tc><w:tcPr><w:vMerge w:val="continue"/></w:tcPr>{}</w:tc><w:tc>{}</w:tc></w:tr>"#,
                "</w:tbl>"
            ),
            para("Brand"),
            para("Qty"),
            restart,
            para("Daikin"),
            para("1"),
            para(""),
            para("2"),
            para(""),
            para("3")
        ));
        let content = parse_document_xml(&xml).unwrap();
        let table = &content.tables[0];

        assert_eq!(table[1], vec!["Daikin", "1"]);
        assert_eq!(table[2], vec!["Daikin", "2"]);
        assert_eq!(table[3], vec!["Daikin", "3"]);
    }

    #[test]
    fn test_nested_tables_are_not_collected() {
        let xml = wrap_body(&format!(
            r#"<w:tbl><w:tr><w:tc>{}<w:tbl><w:tr><w:tc>{}</w:tc></w:tr></w:tbl></w:tc></w:tr></w:tbl>"#,
            para("outer"),
            para("inner")
        ));
        let content = parse_document_xml(&xml).unwrap();

        assert_eq!(content.tables.len(), 1);
        assert_eq!(content.tables[0], vec![vec!["outer".to_string()]]);
    }

    #[test]
    fn test_load_docx_archive() {
        let data = build_docx(&wrap_body(&para("Customer Name: Meena")));
        let content = DocxLoader::new().load(&data).unwrap();

        assert_eq!(content.text, "Customer Name: Meena");
    }

    #[test]
    fn test_missing_document_part() {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/styles.xml", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"<w:styles/>").unwrap();
        let data = writer.finish().unwrap().into_inner();

        let err = DocxLoader::new().load(&data).unwrap_err();
        assert!(matches!(err, DocumentError::MissingPart(_)));
    }

    #[test]
    fn test_malformed_xml() {
        let data = build_docx("<w:document><w:body><w:p></w:body></w:document>");
        let err = DocxLoader::new().load(&data).unwrap_err();
        assert!(matches!(err, DocumentError::Xml(_)));
    }
}
