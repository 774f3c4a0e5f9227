//! Built-in writers for the standard asset kinds.

use std::io::Write;
use std::path::Path;

use crate::block::{Payload, TableData};
use crate::store::{ext_of, mime};

use super::{AssetMeta, AssetWriter, WriteError, WriteResult};

// =============================================================================
// PlotWriter
// =============================================================================

/// Plots: SVG images or self-contained HTML.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlotWriter;

impl AssetWriter for PlotWriter {
    fn get_meta(&self, payload: &Payload) -> WriteResult<AssetMeta> {
        match payload {
            Payload::Svg(_) => Ok(AssetMeta::new("svg", "image/svg+xml")),
            Payload::Html(_) => Ok(AssetMeta::new("html", "text/html")),
            other => Err(WriteError::Unsupported(other.type_name())),
        }
    }

    fn write_file(&self, payload: &Payload, sink: &mut dyn Write) -> WriteResult<()> {
        match payload {
            Payload::Svg(s) | Payload::Html(s) => sink.write_all(s.as_bytes())?,
            other => return Err(WriteError::Unsupported(other.type_name())),
        }
        Ok(())
    }
}

// =============================================================================
// HtmlTableWriter
// =============================================================================

/// Static tables, rendered to an HTML `<table>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlTableWriter;

impl AssetWriter for HtmlTableWriter {
    fn get_meta(&self, payload: &Payload) -> WriteResult<AssetMeta> {
        match payload {
            Payload::Table(_) | Payload::Html(_) => Ok(AssetMeta::new("html", "text/html")),
            other => Err(WriteError::Unsupported(other.type_name())),
        }
    }

    fn write_file(&self, payload: &Payload, sink: &mut dyn Write) -> WriteResult<()> {
        match payload {
            Payload::Table(table) => sink.write_all(table_to_html(table).as_bytes())?,
            Payload::Html(html) => sink.write_all(html.as_bytes())?,
            other => return Err(WriteError::Unsupported(other.type_name())),
        }
        Ok(())
    }
}

fn table_to_html(table: &TableData) -> String {
    let mut out = String::from("<table><thead><tr>");
    for col in &table.columns {
        out.push_str("<th>");
        out.push_str(&escape_html(col));
        out.push_str("</th>");
    }
    out.push_str("</tr></thead><tbody>");
    for row in &table.rows {
        out.push_str("<tr>");
        for cell in row {
            out.push_str("<td>");
            out.push_str(&escape_html(cell));
            out.push_str("</td>");
        }
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table>");
    out
}

/// Escape HTML special characters.
fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

// =============================================================================
// DataTableWriter
// =============================================================================

/// Interactive data tables, stored as CSV.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataTableWriter;

impl AssetWriter for DataTableWriter {
    fn get_meta(&self, payload: &Payload) -> WriteResult<AssetMeta> {
        match payload {
            Payload::Table(_) => Ok(AssetMeta::new("csv", "text/csv")),
            other => Err(WriteError::Unsupported(other.type_name())),
        }
    }

    fn write_file(&self, payload: &Payload, sink: &mut dyn Write) -> WriteResult<()> {
        let Payload::Table(table) = payload else {
            return Err(WriteError::Unsupported(payload.type_name()));
        };
        write_csv_row(sink, &table.columns)?;
        for row in &table.rows {
            write_csv_row(sink, row)?;
        }
        Ok(())
    }
}

fn write_csv_row(sink: &mut dyn Write, cells: &[String]) -> WriteResult<()> {
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            sink.write_all(b",")?;
        }
        if cell.contains([',', '"', '\n', '\r']) {
            write!(sink, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            sink.write_all(cell.as_bytes())?;
        }
    }
    sink.write_all(b"\n")?;
    Ok(())
}

// =============================================================================
// AttachmentWriter
// =============================================================================

/// Downloadable files: raw bytes or plain text.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttachmentWriter;

impl AssetWriter for AttachmentWriter {
    fn get_meta(&self, payload: &Payload) -> WriteResult<AssetMeta> {
        match payload {
            Payload::Bytes { name, .. } => {
                let ext = name.as_deref().map(|n| ext_of(Path::new(n))).unwrap_or_default();
                let ext = if ext.is_empty() { "bin".to_string() } else { ext };
                let mime = mime::guess(&ext);
                Ok(AssetMeta::new(ext, mime))
            }
            Payload::Text(_) => Ok(AssetMeta::new("txt", "text/plain")),
            other => Err(WriteError::Unsupported(other.type_name())),
        }
    }

    fn write_file(&self, payload: &Payload, sink: &mut dyn Write) -> WriteResult<()> {
        match payload {
            Payload::Bytes { data, .. } => sink.write_all(data)?,
            Payload::Text(text) => sink.write_all(text.as_bytes())?,
            other => return Err(WriteError::Unsupported(other.type_name())),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(writer: &dyn AssetWriter, payload: &Payload) -> String {
        let mut buf = Vec::new();
        writer.write_file(payload, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn sample_table() -> TableData {
        TableData::new(["name", "note"])
            .row(["a&b", "plain"])
            .row(["c", "has, comma"])
    }

    #[test]
    fn test_plot_writer() {
        let svg = Payload::Svg("<svg/>".into());
        assert_eq!(PlotWriter.get_meta(&svg).unwrap(), AssetMeta::new("svg", "image/svg+xml"));
        assert_eq!(write(&PlotWriter, &svg), "<svg/>");

        let err = PlotWriter.get_meta(&Payload::Table(sample_table())).unwrap_err();
        assert!(matches!(err, WriteError::Unsupported("Table")));
    }

    #[test]
    fn test_html_table_writer() {
        let html = write(&HtmlTableWriter, &Payload::Table(sample_table()));
        assert!(html.starts_with("<table><thead><tr><th>name</th><th>note</th></tr></thead>"));
        assert!(html.contains("<td>a&amp;b</td>"));
        assert!(html.ends_with("</tbody></table>"));
    }

    #[test]
    fn test_data_table_writer_csv() {
        let payload = Payload::Table(sample_table());
        assert_eq!(DataTableWriter.get_meta(&payload).unwrap().ext, "csv");
        assert_eq!(
            write(&DataTableWriter, &payload),
            "name,note\na&b,plain\nc,\"has, comma\"\n"
        );
        assert!(DataTableWriter.get_meta(&Payload::Svg(String::new())).is_err());
    }

    #[test]
    fn test_csv_quotes() {
        let table = TableData::new(["q"]).row(["say \"hi\""]);
        assert_eq!(write(&DataTableWriter, &Payload::Table(table)), "q\n\"say \"\"hi\"\"\"\n");
    }

    #[test]
    fn test_attachment_meta() {
        let pdf = Payload::Bytes { data: vec![1, 2], name: Some("Report.PDF".into()) };
        assert_eq!(
            AttachmentWriter.get_meta(&pdf).unwrap(),
            AssetMeta::new("pdf", "application/pdf")
        );

        let anon = Payload::Bytes { data: vec![1], name: None };
        assert_eq!(
            AttachmentWriter.get_meta(&anon).unwrap(),
            AssetMeta::new("bin", "application/octet-stream")
        );

        let text = Payload::Text("hello".into());
        assert_eq!(AttachmentWriter.get_meta(&text).unwrap().mime, "text/plain");
        assert_eq!(write(&AttachmentWriter, &text), "hello");
    }
}
