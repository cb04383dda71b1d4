/// CSV export: building the file, and handing it to the browser as a
/// download through an object URL.
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

const SEPARATOR: char = ';';

/// Build CSV text. Starts with a UTF-8 BOM so spreadsheet tools pick the
/// right encoding.
pub fn build_csv<R>(headers: &[&str], rows: R) -> String
where
    R: IntoIterator<Item = Vec<String>>,
{
    let mut csv_content = String::new();
    csv_content.push('\u{FEFF}');

    let header_line: Vec<String> = headers.iter().map(|h| escape_csv_cell(h)).collect();
    csv_content.push_str(&header_line.join(&SEPARATOR.to_string()));
    csv_content.push('\n');

    for row in rows {
        let escaped_row: Vec<String> = row.iter().map(|cell| escape_csv_cell(cell)).collect();
        csv_content.push_str(&escaped_row.join(&SEPARATOR.to_string()));
        csv_content.push('\n');
    }
    csv_content
}

/// Quote a cell containing the separator, quotes or line breaks.
fn escape_csv_cell(cell: &str) -> String {
    if cell.contains(SEPARATOR) || cell.contains('"') || cell.contains('\n') || cell.contains('\r')
    {
        let escaped = cell.replace('"', "\"\"");
        format!("\"{}\"", escaped)
    } else {
        cell.to_string()
    }
}

/// Timestamped file name, e.g. `spare-parts-20240601-1530.csv`.
pub fn export_file_name(prefix: &str, now: chrono::DateTime<chrono::Local>) -> String {
    format!("{}-{}.csv", prefix, now.format("%Y%m%d-%H%M"))
}

/// Object URL for a generated file. Revoked when dropped.
pub struct BlobUrl {
    url: String,
}

impl BlobUrl {
    pub fn from_csv(content: &str) -> Result<Self, String> {
        let array = js_sys::Array::new();
        array.push(&wasm_bindgen::JsValue::from_str(content));

        let properties = BlobPropertyBag::new();
        properties.set_type("text/csv;charset=utf-8;");

        let blob = Blob::new_with_str_sequence_and_options(&array, &properties)
            .map_err(|e| format!("Failed to create blob: {:?}", e))?;
        let url = Url::create_object_url_with_blob(&blob)
            .map_err(|e| format!("Failed to create object URL: {:?}", e))?;
        log::debug!("created object URL {}", url);
        Ok(Self { url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Start the browser download through a temporary anchor.
    pub fn download(&self, filename: &str) -> Result<(), String> {
        let window = web_sys::window().ok_or("No window object")?;
        let document = window.document().ok_or("No document object")?;
        let body = document.body().ok_or("No body element")?;

        let anchor = document
            .create_element("a")
            .map_err(|e| format!("Failed to create anchor: {:?}", e))?
            .dyn_into::<HtmlAnchorElement>()
            .map_err(|e| format!("Failed to cast to anchor: {:?}", e))?;

        anchor.set_href(&self.url);
        anchor.set_download(filename);
        anchor
            .style()
            .set_property("display", "none")
            .map_err(|e| format!("Failed to set style: {:?}", e))?;

        body.append_child(&anchor)
            .map_err(|e| format!("Failed to append anchor: {:?}", e))?;
        anchor.click();
        body.remove_child(&anchor)
            .map_err(|e| format!("Failed to remove anchor: {:?}", e))?;
        Ok(())
    }
}

impl Drop for BlobUrl {
    fn drop(&mut self) {
        log::debug!("revoking object URL {}", self.url);
        if let Err(e) = Url::revoke_object_url(&self.url) {
            log::warn!("Failed to revoke URL: {:?}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_build_csv_escapes_cells() {
        let csv = build_csv(
            &["Part number", "Name"],
            vec![
                vec!["PFR-7".to_string(), "Roller; feed".to_string()],
                vec!["BLT-8".to_string(), "Belt \"HD\"".to_string()],
            ],
        );
        assert_eq!(
            csv,
            "\u{FEFF}Part number;Name\nPFR-7;\"Roller; feed\"\nBLT-8;\"Belt \"\"HD\"\"\"\n"
        );
    }

    #[test]
    fn test_build_csv_headers_only() {
        let csv = build_csv(&["A", "B"], Vec::<Vec<String>>::new());
        assert_eq!(csv, "\u{FEFF}A;B\n");
    }

    #[test]
    fn test_export_file_name() {
        let now = chrono::Local.with_ymd_and_hms(2024, 6, 1, 15, 30, 0).unwrap();
        assert_eq!(export_file_name("spare-parts", now), "spare-parts-20240601-1530.csv");
    }
}
