//! CSV ingestion / CSV 导入
//!
//! Turns an uploaded file into validated records. The whole file is parsed
//! and checked before anything is handed back, so a single bad row rejects
//! the batch and nothing reaches the store.
//!
//! The CSV's own `id` column must be present but its value is dropped: every
//! record gets a freshly generated identifier.

use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use thiserror::Error;

use crate::models::Record;

/// Columns every uploaded row must carry / 每行必须包含的列
pub const REQUIRED_FIELDS: [&str; 3] = ["id", "name", "email"];

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("file '{0}' does not have a .csv extension")]
    InvalidExtension(String),
    #[error("file content is not valid UTF-8: {0}")]
    InvalidEncoding(#[from] std::str::Utf8Error),
    #[error("row {row} is missing one of the required fields: id, name, email")]
    MalformedStructure { row: usize },
    /// Reader-level failure. Quoting is lenient, so malformed quotes do not land here.
    #[error("csv parse error: {0}")]
    Parse(#[from] csv::Error),
}

/// Check for a literal, case-sensitive `.csv` extension / 检查 .csv 扩展名
///
/// A bare `.csv` (dot file, no stem) does not count.
pub fn has_csv_extension(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .map_or(false, |ext| ext == "csv")
}

/// Header positions of the required columns / 必需列在表头中的位置
struct RequiredColumns {
    id: Option<usize>,
    name: Option<usize>,
    email: Option<usize>,
}

impl RequiredColumns {
    fn resolve(headers: &StringRecord) -> Self {
        let position = |field: &str| headers.iter().position(|h| h == field);
        let [id, name, email] = REQUIRED_FIELDS;
        Self {
            id: position(id),
            name: position(name),
            email: position(email),
        }
    }

    /// Returns `(name, email)` when all three required fields are present.
    fn extract<'r>(&self, row: &'r StringRecord) -> Option<(&'r str, &'r str)> {
        let field = |idx: Option<usize>| idx.and_then(|i| row.get(i));
        field(self.id)?;
        Some((field(self.name)?, field(self.email)?))
    }
}

/// Parse and validate an uploaded CSV file / 解析并校验上传的 CSV 文件
pub fn ingest(raw: &[u8], file_name: &str) -> Result<Vec<Record>, IngestError> {
    if !has_csv_extension(file_name) {
        return Err(IngestError::InvalidExtension(file_name.to_string()));
    }

    let text = std::str::from_utf8(raw)?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let columns = RequiredColumns::resolve(&headers);

    let mut staged = Vec::new();
    let mut first_invalid: Option<usize> = None;

    for (index, row) in reader.records().enumerate() {
        let row = row?;
        if first_invalid.is_some() {
            continue;
        }
        match columns.extract(&row) {
            Some((name, email)) => staged.push(Record::new(name, email)),
            None => {
                first_invalid = Some(index + 1);
                staged.clear();
            }
        }
    }

    if let Some(row) = first_invalid {
        tracing::debug!("CSV rejected: file={}, first invalid row={}", file_name, row);
        return Err(IngestError::MalformedStructure { row });
    }

    tracing::debug!("CSV parsed: file={}, rows={}", file_name, staged.len());
    Ok(staged)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = "id,name,email\n\
        1,Jane Doe,jane@example.com\n\
        2,John Smith,john@example.com\n\
        3,Anna Lee,anna@example.com\n";

    #[test]
    fn test_has_csv_extension() {
        assert!(has_csv_extension("data.csv"));
        assert!(has_csv_extension("backup.tar.csv"));
        assert!(!has_csv_extension("data.txt"));
        assert!(!has_csv_extension("data.CSV"));
        assert!(!has_csv_extension("data.csv.txt"));
        assert!(!has_csv_extension("data"));
        assert!(!has_csv_extension(".csv"));
    }

    #[test]
    fn test_ingest_valid_file() {
        let records = ingest(VALID.as_bytes(), "data.csv").unwrap();
        assert_eq!(records.len(), 3);

        // File order is preserved / 保持文件顺序
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Jane Doe", "John Smith", "Anna Lee"]);
        assert_eq!(records[1].email, "john@example.com");
    }

    #[test]
    fn test_csv_id_is_replaced() {
        let records = ingest(VALID.as_bytes(), "data.csv").unwrap();
        assert!(records.iter().all(|r| r.id != "1" && r.id != "2" && r.id != "3"));
        assert!(records.iter().all(|r| uuid::Uuid::parse_str(&r.id).is_ok()));
    }

    #[test]
    fn test_rejects_extension_before_reading_content() {
        let err = ingest(VALID.as_bytes(), "data.txt").unwrap_err();
        assert!(matches!(err, IngestError::InvalidExtension(name) if name == "data.txt"));

        let err = ingest(&[0xff, 0xfe], "data.txt").unwrap_err();
        assert!(matches!(err, IngestError::InvalidExtension(_)));
    }

    #[test]
    fn test_empty_body() {
        assert!(ingest(b"", "empty.csv").unwrap().is_empty());
        assert!(ingest(b"id,name,email\n", "header.csv").unwrap().is_empty());
    }

    #[test]
    fn test_blank_lines_do_not_create_rows() {
        let content = "id,name,email\n1,Jane,jane@example.com\n\n2,John,john@example.com\n\n";
        assert_eq!(ingest(content.as_bytes(), "data.csv").unwrap().len(), 2);

        let crlf = "id,name,email\r\n1,Jane,jane@example.com\r\n";
        assert_eq!(ingest(crlf.as_bytes(), "data.csv").unwrap().len(), 1);
    }

    #[test]
    fn test_missing_header_column() {
        let content = "id,name\n1,Jane\n";
        let err = ingest(content.as_bytes(), "error.csv").unwrap_err();
        assert!(matches!(err, IngestError::MalformedStructure { row: 1 }));
    }

    #[test]
    fn test_short_row_rejects_whole_file() {
        let content = "id,name,email\n1,Jane,jane@example.com\n2,John\n3,Anna,anna@example.com\n";
        let err = ingest(content.as_bytes(), "error.csv").unwrap_err();
        assert!(matches!(err, IngestError::MalformedStructure { row: 2 }));
    }

    #[test]
    fn test_presence_not_value() {
        // Empty values still count as present / 空值也算存在
        let content = "id,name,email\n,,\n";
        let records = ingest(content.as_bytes(), "data.csv").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "");
        assert_eq!(records[0].email, "");
    }

    #[test]
    fn test_column_order_and_extra_columns() {
        let content = "email,phone,name,id\njane@example.com,555,Jane,7\n";
        let records = ingest(content.as_bytes(), "data.csv").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Jane");
        assert_eq!(records[0].email, "jane@example.com");
    }

    #[test]
    fn test_quoted_fields() {
        let content = "id,name,email\n\
            1,\"Doe, Jane\",\"jane@example.com\"\n\
            2,\"Say \"\"hi\"\"\",x@example.com\n";
        let records = ingest(content.as_bytes(), "data.csv").unwrap();
        assert_eq!(records[0].name, "Doe, Jane");
        assert_eq!(records[1].name, "Say \"hi\"");
    }

    #[test]
    fn test_unterminated_quote_runs_to_end_of_file() {
        // Last field absorbs the rest of the input / 最后一个字段吞掉剩余内容
        let records = ingest(b"id,name,email\n1,Jane,\"j@x\n", "a.csv").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].email, "j@x\n");

        // Swallowing the email column leaves the row short / 吞掉 email 列后该行不完整
        let content = "id,name,email\n1,\"Jane,jane@example.com\n2,John,john@example.com\n";
        let err = ingest(content.as_bytes(), "a.csv").unwrap_err();
        assert!(matches!(err, IngestError::MalformedStructure { row: 1 }));
    }

    #[test]
    fn test_bom_is_stripped() {
        let content = "\u{feff}id,name,email\n1,Jane,jane@example.com\n";
        assert_eq!(ingest(content.as_bytes(), "data.csv").unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_utf8() {
        let err = ingest(&[b'i', b'd', 0xff, b'\n'], "data.csv").unwrap_err();
        assert!(matches!(err, IngestError::InvalidEncoding(_)));
    }
}
