//! 原始地址数据源

use crate::error::{Error, Result};
use crate::row::{RawAddressRow, RowId};
use std::path::{Path, PathBuf};
use tracing::debug;

/// 行标识列名（导出表格时保留的索引列）
pub const INDEX_COLUMN: &str = "index";

/// 只读的原始地址数据源
pub trait AddressSource {
    /// 按自然顺序返回所有行
    fn rows(&self) -> Result<Vec<RawAddressRow>>;
}

/// 内存数据源
#[derive(Debug, Clone, Default)]
pub struct VecSource {
    rows: Vec<RawAddressRow>,
}

impl VecSource {
    /// 从行列表创建
    pub fn new(rows: Vec<RawAddressRow>) -> Self {
        Self { rows }
    }
}

impl AddressSource for VecSource {
    fn rows(&self) -> Result<Vec<RawAddressRow>> {
        Ok(self.rows.clone())
    }
}

/// CSV 数据源
///
/// 表头中必须包含地址列；若存在 `index` 列，则用其整数值作为行标识，
/// 否则使用从零开始的记录序号。
#[derive(Debug, Clone)]
pub struct CsvAddressSource {
    path: PathBuf,
    column: String,
}

impl CsvAddressSource {
    /// 创建 CSV 数据源
    pub fn new(path: impl Into<PathBuf>, column: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            column: column.into(),
        }
    }

    /// 打开并预先校验（文件存在且包含地址列）
    ///
    /// 校验时完整读取一遍，读到的行不缓存：之后每次 `rows()` 都重新读取文件。
    pub fn open(path: impl Into<PathBuf>, column: impl Into<String>) -> Result<Self> {
        let source = Self::new(path, column);
        source.rows()?;
        Ok(source)
    }

    /// 数据文件路径
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AddressSource for CsvAddressSource {
    fn rows(&self) -> Result<Vec<RawAddressRow>> {
        let mut reader = csv::Reader::from_path(&self.path)
            .map_err(|e| Error::SourceRead(format!("{}: {}", self.path.display(), e)))?;

        let headers = reader.headers()?.clone();
        let address_idx = headers
            .iter()
            .position(|h| h.trim() == self.column)
            .ok_or_else(|| {
                Error::SourceRead(format!(
                    "{}: missing column '{}'",
                    self.path.display(),
                    self.column
                ))
            })?;
        let index_idx = headers.iter().position(|h| h.trim() == INDEX_COLUMN);

        let mut rows = Vec::new();
        for (pos, record) in reader.records().enumerate() {
            let record = record?;
            let id = match index_idx {
                Some(idx) => {
                    let raw = record.get(idx).unwrap_or("").trim();
                    raw.parse::<u64>().map_err(|_| {
                        Error::SourceRead(format!(
                            "{}: row {} has invalid index '{}'",
                            self.path.display(),
                            pos + 1,
                            raw
                        ))
                    })?
                }
                None => pos as u64,
            };
            let text = record.get(address_idx).unwrap_or("").to_string();
            rows.push(RawAddressRow::new(RowId(id), text));
        }

        debug!(path = %self.path.display(), rows = rows.len(), "loaded address source");
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_positional_ids() {
        let file = write_csv("case,address\nA1,12 Elm St\nA2,\"9 Oak Ave, slo\"\n");
        let source = CsvAddressSource::open(file.path(), "address").unwrap();
        let rows = source.rows().unwrap();

        assert_eq!(
            rows,
            vec![
                RawAddressRow::new(RowId(0), "12 Elm St"),
                RawAddressRow::new(RowId(1), "9 Oak Ave, slo"),
            ]
        );
    }

    #[test]
    fn test_index_column() {
        let file = write_csv("index,address\n17,1 A St\n4,2 B St\n");
        let rows = CsvAddressSource::new(file.path(), "address").rows().unwrap();

        assert_eq!(rows[0].id, RowId(17));
        assert_eq!(rows[1].id, RowId(4));
        assert_eq!(rows[1].text, "2 B St");
    }

    #[test]
    fn test_missing_column() {
        let file = write_csv("case,street\nA1,12 Elm St\n");
        let err = CsvAddressSource::open(file.path(), "address").unwrap_err();
        assert!(matches!(err, Error::SourceRead(msg) if msg.contains("address")));
    }

    #[test]
    fn test_bad_index() {
        let file = write_csv("index,address\nabc,1 A St\n");
        let err = CsvAddressSource::new(file.path(), "address")
            .rows()
            .unwrap_err();
        assert!(matches!(err, Error::SourceRead(_)));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = CsvAddressSource::open(dir.path().join("nope.csv"), "address").unwrap_err();
        assert!(matches!(err, Error::SourceRead(_)));
    }

    #[test]
    fn test_vec_source() {
        let source = VecSource::new(vec![RawAddressRow::new(RowId(5), "x")]);
        assert_eq!(source.rows().unwrap().len(), 1);
    }
}
