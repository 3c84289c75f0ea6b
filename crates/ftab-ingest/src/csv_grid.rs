//! CSV grid source.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};
use ftab_model::{CellValue, Grid};
use tracing::debug;

use crate::error::{IngestError, Result};

const UTF8_BOM: char = '\u{feff}';

/// A delimited text file held in memory.
///
/// Every cell is text; empty fields become [`CellValue::Empty`]. Rows may
/// have different lengths, and a blank line is an empty row.
#[derive(Debug, Clone)]
pub struct CsvGrid {
    path: PathBuf,
    rows: Vec<Vec<CellValue>>,
}

impl CsvGrid {
    /// Opens a comma-separated file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_delimiter(path, b',')
    }

    /// Opens a file separated by `delimiter`.
    ///
    /// # Errors
    ///
    /// `FileNotFound`, `UnsupportedEncoding` for UTF-16 input, `FileRead`
    /// and `CsvParse`.
    pub fn open_with_delimiter(path: impl AsRef<Path>, delimiter: u8) -> Result<Self> {
        let path = path.as_ref();
        validate_encoding(path)?;

        let data = std::fs::read(path).map_err(|source| IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(delimiter)
            .from_reader(data.as_slice());

        let mut rows = Vec::new();
        let mut record = StringRecord::new();
        loop {
            let start = reader.position().byte();
            rows.extend((0..blank_lines(&data, start)).map(|_| Vec::new()));
            let more = reader
                .read_record(&mut record)
                .map_err(|source| csv_error(path, source))?;
            if !more {
                break;
            }
            rows.push(record.iter().map(CellValue::text).collect::<Vec<_>>());
        }
        if let Some(first) = rows.first_mut().and_then(|row| row.first_mut()) {
            strip_bom(first);
        }

        debug!(path = %path.display(), rows = rows.len(), "loaded CSV grid");
        Ok(Self {
            path: path.to_path_buf(),
            rows,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Grid for CsvGrid {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn row(&self, number: usize) -> Option<&[CellValue]> {
        self.rows.get(number.checked_sub(1)?).map(Vec::as_slice)
    }
}

/// Counts the blank lines the reader will skip from byte `start`.
///
/// `start` may fall between the `\r` and `\n` of the previous record's
/// terminator; that `\n` does not open a line.
fn blank_lines(data: &[u8], start: u64) -> usize {
    let start = usize::try_from(start).unwrap_or(usize::MAX).min(data.len());
    let mut rest = &data[start..];
    if start > 0 && data[start - 1] == b'\r' && rest.first() == Some(&b'\n') {
        rest = &rest[1..];
    }
    let mut count = 0;
    while let [first, tail @ ..] = rest {
        rest = match (first, tail.first()) {
            (b'\r', Some(b'\n')) => &tail[1..],
            (b'\r' | b'\n', _) => tail,
            _ => break,
        };
        count += 1;
    }
    count
}

fn strip_bom(cell: &mut CellValue) {
    if let CellValue::Text(text) = cell
        && let Some(rest) = text.strip_prefix(UTF8_BOM)
    {
        *cell = CellValue::text(rest);
    }
}

fn csv_error(path: &Path, source: csv::Error) -> IngestError {
    if let csv::ErrorKind::Io(io) = source.kind()
        && io.kind() == std::io::ErrorKind::NotFound
    {
        return IngestError::FileNotFound {
            path: path.to_path_buf(),
        };
    }
    IngestError::CsvParse {
        path: path.to_path_buf(),
        source,
    }
}

/// Rejects files with a UTF-16 byte order mark.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes_read == 2 {
        let encoding = match buffer {
            [0xFF, 0xFE] => Some("UTF-16 LE"),
            [0xFE, 0xFF] => Some("UTF-16 BE"),
            _ => None,
        };
        if let Some(encoding) = encoding {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding,
            });
        }
    }
    Ok(())
}
