use std::path::{Path, PathBuf};

use super::model::{CellValue, Table};

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Errors raised by the data layer. File-system and parse failures are
/// fatal for the pipeline run; `EmptyTable` and `ColumnNotFound` are fatal
/// only for the derived panel that raised them.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("not found: {0}")]
    NotFound(PathBuf),

    #[error("reading {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing CSV")]
    Csv(#[from] csv::Error),

    #[error("table has no rows")]
    EmptyTable,

    #[error("column not found: {0}")]
    ColumnNotFound(String),
}

// ---------------------------------------------------------------------------
// CSV table loading
// ---------------------------------------------------------------------------

/// Load a CSV file into a [`Table`], preserving column order and row order.
/// Numeric cells stay numeric; everything else is kept as text.
pub fn load_table(path: &Path) -> Result<Table, DataError> {
    if !path.is_file() {
        return Err(DataError::NotFound(path.to_path_buf()));
    }
    let mut reader = csv::Reader::from_path(path)?;
    let columns: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let mut cells: Vec<Vec<CellValue>> = vec![Vec::new(); columns.len()];
    for result in reader.records() {
        let record = result?;
        for (col, values) in cells.iter_mut().enumerate() {
            values.push(guess_cell_type(record.get(col).unwrap_or("")));
        }
    }

    Ok(Table::new(columns, cells))
}

fn guess_cell_type(s: &str) -> CellValue {
    let s = s.trim();
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    CellValue::Text(s.to_string())
}

// ---------------------------------------------------------------------------
// CSV table serialization (download path)
// ---------------------------------------------------------------------------

/// Serialize a table back to CSV text. Parsing the output yields a table
/// with identical column names, row count and cell values; the exact byte
/// formatting of numbers is not guaranteed to match the original file.
pub fn table_to_csv(table: &Table) -> Result<String, DataError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(table.column_names())?;

    for row in 0..table.n_rows() {
        let record: Vec<String> = (0..table.n_columns())
            .map(|col| {
                table
                    .column_at(col)
                    .and_then(|values| values.get(row))
                    .map(CellValue::to_string)
                    .unwrap_or_default()
            })
            .collect();
        writer.write_record(&record)?;
    }

    let bytes = writer.into_inner().map_err(|e| DataError::Io {
        path: PathBuf::from("<csv buffer>"),
        source: std::io::Error::other(e.to_string()),
    })?;
    // csv::Writer only ever emits the UTF-8 we fed it.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

// ---------------------------------------------------------------------------
// Opaque blobs (slice / plot HTML, validation image)
// ---------------------------------------------------------------------------

/// Read an HTML document as UTF-8 text.
pub fn load_html(path: &Path) -> Result<String, DataError> {
    if !path.is_file() {
        return Err(DataError::NotFound(path.to_path_buf()));
    }
    std::fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a binary artifact (the matrix-validation image) as raw bytes.
pub fn load_bytes(path: &Path) -> Result<Vec<u8>, DataError> {
    if !path.is_file() {
        return Err(DataError::NotFound(path.to_path_buf()));
    }
    std::fs::read(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(dir: &tempfile::TempDir, name: &str, text: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(text.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_typed_cells_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "summary.csv",
            "Height_mm,Area_mm2,Label\n0.0,101.5,base\n10.0,99.25,\n",
        );

        let table = load_table(&path).unwrap();
        assert_eq!(table.column_names(), ["Height_mm", "Area_mm2", "Label"]);
        assert_eq!(table.n_rows(), 2);
        assert_eq!(table.value(0, "Area_mm2"), Some(&CellValue::Float(101.5)));
        assert_eq!(
            table.value(0, "Label"),
            Some(&CellValue::Text("base".into()))
        );
        assert_eq!(table.value(1, "Label"), Some(&CellValue::Null));
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_table(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, DataError::NotFound(_)));
    }

    #[test]
    fn round_trip_preserves_names_rows_and_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "ecc.csv",
            "Height_mm,eccentricity_mm,Centroid_X\n0.0,1.25,3.5\n10.0,5.0,3.625\n20.0,2.75,3.0\n",
        );

        let original = load_table(&path).unwrap();
        let serialized = table_to_csv(&original).unwrap();
        let reparsed_path = write_csv(&dir, "ecc2.csv", &serialized);
        let reparsed = load_table(&reparsed_path).unwrap();

        assert_eq!(original.column_names(), reparsed.column_names());
        assert_eq!(original.n_rows(), reparsed.n_rows());
        for name in original.column_names() {
            let a = original.numeric_column(name).unwrap();
            let b = reparsed.numeric_column(name).unwrap();
            for (x, y) in a.iter().zip(&b) {
                assert!((x - y).abs() < 1e-9, "{name}: {x} vs {y}");
            }
        }
    }
}
