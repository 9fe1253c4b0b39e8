use std::fmt;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// CellValue – a single cell of a loaded table
// ---------------------------------------------------------------------------

/// A dynamically-typed table cell mirroring the dtypes that show up in the
/// upstream pipeline's CSV exports.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Null,
}

impl CellValue {
    /// Interpret the cell as an `f64` for statistics.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Null => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Table – one loaded CSV, column-major
// ---------------------------------------------------------------------------

/// An in-memory table: ordered column names plus column-major cells.
/// All columns have the same length. Read-only for the session once loaded.
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<String>,
    cells: Vec<Vec<CellValue>>,
}

impl Table {
    /// Build a table from parallel column names and column-major cells.
    /// The loader enforces equal column lengths.
    pub fn new(columns: Vec<String>, cells: Vec<Vec<CellValue>>) -> Self {
        debug_assert_eq!(columns.len(), cells.len());
        debug_assert!(cells.windows(2).all(|w| w[0].len() == w[1].len()));
        Table { columns, cells }
    }

    /// Column names in display order.
    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    pub fn n_rows(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows() == 0
    }

    /// Cells of a named column, in row order.
    pub fn column(&self, name: &str) -> Option<&[CellValue]> {
        let idx = self.columns.iter().position(|c| c == name)?;
        Some(&self.cells[idx])
    }

    /// Cells of a column by positional index, in row order.
    pub fn column_at(&self, idx: usize) -> Option<&[CellValue]> {
        self.cells.get(idx).map(Vec::as_slice)
    }

    /// A named column as `f64` values, or None if the column is missing
    /// or contains any non-numeric cell.
    pub fn numeric_column(&self, name: &str) -> Option<Vec<f64>> {
        self.column(name)?
            .iter()
            .map(CellValue::as_f64)
            .collect::<Option<Vec<f64>>>()
    }

    /// Single cell by (row, column name).
    pub fn value(&self, row: usize, name: &str) -> Option<&CellValue> {
        self.column(name)?.get(row)
    }
}

// ---------------------------------------------------------------------------
// SliceArtifact – one precomputed slice visualization on disk
// ---------------------------------------------------------------------------

/// Descriptor of one slice HTML file. Content is read lazily on selection,
/// not held here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceArtifact {
    pub file_name: String,
    pub path: PathBuf,
    /// Print height in mm, parsed from `slice_z=<digits>mm` in the name.
    pub height_key: u32,
}

impl SliceArtifact {
    /// Heading shown above the embedded slice view.
    pub fn title(&self) -> String {
        format!("Slice z={} mm", self.height_key)
    }
}

// ---------------------------------------------------------------------------
// EccentricitySchema – logical → physical column mapping
// ---------------------------------------------------------------------------

/// Resolved column names of the eccentricity table. Resolved once at load
/// time so the fuzzy centroid-x match lives in exactly one place.
#[derive(Debug, Clone)]
pub struct EccentricitySchema {
    pub height: String,
    pub eccentricity: String,
    /// Absent in older pipeline exports.
    pub angle: Option<String>,
    /// First column whose name contains both "centroid" and "x",
    /// case-insensitively. Absent in some exports.
    pub centroid_x: Option<String>,
}

impl EccentricitySchema {
    pub const HEIGHT: &'static str = "Height_mm";
    pub const ECCENTRICITY: &'static str = "eccentricity_mm";
    pub const ANGLE: &'static str = "angle_from_bottom_deg";

    /// Resolve logical fields against a table's physical columns.
    pub fn resolve(table: &Table) -> Self {
        let named = |name: &str| {
            table
                .column_names()
                .iter()
                .find(|c| c.as_str() == name)
                .cloned()
        };
        let centroid_x = table
            .column_names()
            .iter()
            .find(|c| {
                let lower = c.to_lowercase();
                lower.contains("centroid") && lower.contains('x')
            })
            .cloned();

        EccentricitySchema {
            height: named(Self::HEIGHT).unwrap_or_else(|| Self::HEIGHT.to_string()),
            eccentricity: named(Self::ECCENTRICITY)
                .unwrap_or_else(|| Self::ECCENTRICITY.to_string()),
            angle: named(Self::ANGLE),
            centroid_x,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ecc_table(columns: &[&str]) -> Table {
        let names: Vec<String> = columns.iter().map(|c| c.to_string()).collect();
        let cells = vec![Vec::new(); names.len()];
        Table::new(names, cells)
    }

    #[test]
    fn schema_resolves_centroid_x_case_insensitively() {
        let table = ecc_table(&["Height_mm", "eccentricity_mm", "Centroid_X_mm"]);
        let schema = EccentricitySchema::resolve(&table);
        assert_eq!(schema.centroid_x.as_deref(), Some("Centroid_X_mm"));
        assert_eq!(schema.angle, None);
    }

    #[test]
    fn schema_takes_first_centroid_x_candidate() {
        let table = ecc_table(&["centroid_x", "CentroidX_translated"]);
        let schema = EccentricitySchema::resolve(&table);
        assert_eq!(schema.centroid_x.as_deref(), Some("centroid_x"));
    }

    #[test]
    fn numeric_column_rejects_mixed_cells() {
        let table = Table::new(
            vec!["a".into(), "b".into()],
            vec![
                vec![CellValue::Float(1.0), CellValue::Integer(2)],
                vec![CellValue::Float(1.0), CellValue::Text("x".into())],
            ],
        );
        assert_eq!(table.numeric_column("a"), Some(vec![1.0, 2.0]));
        assert_eq!(table.numeric_column("b"), None);
    }
}
