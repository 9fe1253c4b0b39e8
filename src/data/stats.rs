use super::loader::DataError;
use super::model::{EccentricitySchema, Table};

// ---------------------------------------------------------------------------
// Derived values – pure functions of a loaded table
// ---------------------------------------------------------------------------

/// Descriptive statistics of one numeric column, pandas-describe style.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDescribe {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n−1 denominator); NaN when count < 2.
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// Aggregates of a single named numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnExtrema {
    pub max: f64,
    pub min: f64,
    pub mean: f64,
    /// Sample variance (n−1 denominator), matching `std`.
    pub variance: f64,
    pub std: f64,
}

/// The row of maximum eccentricity, with its height and angle.
#[derive(Debug, Clone, PartialEq)]
pub struct EccentricityExtremum {
    pub max_eccentricity: f64,
    pub height_at_max: f64,
    /// None when the table carries no angle column.
    pub angle_at_max: Option<f64>,
}

/// Bottom-slice reference: the first row's height and centroid-x.
#[derive(Debug, Clone, PartialEq)]
pub struct BottomReference {
    pub height: f64,
    /// 0.0 when no centroid-x-like column exists.
    pub centroid_x: f64,
}

// ---------------------------------------------------------------------------
// describe
// ---------------------------------------------------------------------------

/// Descriptive statistics for every numeric column of the table.
/// Non-numeric columns are skipped.
pub fn describe(table: &Table) -> Result<Vec<ColumnDescribe>, DataError> {
    if table.is_empty() {
        return Err(DataError::EmptyTable);
    }

    let mut out = Vec::new();
    for name in table.column_names() {
        let Some(values) = table.numeric_column(name) else {
            continue;
        };
        let mut sorted = values.clone();
        sorted.sort_by(f64::total_cmp);

        out.push(ColumnDescribe {
            column: name.clone(),
            count: values.len(),
            mean: mean(&values),
            std: sample_std(&values),
            min: sorted[0],
            q25: percentile(&sorted, 0.25),
            median: percentile(&sorted, 0.50),
            q75: percentile(&sorted, 0.75),
            max: sorted[sorted.len() - 1],
        });
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// column_extrema
// ---------------------------------------------------------------------------

/// Max, min, mean, sample variance and sample std of one numeric column.
pub fn column_extrema(table: &Table, column: &str) -> Result<ColumnExtrema, DataError> {
    let values = table
        .numeric_column(column)
        .ok_or_else(|| DataError::ColumnNotFound(column.to_string()))?;
    if values.is_empty() {
        return Err(DataError::EmptyTable);
    }

    let variance = sample_variance(&values);
    Ok(ColumnExtrema {
        max: values.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
        min: values.iter().cloned().fold(f64::INFINITY, f64::min),
        mean: mean(&values),
        variance,
        std: variance.sqrt(),
    })
}

// ---------------------------------------------------------------------------
// eccentricity_extremum / bottom_reference
// ---------------------------------------------------------------------------

/// Locate the row of maximum eccentricity. Ties are broken by first
/// occurrence in row order, so the result is deterministic.
pub fn eccentricity_extremum(
    table: &Table,
    schema: &EccentricitySchema,
) -> Result<EccentricityExtremum, DataError> {
    let ecc = table
        .numeric_column(&schema.eccentricity)
        .ok_or_else(|| DataError::ColumnNotFound(schema.eccentricity.clone()))?;
    if ecc.is_empty() {
        return Err(DataError::EmptyTable);
    }

    let (row, &max_eccentricity) = ecc
        .iter()
        .enumerate()
        .max_by(|(ia, a), (ib, b)| a.total_cmp(b).then(ib.cmp(ia)))
        .unwrap_or((0, &ecc[0]));

    let height_at_max = table
        .value(row, &schema.height)
        .and_then(|v| v.as_f64())
        .ok_or_else(|| DataError::ColumnNotFound(schema.height.clone()))?;

    let angle_at_max = schema
        .angle
        .as_deref()
        .and_then(|col| table.value(row, col))
        .and_then(|v| v.as_f64());

    Ok(EccentricityExtremum {
        max_eccentricity,
        height_at_max,
        angle_at_max,
    })
}

/// Height and centroid-x of the bottom slice (first row).
pub fn bottom_reference(
    table: &Table,
    schema: &EccentricitySchema,
) -> Result<BottomReference, DataError> {
    if table.is_empty() {
        return Err(DataError::EmptyTable);
    }
    let height = table
        .value(0, &schema.height)
        .and_then(|v| v.as_f64())
        .ok_or_else(|| DataError::ColumnNotFound(schema.height.clone()))?;

    let centroid_x = schema
        .centroid_x
        .as_deref()
        .and_then(|col| table.value(0, col))
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);

    Ok(BottomReference { height, centroid_x })
}

// ---------------------------------------------------------------------------
// Numeric helpers
// ---------------------------------------------------------------------------

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn sample_variance(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (n - 1) as f64
}

fn sample_std(values: &[f64]) -> f64 {
    sample_variance(values).sqrt()
}

/// Percentile with linear interpolation over a pre-sorted slice.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let pos = p * (n - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;

    fn table_of(columns: &[(&str, &[f64])]) -> Table {
        let names = columns.iter().map(|(n, _)| n.to_string()).collect();
        let cells = columns
            .iter()
            .map(|(_, vals)| vals.iter().map(|&v| CellValue::Float(v)).collect())
            .collect();
        Table::new(names, cells)
    }

    fn approx(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-6, "{a} vs {b}");
    }

    #[test]
    fn describe_matches_sample_statistics() {
        let table = table_of(&[("v", &[1.0, 2.0, 3.0, 4.0])]);
        let described = describe(&table).unwrap();
        assert_eq!(described.len(), 1);
        let d = &described[0];
        assert_eq!(d.count, 4);
        approx(d.mean, 2.5);
        approx(d.std, 1.2909944);
        approx(d.min, 1.0);
        approx(d.q25, 1.75);
        approx(d.median, 2.5);
        approx(d.q75, 3.25);
        approx(d.max, 4.0);
    }

    #[test]
    fn describe_single_row_has_nan_std() {
        let table = table_of(&[("v", &[7.0])]);
        let d = &describe(&table).unwrap()[0];
        approx(d.mean, 7.0);
        assert!(d.std.is_nan());
    }

    #[test]
    fn describe_empty_table_errors() {
        let table = table_of(&[("v", &[])]);
        assert!(matches!(describe(&table), Err(DataError::EmptyTable)));
    }

    #[test]
    fn extrema_of_area_column() {
        let table = table_of(&[("Area_mm2", &[10.0, 20.0, 30.0])]);
        let e = column_extrema(&table, "Area_mm2").unwrap();
        approx(e.max, 30.0);
        approx(e.min, 10.0);
        approx(e.mean, 20.0);
        approx(e.variance, 100.0);
        approx(e.std, 10.0);
    }

    #[test]
    fn extrema_of_missing_column_errors() {
        let table = table_of(&[("Area_mm2", &[10.0])]);
        assert!(matches!(
            column_extrema(&table, "Height_mm"),
            Err(DataError::ColumnNotFound(_))
        ));
    }

    #[test]
    fn eccentricity_tie_takes_first_occurrence() {
        let table = table_of(&[
            ("Height_mm", &[0.0, 10.0, 20.0]),
            ("eccentricity_mm", &[1.0, 5.0, 5.0]),
            ("angle_from_bottom_deg", &[0.0, 1.5, 3.0]),
        ]);
        let schema = EccentricitySchema::resolve(&table);
        let e = eccentricity_extremum(&table, &schema).unwrap();
        approx(e.max_eccentricity, 5.0);
        approx(e.height_at_max, 10.0);
        approx(e.angle_at_max.unwrap(), 1.5);
    }

    #[test]
    fn missing_angle_column_yields_none() {
        let table = table_of(&[
            ("Height_mm", &[0.0, 10.0]),
            ("eccentricity_mm", &[1.0, 2.0]),
        ]);
        let schema = EccentricitySchema::resolve(&table);
        let e = eccentricity_extremum(&table, &schema).unwrap();
        approx(e.height_at_max, 10.0);
        assert_eq!(e.angle_at_max, None);
    }

    #[test]
    fn bottom_reference_reads_first_row() {
        let table = table_of(&[
            ("Height_mm", &[0.0, 10.0]),
            ("eccentricity_mm", &[1.0, 2.0]),
            ("Centroid_X", &[3.5, 3.75]),
        ]);
        let schema = EccentricitySchema::resolve(&table);
        let r = bottom_reference(&table, &schema).unwrap();
        approx(r.height, 0.0);
        approx(r.centroid_x, 3.5);
    }

    #[test]
    fn bottom_reference_defaults_centroid_x_to_zero() {
        let table = table_of(&[
            ("Height_mm", &[2.5, 10.0]),
            ("eccentricity_mm", &[1.0, 2.0]),
        ]);
        let schema = EccentricitySchema::resolve(&table);
        let r = bottom_reference(&table, &schema).unwrap();
        approx(r.height, 2.5);
        approx(r.centroid_x, 0.0);
    }
}
