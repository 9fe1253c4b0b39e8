use std::path::Path;

use super::loader::DataError;
use super::model::SliceArtifact;

// ---------------------------------------------------------------------------
// Slice artifact discovery
// ---------------------------------------------------------------------------

/// Scan a directory for slice visualization files and return them ordered
/// by print height, ascending. Non-matching files are skipped silently;
/// a missing or unreadable directory is an error.
pub fn locate_slices(dir: &Path) -> Result<Vec<SliceArtifact>, DataError> {
    if !dir.is_dir() {
        return Err(DataError::NotFound(dir.to_path_buf()));
    }
    let entries = std::fs::read_dir(dir).map_err(|source| DataError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut slices = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| DataError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let file_name = entry.file_name().to_string_lossy().into_owned();
        if !is_slice_html(&file_name) {
            continue;
        }
        slices.push(SliceArtifact {
            height_key: height_key(&file_name),
            path: entry.path(),
            file_name,
        });
    }

    // Stable sort keeps directory order for equal keys, so the height-0
    // fallback stays deterministic.
    slices.sort_by_key(|s| s.height_key);
    Ok(slices)
}

/// Artifact filter: `slice_z=` prefix with a `mm.html` suffix, matching
/// the upstream pipeline's export names.
fn is_slice_html(name: &str) -> bool {
    name.strip_prefix("slice_z=")
        .is_some_and(|rest| rest.ends_with("mm.html"))
}

/// Height in mm from the digit run in `slice_z=<digits>mm`. Names without
/// an extractable digit run sort as height 0 rather than being rejected;
/// the upstream exporter always emits digits, so this only shows up with
/// hand-made files.
fn height_key(name: &str) -> u32 {
    let Some(rest) = name.strip_prefix("slice_z=") else {
        return 0;
    };
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..digits_end];
    if !rest[digits_end..].starts_with("mm") {
        return 0;
    }
    digits.parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &tempfile::TempDir, name: &str) {
        std::fs::write(dir.path().join(name), "<html></html>").unwrap();
    }

    #[test]
    fn orders_by_height_and_skips_non_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir, "slice_z=100mm.html");
        touch(&dir, "readme.txt");
        touch(&dir, "slice_z=50mm.html");
        touch(&dir, "slice_z=5mm.html");

        let names: Vec<String> = locate_slices(dir.path())
            .unwrap()
            .into_iter()
            .map(|s| s.file_name)
            .collect();
        assert_eq!(
            names,
            ["slice_z=5mm.html", "slice_z=50mm.html", "slice_z=100mm.html"]
        );
    }

    #[test]
    fn keys_are_non_decreasing() {
        let dir = tempfile::tempdir().unwrap();
        for z in [30, 0, 120, 90, 60] {
            touch(&dir, &format!("slice_z={z}mm.html"));
        }
        let slices = locate_slices(dir.path()).unwrap();
        assert!(slices.windows(2).all(|w| w[0].height_key <= w[1].height_key));
    }

    #[test]
    fn unparseable_height_falls_back_to_zero() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir, "slice_z=mm.html");
        touch(&dir, "slice_z=10mm.html");

        let slices = locate_slices(dir.path()).unwrap();
        assert_eq!(slices[0].file_name, "slice_z=mm.html");
        assert_eq!(slices[0].height_key, 0);
        assert_eq!(slices[1].height_key, 10);
    }

    #[test]
    fn missing_directory_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = locate_slices(&dir.path().join("absent")).unwrap_err();
        assert!(matches!(err, DataError::NotFound(_)));
    }

    #[test]
    fn other_extensions_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir, "slice_z=10mm.svg");
        touch(&dir, "slice_z=20mm.html");
        let slices = locate_slices(dir.path()).unwrap();
        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].height_key, 20);
    }
}
