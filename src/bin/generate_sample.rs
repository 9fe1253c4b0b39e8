//! Generate a demo `data/` directory so the dashboard runs out of the box:
//! both summary CSVs, a run of `slice_z=<z>mm.html` files, the two
//! interactive plot documents, and the matrix-validation image.

use std::fs;
use std::path::Path;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// One synthetic wall slice: height plus aligned measurements.
struct SliceRow {
    height_mm: f64,
    area_mm2: f64,
    perimeter_mm: f64,
    centroid_x_mm: f64,
    centroid_y_mm: f64,
    eccentricity_mm: f64,
    angle_deg: f64,
}

fn generate_rows(rng: &mut SimpleRng) -> Vec<SliceRow> {
    // 21 slices, 0..=200 mm in 10 mm steps, with a slow centroid drift
    // that peaks around two thirds of the wall height.
    (0..=20)
        .map(|i| {
            let height_mm = i as f64 * 10.0;
            let drift = 4.0 * (height_mm / 200.0 * std::f64::consts::PI * 0.66).sin();
            let centroid_x_mm = 150.0 + drift + rng.gauss(0.0, 0.15);
            let centroid_y_mm = 75.0 + rng.gauss(0.0, 0.15);
            let dx = centroid_x_mm - 150.0;
            let dy = centroid_y_mm - 75.0;
            SliceRow {
                height_mm,
                area_mm2: rng.gauss(10_500.0, 120.0),
                perimeter_mm: rng.gauss(1_020.0, 8.0),
                centroid_x_mm,
                centroid_y_mm,
                eccentricity_mm: (dx * dx + dy * dy).sqrt(),
                angle_deg: if height_mm > 0.0 {
                    (dx / height_mm).atan().to_degrees()
                } else {
                    0.0
                },
            }
        })
        .collect()
}

fn write_aligned_csv(path: &Path, rows: &[SliceRow]) {
    let mut writer = csv::Writer::from_path(path).expect("Failed to create aligned CSV");
    writer
        .write_record([
            "Height_mm",
            "Area_mm2",
            "Perimeter_mm",
            "Centroid_X_mm",
            "Centroid_Y_mm",
        ])
        .unwrap();
    for r in rows {
        writer
            .write_record([
                format!("{:.1}", r.height_mm),
                format!("{:.3}", r.area_mm2),
                format!("{:.3}", r.perimeter_mm),
                format!("{:.4}", r.centroid_x_mm),
                format!("{:.4}", r.centroid_y_mm),
            ])
            .unwrap();
    }
    writer.flush().unwrap();
}

fn write_eccentricity_csv(path: &Path, rows: &[SliceRow]) {
    let mut writer = csv::Writer::from_path(path).expect("Failed to create eccentricity CSV");
    writer
        .write_record([
            "Height_mm",
            "eccentricity_mm",
            "angle_from_bottom_deg",
            "Centroid_X_mm",
            "Centroid_Y_mm",
        ])
        .unwrap();
    for r in rows {
        writer
            .write_record([
                format!("{:.1}", r.height_mm),
                format!("{:.4}", r.eccentricity_mm),
                format!("{:.6}", r.angle_deg),
                format!("{:.4}", r.centroid_x_mm),
                format!("{:.4}", r.centroid_y_mm),
            ])
            .unwrap();
    }
    writer.flush().unwrap();
}

/// A standalone HTML document with an inline SVG ring for one slice.
fn slice_html(r: &SliceRow) -> String {
    let radius = (r.area_mm2 / std::f64::consts::PI).sqrt();
    format!(
        "<!DOCTYPE html>\n<html>\n<head><title>Slice z={z} mm</title></head>\n<body>\n\
         <h1>Slice z={z} mm</h1>\n\
         <svg width=\"600\" height=\"400\" viewBox=\"0 0 300 150\">\n\
         <circle cx=\"{cx:.2}\" cy=\"{cy:.2}\" r=\"{r_outer:.2}\" fill=\"none\" stroke=\"steelblue\" stroke-width=\"4\"/>\n\
         <circle cx=\"{cx:.2}\" cy=\"{cy:.2}\" r=\"1.5\" fill=\"crimson\"/>\n\
         </svg>\n\
         <p>Area: {area:.1} mm², centroid ({cx:.2}, {cy:.2})</p>\n\
         </body>\n</html>\n",
        z = r.height_mm as i64,
        cx = r.centroid_x_mm / 2.0,
        cy = r.centroid_y_mm,
        r_outer = radius / 2.0,
        area = r.area_mm2,
    )
}

/// A standalone HTML document with an inline SVG polyline plot.
fn plot_html(title: &str, points: &[(f64, f64)]) -> String {
    let (x_max, y_max) = points.iter().fold((1e-9_f64, 1e-9_f64), |(xm, ym), &(x, y)| {
        (xm.max(x), ym.max(y.abs()))
    });
    let coords: Vec<String> = points
        .iter()
        .map(|&(x, y)| {
            format!(
                "{:.1},{:.1}",
                40.0 + x / x_max * 500.0,
                360.0 - (y / y_max) * 160.0
            )
        })
        .collect();
    format!(
        "<!DOCTYPE html>\n<html>\n<head><title>{title}</title></head>\n<body>\n\
         <h1>{title}</h1>\n\
         <svg width=\"600\" height=\"400\">\n\
         <polyline points=\"{}\" fill=\"none\" stroke=\"steelblue\" stroke-width=\"2\"/>\n\
         </svg>\n</body>\n</html>\n",
        coords.join(" "),
    )
}

/// Side-by-side gradient panels standing in for the before/after
/// transformation scatter render.
fn write_matrix_image(path: &Path) {
    let (w, h) = (600u32, 300u32);
    let img = image::RgbImage::from_fn(w, h, |x, y| {
        let left = x < w / 2;
        let fx = (x % (w / 2)) as f64 / (w / 2) as f64;
        let fy = y as f64 / h as f64;
        let base = (fx * 160.0 + fy * 60.0) as u8;
        if left {
            image::Rgb([60 + base / 2, 80, 200 - base / 2])
        } else {
            image::Rgb([200 - base / 2, 120, 60 + base / 2])
        }
    });
    img.save(path).expect("Failed to write validation image");
}

fn main() {
    let mut rng = SimpleRng::new(42);
    let data_dir = Path::new("data");
    fs::create_dir_all(data_dir).expect("Failed to create data directory");

    let rows = generate_rows(&mut rng);

    write_aligned_csv(&data_dir.join("aligned_slice_summary_translated.csv"), &rows);
    write_eccentricity_csv(
        &data_dir.join("aligned_slice_summary_with_eccentricity_and_angles.csv"),
        &rows,
    );

    for r in &rows {
        let name = format!("slice_z={}mm.html", r.height_mm as i64);
        fs::write(data_dir.join(name), slice_html(r)).expect("Failed to write slice HTML");
    }

    let drift: Vec<(f64, f64)> = rows
        .iter()
        .map(|r| (r.height_mm, r.centroid_x_mm - rows[0].centroid_x_mm))
        .collect();
    fs::write(
        data_dir.join("centroid_drift_vertical_spline.html"),
        plot_html("Centroid Drift (vertical spline)", &drift),
    )
    .expect("Failed to write centroid plot");

    let ecc: Vec<(f64, f64)> = rows.iter().map(|r| (r.height_mm, r.eccentricity_mm)).collect();
    fs::write(
        data_dir.join("eccentricity_vs_height.html"),
        plot_html("Eccentricity vs Height", &ecc),
    )
    .expect("Failed to write eccentricity plot");

    write_matrix_image(&data_dir.join("Validate Matrix Transformation.png"));

    println!(
        "Wrote {} slices and 5 auxiliary artifacts to {}",
        rows.len(),
        data_dir.display()
    );
}
