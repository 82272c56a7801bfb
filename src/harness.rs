/*
 * File: /src/harness.rs
 * Created Date: Saturday, March 8th 2025
 * Author: Zihan
 * -----
 * Last Modified: Sunday, 9th March 2025 1:27:40 pm
 * Modified By: the developer formerly known as Zihan at <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 */
use std::error::Error;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Local;
use log::{info, warn};
use ndarray::Array2;
use ndarray_npy::{ReadNpyExt, WriteNpyExt};
use ndarray_rand::rand::rngs::StdRng;
use ndarray_rand::rand::SeedableRng;

use crate::config::BenchConfig;
use crate::engine::OrderConfig;
use crate::matrix::BinaryMatrix;
use crate::{order_all, order_matrix};

fn timestamp() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

/// Times one ordering per size and writes `Size,Time` rows to `out`.
pub fn run_bench<W: Write>(config: &BenchConfig, out: &mut W) -> Result<(), Box<dyn Error>> {
    let method = config.algorithm.name();
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    info!(
        "[method: {}] [{}] Benchmark up to n = {}, density {}",
        method,
        timestamp(),
        config.max_size,
        config.density
    );

    writeln!(out, "Size,Time")?;
    for size in config.sizes() {
        let matrix = BinaryMatrix::random_using(size, config.density, &mut rng);
        let start_time = Instant::now();
        let result = order_matrix(&matrix, &OrderConfig::default());
        let elapsed = start_time.elapsed();

        writeln!(out, "{},{:.3}", size, elapsed.as_secs_f64())?;
        info!(
            "[method: {}] [{}] n = {} done in {:.3}s, {} refinements",
            method,
            timestamp(),
            size,
            elapsed.as_secs_f64(),
            result.stats.refinements()
        );
    }
    out.flush()?;
    Ok(())
}

/// Reads an `.npy` integer matrix stored as i64, i32 or u8.
pub fn read_matrix(path: &Path) -> Result<BinaryMatrix, Box<dyn Error>> {
    if let Ok(data) = Array2::<i64>::read_npy(File::open(path)?) {
        return Ok(BinaryMatrix::new(&data)?);
    }
    if let Ok(data) = Array2::<i32>::read_npy(File::open(path)?) {
        return Ok(BinaryMatrix::new(&data)?);
    }
    let data = Array2::<u8>::read_npy(File::open(path)?)?;
    Ok(BinaryMatrix::new(&data)?)
}

/// `dir/name.npy` -> `dir/name.ordered.npy`
pub fn ordered_path(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{}.ordered.npy", stem))
}

/// Orders every file in parallel, writes the ordered matrices next to the
/// inputs and prints both permutations per file to `out`.
pub fn run_order<W: Write>(paths: &[PathBuf], out: &mut W) -> Result<(), Box<dyn Error>> {
    let load_start = Instant::now();
    let mut matrices = Vec::with_capacity(paths.len());
    for path in paths {
        let matrix = read_matrix(path).map_err(|e| {
            warn!("[{}] Failed to load {}: {}", timestamp(), path.display(), e);
            e
        })?;
        matrices.push(matrix);
    }
    info!(
        "[{}] Loaded {} matrices in {}ms",
        timestamp(),
        matrices.len(),
        load_start.elapsed().as_millis()
    );

    let order_start = Instant::now();
    let results = order_all(&matrices, &OrderConfig::default());
    info!(
        "[{}] Ordered {} matrices in {:.3}s",
        timestamp(),
        results.len(),
        order_start.elapsed().as_secs_f64()
    );

    for (path, result) in paths.iter().zip(&results) {
        let target = ordered_path(path);
        result.ordered_matrix.write_npy(File::create(&target)?)?;
        writeln!(out, "{}:", path.display())?;
        writeln!(out, "  rows    {:?}", result.ordered_rows)?;
        writeln!(out, "  columns {:?}", result.ordered_columns)?;
        info!("[{}] Wrote {}", timestamp(), target.display());
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Algorithm;
    use crate::util::is_doubly_lexical;
    use ndarray::array;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "doubly_lexical_{}_{}",
            name,
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_run_bench_csv() {
        let config = BenchConfig {
            algorithm: Algorithm::DoublyLexical,
            max_size: 25,
            density: 0.4,
            seed: Some(11),
        };
        let mut out = Vec::new();
        run_bench(&config, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Size,Time");
        assert_eq!(lines.len(), 3);
        let sizes: Vec<&str> = lines[1..]
            .iter()
            .map(|line| line.split(',').next().unwrap())
            .collect();
        assert_eq!(sizes, vec!["10", "20"]);
        for line in &lines[1..] {
            let time = line.split(',').nth(1).unwrap();
            assert!(time.parse::<f64>().unwrap() >= 0.0);
            assert_eq!(time.split('.').nth(1).map(str::len), Some(3));
        }
    }

    #[test]
    fn test_ordered_path() {
        assert_eq!(
            ordered_path(Path::new("data/graph.npy")),
            PathBuf::from("data/graph.ordered.npy")
        );
        assert_eq!(ordered_path(Path::new("m")), PathBuf::from("m.ordered.npy"));
    }

    #[test]
    fn test_run_order_roundtrip() {
        let dir = scratch_dir("order");
        let wide = dir.join("wide.npy");
        let narrow = dir.join("narrow.npy");
        array![[0i64, 1, 1], [1, 0, 1], [0, 0, 1]]
            .write_npy(File::create(&wide).unwrap())
            .unwrap();
        array![[0u8, 1], [1, 1]]
            .write_npy(File::create(&narrow).unwrap())
            .unwrap();

        let mut out = Vec::new();
        run_order(&[wide.clone(), narrow.clone()], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("wide.npy:"));
        assert!(text.contains("narrow.npy:"));

        let ordered = Array2::<u8>::read_npy(File::open(ordered_path(&wide)).unwrap()).unwrap();
        assert!(is_doubly_lexical(ordered.view()));
        assert_eq!(ordered.iter().filter(|&&v| v == 1).count(), 5);
        let ordered = Array2::<u8>::read_npy(File::open(ordered_path(&narrow)).unwrap()).unwrap();
        assert_eq!(ordered, array![[1u8, 1], [1, 0]]);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_run_order_rejects_bad_input() {
        let dir = scratch_dir("reject");
        let bad = dir.join("bad.npy");
        array![[0i32, 2], [1, 1]]
            .write_npy(File::create(&bad).unwrap())
            .unwrap();

        let mut out = Vec::new();
        let error = run_order(&[bad], &mut out).unwrap_err();
        assert_eq!(error.to_string(), "Entry (0, 1) is 2, expected 0 or 1");
        assert!(run_order(&[dir.join("missing.npy")], &mut out).is_err());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
