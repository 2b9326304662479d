//! Newline-delimited JSON stores.
//!
//! Candidate stores and run logs share one format: one JSON object per line,
//! appended, never rewritten in place. Readers skip lines they cannot decode.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::domain::error::{StoreError, StoreResult};

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError + '_ {
    move |source| StoreError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// Read every decodable record from `path`.
///
/// A missing file reads as empty. Blank lines and lines that fail to decode
/// as `R` are skipped, including lines that are not valid UTF-8.
pub fn read_jsonl<R: DeserializeOwned>(path: &Path) -> StoreResult<Vec<R>> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(io_err(path)(e)),
    };

    let mut rows = Vec::new();
    for (idx, line) in BufReader::new(file).split(b'\n').enumerate() {
        let line = line.map_err(io_err(path))?;
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        match serde_json::from_slice::<R>(&line) {
            Ok(row) => rows.push(row),
            Err(e) => debug!(path = %path.display(), line = idx + 1, error = %e, "skipping undecodable line"),
        }
    }
    Ok(rows)
}

fn ensure_parent(path: &Path) -> StoreResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err(parent))?;
    }
    Ok(())
}

fn write_lines<R: Serialize>(file: File, path: &Path, records: &[R]) -> StoreResult<()> {
    let mut w = BufWriter::new(file);
    for record in records {
        let line = serde_json::to_string(record)?;
        writeln!(w, "{line}").map_err(io_err(path))?;
    }
    w.flush().map_err(io_err(path))
}

/// Append `records` to `path`, one per line, creating parent directories.
pub fn append_jsonl<R: Serialize>(path: &Path, records: &[R]) -> StoreResult<()> {
    ensure_parent(path)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(io_err(path))?;
    write_lines(file, path, records)
}

/// Replace `path` with `records`, one per line.
pub fn write_jsonl<R: Serialize>(path: &Path, records: &[R]) -> StoreResult<()> {
    ensure_parent(path)?;
    let file = File::create(path).map_err(io_err(path))?;
    write_lines(file, path, records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::FlightRecord;

    fn flight(price: i64) -> FlightRecord {
        FlightRecord {
            airline: "AirDemo".to_string(),
            origin: "Paris".to_string(),
            dest: "Tokyo".to_string(),
            date: "2026-01-01".to_string(),
            price,
        }
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let rows: Vec<FlightRecord> = read_jsonl(&dir.path().join("nope.jsonl")).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_append_creates_parents_and_accumulates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data/flights.jsonl");
        append_jsonl(&path, &[flight(100)]).unwrap();
        append_jsonl(&path, &[flight(200), flight(300)]).unwrap();

        let rows: Vec<FlightRecord> = read_jsonl(&path).unwrap();
        let prices: Vec<i64> = rows.iter().map(|r| r.price).collect();
        assert_eq!(prices, vec![100, 200, 300]);
    }

    #[test]
    fn test_write_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flights.jsonl");
        write_jsonl(&path, &[flight(1), flight(2)]).unwrap();
        write_jsonl(&path, &[flight(3)]).unwrap();
        let rows: Vec<FlightRecord> = read_jsonl(&path).unwrap();
        assert_eq!(rows, vec![flight(3)]);
    }

    #[test]
    fn test_junk_lines_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flights.jsonl");
        let good = serde_json::to_string(&flight(150)).unwrap();
        std::fs::write(
            &path,
            format!("{good}\nnot json\n\n{{\"airline\":7}}\n{{\"truncated\": \n{good}\n"),
        )
        .unwrap();

        let rows: Vec<FlightRecord> = read_jsonl(&path).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_non_utf8_lines_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flights.jsonl");
        let mut bytes = serde_json::to_vec(&flight(100)).unwrap();
        bytes.extend_from_slice(b"\n\xff\xfe garbage\r\n");
        bytes.extend_from_slice(&serde_json::to_vec(&flight(200)).unwrap());
        bytes.extend_from_slice(b"\r\n");
        std::fs::write(&path, bytes).unwrap();

        let rows: Vec<FlightRecord> = read_jsonl(&path).unwrap();
        let prices: Vec<i64> = rows.iter().map(|r| r.price).collect();
        assert_eq!(prices, vec![100, 200]);
    }

    #[test]
    fn test_loosely_typed_rows_are_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flights.jsonl");
        std::fs::write(
            &path,
            "{\"airline\":\"A\",\"origin\":\"Paris\",\"dest\":\"Tokyo\",\"date\":\"2026-01-01\",\"price\":420.0}\n",
        )
        .unwrap();

        let rows: Vec<FlightRecord> = read_jsonl(&path).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].price, 420);
    }
}
