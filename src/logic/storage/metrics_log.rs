//! Prediction Log
//!
//! Append-only JSONL file of `PredictionRecord`s, one per line.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::logic::metrics::PredictionRecord;

pub struct MetricsLog {
    path: PathBuf,
}

impl MetricsLog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append records in order and sync. Returns the number written.
    ///
    /// All or nothing: the batch is encoded up front and written in one go,
    /// and a failed write truncates the file back to its prior length so a
    /// retry never duplicates rows.
    pub fn append(&self, records: &[PredictionRecord]) -> std::io::Result<usize> {
        if records.is_empty() {
            return Ok(0);
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let batch = encode_batch(records)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        append_batch(&mut file, &batch)?;
        Ok(records.len())
    }

    /// Read every record. A missing log is empty; malformed lines are skipped.
    pub fn read_all(&self) -> std::io::Result<Vec<PredictionRecord>> {
        read_records(&self.path)
    }
}

/// Destination of a batch append that can be rolled back
trait LogSink: Write {
    fn end(&self) -> std::io::Result<u64>;
    fn truncate(&mut self, len: u64) -> std::io::Result<()>;
    fn sync(&mut self) -> std::io::Result<()>;
}

impl LogSink for File {
    fn end(&self) -> std::io::Result<u64> {
        Ok(self.metadata()?.len())
    }

    fn truncate(&mut self, len: u64) -> std::io::Result<()> {
        self.set_len(len)
    }

    fn sync(&mut self) -> std::io::Result<()> {
        self.sync_data()
    }
}

fn encode_batch(records: &[PredictionRecord]) -> std::io::Result<Vec<u8>> {
    let mut batch = Vec::new();
    for record in records {
        serde_json::to_writer(&mut batch, record)?;
        batch.push(b'\n');
    }
    Ok(batch)
}

fn append_batch<S: LogSink>(sink: &mut S, batch: &[u8]) -> std::io::Result<()> {
    let start = sink.end()?;

    let result = sink
        .write_all(batch)
        .and_then(|_| sink.flush())
        .and_then(|_| sink.sync());

    if let Err(e) = result {
        if let Err(rollback) = sink.truncate(start) {
            log::error!("Failed to roll back partial log append: {}", rollback);
        }
        return Err(e);
    }
    Ok(())
}

/// Read all records from a log file
pub fn read_records(path: &Path) -> std::io::Result<Vec<PredictionRecord>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<PredictionRecord>(&line) {
            Ok(record) => records.push(record),
            Err(_) => skipped += 1,
        }
    }

    if skipped > 0 {
        log::warn!("Skipped {} malformed line(s) in {:?}", skipped, path);
    }
    Ok(records)
}
