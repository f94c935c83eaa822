//! JSONL (JSON Lines) files.
//!
//! Each line is one JSON object. Writes replace the whole file through a
//! temporary sibling so readers never observe a half-written file.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use super::StorageError;

/// JSONL file writer.
pub struct JsonlWriter<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: Serialize> JsonlWriter<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Replace the file contents with `items`.
    ///
    /// The original file is left untouched if any write fails.
    pub fn write_all(&self, items: &[T]) -> Result<usize, StorageError> {
        let lines = items
            .iter()
            .map(serde_json::to_string)
            .collect::<Result<Vec<_>, _>>()?;
        self.write_raw(&lines)
    }

    /// Replace the file contents with already-encoded lines, kept verbatim.
    pub fn write_raw(&self, lines: &[String]) -> Result<usize, StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp = self.temp_path();
        let result = write_lines(&temp, lines);
        if result.is_err() {
            let _ = fs::remove_file(&temp);
            return result;
        }

        fs::rename(&temp, &self.path)?;
        debug!("Wrote {} lines to {:?}", lines.len(), self.path);
        result
    }
}

fn write_lines(path: &Path, lines: &[String]) -> Result<usize, StorageError> {
    let mut writer = BufWriter::new(File::create(path)?);
    for line in lines {
        writeln!(writer, "{}", line)?;
    }
    writer.flush()?;
    writer.get_ref().sync_all()?;
    Ok(lines.len())
}

/// JSONL file reader.
pub struct JsonlReader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> JsonlReader<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Every non-blank line as raw text, parseable or not.
    pub fn read_lines(&self) -> Result<Vec<String>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(&self.path)?);
        let mut lines = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if !line.trim().is_empty() {
                lines.push(line);
            }
        }
        Ok(lines)
    }

    /// Read every parseable line. A missing file reads as empty.
    pub fn read_all(&self) -> Result<Vec<T>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(&self.path)?);
        let mut items = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str(&line) {
                Ok(item) => items.push(item),
                Err(e) => {
                    warn!("Skipping line {} in {:?}: {}", idx + 1, self.path, e);
                }
            }
        }

        debug!("Read {} lines from {:?}", items.len(), self.path);
        Ok(items)
    }
}
