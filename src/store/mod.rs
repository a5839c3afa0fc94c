pub mod history;
pub mod report_log;

use crate::errors::Result;
use crate::models::debenture::DebentureRecord;
use csv::{ReaderBuilder, WriterBuilder};
use log::{debug, info};
use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// How the next batch is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreMode {
    /// The file does not exist yet: create it and write the header first.
    Create,
    /// The file exists: append records only.
    Append,
}

/// State of the store at run start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStatus {
    pub last_modified: SystemTime,
    pub mode: StoreMode,
}

/// Append-only CSV history of captured quotes.
///
/// Batches are buffered through one CSV writer and flushed at the end. There
/// is no transactional guarantee: a failure mid-batch can leave part of the
/// batch on disk.
pub struct IncrementalStore {
    path: PathBuf,
}

impl IncrementalStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Last write time of the store and the mode the next batch must use.
    /// A missing store reports the UNIX epoch. Any other metadata failure is
    /// returned, so an unreadable store is never recreated over.
    pub fn status(&self) -> Result<StoreStatus> {
        match fs::metadata(&self.path) {
            Ok(meta) => Ok(StoreStatus {
                last_modified: meta.modified().unwrap_or(UNIX_EPOCH),
                mode: StoreMode::Append,
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("{} not found, it will be created", self.path.display());
                Ok(StoreStatus {
                    last_modified: UNIX_EPOCH,
                    mode: StoreMode::Create,
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Writes one batch. The header is only written in `Create` mode.
    pub fn append(
        &self,
        header: Option<&[&str]>,
        records: &[DebentureRecord],
        mode: StoreMode,
    ) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = match mode {
            StoreMode::Create => OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&self.path)?,
            StoreMode::Append => OpenOptions::new().append(true).create(true).open(&self.path)?,
        };

        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);

        if mode == StoreMode::Create {
            if let Some(header) = header {
                writer.write_record(header)?;
            }
        }

        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;

        info!(
            "Wrote {} records to {} ({:?})",
            records.len(),
            self.path.display(),
            mode
        );
        Ok(())
    }

    /// Reads every record back. A missing store is an empty history.
    ///
    /// Fields are matched by position, so stores whose header text differs
    /// still load as long as the column order holds.
    pub fn read_records(&self) -> Result<Vec<DebentureRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = ReaderBuilder::new().has_headers(true).from_path(&self.path)?;
        let mut records = Vec::new();
        for row in reader.records() {
            records.push(row?.deserialize(None)?);
        }
        Ok(records)
    }
}
