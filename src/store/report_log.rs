use crate::errors::Result;
use crate::models::report::RunReport;
use log::debug;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Append-only text log of run reports, one block per run.
pub struct ReportLog {
    path: PathBuf,
}

impl ReportLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, report: &RunReport) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        file.write_all(report.render().as_bytes())?;
        file.flush()?;

        debug!("Report appended to {}", self.path.display());
        Ok(())
    }
}
