use crate::errors::Result;
use crate::models::report::RunReport;
use log::{info, warn};
use std::path::Path;

/// Delivers a report that needs an operator's attention.
pub trait NotificationSink {
    fn notify(&self, report: &RunReport, attachment: &Path) -> Result<()>;
}

/// Sink that emits the alert through the logger.
pub struct LogSink;

impl NotificationSink for LogSink {
    fn notify(&self, report: &RunReport, attachment: &Path) -> Result<()> {
        warn!("Debenture run needs attention (report log: {})", attachment.display());
        for line in report.render().lines() {
            warn!("{}", line);
        }
        Ok(())
    }
}

/// Hands the report to `sink` when the run failed or was incomplete.
/// Returns whether a notification was sent.
pub fn notify_if_needed(sink: &dyn NotificationSink, report: &RunReport, attachment: &Path) -> Result<bool> {
    if !report.needs_attention() {
        info!("Run complete, no notification needed");
        return Ok(false);
    }
    sink.notify(report, attachment)?;
    Ok(true)
}
