use crate::config::Config;
use crate::errors::Result;
use crate::models::debenture::{WatchList, STORE_HEADER};
use crate::models::report::{ReportCategory, RunOutcome, RunReport, Stage};
use crate::scrapers::base::MarketSource;
use crate::services::{extractor, freshness};
use crate::store::report_log::ReportLog;
use crate::store::IncrementalStore;
use crate::util;
use chrono::NaiveDateTime;
use log::{error, info, warn};
use std::sync::Arc;

/// Runs one capture: publish date, freshness gate, table, extraction, store.
/// Every failure ends up in the report instead of being returned.
pub struct RunService {
    config: Config,
    source: Arc<dyn MarketSource + Send + Sync>,
    store: IncrementalStore,
    report_log: ReportLog,
}

impl RunService {
    pub fn new(config: Config, source: Arc<dyn MarketSource + Send + Sync>) -> Self {
        let store = IncrementalStore::new(config.store_path());
        let report_log = ReportLog::new(config.report_path());
        Self {
            config,
            source,
            store,
            report_log,
        }
    }

    pub fn store(&self) -> &IncrementalStore {
        &self.store
    }

    pub fn report_log(&self) -> &ReportLog {
        &self.report_log
    }

    /// Runs the pipeline and appends the report to the report log. Only a
    /// failure to write the report log itself is returned as an error.
    pub async fn run(&self) -> Result<RunReport> {
        let report = self.collect(chrono::Local::now().naive_local()).await;
        self.report_log.append(&report)?;
        Ok(report)
    }

    /// Runs the pipeline without persisting the report.
    pub async fn collect(&self, run_at: NaiveDateTime) -> RunReport {
        let mut report = RunReport::new(run_at);
        let outcome = self.execute(&mut report).await;
        info!("Run finished: {:?}", outcome);
        report.set_outcome(outcome);
        report
    }

    async fn execute(&self, report: &mut RunReport) -> RunOutcome {
        let failed = |stage: Stage| RunOutcome::Failed { stage };

        // Publish date
        let raw_date = match self.source.fetch_publish_date().await {
            Ok(date) => {
                report.set(ReportCategory::PrimaryRequest, "succeeded");
                date
            }
            Err(e) if e.is_transport() => {
                error!("{} request failed: {}", self.source.source_name(), e);
                report.set(ReportCategory::PrimaryRequest, format!("request failed: {}", e));
                return failed(Stage::PublishDate);
            }
            Err(e) => {
                warn!("Publish date not available: {}", e);
                report.set(ReportCategory::PrimaryRequest, "succeeded");
                report.set(ReportCategory::DataAvailability, format!("not available: {}", e));
                return failed(Stage::PublishDate);
            }
        };

        let publish_date = match util::parse_publish_date(&raw_date) {
            Ok(date) => date,
            Err(e) => {
                warn!("Unparseable publish date {:?}: {}", raw_date, e);
                report.set(ReportCategory::DataAvailability, format!("not available: {}", e));
                return failed(Stage::PublishDate);
            }
        };
        report.set(ReportCategory::DataAvailability, "yes");
        let date_label = util::format_br_date(&publish_date);

        // Freshness gate
        let status = match self.store.status() {
            Ok(status) => status,
            Err(e) => {
                error!("Could not inspect {}: {}", self.store.path().display(), e);
                report.set(ReportCategory::FreshnessCheck, format!("store check failed: {}", e));
                return failed(Stage::Persist);
            }
        };
        if !freshness::should_fetch(&publish_date, status.last_modified, &self.config.timezone) {
            info!("Store already holds the table of {}", date_label);
            report.set(ReportCategory::FreshnessCheck, "already up to date");
            return RunOutcome::UpToDate;
        }
        report.set(
            ReportCategory::FreshnessCheck,
            format!("updating with data from {}", date_label),
        );

        // Table
        let rows = match self.source.fetch_table(&publish_date).await {
            Ok(rows) => rows,
            Err(e) if e.is_transport() => {
                error!("Table request failed: {}", e);
                report.set(ReportCategory::PrimaryRequest, format!("table request failed: {}", e));
                return failed(Stage::Table);
            }
            Err(e) => {
                warn!("Table not available: {}", e);
                report.set(ReportCategory::DataAvailability, format!("table not available: {}", e));
                return failed(Stage::Table);
            }
        };

        // Extract and persist
        let watch_list = WatchList::new(&self.config.watch_list);
        let extraction = extractor::extract(&rows, watch_list, &publish_date);
        info!(
            "Matched {} of {} watched debentures in {} rows",
            extraction.records.len(),
            self.config.watch_list.len(),
            rows.len()
        );

        if let Err(e) = self
            .store
            .append(Some(&STORE_HEADER[..]), &extraction.records, status.mode)
        {
            error!("Could not write {}: {}", self.store.path().display(), e);
            report.set(ReportCategory::RowsCaptured, format!("write failed: {}", e));
            return failed(Stage::Persist);
        }

        let missing = extraction.residual.codes();
        if missing.is_empty() {
            report.set(ReportCategory::RowsCaptured, "all");
        } else {
            warn!("Not published: {}", missing.join(", "));
            report.set(ReportCategory::RowsCaptured, format!("except: {}", missing.join(", ")));
        }
        RunOutcome::Captured { missing }
    }
}
