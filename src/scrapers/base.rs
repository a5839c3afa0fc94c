use crate::errors::Result;
use crate::models::debenture::RawRow;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Base trait for publishers of the debenture table
#[async_trait]
pub trait MarketSource {
    /// Short name used in logs
    fn source_name(&self) -> &'static str;

    /// Fetch the "as of" date of the current table, as published (`DD/MM/YYYY`)
    async fn fetch_publish_date(&self) -> Result<String>;

    /// Fetch the rows of the table published for `date`
    async fn fetch_table(&self, date: &NaiveDate) -> Result<Vec<RawRow>>;
}
