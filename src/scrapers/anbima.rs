use crate::config::Config;
use crate::errors::{Result, DebentureError};
use crate::models::debenture::RawRow;
use crate::scrapers::base::MarketSource;
use crate::util;
use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, info};
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;

const DATE_INPUT_SELECTOR: &str = r#"form[name="Mercado"] input[type="text"]"#;
// The quotes are in the third table of the results page
const TABLE_POSITION: usize = 2;

/// ANBIMA secondary-market debenture scraper
pub struct AnbimaScraper {
    client: Client,
    market_url: String,
    results_base_url: String,
    results_suffix: String,
}

impl AnbimaScraper {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent("Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko)")
            .build()
            .map_err(DebentureError::RequestError)?;

        Ok(Self {
            client,
            market_url: config.market_url.clone(),
            results_base_url: config.results_base_url.clone(),
            results_suffix: config.results_suffix.clone(),
        })
    }

    async fn get_page(&self, url: &str) -> Result<String> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}

#[async_trait]
impl MarketSource for AnbimaScraper {
    fn source_name(&self) -> &'static str {
        "ANBIMA"
    }

    async fn fetch_publish_date(&self) -> Result<String> {
        let body = self.get_page(&self.market_url).await?;
        let date = parse_publish_date_field(&body)?;
        info!("ANBIMA table published as of {}", date);
        Ok(date)
    }

    async fn fetch_table(&self, date: &NaiveDate) -> Result<Vec<RawRow>> {
        let url = util::results_url(&self.results_base_url, date, &self.results_suffix);
        info!("Fetching debenture table from {}", url);

        let body = self.get_page(&url).await?;
        let rows = parse_table_rows(&body)?;

        debug!("Parsed {} rows", rows.len());
        Ok(rows)
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| DebentureError::DataError(format!("bad selector {}: {}", css, e)))
}

/// Reads the date field of the market form.
pub fn parse_publish_date_field(html: &str) -> Result<String> {
    let document = Html::parse_document(html);
    let input = selector(DATE_INPUT_SELECTOR)?;

    document
        .select(&input)
        .next()
        .and_then(|el| el.value().attr("value"))
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| DebentureError::Unavailable("publish date field not found".to_string()))
}

/// Extracts the `<td>` texts of every row in the quotes table. Header rows
/// (only `<th>`) are dropped.
pub fn parse_table_rows(html: &str) -> Result<Vec<RawRow>> {
    let document = Html::parse_document(html);
    let table_sel = selector("table")?;
    let row_sel = selector("tr")?;
    let cell_sel = selector("td")?;

    let table = document
        .select(&table_sel)
        .nth(TABLE_POSITION)
        .ok_or_else(|| DebentureError::Unavailable("quotes table not found".to_string()))?;

    let rows = table
        .select(&row_sel)
        .map(|row| row.select(&cell_sel).map(cell_text).collect::<RawRow>())
        .filter(|cells| !cells.is_empty())
        .collect();

    Ok(rows)
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text()
        .flat_map(|t| t.split_whitespace())
        .collect::<Vec<_>>()
        .join(" ")
}
