use chrono_tz::Tz;
use std::path::PathBuf;

pub const DEFAULT_MARKET_URL: &str =
    "https://www.anbima.com.br/informacoes/merc-sec-debentures/default.asp";
pub const DEFAULT_RESULTS_BASE_URL: &str =
    "https://www.anbima.com.br/informacoes/merc-sec-debentures/resultados/mdeb_";
// Changes for DI-indexed tables
pub const DEFAULT_RESULTS_SUFFIX: &str = "_ipca_spread.asp";

pub const DEFAULT_WATCH_LIST: [&str; 5] = ["AGRU12", "CART22", "PETR27", "STEN23", "TAEE17"];

pub struct Config {
    pub data_dir: String,
    pub store_file: String,
    pub report_file: String,
    pub market_url: String,
    pub results_base_url: String,
    pub results_suffix: String,
    pub request_timeout_secs: u64,
    pub timezone: Tz,
    pub watch_list: Vec<String>,
}

impl Config {
    pub fn new() -> Self {
        Self {
            data_dir: ".".to_string(),
            store_file: "My Debentures Data.csv".to_string(),
            report_file: "Event-log.txt".to_string(),
            market_url: DEFAULT_MARKET_URL.to_string(),
            results_base_url: DEFAULT_RESULTS_BASE_URL.to_string(),
            results_suffix: DEFAULT_RESULTS_SUFFIX.to_string(),
            request_timeout_secs: 5,
            timezone: chrono_tz::America::Sao_Paulo,
            watch_list: DEFAULT_WATCH_LIST.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn with_data_dir(mut self, dir: &str) -> Self {
        self.data_dir = dir.to_string();
        self
    }

    pub fn with_store_file(mut self, name: &str) -> Self {
        self.store_file = name.to_string();
        self
    }

    pub fn with_report_file(mut self, name: &str) -> Self {
        self.report_file = name.to_string();
        self
    }

    pub fn with_market_url(mut self, url: &str) -> Self {
        self.market_url = url.to_string();
        self
    }

    pub fn with_results_url(mut self, base: &str, suffix: &str) -> Self {
        self.results_base_url = base.to_string();
        self.results_suffix = suffix.to_string();
        self
    }

    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    pub fn with_timezone(mut self, tz: Tz) -> Self {
        self.timezone = tz;
        self
    }

    pub fn with_watch_list<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.watch_list = codes.into_iter().map(Into::into).collect();
        self
    }

    /// Full path of the CSV history
    pub fn store_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.store_file)
    }

    /// Full path of the run report log
    pub fn report_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.report_file)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
