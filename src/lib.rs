// Public API
pub mod models;
pub mod errors;
pub mod config;
pub mod notify;
pub mod scrapers;
pub mod services;
pub mod store;
pub mod util;

pub use config::Config;
pub use errors::{Result, DebentureError};
pub use models::debenture::{DebentureRecord, RawRow, WatchList, STORE_HEADER};
pub use models::report::{ReportCategory, RunOutcome, RunReport, Stage};
pub use scrapers::base::MarketSource;
pub use services::run_service::RunService;
pub use store::{IncrementalStore, StoreMode};
