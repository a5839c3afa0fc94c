pub mod debenture;
pub mod report;
