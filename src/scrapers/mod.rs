pub mod anbima;
pub mod base;
