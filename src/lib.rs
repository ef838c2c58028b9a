pub mod artifacts;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod lineage;
pub mod reports;
pub mod types;

pub use error::{GraphError, Result};
