pub mod generator;
pub mod formatters;

pub use generator::{ReportGenerator, SUPPORTED_FORMATS};
pub use formatters::{MarkdownFormatter, JsonFormatter, TextFormatter};
