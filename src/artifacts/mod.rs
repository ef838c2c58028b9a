pub mod parser;

pub use parser::{DocumentFormat, DocumentParser};
