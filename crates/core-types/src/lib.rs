pub mod compare;
pub mod enums;
pub mod error;
pub mod structs;
pub mod verdict;

// Re-export the core types to provide a clean public API.
pub use compare::{smaller, EPSILON};
pub use enums::FailingRule;
pub use error::CoreError;
pub use structs::{FundamentalsRecord, StockCode, ValuationSnapshot};
pub use verdict::Verdict;
