pub mod error;
pub mod query;
pub mod reader;

pub use error::SetupError;
pub use query::{run_queries, QueryOutcome, QueryReport, TokenQuery, COMPLETION_MESSAGE};
pub use reader::{CallOptions, TokenReader};
