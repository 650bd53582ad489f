//! Query sequence for the token accessors
//!
//! Runs name, symbol and total supply in that order. A failed call is logged
//! and recorded, then the sequence moves on; nothing here aborts the run.

use std::fmt;

use tracing::{debug, error, info};

use super::reader::{CallOptions, TokenReader};

/// Final line logged once every query has been attempted
pub const COMPLETION_MESSAGE: &str = "CPOP token query completed";

/// One of the three read-only accessors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenQuery {
    Name,
    Symbol,
    TotalSupply,
}

impl TokenQuery {
    /// Execution order
    pub const ALL: [TokenQuery; 3] = [TokenQuery::Name, TokenQuery::Symbol, TokenQuery::TotalSupply];

    /// Prefix used on success lines
    pub fn label(self) -> &'static str {
        match self {
            TokenQuery::Name => "Token name",
            TokenQuery::Symbol => "Token symbol",
            TokenQuery::TotalSupply => "Total supply",
        }
    }

    /// Field name used on failure lines
    pub fn field(self) -> &'static str {
        match self {
            TokenQuery::Name => "name",
            TokenQuery::Symbol => "symbol",
            TokenQuery::TotalSupply => "total supply",
        }
    }

    /// Solidity accessor behind this query
    pub fn method(self) -> &'static str {
        match self {
            TokenQuery::Name => "name()",
            TokenQuery::Symbol => "symbol()",
            TokenQuery::TotalSupply => "totalSupply()",
        }
    }
}

impl fmt::Display for TokenQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field())
    }
}

/// Result of a single query, value already rendered as text
#[derive(Debug)]
pub struct QueryOutcome {
    pub query: TokenQuery,
    pub result: Result<String, anyhow::Error>,
}

impl QueryOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// Human-readable log line for this outcome
    pub fn line(&self) -> String {
        match &self.result {
            Ok(value) => format!("{}: {}", self.query.label(), value),
            Err(err) => format!("Failed to query token {}: {:#}", self.query.field(), err),
        }
    }
}

/// Everything `run_queries` observed, in execution order
#[derive(Debug, Default)]
pub struct QueryReport {
    outcomes: Vec<QueryOutcome>,
}

impl QueryReport {
    pub fn outcomes(&self) -> &[QueryOutcome] {
        &self.outcomes
    }

    pub fn outcome(&self, query: TokenQuery) -> Option<&QueryOutcome> {
        self.outcomes.iter().find(|o| o.query == query)
    }

    /// Rendered value of a successful query
    pub fn value(&self, query: TokenQuery) -> Option<&str> {
        self.outcome(query)
            .and_then(|o| o.result.as_ref().ok())
            .map(String::as_str)
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// The messages `run_queries` logged, in order, completion line last
    pub fn lines(&self) -> Vec<String> {
        self.outcomes
            .iter()
            .map(QueryOutcome::line)
            .chain(std::iter::once(COMPLETION_MESSAGE.to_string()))
            .collect()
    }
}

/// Run the three token queries against `reader`.
///
/// Each query is attempted regardless of how the previous one went. Failures
/// are logged at error level and kept in the report; they never propagate.
pub async fn run_queries(reader: &dyn TokenReader, opts: &CallOptions) -> QueryReport {
    let mut outcomes = Vec::with_capacity(TokenQuery::ALL.len());

    for query in TokenQuery::ALL {
        debug!(method = query.method(), ?opts, "Calling token accessor");
        let result = match query {
            TokenQuery::Name => reader.name(opts).await,
            TokenQuery::Symbol => reader.symbol(opts).await,
            TokenQuery::TotalSupply => reader.total_supply(opts).await.map(|v| v.to_string()),
        };

        let outcome = QueryOutcome { query, result };
        if outcome.is_ok() {
            info!("{}", outcome.line());
        } else {
            error!("{}", outcome.line());
        }
        outcomes.push(outcome);
    }

    info!("{}", COMPLETION_MESSAGE);
    QueryReport { outcomes }
}
