//! Infrastructure layer - External service integrations
//!
//! This layer contains:
//! - Alloy-based provider construction and the connected `Session`
//! - The `sol!`-generated token binding behind the `TokenReader` seam

pub mod ethereum;
