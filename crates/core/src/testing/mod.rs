//! Testing utilities and mock implementations for E2E tests.
//!
//! This module provides mock implementations of the external service traits,
//! allowing pipeline and server tests to run without real infrastructure.
//!
//! # Example
//!
//! ```rust,ignore
//! use supportscore_core::testing::{MockOracle, MockTicketSource};
//!
//! let oracle = MockOracle::new();
//! let source = MockTicketSource::new();
//!
//! // Configure mock responses
//! oracle.push_response(r#"[{"ticket_number": "T-1", "ticket_score": 8}]"#).await;
//! source.push_records("Acme Corp", vec![/* records */]).await;
//!
//! // Use in a ScoringPipeline...
//! ```

mod mock_oracle;
mod mock_source;

pub use mock_oracle::MockOracle;
pub use mock_source::MockTicketSource;
