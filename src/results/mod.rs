//! The `application/sparql-results+json` envelope.

mod types;

pub use types::{Head, ResultEnvelope, Results, Row, Term, TermKind};

/// MIME type requested from query endpoints.
pub const RESULTS_MIME: &str = "application/sparql-results+json";
