//! Errors raised while shaping a result set.

use thiserror::Error;

/// Failure of a single shaping call. No partial output accompanies an error.
#[derive(Debug, Error)]
pub enum Error {
	/// A row has no binding for a field that plays a mandatory role, or the
	/// role could not be resolved to a field at all.
	#[error("row {row}: missing mandatory field for role `{role}`{}", field_suffix(.field))]
	MissingMandatoryField {
		/// Role name as it appears in the config, e.g. `key1`.
		role: &'static str,
		/// Field the role resolved to, if any.
		field: Option<String>,
		/// Zero-based row index.
		row: usize,
	},

	/// The result set has no rows, so there is nothing to start from.
	#[error("cannot build {what} from an empty result set")]
	EmptyInput {
		/// What was being built.
		what: &'static str,
	},

	/// The parent/child relation loops back onto `key`.
	#[error("cycle detected in hierarchy at `{key}`")]
	CyclicHierarchy {
		/// First key seen twice on one root-to-leaf path.
		key: String,
	},

	/// The hierarchy is deeper than the configured limit.
	#[error("hierarchy deeper than {limit} levels")]
	DepthExceeded {
		/// Configured `max_depth`.
		limit: usize,
	},

	/// A cell expected to hold a number does not parse as one.
	#[error("row {row}: value `{value}` of field `{field}` is not a number")]
	InvalidNumber {
		/// Field holding the value.
		field: String,
		/// Raw cell text.
		value: String,
		/// Zero-based row index.
		row: usize,
	},

	/// The input document is not a result envelope.
	#[error("malformed result envelope: {0}")]
	Envelope(#[from] serde_json::Error),
}

fn field_suffix(field: &Option<String>) -> String {
	match field {
		Some(name) => format!(" (`{name}`)"),
		None => " (unresolved)".to_string(),
	}
}

/// Crate result alias.
pub type Result<T> = std::result::Result<T, Error>;
