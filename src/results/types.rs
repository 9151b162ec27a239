use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// RDF term kind of a bound value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TermKind {
	/// IRI reference.
	Uri,
	/// Plain or language-tagged literal.
	Literal,
	/// Literal with an explicit datatype (older endpoints).
	TypedLiteral,
	/// Blank node.
	Bnode,
	/// Anything an endpoint invents beyond the above.
	#[serde(other)]
	Unknown,
}

/// One bound cell.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Term {
	/// Term kind; absent in hand-written envelopes.
	#[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
	pub kind: Option<TermKind>,
	/// Lexical form. This is the only part used for shaping.
	pub value: String,
	/// Datatype IRI of a typed literal.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub datatype: Option<String>,
	/// Language tag of a literal.
	#[serde(rename = "xml:lang", default, skip_serializing_if = "Option::is_none")]
	pub lang: Option<String>,
}

impl Term {
	/// Untyped cell holding `value`.
	pub fn new(value: impl Into<String>) -> Self {
		Self {
			kind: None,
			value: value.into(),
			datatype: None,
			lang: None,
		}
	}
}

/// One solution: the subset of variables bound in that row.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Row(HashMap<String, Term>);

impl Row {
	/// Text bound to `field` in this row, if any.
	pub fn get(&self, field: &str) -> Option<&str> {
		self.0.get(field).map(|term| term.value.as_str())
	}

	/// Full term bound to `field`.
	pub fn term(&self, field: &str) -> Option<&Term> {
		self.0.get(field)
	}
}

impl<K, V> FromIterator<(K, V)> for Row
where
	K: Into<String>,
	V: Into<String>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self(
			iter.into_iter()
				.map(|(k, v)| (k.into(), Term::new(v)))
				.collect(),
		)
	}
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
/// `head` section.
pub struct Head {
	/// Declared variables in projection order.
	#[serde(default)]
	pub vars: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
/// `results` section.
pub struct Results {
	/// Solutions in endpoint order.
	#[serde(default)]
	pub bindings: Vec<Row>,
}

/// A SELECT result set as returned by an endpoint.
///
/// The variable order in `head.vars` is significant: fields not named in a
/// config are picked by position from it.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct ResultEnvelope {
	/// Column declaration.
	#[serde(default)]
	pub head: Head,
	/// Rows.
	#[serde(default)]
	pub results: Results,
}

impl ResultEnvelope {
	/// Builds an envelope from variables and rows.
	pub fn new(variables: Vec<String>, rows: Vec<Row>) -> Self {
		Self {
			head: Head { vars: variables },
			results: Results { bindings: rows },
		}
	}

	/// Parses the JSON text of a result document.
	pub fn from_json(text: &str) -> Result<Self> {
		Ok(serde_json::from_str(text)?)
	}

	/// Declared variables in column order.
	pub fn variables(&self) -> &[String] {
		&self.head.vars
	}

	/// Rows in result order.
	pub fn rows(&self) -> &[Row] {
		&self.results.bindings
	}
}
