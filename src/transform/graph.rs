//! Rows → `{nodes, links}`.

use std::collections::HashMap;

use log::debug;

use super::config::GraphConfig;
use super::fields::{FieldSelection, Role};
use super::types::{Graph, GraphLink, GraphNode};
use crate::error::Result;
use crate::results::{ResultEnvelope, Row};

/// Roles read by [`build_graph`], in positional fallback order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GraphRole {
	/// Source node key (mandatory).
	Key1,
	/// Target node key (mandatory).
	Key2,
	/// Source node label.
	Label1,
	/// Target node label.
	Label2,
	/// Source node value.
	Value1,
	/// Target node value.
	Value2,
}

impl Role for GraphRole {
	const ORDER: &'static [Self] = &[
		Self::Key1,
		Self::Key2,
		Self::Label1,
		Self::Label2,
		Self::Value1,
		Self::Value2,
	];

	fn name(self) -> &'static str {
		match self {
			Self::Key1 => "key1",
			Self::Key2 => "key2",
			Self::Label1 => "label1",
			Self::Label2 => "label2",
			Self::Value1 => "value1",
			Self::Value2 => "value2",
		}
	}

	fn is_mandatory(self) -> bool {
		matches!(self, Self::Key1 | Self::Key2)
	}
}

struct Endpoint<'r> {
	key: &'r str,
	label: &'r str,
	value: Option<&'r str>,
}

impl<'r> Endpoint<'r> {
	fn read(
		selection: &FieldSelection<GraphRole>,
		row: &'r Row,
		index: usize,
		[key, label, value]: [GraphRole; 3],
	) -> Result<Self> {
		let key = selection.require(row, key, index)?;
		Ok(Self {
			key,
			label: selection.read(row, label).unwrap_or(key),
			value: selection.read(row, value),
		})
	}
}

fn intern<'r>(
	nodes: &mut Vec<GraphNode>,
	key_to_idx: &mut HashMap<&'r str, usize>,
	endpoint: Endpoint<'r>,
) -> usize {
	*key_to_idx.entry(endpoint.key).or_insert_with(|| {
		nodes.push(GraphNode {
			key: endpoint.key.to_owned(),
			label: endpoint.label.to_owned(),
			value: endpoint.value.map(str::to_owned),
		});
		nodes.len() - 1
	})
}

/// Converts each row into a `key1 → key2` link, deduplicating nodes by key.
///
/// Nodes are numbered in order of first appearance, `key1` before `key2`
/// within a row. Every row yields exactly one link, self-loops and repeated
/// pairs included. A node keeps the label and value of the row that
/// introduced it. An empty result set gives an empty graph.
pub fn build_graph(envelope: &ResultEnvelope, config: &GraphConfig) -> Result<Graph> {
	let selection = FieldSelection::resolve(envelope.variables(), config);
	let mut graph = Graph::default();
	let mut key_to_idx: HashMap<&str, usize> = HashMap::new();

	for (index, row) in envelope.rows().iter().enumerate() {
		let source = Endpoint::read(
			&selection,
			row,
			index,
			[GraphRole::Key1, GraphRole::Label1, GraphRole::Value1],
		)?;
		let target = Endpoint::read(
			&selection,
			row,
			index,
			[GraphRole::Key2, GraphRole::Label2, GraphRole::Value2],
		)?;

		let source = intern(&mut graph.nodes, &mut key_to_idx, source);
		let target = intern(&mut graph.nodes, &mut key_to_idx, target);
		graph.links.push(GraphLink { source, target });
	}

	debug!(
		"graph: {} rows -> {} nodes, {} links",
		envelope.rows().len(),
		graph.nodes.len(),
		graph.links.len()
	);
	Ok(graph)
}
