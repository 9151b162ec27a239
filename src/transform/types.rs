use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
/// A deduplicated node, identified by `key`.
pub struct GraphNode {
	/// Identity of the node.
	pub key: String,
	/// Display text; the key itself when no label is bound.
	pub label: String,
	/// Raw value text carried through for the renderer.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub value: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
/// Directed edge between two positions in [`Graph::nodes`].
pub struct GraphLink {
	/// Index of the node from the `key1` side.
	pub source: usize,
	/// Index of the node from the `key2` side.
	pub target: usize,
}

/// `{nodes, links}` graph, suitable for force and sankey layouts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Graph {
	/// Nodes in first-appearance order.
	pub nodes: Vec<GraphNode>,
	/// One link per input row, in row order.
	pub links: Vec<GraphLink>,
}

impl Graph {
	/// Node at `index`, as referenced by a link.
	pub fn node(&self, index: usize) -> Option<&GraphNode> {
		self.nodes.get(index)
	}

	/// Keys of a link's endpoints.
	pub fn endpoints(&self, link: &GraphLink) -> Option<(&str, &str)> {
		Some((
			self.node(link.source)?.key.as_str(),
			self.node(link.target)?.key.as_str(),
		))
	}
}

/// `{name, value, children?}` hierarchy node.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Tree {
	/// Key of the node.
	pub name: String,
	/// Leaf weight, or the aggregate of the subtree.
	pub value: f64,
	/// Children in row order; empty for leaves.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub children: Vec<Tree>,
}

impl Tree {
	/// True when the node has no children.
	pub fn is_leaf(&self) -> bool {
		self.children.is_empty()
	}

	/// Number of leaves below (and including) this node.
	pub fn leaf_count(&self) -> usize {
		let mut pending = vec![self];
		let mut leaves = 0;
		while let Some(node) = pending.pop() {
			if node.is_leaf() {
				leaves += 1;
			} else {
				pending.extend(&node.children);
			}
		}
		leaves
	}

	/// First child called `name`.
	pub fn child(&self, name: &str) -> Option<&Tree> {
		self.children.iter().find(|c| c.name == name)
	}
}

// Hierarchies can be thousands of levels deep; unlink them level by level
// instead of letting drop glue recurse.
impl Drop for Tree {
	fn drop(&mut self) {
		let mut pending = std::mem::take(&mut self.children);
		while let Some(mut node) = pending.pop() {
			pending.append(&mut node.children);
		}
	}
}

/// All rows projected onto the declared columns.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Table {
	/// Column headers.
	pub columns: Vec<String>,
	/// One entry per row, one cell per column; unbound cells are `None`.
	pub rows: Vec<Vec<Option<String>>>,
}

/// Per-label total produced by [`build_rollup`](super::build_rollup).
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct RollupEntry {
	/// Group label.
	pub label: String,
	/// Sum of the grouped values.
	pub total: f64,
}
