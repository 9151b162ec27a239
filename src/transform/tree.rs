//! Rows → `{name, value, children}` hierarchy.

use std::collections::{HashMap, HashSet};

use log::{debug, warn};

use super::config::TreeConfig;
use super::fields::{FieldSelection, Role};
use super::types::Tree;
use crate::error::{Error, Result};
use crate::results::ResultEnvelope;

/// Roles read by [`build_tree`], in positional fallback order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TreeRole {
	/// Root key, read from the first row only (mandatory).
	Root,
	/// Parent key (mandatory).
	Parent,
	/// Child key (mandatory).
	Child,
	/// Numeric weight of the child.
	Value,
}

impl Role for TreeRole {
	const ORDER: &'static [Self] = &[Self::Root, Self::Parent, Self::Child, Self::Value];

	fn name(self) -> &'static str {
		match self {
			Self::Root => "root",
			Self::Parent => "parent",
			Self::Child => "child",
			Self::Value => "value",
		}
	}

	fn is_mandatory(self) -> bool {
		!matches!(self, Self::Value)
	}
}

/// Parent/child adjacency plus per-key weights, borrowed from the rows.
struct Hierarchy<'r> {
	children: HashMap<&'r str, Vec<&'r str>>,
	values: HashMap<&'r str, f64>,
	max_depth: Option<usize>,
}

/// A node whose children are still being materialized.
struct Frame<'h, 'r> {
	key: &'r str,
	pending: std::slice::Iter<'h, &'r str>,
	inner: bool,
	children: Vec<Tree>,
}

impl<'r> Hierarchy<'r> {
	/// Post-order walk from `root` on an explicit stack, so depth is bounded
	/// by memory rather than by the call stack.
	fn materialize(&self, root: &'r str) -> Result<Tree> {
		let mut ancestors = HashSet::new();
		let mut stack: Vec<Frame<'_, 'r>> = Vec::new();
		let mut current = self.open(root, &mut ancestors)?;
		loop {
			if let Some(&child) = current.pending.next() {
				let opened = self.open(child, &mut ancestors)?;
				stack.push(std::mem::replace(&mut current, opened));
				continue;
			}
			let tree = self.close(current, &mut ancestors);
			match stack.pop() {
				Some(mut parent) => {
					parent.children.push(tree);
					current = parent;
				}
				None => return Ok(tree),
			}
		}
	}

	fn open<'h>(
		&'h self,
		key: &'r str,
		ancestors: &mut HashSet<&'r str>,
	) -> Result<Frame<'h, 'r>> {
		let list = self.children.get(key);
		if list.is_some() {
			if !ancestors.insert(key) {
				return Err(Error::CyclicHierarchy {
					key: key.to_owned(),
				});
			}
			if let Some(limit) = self.max_depth {
				if ancestors.len() > limit {
					return Err(Error::DepthExceeded { limit });
				}
			}
		}
		Ok(Frame {
			key,
			pending: list.map(|l| l.iter()).unwrap_or_default(),
			inner: list.is_some(),
			children: Vec::with_capacity(list.map_or(0, Vec::len)),
		})
	}

	fn close(&self, frame: Frame<'_, 'r>, ancestors: &mut HashSet<&'r str>) -> Tree {
		let direct = self.values.get(frame.key).copied();
		let value = if frame.inner {
			ancestors.remove(frame.key);
			let subtotal: f64 = frame.children.iter().map(|c| c.value).sum();
			subtotal + direct.unwrap_or(0.0)
		} else {
			direct.unwrap_or(1.0)
		};
		Tree {
			name: frame.key.to_owned(),
			value,
			children: frame.children,
		}
	}
}

/// Builds the hierarchy rooted at the first row's `root` value.
///
/// Rows with `parent == child` are skipped entirely: they add no edge and
/// their value is not registered. Repeated `(parent, child)` rows
/// add the child again, so it counts twice. A leaf weighs its own value, or
/// 1 when none is bound; an inner node weighs the sum of its children plus
/// any value bound to its own key. When a key gets several values the last
/// row wins. Values that do not parse as numbers are ignored.
///
/// A parent/child loop reachable from the root fails with
/// [`Error::CyclicHierarchy`]. With `max_depth` set, descending past that
/// many inner levels fails with [`Error::DepthExceeded`].
pub fn build_tree(envelope: &ResultEnvelope, config: &TreeConfig) -> Result<Tree> {
	let selection = FieldSelection::resolve(envelope.variables(), config);
	let rows = envelope.rows();
	let first = rows.first().ok_or(Error::EmptyInput { what: "tree" })?;
	let root = selection.require(first, TreeRole::Root, 0)?;

	let mut hierarchy = Hierarchy {
		children: HashMap::new(),
		values: HashMap::new(),
		max_depth: config.max_depth,
	};
	for (index, row) in rows.iter().enumerate() {
		let parent = selection.require(row, TreeRole::Parent, index)?;
		let child = selection.require(row, TreeRole::Child, index)?;
		if parent == child {
			continue;
		}
		hierarchy.children.entry(parent).or_default().push(child);
		if let Some(raw) = selection.read(row, TreeRole::Value) {
			match raw.trim().parse::<f64>() {
				Ok(value) => {
					hierarchy.values.insert(child, value);
				}
				Err(_) => warn!("tree: row {index}: ignoring non-numeric value `{raw}` for `{child}`"),
			}
		}
	}

	let tree = hierarchy.materialize(root)?;
	debug!(
		"tree: {} rows -> root `{}` with {} leaves, value {}",
		rows.len(),
		tree.name,
		tree.leaf_count(),
		tree.value
	);
	Ok(tree)
}
