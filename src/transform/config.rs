//! Per-call builder options.
//!
//! Each config is the subset of the renderer's option object a builder
//! understands. Unknown keys are ignored so one object can serve both.

use serde::{Deserialize, Serialize};

use super::fields::RoleConfig;
use super::graph::GraphRole;
use super::table::RollupRole;
use super::tree::TreeRole;

/// Field overrides for [`build_graph`](super::build_graph).
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GraphConfig {
	/// Variable holding the source node key.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub key1: Option<String>,
	/// Variable holding the target node key.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub key2: Option<String>,
	/// Variable holding the source node label.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub label1: Option<String>,
	/// Variable holding the target node label.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub label2: Option<String>,
	/// Variable holding the source node value.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub value1: Option<String>,
	/// Variable holding the target node value.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub value2: Option<String>,
}

impl RoleConfig for GraphConfig {
	type Role = GraphRole;

	fn explicit(&self, role: GraphRole) -> Option<&str> {
		match role {
			GraphRole::Key1 => self.key1.as_deref(),
			GraphRole::Key2 => self.key2.as_deref(),
			GraphRole::Label1 => self.label1.as_deref(),
			GraphRole::Label2 => self.label2.as_deref(),
			GraphRole::Value1 => self.value1.as_deref(),
			GraphRole::Value2 => self.value2.as_deref(),
		}
	}
}

/// Field overrides and guards for [`build_tree`](super::build_tree).
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TreeConfig {
	/// Variable whose value in the first row names the root.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub root: Option<String>,
	/// Variable holding the parent key.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub parent: Option<String>,
	/// Variable holding the child key.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub child: Option<String>,
	/// Variable holding the child's own numeric value.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub value: Option<String>,
	/// Fail instead of descending below this many levels under the root.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub max_depth: Option<usize>,
}

impl RoleConfig for TreeConfig {
	type Role = TreeRole;

	fn explicit(&self, role: TreeRole) -> Option<&str> {
		match role {
			TreeRole::Root => self.root.as_deref(),
			TreeRole::Parent => self.parent.as_deref(),
			TreeRole::Child => self.child.as_deref(),
			TreeRole::Value => self.value.as_deref(),
		}
	}
}

/// Field overrides for [`build_rollup`](super::build_rollup).
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RollupConfig {
	/// Variable to group by; `label` when unset.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
	/// Variable to sum; `size` when unset.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub size: Option<String>,
}

impl RoleConfig for RollupConfig {
	type Role = RollupRole;

	fn explicit(&self, role: RollupRole) -> Option<&str> {
		match role {
			RollupRole::Label => self.label.as_deref(),
			RollupRole::Size => self.size.as_deref(),
		}
	}
}
