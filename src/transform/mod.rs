//! Reshaping of result sets into the structures d3-style layouts consume.

pub mod config;
pub mod fields;
pub mod graph;
pub mod table;
pub mod tree;
mod types;

pub use config::{GraphConfig, RollupConfig, TreeConfig};
pub use fields::{FieldSelection, Role, RoleConfig};
pub use graph::{GraphRole, build_graph};
pub use table::{RollupRole, build_record, build_rollup, build_table};
pub use tree::{TreeRole, build_tree};
pub use types::{Graph, GraphLink, GraphNode, RollupEntry, Table, Tree};
