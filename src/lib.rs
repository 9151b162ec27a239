//! Shapes SPARQL `SELECT` results for d3-style visualizations.
//!
//! A result document is turned into either a `{nodes, links}` graph or a
//! `{name, value, children}` hierarchy, plus a few flat views. Fields are
//! picked from the caller's config or, failing that, by column position.
//! The [`bindings`] module exposes the same operations to JavaScript.

use log::{Level, info};
use wasm_bindgen::prelude::*;

pub mod bindings;
pub mod error;
pub mod results;
pub mod transform;

pub use error::{Error, Result};
pub use results::ResultEnvelope;
pub use transform::{
	Graph, GraphConfig, GraphLink, GraphNode, RollupConfig, RollupEntry, Table, Tree, TreeConfig,
	build_graph, build_record, build_rollup, build_table, build_tree,
};

/// Initialize logging and panic hooks for the WASM target.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}
