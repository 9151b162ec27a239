//! JavaScript entry points.
//!
//! Every `build*` export takes the parsed result document and the caller's
//! option object (which may be `undefined`) and returns a plain JS value
//! shaped for d3 layouts.

use log::{debug, error, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::prelude::*;
use web_sys::{Request, RequestInit, Response};

use crate::results::{RESULTS_MIME, ResultEnvelope};
use crate::transform;

fn envelope(json: JsValue) -> Result<ResultEnvelope, JsError> {
	Ok(serde_wasm_bindgen::from_value(json)?)
}

fn options<C: DeserializeOwned + Default>(config: JsValue) -> Result<C, JsError> {
	if config.is_undefined() || config.is_null() {
		return Ok(C::default());
	}
	Ok(serde_wasm_bindgen::from_value(config)?)
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
	Ok(value.serialize(&Serializer::json_compatible())?)
}

/// `{nodes, links}` for force and sankey layouts.
#[wasm_bindgen(js_name = buildGraph)]
pub fn build_graph(json: JsValue, config: JsValue) -> Result<JsValue, JsError> {
	let graph = transform::build_graph(&envelope(json)?, &options(config)?)?;
	to_js(&graph)
}

/// `{name, value, children}` for hierarchy layouts.
#[wasm_bindgen(js_name = buildTree)]
pub fn build_tree(json: JsValue, config: JsValue) -> Result<JsValue, JsError> {
	let tree = transform::build_tree(&envelope(json)?, &options(config)?)?;
	to_js(&tree)
}

/// `{columns, rows}` with `null` for unbound cells.
#[wasm_bindgen(js_name = buildTable)]
pub fn build_table(json: JsValue) -> Result<JsValue, JsError> {
	to_js(&transform::build_table(&envelope(json)?))
}

/// `[[variable, value], ...]` for the first row.
#[wasm_bindgen(js_name = buildRecord)]
pub fn build_record(json: JsValue) -> Result<JsValue, JsError> {
	to_js(&transform::build_record(&envelope(json)?)?)
}

/// `[{label, total}, ...]` for choropleth maps.
#[wasm_bindgen(js_name = buildRollup)]
pub fn build_rollup(json: JsValue, config: JsValue) -> Result<JsValue, JsError> {
	to_js(&transform::build_rollup(&envelope(json)?, &options(config)?)?)
}

/// GET URL carrying `sparql` as the `query` parameter.
#[wasm_bindgen(js_name = queryUrl)]
pub fn query_url(endpoint: &str, sparql: &str) -> String {
	let encoded: String = js_sys::encode_uri_component(sparql).into();
	format!("{endpoint}?query={encoded}")
}

/// Runs `sparql` against `endpoint` and calls `callback` once with the
/// parsed result document. Failures are logged and the callback is not
/// invoked.
#[wasm_bindgen]
pub fn query(endpoint: &str, sparql: &str, callback: js_sys::Function) -> Result<(), JsValue> {
	let url = query_url(endpoint, sparql);
	debug!("query: {url}");

	let init = RequestInit::new();
	init.set_method("GET");
	let request = Request::new_with_str_and_init(&url, &init)?;
	request.headers().set("Accept", RESULTS_MIME)?;
	let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;

	let on_response = Closure::once(move |response: JsValue| {
		let response: Response = match response.dyn_into() {
			Ok(r) => r,
			Err(other) => {
				error!("query: fetch resolved to a non-response: {other:?}");
				return;
			}
		};
		if !response.ok() {
			warn!("query: {} {}", response.status(), response.status_text());
		}
		let on_json = Closure::once(move |json: JsValue| {
			if let Err(err) = callback.call1(&JsValue::NULL, &json) {
				error!("query: callback threw {err:?}");
			}
		});
		match response.json() {
			Ok(parsed) => log_rejection(&parsed.then(&on_json)),
			Err(err) => error!("query: body is not JSON: {err:?}"),
		}
		on_json.forget();
	});
	log_rejection(&window.fetch_with_request(&request).then(&on_response));
	on_response.forget();
	Ok(())
}

// Closures handed to promises must outlive this call, so they are leaked.
fn log_rejection(promise: &js_sys::Promise) {
	let on_reject = Closure::once(|err: JsValue| error!("query: {err:?}"));
	let _ = promise.catch(&on_reject);
	on_reject.forget();
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
	use super::*;
	use wasm_bindgen_test::*;

	fn js(value: serde_json::Value) -> JsValue {
		value.serialize(&Serializer::json_compatible()).unwrap()
	}

	#[wasm_bindgen_test]
	fn query_url_encodes_like_encode_uri_component() {
		assert_eq!(
			query_url("http://example.org/sparql", "SELECT ?s WHERE { ?s ?p ?o }"),
			"http://example.org/sparql?query=SELECT%20%3Fs%20WHERE%20%7B%20%3Fs%20%3Fp%20%3Fo%20%7D"
		);
	}

	#[wasm_bindgen_test]
	fn graph_export_accepts_undefined_config() {
		let json = js(serde_json::json!({
			"head": { "vars": ["a", "b"] },
			"results": { "bindings": [
				{ "a": { "value": "x" }, "b": { "value": "y" } }
			] }
		}));
		let graph = build_graph(json, JsValue::UNDEFINED).unwrap();
		let graph: transform::Graph = serde_wasm_bindgen::from_value(graph).unwrap();
		assert_eq!(graph.nodes.len(), 2);
		assert_eq!(graph.links.len(), 1);
	}

	#[wasm_bindgen_test]
	fn tree_export_surfaces_empty_input() {
		let json = js(serde_json::json!({
			"head": { "vars": ["root", "parent", "child"] },
			"results": { "bindings": [] }
		}));
		assert!(build_tree(json, JsValue::NULL).is_err());
	}
}
