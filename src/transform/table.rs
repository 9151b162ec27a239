//! Flat views of a result set: the full table, a single record, and
//! per-label totals for choropleth-style maps.

use std::collections::HashMap;

use log::debug;

use super::config::RollupConfig;
use super::fields::{FieldSelection, Role};
use super::types::{RollupEntry, Table};
use crate::error::{Error, Result};
use crate::results::ResultEnvelope;

/// Roles read by [`build_rollup`]; unless overridden they read the fields
/// literally called `label` and `size`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RollupRole {
	/// Grouping key.
	Label,
	/// Number to sum.
	Size,
}

impl Role for RollupRole {
	const ORDER: &'static [Self] = &[Self::Label, Self::Size];

	fn name(self) -> &'static str {
		match self {
			Self::Label => "label",
			Self::Size => "size",
		}
	}

	fn is_mandatory(self) -> bool {
		true
	}

	fn default_field(self) -> Option<&'static str> {
		Some(self.name())
	}
}

/// Projects every row onto the declared variables, in column order.
pub fn build_table(envelope: &ResultEnvelope) -> Table {
	let columns = envelope.variables().to_vec();
	let rows = envelope
		.rows()
		.iter()
		.map(|row| {
			columns
				.iter()
				.map(|col| row.get(col).map(str::to_owned))
				.collect()
		})
		.collect();
	Table { columns, rows }
}

/// The first row as `(variable, value)` pairs, in column order.
pub fn build_record(envelope: &ResultEnvelope) -> Result<Vec<(String, Option<String>)>> {
	let row = envelope
		.rows()
		.first()
		.ok_or(Error::EmptyInput { what: "record" })?;
	Ok(envelope
		.variables()
		.iter()
		.map(|var| (var.clone(), row.get(var).map(str::to_owned)))
		.collect())
}

/// Sums `size` per distinct `label`, in order of first appearance.
pub fn build_rollup(envelope: &ResultEnvelope, config: &RollupConfig) -> Result<Vec<RollupEntry>> {
	let selection = FieldSelection::resolve(envelope.variables(), config);
	let mut entries: Vec<RollupEntry> = Vec::new();
	let mut label_to_idx: HashMap<&str, usize> = HashMap::new();

	for (index, row) in envelope.rows().iter().enumerate() {
		let label = selection.require(row, RollupRole::Label, index)?;
		let raw = selection.require(row, RollupRole::Size, index)?;
		let size: f64 = raw.trim().parse().map_err(|_| Error::InvalidNumber {
			field: selection.field(RollupRole::Size).unwrap_or_default().to_owned(),
			value: raw.to_owned(),
			row: index,
		})?;

		let idx = *label_to_idx.entry(label).or_insert_with(|| {
			entries.push(RollupEntry {
				label: label.to_owned(),
				total: 0.0,
			});
			entries.len() - 1
		});
		entries[idx].total += size;
	}

	debug!(
		"rollup: {} rows -> {} labels",
		envelope.rows().len(),
		entries.len()
	);
	Ok(entries)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::results::Row;

	fn envelope(vars: &[&str], rows: &[&[(&str, &str)]]) -> ResultEnvelope {
		ResultEnvelope::new(
			vars.iter().map(|v| v.to_string()).collect(),
			rows.iter().map(|r| r.iter().copied().collect::<Row>()).collect(),
		)
	}

	#[test]
	fn table_keeps_column_order_and_gaps() {
		let env = envelope(
			&["b", "a"],
			&[&[("a", "1"), ("b", "2")], &[("a", "3")]],
		);
		let table = build_table(&env);
		assert_eq!(table.columns, ["b", "a"]);
		assert_eq!(
			table.rows,
			vec![
				vec![Some("2".to_string()), Some("1".to_string())],
				vec![None, Some("3".to_string())],
			]
		);
	}

	#[test]
	fn record_is_first_row() {
		let env = envelope(
			&["name", "born"],
			&[&[("name", "Ada"), ("born", "1815")], &[("name", "other")]],
		);
		assert_eq!(
			build_record(&env).unwrap(),
			vec![
				("name".to_string(), Some("Ada".to_string())),
				("born".to_string(), Some("1815".to_string())),
			]
		);
	}

	#[test]
	fn record_of_nothing_fails() {
		let env = envelope(&["name"], &[]);
		assert!(matches!(
			build_record(&env),
			Err(Error::EmptyInput { what: "record" })
		));
	}

	#[test]
	fn rollup_sums_per_label_in_first_seen_order() {
		let env = envelope(
			&["pref", "area"],
			&[
				&[("pref", "Kyoto"), ("area", "10")],
				&[("pref", "Osaka"), ("area", "4")],
				&[("pref", "Kyoto"), ("area", " 2.5 ")],
			],
		);
		let config = RollupConfig {
			label: Some("pref".into()),
			size: Some("area".into()),
		};
		let totals = build_rollup(&env, &config).unwrap();
		assert_eq!(
			totals,
			vec![
				RollupEntry {
					label: "Kyoto".into(),
					total: 12.5,
				},
				RollupEntry {
					label: "Osaka".into(),
					total: 4.0,
				},
			]
		);
	}

	#[test]
	fn rollup_reads_label_and_size_by_name() {
		let env = envelope(
			&["size", "label"],
			&[
				&[("size", "10"), ("label", "Kyoto")],
				&[("size", "2.5"), ("label", "Kyoto")],
			],
		);
		assert_eq!(
			build_rollup(&env, &RollupConfig::default()).unwrap(),
			vec![RollupEntry {
				label: "Kyoto".into(),
				total: 12.5,
			}]
		);
	}

	#[test]
	fn rollup_without_conventional_fields_fails() {
		let env = envelope(&["pref", "area"], &[&[("pref", "Kyoto"), ("area", "10")]]);
		match build_rollup(&env, &RollupConfig::default()) {
			Err(Error::MissingMandatoryField { role, field, row }) => {
				assert_eq!(role, "label");
				assert_eq!(field.as_deref(), Some("label"));
				assert_eq!(row, 0);
			}
			other => panic!("unexpected {other:?}"),
		}
	}

	#[test]
	fn rollup_rejects_non_numbers() {
		let env = envelope(
			&["label", "size"],
			&[&[("label", "x"), ("size", "1")], &[("label", "y"), ("size", "n/a")]],
		);
		match build_rollup(&env, &RollupConfig::default()) {
			Err(Error::InvalidNumber { field, value, row }) => {
				assert_eq!(field, "size");
				assert_eq!(value, "n/a");
				assert_eq!(row, 1);
			}
			other => panic!("unexpected {other:?}"),
		}
	}
}
