//! Maps semantic roles (`key1`, `parent`, ...) onto result variables.
//!
//! A role named in the config uses that field. Roles with a conventional
//! field name (the rollup's `label` and `size`) read that name next.
//! Otherwise the Nth role of the builder's fixed order takes the Nth declared
//! variable, so a query's column order alone can drive a builder. Reordering
//! the SELECT clause therefore changes which column plays which role. Roles
//! past the last variable stay unresolved.

use std::fmt::Debug;

use log::{debug, warn};

use crate::error::{Error, Result};
use crate::results::Row;

/// A semantic slot a builder fills from a row.
pub trait Role: Copy + Eq + Debug + 'static {
	/// Resolution order; position N falls back to variable N.
	const ORDER: &'static [Self];

	/// Config key naming this role.
	fn name(self) -> &'static str;

	/// Whether rows must bind this role.
	fn is_mandatory(self) -> bool;

	/// Field read when the config names none; `None` means positional.
	fn default_field(self) -> Option<&'static str> {
		None
	}
}

/// Caller configuration carrying explicit role overrides.
pub trait RoleConfig {
	/// Roles this config covers.
	type Role: Role;

	/// Field explicitly assigned to `role`, if any.
	fn explicit(&self, role: Self::Role) -> Option<&str>;
}

/// Fully resolved role → field table for one call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldSelection<R: Role> {
	fields: Vec<(R, Option<String>)>,
}

impl<R: Role> FieldSelection<R> {
	/// Resolves every role in `R::ORDER` against `variables` and `config`.
	pub fn resolve<C>(variables: &[String], config: &C) -> Self
	where
		C: RoleConfig<Role = R>,
	{
		let fields = R::ORDER
			.iter()
			.enumerate()
			.map(|(position, &role)| {
				let field = config
					.explicit(role)
					.filter(|name| !name.is_empty())
					.or(role.default_field())
					.map(str::to_owned)
					.or_else(|| variables.get(position).cloned());
				if field.is_none() && role.is_mandatory() {
					warn!("no field resolves mandatory role `{}`", role.name());
				}
				(role, field)
			})
			.collect::<Vec<_>>();
		debug!("resolved fields: {fields:?}");
		Self { fields }
	}

	/// Field resolved for `role`.
	pub fn field(&self, role: R) -> Option<&str> {
		self.fields
			.iter()
			.find(|(r, _)| *r == role)
			.and_then(|(_, field)| field.as_deref())
	}

	/// Cell for an optional role; `None` when unresolved or unbound.
	pub fn read<'r>(&self, row: &'r Row, role: R) -> Option<&'r str> {
		self.field(role).and_then(|field| row.get(field))
	}

	/// Cell for a mandatory role in row `index`.
	pub fn require<'r>(&self, row: &'r Row, role: R, index: usize) -> Result<&'r str> {
		let field = self.field(role);
		field
			.and_then(|f| row.get(f))
			.ok_or_else(|| Error::MissingMandatoryField {
				role: role.name(),
				field: field.map(str::to_owned),
				row: index,
			})
	}
}
