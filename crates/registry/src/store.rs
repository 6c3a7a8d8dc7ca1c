//! Declaration store.
//!
//! # Role
//!
//! Keyed storage of raw declarations for one entity kind. Names are registered once;
//! declarations are never mutated after insertion.

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use rustc_hash::FxBuildHasher;

use crate::decl::Declaration;
use crate::error::RegistryError;
use crate::kind::EntityKind;

pub struct DeclarationStore<C> {
	kind: EntityKind,
	entries: RwLock<IndexMap<Box<str>, Arc<Declaration<C>>, FxBuildHasher>>,
}

impl<C> DeclarationStore<C> {
	pub fn new(kind: EntityKind) -> Self {
		Self {
			kind,
			entries: RwLock::new(IndexMap::default()),
		}
	}

	#[inline]
	pub fn kind(&self) -> EntityKind {
		self.kind
	}

	/// Stores `decl` under its name.
	///
	/// Fails with [`RegistryError::DuplicateRegistration`] if the name is taken.
	pub fn register(&self, decl: Declaration<C>) -> Result<Arc<Declaration<C>>, RegistryError> {
		let mut entries = self.entries.write();
		if entries.contains_key(decl.name()) {
			return Err(RegistryError::DuplicateRegistration {
				kind: self.kind,
				name: decl.name.clone(),
			});
		}
		let decl = Arc::new(decl);
		entries.insert(decl.name.clone(), decl.clone());
		tracing::debug!(kind = %self.kind, name = decl.name(), "declaration registered");
		Ok(decl)
	}

	/// Returns the declaration registered under `name`.
	pub fn lookup(&self, name: &str) -> Result<Arc<Declaration<C>>, RegistryError> {
		self.entries
			.read()
			.get(name)
			.cloned()
			.ok_or_else(|| RegistryError::NotFound {
				kind: self.kind,
				name: name.into(),
			})
	}

	pub fn contains(&self, name: &str) -> bool {
		self.entries.read().contains_key(name)
	}

	/// Registered names in registration order.
	pub fn names(&self) -> Vec<Box<str>> {
		self.entries.read().keys().cloned().collect()
	}

	pub fn len(&self) -> usize {
		self.entries.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Withdraws a declaration whose eager resolution failed.
	pub(crate) fn remove(&self, name: &str) -> Option<Arc<Declaration<C>>> {
		self.entries.write().shift_remove(name)
	}

	pub(crate) fn clear(&self) {
		self.entries.write().clear();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn register_once_then_lookup() {
		let store: DeclarationStore<()> = DeclarationStore::new(EntityKind::Component);
		store.register(Declaration::empty("base")).unwrap();

		assert_eq!(store.lookup("base").unwrap().name(), "base");
		assert_eq!(
			store.register(Declaration::empty("base")).unwrap_err(),
			RegistryError::DuplicateRegistration {
				kind: EntityKind::Component,
				name: "base".into(),
			}
		);
		assert_eq!(store.len(), 1);
	}

	#[test]
	fn lookup_unknown_fails() {
		let store: DeclarationStore<()> = DeclarationStore::new(EntityKind::Collection);
		assert_eq!(
			store.lookup("missing").unwrap_err(),
			RegistryError::NotFound {
				kind: EntityKind::Collection,
				name: "missing".into(),
			}
		);
	}

	#[test]
	fn names_keep_registration_order() {
		let store: DeclarationStore<()> = DeclarationStore::new(EntityKind::Component);
		for name in ["zeta", "alpha", "mid"] {
			store.register(Declaration::empty(name)).unwrap();
		}
		let names = store.names();
		assert_eq!(names.iter().map(|name| &**name).collect::<Vec<_>>(), ["zeta", "alpha", "mid"]);
	}
}
