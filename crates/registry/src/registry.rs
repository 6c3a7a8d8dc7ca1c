use std::sync::Arc;

use crate::config::RegistryConfig;
use crate::decl::Declaration;
use crate::error::{RegistryError, ResolveError};
use crate::kind::EntityKind;
use crate::namespace::Namespace;
use crate::resolved::ResolvedDefinition;

/// Component and collection namespaces behind one handle.
///
/// Created explicitly and passed to whoever declares or instantiates entities; there
/// is no process-global registry.
pub struct Registry<C> {
	components: Namespace<C>,
	collections: Namespace<C>,
}

impl<C> Registry<C> {
	pub fn new(config: RegistryConfig) -> Self {
		Self {
			components: Namespace::new(EntityKind::Component, config.clone()),
			collections: Namespace::new(EntityKind::Collection, config),
		}
	}

	#[inline]
	pub fn components(&self) -> &Namespace<C> {
		&self.components
	}

	#[inline]
	pub fn collections(&self) -> &Namespace<C> {
		&self.collections
	}

	pub fn namespace(&self, kind: EntityKind) -> &Namespace<C> {
		match kind {
			EntityKind::Component => &self.components,
			EntityKind::Collection => &self.collections,
		}
	}

	pub fn register(&self, kind: EntityKind, decl: Declaration<C>) -> Result<Arc<Declaration<C>>, ResolveError> {
		self.namespace(kind).register(decl)
	}

	pub fn lookup(&self, kind: EntityKind, name: &str) -> Result<Arc<Declaration<C>>, RegistryError> {
		self.namespace(kind).lookup(name)
	}

	pub fn resolve(&self, kind: EntityKind, name: &str) -> Result<Arc<ResolvedDefinition<C>>, ResolveError> {
		self.namespace(kind).resolve(name)
	}

	/// Empties both namespaces, invalidating every cached resolution.
	pub fn reset(&self) {
		for kind in EntityKind::ALL {
			self.namespace(kind).reset();
		}
	}
}

impl<C> Default for Registry<C> {
	fn default() -> Self {
		Self::new(RegistryConfig::default())
	}
}
