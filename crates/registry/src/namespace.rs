//! Per-kind store plus resolution cache.
//!
//! # Role
//!
//! A [`Namespace`] owns the declarations of one [`EntityKind`] and memoizes both their
//! linearizations and their resolved definitions.
//!
//! # Concurrency
//!
//! - **Reads:** cached definitions are served from an atomically published map and
//!   never take the resolution lock.
//! - **Resolution:** serialized by one mutex held across the whole recursive walk and
//!   re-checked after acquisition, so each name is computed at most once.
//!
//! # Invariants
//!
//! - A published definition is never replaced; only [`Namespace::reset`] drops it.
//! - Under the eager strategy a declaration whose resolution fails is withdrawn before
//!   the error is returned, leaving the store as it was.

use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::config::{RegistryConfig, ResolveStrategy};
use crate::decl::Declaration;
use crate::error::{RegistryError, ResolveError};
use crate::kind::EntityKind;
use crate::linearize::{LinearizationMemo, Linearizer, Sources};
use crate::resolved::ResolvedDefinition;
use crate::store::DeclarationStore;


type ResolvedMap<C> = FxHashMap<Box<str>, Arc<ResolvedDefinition<C>>>;

struct ResolutionCache<C> {
	linearized: LinearizationMemo<C>,
}

pub struct Namespace<C> {
	config: RegistryConfig,
	store: DeclarationStore<C>,
	resolved: ArcSwap<ResolvedMap<C>>,
	cache: Mutex<ResolutionCache<C>>,
}

impl<C> Namespace<C> {
	pub fn new(kind: EntityKind, config: RegistryConfig) -> Self {
		Self {
			config,
			store: DeclarationStore::new(kind),
			resolved: ArcSwap::from_pointee(ResolvedMap::default()),
			cache: Mutex::new(ResolutionCache {
				linearized: LinearizationMemo::default(),
			}),
		}
	}

	#[inline]
	pub fn kind(&self) -> EntityKind {
		self.store.kind()
	}

	#[inline]
	pub fn config(&self) -> &RegistryConfig {
		&self.config
	}

	#[inline]
	pub fn store(&self) -> &DeclarationStore<C> {
		&self.store
	}

	/// Registers a declaration.
	///
	/// Under [`ResolveStrategy::Eager`] the entity is resolved immediately and a
	/// resolution failure undoes the registration.
	pub fn register(&self, decl: Declaration<C>) -> Result<Arc<Declaration<C>>, ResolveError> {
		match self.config.strategy {
			ResolveStrategy::Lazy => Ok(self.store.register(decl)?),
			ResolveStrategy::Eager => {
				let mut cache = self.cache.lock();
				let decl = self.store.register(decl)?;
				if let Err(err) = self.resolve_locked(&mut cache, decl.name()) {
					cache.linearized.remove(decl.name());
					self.store.remove(decl.name());
					tracing::debug!(kind = %self.kind(), name = decl.name(), error = %err, "eager resolution failed; registration withdrawn");
					return Err(err);
				}
				Ok(decl)
			}
		}
	}

	pub fn lookup(&self, name: &str) -> Result<Arc<Declaration<C>>, RegistryError> {
		self.store.lookup(name)
	}

	/// Returns the resolved definition for `name`, computing it on first use.
	pub fn resolve(&self, name: &str) -> Result<Arc<ResolvedDefinition<C>>, ResolveError> {
		if let Some(def) = self.cached(name) {
			tracing::trace!(kind = %self.kind(), name, "resolution cache hit");
			return Ok(def);
		}
		let mut cache = self.cache.lock();
		self.resolve_locked(&mut cache, name)
	}

	/// Ordered contributing declarations for `name`, root-most first.
	pub fn linearize(&self, name: &str) -> Result<Sources<C>, ResolveError> {
		let mut cache = self.cache.lock();
		Linearizer::new(&self.store, &mut cache.linearized, &self.config).linearize(name)
	}

	/// Returns the definition if it has already been resolved.
	pub fn cached(&self, name: &str) -> Option<Arc<ResolvedDefinition<C>>> {
		self.resolved.load().get(name).cloned()
	}

	/// Drops every declaration and cached resolution.
	pub fn reset(&self) {
		let mut cache = self.cache.lock();
		cache.linearized.clear();
		self.resolved.store(Arc::new(ResolvedMap::default()));
		self.store.clear();
		tracing::debug!(kind = %self.kind(), "namespace reset");
	}

	fn resolve_locked(
		&self,
		cache: &mut ResolutionCache<C>,
		name: &str,
	) -> Result<Arc<ResolvedDefinition<C>>, ResolveError> {
		// Another caller may have finished while we waited for the lock.
		if let Some(def) = self.cached(name) {
			return Ok(def);
		}

		let kind = self.kind();
		let resolved = Linearizer::new(&self.store, &mut cache.linearized, &self.config)
			.linearize(name)
			.and_then(|sources| ResolvedDefinition::build(kind, name, &sources));
		let def = match resolved {
			Ok(def) => Arc::new(def),
			Err(err) => {
				tracing::debug!(%kind, name, error = %err, "resolution failed");
				return Err(err);
			}
		};

		let mut published = ResolvedMap::clone(&self.resolved.load());
		published.insert(name.into(), def.clone());
		self.resolved.store(Arc::new(published));

		tracing::debug!(
			%kind,
			name,
			sources = def.sources().len(),
			constructors = def.constructor_chain().len(),
			events = def.events().len(),
			dependencies = def.dependencies().len(),
			methods = def.methods().len(),
			"resolved"
		);
		Ok(def)
	}
}
