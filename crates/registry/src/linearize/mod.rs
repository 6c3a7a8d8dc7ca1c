//! Ancestor-graph linearization.
//!
//! # Role
//!
//! Turns an entity name into the ordered list of declarations that contribute to it,
//! root-most first. Every aspect merger folds over this one list, so aspect order
//! can never diverge.
//!
//! # Order
//!
//! For an entity `E` with ancestor arguments `[t1, .., tn, base]` and inline traits
//! `[m1, .., mk]`:
//!
//! ```text
//! lin(E) = lin(base) ++ lin(m1) ++ .. ++ lin(mk) ++ lin(t1) ++ .. ++ lin(tn) ++ [E]
//! ```
//!
//! Sources are not de-duplicated: a declaration reachable along two paths contributes
//! twice.
//!
//! # Invariants
//!
//! - Must reject cycles. The walk keeps the stack of names being expanded; re-entering
//!   one fails with [`ResolveError::Cycle`] carrying the loop.
//! - Must compute each name at most once per cache lifetime. Completed lists are
//!   memoized and reused when the name appears as someone else's ancestor.
//! - Must bound recursion by the configured depth rather than the thread stack.
//! - Must bound each source list by the configured length. Depth alone does not, since
//!   a declaration listing the same ancestor twice doubles its list per level.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::config::RegistryConfig;
use crate::decl::{Ancestry, Declaration};
use crate::error::{RegistryError, ResolveError};
use crate::store::DeclarationStore;

#[cfg(test)]
mod tests;

/// Ordered contributing declarations, root-most first.
pub type Sources<C> = Arc<[Arc<Declaration<C>>]>;

/// Memo of completed linearizations, keyed by entity name.
pub(crate) type LinearizationMemo<C> = FxHashMap<Box<str>, Sources<C>>;

pub(crate) struct Linearizer<'a, C> {
	store: &'a DeclarationStore<C>,
	memo: &'a mut LinearizationMemo<C>,
	stack: Vec<Box<str>>,
	max_depth: usize,
	max_sources: usize,
}

impl<'a, C> Linearizer<'a, C> {
	pub(crate) fn new(
		store: &'a DeclarationStore<C>,
		memo: &'a mut LinearizationMemo<C>,
		config: &RegistryConfig,
	) -> Self {
		Self {
			store,
			memo,
			stack: Vec::new(),
			max_depth: config.max_depth,
			max_sources: config.max_sources,
		}
	}

	/// Linearizes a registered entity.
	pub(crate) fn linearize(&mut self, name: &str) -> Result<Sources<C>, ResolveError> {
		if let Some(sources) = self.memo.get(name) {
			tracing::trace!(kind = %self.store.kind(), name, "linearization cache hit");
			return Ok(sources.clone());
		}

		if let Some(start) = self.stack.iter().position(|open| &**open == name) {
			let mut path = self.stack[start..].to_vec();
			path.push(name.into());
			return Err(ResolveError::Cycle {
				kind: self.store.kind(),
				path,
			});
		}

		if self.stack.len() >= self.max_depth {
			return Err(ResolveError::DepthExceeded {
				kind: self.store.kind(),
				entity: name.into(),
				limit: self.max_depth,
			});
		}

		let decl = self.store.lookup(name)?;
		self.stack.push(name.into());
		let expanded = self.expand(&decl);
		self.stack.pop();
		let sources = expanded?;

		tracing::trace!(
			kind = %self.store.kind(),
			name,
			sources = sources.len(),
			"linearized"
		);
		self.memo.insert(name.into(), sources.clone());
		Ok(sources)
	}

	fn expand(&mut self, decl: &Arc<Declaration<C>>) -> Result<Sources<C>, ResolveError> {
		let ancestry = Ancestry::of(self.store.kind(), decl)?;

		let mut sources = Vec::new();
		for ancestor in ancestry.resolution_order() {
			let inherited = self.linearize(ancestor).map_err(|err| match err {
				ResolveError::Store(RegistryError::NotFound { kind, name }) if &*name == ancestor => {
					ResolveError::UnknownAncestor {
						kind,
						entity: decl.name.clone(),
						ancestor: name,
					}
				}
				other => other,
			})?;
			// One slot stays reserved for `decl` itself.
			if sources.len() + inherited.len() >= self.max_sources {
				return Err(ResolveError::TooManySources {
					kind: self.store.kind(),
					entity: decl.name.clone(),
					limit: self.max_sources,
				});
			}
			sources.extend(inherited.iter().cloned());
		}
		sources.push(decl.clone());

		Ok(sources.into())
	}
}
