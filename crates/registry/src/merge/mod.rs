//! Aspect mergers.
//!
//! # Role
//!
//! Each merger folds the same linearized source list (root-most first) with its own
//! operator:
//!
//! | Aspect | Operator |
//! |--------|----------|
//! | constructors | collect into an ordered chain |
//! | events | chain callback/callback collisions, otherwise last source wins |
//! | dependencies | chain callbacks, callbacks beat flags, contradictory flags fail |
//! | methods | last source wins, never chained |
//! | split | last declared split wins |

mod dependencies;
mod events;


use std::sync::Arc;

pub(crate) use dependencies::merge_dependencies;
pub(crate) use events::merge_events;

use crate::callback::Callback;
use crate::decl::{Declaration, Split, Table};

/// Every declared constructor, in source order.
pub(crate) fn merge_constructors<C>(sources: &[Arc<Declaration<C>>]) -> Vec<Callback<C>> {
	sources
		.iter()
		.filter_map(|source| source.constructor().cloned())
		.collect()
}

pub(crate) fn merge_methods<C>(sources: &[Arc<Declaration<C>>]) -> Table<Callback<C>> {
	let mut methods = Table::default();
	for source in sources {
		for (name, callback) in source.methods() {
			methods.insert(name.clone(), callback.clone());
		}
	}
	methods
}

pub(crate) fn merge_split<C>(sources: &[Arc<Declaration<C>>]) -> Option<Split> {
	sources.iter().rev().find_map(|source| source.split().cloned())
}
