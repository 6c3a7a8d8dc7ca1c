//! The flattened, ready-to-instantiate definition.

use std::fmt;
use std::sync::Arc;

use crate::callback::{Callback, Handler};
use crate::decl::{Declaration, Dependency, EventKey, EventRef, Split, SubEvent, Table};
use crate::error::ResolveError;
use crate::kind::EntityKind;
use crate::merge;

/// Composition of an entity's whole ancestor graph.
///
/// Built once per entity name and shared behind `Arc`; never mutated afterwards.
pub struct ResolvedDefinition<C> {
	name: Box<str>,
	kind: EntityKind,
	sources: Box<[Box<str>]>,
	constructor_chain: Box<[Callback<C>]>,
	events: Table<EventRef<C>>,
	dependencies: Table<Dependency<C>>,
	methods: Table<Callback<C>>,
	split: Option<Split>,
}

/// A `(dependency, sub-event)` pair with callbacks attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription<'a> {
	pub dependency: &'a str,
	pub sub_event: &'a str,
}

impl<C> ResolvedDefinition<C> {
	/// Runs every aspect merger over the linearized `sources`.
	pub(crate) fn build(
		kind: EntityKind,
		name: &str,
		sources: &[Arc<Declaration<C>>],
	) -> Result<Self, ResolveError> {
		let dependencies = merge::merge_dependencies(kind, name, sources)?;
		let split = merge::merge_split(sources);

		if kind == EntityKind::Collection {
			let Some(split) = &split else {
				return Err(ResolveError::MissingSplit { entity: name.into() });
			};
			if !dependencies.contains_key(&*split.by_dependency) {
				return Err(ResolveError::SplitDependencyUndeclared {
					entity: name.into(),
					dependency: split.by_dependency.clone(),
				});
			}
		}

		Ok(Self {
			name: name.into(),
			kind,
			sources: sources.iter().map(|source| source.name.clone()).collect(),
			constructor_chain: merge::merge_constructors(sources).into(),
			events: merge::merge_events(sources),
			dependencies,
			methods: merge::merge_methods(sources),
			split,
		})
	}

	#[inline]
	pub fn name(&self) -> &str {
		&self.name
	}

	#[inline]
	pub fn kind(&self) -> EntityKind {
		self.kind
	}

	/// Names of the contributing declarations, root-most first.
	#[inline]
	pub fn sources(&self) -> &[Box<str>] {
		&self.sources
	}

	/// Constructors to run on every new instance, in order.
	#[inline]
	pub fn constructor_chain(&self) -> &[Callback<C>] {
		&self.constructor_chain
	}

	#[inline]
	pub fn events(&self) -> &Table<EventRef<C>> {
		&self.events
	}

	pub fn event(&self, key: &str) -> Option<&EventRef<C>> {
		self.events.get(key)
	}

	/// DOM-style bindings for `trigger` on `selector`, in table order.
	pub fn dom_events<'a>(
		&'a self,
		trigger: &'a str,
		selector: &'a str,
	) -> impl Iterator<Item = (&'a str, &'a EventRef<C>)> + 'a {
		self.events
			.iter()
			.filter(move |(key, _)| EventKey::parse(key).matches_dom(trigger, selector))
			.map(|(key, value)| (&**key, value))
	}

	#[inline]
	pub fn dependencies(&self) -> &Table<Dependency<C>> {
		&self.dependencies
	}

	pub fn dependency(&self, name: &str) -> Option<&Dependency<C>> {
		self.dependencies.get(name)
	}

	/// Dependencies that must be ready before an instance is usable.
	pub fn required_dependencies(&self) -> impl Iterator<Item = &str> + '_ {
		self.dependencies
			.iter()
			.filter(|(_, dep)| dep.is_required())
			.map(|(name, _)| &**name)
	}

	/// Callbacks to invoke when `dependency` raises `sub_event`.
	pub fn dependency_handler(&self, dependency: &str, sub_event: &str) -> Option<&Handler<C>> {
		self.dependencies
			.get(dependency)?
			.sub_events()?
			.get(sub_event)
			.and_then(SubEvent::as_handler)
	}

	/// Every sub-event the data layer must forward to instances of this entity.
	pub fn subscriptions(&self) -> impl Iterator<Item = Subscription<'_>> + '_ {
		self.dependencies.iter().flat_map(|(dependency, dep)| {
			dep.sub_events()
				.into_iter()
				.flatten()
				.filter(|(_, sub)| sub.as_handler().is_some())
				.map(move |(sub_event, _)| Subscription {
					dependency: &**dependency,
					sub_event: &**sub_event,
				})
		})
	}

	#[inline]
	pub fn methods(&self) -> &Table<Callback<C>> {
		&self.methods
	}

	pub fn method(&self, name: &str) -> Option<&Callback<C>> {
		self.methods.get(name)
	}

	/// Capability query: whether instances expose `name`.
	pub fn has_method(&self, name: &str) -> bool {
		self.methods.contains_key(name)
	}

	#[inline]
	pub fn split(&self) -> Option<&Split> {
		self.split.as_ref()
	}
}

impl<C> fmt::Debug for ResolvedDefinition<C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ResolvedDefinition")
			.field("name", &self.name)
			.field("kind", &self.kind)
			.field("sources", &self.sources)
			.field("constructor_chain", &self.constructor_chain)
			.field("events", &self.events)
			.field("dependencies", &self.dependencies)
			.field("methods", &self.methods)
			.field("split", &self.split)
			.finish()
	}
}
