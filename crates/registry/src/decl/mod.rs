//! Raw declarations as authored.
//!
//! # Role
//!
//! A [`Declaration`] is the unmerged input for one entity name: its own constructor,
//! event table, dependency table, method table, and the two ancestor lists (inline
//! traits and ancestor arguments) the linearizer walks. Declarations are immutable
//! once built; the store hands them out behind `Arc`.
//!
//! Tables are insertion ordered so resolved tables iterate deterministically.

mod ancestry;
mod builder;
mod event_key;

use std::fmt;

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

pub use ancestry::{Ancestor, Ancestry};
pub use builder::DeclarationBuilder;
pub use event_key::EventKey;

use crate::callback::{Callback, Handler};
use crate::error::DependencyShape;

/// Insertion-ordered string-keyed table.
pub type Table<V> = IndexMap<Box<str>, V, FxBuildHasher>;

/// Value bound to an event key.
pub enum EventRef<C> {
	/// Callback (or, once resolved, chain of callbacks) run on dispatch.
	Handler(Handler<C>),
	/// Name of a method in the resolved method table.
	Method(Box<str>),
}

impl<C> EventRef<C> {
	pub fn as_handler(&self) -> Option<&Handler<C>> {
		match self {
			Self::Handler(handler) => Some(handler),
			Self::Method(_) => None,
		}
	}

	pub fn as_method(&self) -> Option<&str> {
		match self {
			Self::Handler(_) => None,
			Self::Method(name) => Some(name),
		}
	}
}

impl<C> Clone for EventRef<C> {
	fn clone(&self) -> Self {
		match self {
			Self::Handler(handler) => Self::Handler(handler.clone()),
			Self::Method(name) => Self::Method(name.clone()),
		}
	}
}

impl<C> fmt::Debug for EventRef<C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Handler(handler) => handler.fmt(f),
			Self::Method(name) => f.debug_tuple("Method").field(name).finish(),
		}
	}
}

/// Value bound to a dependency sub-event key.
pub enum SubEvent<C> {
	/// Plain requirement flag.
	Flag(bool),
	/// Callback (or chain) invoked when the dependency raises the sub-event.
	Handler(Handler<C>),
}

impl<C> SubEvent<C> {
	pub fn as_handler(&self) -> Option<&Handler<C>> {
		match self {
			Self::Handler(handler) => Some(handler),
			Self::Flag(_) => None,
		}
	}

	pub fn as_flag(&self) -> Option<bool> {
		match self {
			Self::Flag(flag) => Some(*flag),
			Self::Handler(_) => None,
		}
	}
}

impl<C> Clone for SubEvent<C> {
	fn clone(&self) -> Self {
		match self {
			Self::Flag(flag) => Self::Flag(*flag),
			Self::Handler(handler) => Self::Handler(handler.clone()),
		}
	}
}

impl<C> fmt::Debug for SubEvent<C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Flag(flag) => f.debug_tuple("Flag").field(flag).finish(),
			Self::Handler(handler) => handler.fmt(f),
		}
	}
}

/// Value bound to a dependency name.
pub enum Dependency<C> {
	/// Whether the dependency must be ready before the instance is usable.
	Flag(bool),
	/// Per-sub-event subscriptions; the dependency is required.
	Events(Table<SubEvent<C>>),
}

impl<C> Dependency<C> {
	pub fn shape(&self) -> DependencyShape {
		match self {
			Self::Flag(_) => DependencyShape::Flag,
			Self::Events(_) => DependencyShape::Events,
		}
	}

	/// True unless the dependency is explicitly flagged `false`.
	pub fn is_required(&self) -> bool {
		match self {
			Self::Flag(flag) => *flag,
			Self::Events(_) => true,
		}
	}

	pub fn sub_events(&self) -> Option<&Table<SubEvent<C>>> {
		match self {
			Self::Flag(_) => None,
			Self::Events(table) => Some(table),
		}
	}
}

impl<C> Clone for Dependency<C> {
	fn clone(&self) -> Self {
		match self {
			Self::Flag(flag) => Self::Flag(*flag),
			Self::Events(table) => Self::Events(table.clone()),
		}
	}
}

impl<C> fmt::Debug for Dependency<C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Flag(flag) => f.debug_tuple("Flag").field(flag).finish(),
			Self::Events(table) => f.debug_map().entries(table.iter()).finish(),
		}
	}
}

/// How a collection fans out its items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
	/// Collection dependency whose items are split.
	pub by_dependency: Box<str>,
	/// Entity name instantiated per item.
	pub into: Box<str>,
}

/// Raw, unmerged declaration for one entity name.
pub struct Declaration<C> {
	pub(crate) name: Box<str>,
	pub(crate) constructor: Option<Callback<C>>,
	pub(crate) events: Table<EventRef<C>>,
	pub(crate) dependencies: Table<Dependency<C>>,
	pub(crate) methods: Table<Callback<C>>,
	pub(crate) inline_traits: Vec<Box<str>>,
	pub(crate) ancestors: Vec<Ancestor>,
	pub(crate) split: Option<Split>,
}

impl<C> Declaration<C> {
	/// Starts a declaration for `name`.
	pub fn builder(name: impl Into<Box<str>>) -> DeclarationBuilder<C> {
		DeclarationBuilder::new(name)
	}

	/// A declaration with no behavior and no ancestors.
	pub fn empty(name: impl Into<Box<str>>) -> Self {
		DeclarationBuilder::new(name).build()
	}

	#[inline]
	pub fn name(&self) -> &str {
		&self.name
	}

	#[inline]
	pub fn constructor(&self) -> Option<&Callback<C>> {
		self.constructor.as_ref()
	}

	#[inline]
	pub fn events(&self) -> &Table<EventRef<C>> {
		&self.events
	}

	#[inline]
	pub fn dependencies(&self) -> &Table<Dependency<C>> {
		&self.dependencies
	}

	#[inline]
	pub fn methods(&self) -> &Table<Callback<C>> {
		&self.methods
	}

	/// Traits named inside the declaration body.
	#[inline]
	pub fn inline_traits(&self) -> &[Box<str>] {
		&self.inline_traits
	}

	/// Ancestors supplied alongside the declaration; the last one is the base.
	#[inline]
	pub fn ancestor_args(&self) -> &[Ancestor] {
		&self.ancestors
	}

	#[inline]
	pub fn split(&self) -> Option<&Split> {
		self.split.as_ref()
	}
}

impl<C> fmt::Debug for Declaration<C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Declaration")
			.field("name", &self.name)
			.field("constructor", &self.constructor)
			.field("events", &self.events)
			.field("dependencies", &self.dependencies)
			.field("methods", &self.methods)
			.field("inline_traits", &self.inline_traits)
			.field("ancestors", &self.ancestors)
			.field("split", &self.split)
			.finish()
	}
}
