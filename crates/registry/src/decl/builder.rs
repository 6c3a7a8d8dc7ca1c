use serde_json::Value;

use super::{Ancestor, Declaration, Dependency, EventRef, Split, SubEvent, Table};
use crate::callback::{Callback, CallbackResult, Handler};

/// Builder for [`Declaration`].
///
/// Writing the same key twice within one declaration behaves like assigning the
/// key twice in a literal: the later write replaces the earlier one. Merging only
/// happens across declarations, during resolution.
pub struct DeclarationBuilder<C> {
	decl: Declaration<C>,
}

impl<C> DeclarationBuilder<C> {
	pub fn new(name: impl Into<Box<str>>) -> Self {
		Self {
			decl: Declaration {
				name: name.into(),
				constructor: None,
				events: Table::default(),
				dependencies: Table::default(),
				methods: Table::default(),
				inline_traits: Vec::new(),
				ancestors: Vec::new(),
				split: None,
			},
		}
	}

	pub fn constructor<F>(self, func: F) -> Self
	where
		F: Fn(&mut C, &[Value]) -> CallbackResult + Send + Sync + 'static,
	{
		self.constructor_callback(Callback::new(func))
	}

	pub fn constructor_callback(mut self, callback: Callback<C>) -> Self {
		self.decl.constructor = Some(callback);
		self
	}

	/// Binds a callback to an event key (`"click .selector"` or a bare event name).
	pub fn event<F>(self, key: impl Into<Box<str>>, func: F) -> Self
	where
		F: Fn(&mut C, &[Value]) -> CallbackResult + Send + Sync + 'static,
	{
		self.event_callback(key, Callback::new(func))
	}

	pub fn event_callback(mut self, key: impl Into<Box<str>>, callback: Callback<C>) -> Self {
		self.decl
			.events
			.insert(key.into(), EventRef::Handler(Handler::Single(callback)));
		self
	}

	/// Binds an event key to a method of the resolved method table.
	pub fn event_method(mut self, key: impl Into<Box<str>>, method: impl Into<Box<str>>) -> Self {
		self.decl.events.insert(key.into(), EventRef::Method(method.into()));
		self
	}

	pub fn method<F>(self, name: impl Into<Box<str>>, func: F) -> Self
	where
		F: Fn(&mut C, &[Value]) -> CallbackResult + Send + Sync + 'static,
	{
		self.method_callback(name, Callback::new(func))
	}

	pub fn method_callback(mut self, name: impl Into<Box<str>>, callback: Callback<C>) -> Self {
		self.decl.methods.insert(name.into(), callback);
		self
	}

	/// Declares a dependency as a plain requirement flag.
	pub fn dependency(mut self, name: impl Into<Box<str>>, required: bool) -> Self {
		self.decl.dependencies.insert(name.into(), Dependency::Flag(required));
		self
	}

	/// List shorthand: every named dependency is required.
	pub fn dependencies<I, S>(mut self, names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<Box<str>>,
	{
		for name in names {
			self.decl.dependencies.insert(name.into(), Dependency::Flag(true));
		}
		self
	}

	/// Subscribes a callback to a dependency sub-event.
	pub fn dependency_event<F>(
		self,
		dependency: impl Into<Box<str>>,
		sub_event: impl Into<Box<str>>,
		func: F,
	) -> Self
	where
		F: Fn(&mut C, &[Value]) -> CallbackResult + Send + Sync + 'static,
	{
		self.dependency_event_callback(dependency, sub_event, Callback::new(func))
	}

	pub fn dependency_event_callback(
		self,
		dependency: impl Into<Box<str>>,
		sub_event: impl Into<Box<str>>,
		callback: Callback<C>,
	) -> Self {
		self.sub_event(dependency, sub_event, SubEvent::Handler(Handler::Single(callback)))
	}

	/// Sets a boolean flag on a dependency sub-event.
	pub fn dependency_event_flag(
		self,
		dependency: impl Into<Box<str>>,
		sub_event: impl Into<Box<str>>,
		flag: bool,
	) -> Self {
		self.sub_event(dependency, sub_event, SubEvent::Flag(flag))
	}

	fn sub_event(
		mut self,
		dependency: impl Into<Box<str>>,
		sub_event: impl Into<Box<str>>,
		value: SubEvent<C>,
	) -> Self {
		let entry = self
			.decl
			.dependencies
			.entry(dependency.into())
			.or_insert_with(|| Dependency::Events(Table::default()));
		if let Dependency::Flag(_) = *entry {
			*entry = Dependency::Events(Table::default());
		}
		if let Dependency::Events(table) = entry {
			table.insert(sub_event.into(), value);
		}
		self
	}

	/// Traits named inside the declaration body, resolved after the base.
	pub fn mixins<I, S>(mut self, names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<Box<str>>,
	{
		self.decl.inline_traits.extend(names.into_iter().map(Into::into));
		self
	}

	/// Ancestor arguments; the last one is the base.
	pub fn extends<I, A>(mut self, ancestors: I) -> Self
	where
		I: IntoIterator<Item = A>,
		A: Into<Ancestor>,
	{
		self.decl.ancestors.extend(ancestors.into_iter().map(Into::into));
		self
	}

	/// Collection split: instantiate `into` per item of `by_dependency`.
	pub fn split(mut self, by_dependency: impl Into<Box<str>>, into: impl Into<Box<str>>) -> Self {
		self.decl.split = Some(Split {
			by_dependency: by_dependency.into(),
			into: into.into(),
		});
		self
	}

	pub fn build(self) -> Declaration<C> {
		self.decl
	}
}
