use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use lineage_registry::{
	Callback, EntityKind, EventRef, Registry, ResolvedDefinition, Subscription,
};
use serde_json::Value;

use crate::error::{DispatchError, InstantiateError};

/// Lifecycle event fired once the constructor chain has completed.
pub const INIT_EVENT: &str = "init";

/// Registry whose callbacks receive live instances carrying state `S`.
pub type InstanceRegistry<S> = Registry<Instance<S>>;

/// Callback bound to instances carrying state `S`.
pub type InstanceCallback<S> = Callback<Instance<S>>;

static NEXT_INSTANCE_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InstanceId(u64);

impl InstanceId {
	fn next() -> Self {
		Self(NEXT_INSTANCE_ID.fetch_add(1, Ordering::Relaxed))
	}
}

impl fmt::Display for InstanceId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "instance#{}", self.0)
	}
}

/// A live object built from a resolved definition.
///
/// Callbacks see the instance as `&mut Instance<S>` and keep their own data in
/// [`Instance::state`].
pub struct Instance<S> {
	id: InstanceId,
	definition: Arc<ResolvedDefinition<Instance<S>>>,
	pub state: S,
}

/// Resolves `name` and builds an instance around `state`.
///
/// Constructors run in chain order and the first failure aborts construction. The
/// [`INIT_EVENT`] fires afterwards if the definition binds it.
pub fn instantiate<S>(
	registry: &InstanceRegistry<S>,
	kind: EntityKind,
	name: &str,
	state: S,
) -> Result<Instance<S>, InstantiateError> {
	let definition = registry.resolve(kind, name)?;
	let mut instance = Instance {
		id: InstanceId::next(),
		definition: Arc::clone(&definition),
		state,
	};

	for ctor in definition.constructor_chain() {
		ctor.invoke(&mut instance, &[]).map_err(InstantiateError::Callback)?;
	}
	instance.trigger(INIT_EVENT, &[])?;

	tracing::debug!(
		%kind,
		name,
		id = %instance.id,
		constructors = definition.constructor_chain().len(),
		"instantiated"
	);
	Ok(instance)
}

impl<S> Instance<S> {
	#[inline]
	pub fn id(&self) -> InstanceId {
		self.id
	}

	#[inline]
	pub fn kind(&self) -> EntityKind {
		self.definition.kind()
	}

	#[inline]
	pub fn name(&self) -> &str {
		self.definition.name()
	}

	#[inline]
	pub fn definition(&self) -> &Arc<ResolvedDefinition<Instance<S>>> {
		&self.definition
	}

	/// Fires the event bound under exactly `event`.
	///
	/// Returns `false` when nothing is bound. Method references are looked up in the
	/// method table at this point, so a reference to a missing method fails here.
	pub fn trigger(&mut self, event: &str, args: &[Value]) -> Result<bool, DispatchError> {
		let definition = Arc::clone(&self.definition);
		let Some(binding) = definition.event(event) else {
			tracing::trace!(id = %self.id, event, "no binding");
			return Ok(false);
		};
		self.run_binding(binding, args)?;
		Ok(true)
	}

	/// Runs every `"<trigger> <selector>"` binding matching the pair, in table order.
	///
	/// Returns the number of bindings run.
	pub fn dispatch_dom(&mut self, trigger: &str, selector: &str, args: &[Value]) -> Result<usize, DispatchError> {
		let definition = Arc::clone(&self.definition);
		let mut ran = 0;
		for (key, binding) in definition.dom_events(trigger, selector) {
			tracing::trace!(id = %self.id, key, "dom dispatch");
			self.run_binding(binding, args)?;
			ran += 1;
		}
		Ok(ran)
	}

	/// Invokes a method from the resolved method table.
	pub fn call(&mut self, method: &str, args: &[Value]) -> Result<Value, DispatchError> {
		let Some(callback) = self.definition.method(method).cloned() else {
			return Err(DispatchError::MethodNotFound {
				kind: self.kind(),
				entity: self.name().into(),
				method: method.into(),
			});
		};
		Ok(callback.invoke(self, args)?)
	}

	pub fn responds_to(&self, method: &str) -> bool {
		self.definition.has_method(method)
	}

	/// Delivers a sub-event raised by `dependency` to the chained handlers.
	///
	/// Returns `false` when the definition does not subscribe to the pair.
	pub fn notify_dependency(
		&mut self,
		dependency: &str,
		sub_event: &str,
		args: &[Value],
	) -> Result<bool, DispatchError> {
		let definition = Arc::clone(&self.definition);
		let Some(handler) = definition.dependency_handler(dependency, sub_event) else {
			return Ok(false);
		};
		handler.invoke(self, args)?;
		Ok(true)
	}

	/// Pairs the data layer should forward to this instance.
	pub fn subscriptions(&self) -> impl Iterator<Item = Subscription<'_>> + '_ {
		self.definition.subscriptions()
	}

	pub fn required_dependencies(&self) -> impl Iterator<Item = &str> + '_ {
		self.definition.required_dependencies()
	}

	fn run_binding(&mut self, binding: &EventRef<Instance<S>>, args: &[Value]) -> Result<(), DispatchError> {
		match binding {
			EventRef::Handler(handler) => handler.invoke(self, args)?,
			EventRef::Method(method) => {
				self.call(method, args)?;
			}
		}
		Ok(())
	}
}

impl<S: fmt::Debug> fmt::Debug for Instance<S> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Instance")
			.field("id", &self.id)
			.field("kind", &self.kind())
			.field("name", &self.name())
			.field("state", &self.state)
			.finish_non_exhaustive()
	}
}
