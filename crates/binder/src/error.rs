use lineage_registry::{EntityKind, ResolveError};

/// Failure to produce a live instance.
#[derive(Debug, thiserror::Error)]
pub enum InstantiateError {
	#[error(transparent)]
	Resolve(#[from] ResolveError),
	/// A constructor in the chain failed; later constructors did not run.
	#[error(transparent)]
	Callback(anyhow::Error),
	/// The `init` lifecycle event failed after every constructor ran.
	#[error(transparent)]
	Init(#[from] DispatchError),
}

/// Failure while dispatching an event, sub-event or method call on an instance.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
	#[error("{kind} {entity:?} has no method {method:?}")]
	MethodNotFound {
		kind: EntityKind,
		entity: Box<str>,
		method: Box<str>,
	},
	#[error(transparent)]
	Callback(#[from] anyhow::Error),
}
