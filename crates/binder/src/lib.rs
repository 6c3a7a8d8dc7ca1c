//! Live instances of resolved definitions.
//!
//! [`instantiate`] resolves an entity through a [`Registry`], runs its constructor
//! chain against a fresh [`Instance`] and fires the [`INIT_EVENT`]. Every callback the
//! definition carries is invoked with that instance as its receiver.
//!
//! [`Registry`]: lineage_registry::Registry

mod error;
mod instance;

#[cfg(test)]
mod tests;

pub use error::{DispatchError, InstantiateError};
pub use instance::{INIT_EVENT, Instance, InstanceCallback, InstanceId, InstanceRegistry, instantiate};
