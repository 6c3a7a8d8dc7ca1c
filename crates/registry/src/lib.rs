//! Declaration registry and composition resolver.
//!
//! An entity (component or collection) is declared from a base, reusable traits
//! ("mixins") in two positions, and its own body. This crate stores those raw
//! declarations and resolves each entity into one flattened [`ResolvedDefinition`]:
//!
//! 1. **Linearize:** the linearizer walks the ancestor graph into an ordered source list
//!    (base chain, inline traits, argument traits, self), rejecting cycles.
//! 2. **Merge:** per-aspect mergers fold that list: constructors chain, event callbacks
//!    chain on collision, dependency sub-events chain or conflict, methods override.
//! 3. **Cache:** a [`Namespace`] memoizes linearizations and resolved definitions per
//!    name; a [`Registry`] groups the component and collection namespaces.
//!
//! Callbacks are opaque [`Callback`]s over a receiver type `C`; binding them to live
//! instances is left to the caller.

mod callback;
mod config;
mod decl;
mod error;
mod kind;
mod linearize;
mod merge;
mod namespace;
mod registry;
mod resolved;
mod store;

pub use callback::{Callback, CallbackId, CallbackResult, Chain, Handler};
pub use config::{RegistryConfig, ResolveStrategy};
pub use decl::{
	Ancestor, Ancestry, Declaration, DeclarationBuilder, Dependency, EventKey, EventRef, Split,
	SubEvent, Table,
};
pub use error::{ConfigError, DependencyConflict, DependencyShape, RegistryError, ResolveError};
pub use kind::EntityKind;
pub use linearize::Sources;
pub use namespace::Namespace;
pub use registry::Registry;
pub use resolved::{ResolvedDefinition, Subscription};
pub use store::DeclarationStore;
