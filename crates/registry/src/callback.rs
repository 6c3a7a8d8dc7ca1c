//! Opaque callbacks and the single/chain combinator.
//!
//! # Role
//!
//! Declarations carry behavior as [`Callback`]s. When two declarations contribute a
//! callback under the same key, the mergers do not wrap one closure in another; they
//! build an explicit [`Handler::Chain`] so the composed value stays inspectable.
//!
//! # Invariants
//!
//! - Callback identity is stable across clones; equality is identity, never structural.
//! - A chain is never empty and always preserves insertion order.
//! - Invoking a chain runs every member against the same receiver, in order, and stops
//!   only when a member returns an error (the error is returned unmodified).

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::Value;
use smallvec::SmallVec;

/// Result returned by every callback.
pub type CallbackResult = anyhow::Result<Value>;

type CallbackFn<C> = dyn Fn(&mut C, &[Value]) -> CallbackResult + Send + Sync;

static NEXT_CALLBACK_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CallbackId(u64);

impl CallbackId {
	fn next() -> Self {
		Self(NEXT_CALLBACK_ID.fetch_add(1, Ordering::Relaxed))
	}
}

impl fmt::Display for CallbackId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "cb#{}", self.0)
	}
}

/// An opaque callback invoked with a receiver context and positional arguments.
///
/// `C` is the receiver type the binder passes as `&mut C` (the live instance).
pub struct Callback<C> {
	id: CallbackId,
	label: Option<Arc<str>>,
	func: Arc<CallbackFn<C>>,
}

impl<C> Callback<C> {
	/// Wraps a closure in a new callback with a fresh identity.
	pub fn new<F>(func: F) -> Self
	where
		F: Fn(&mut C, &[Value]) -> CallbackResult + Send + Sync + 'static,
	{
		Self {
			id: CallbackId::next(),
			label: None,
			func: Arc::new(func),
		}
	}

	/// Wraps a closure and attaches a diagnostic label.
	pub fn labeled<F>(label: impl Into<Arc<str>>, func: F) -> Self
	where
		F: Fn(&mut C, &[Value]) -> CallbackResult + Send + Sync + 'static,
	{
		Self {
			label: Some(label.into()),
			..Self::new(func)
		}
	}

	#[inline]
	pub fn id(&self) -> CallbackId {
		self.id
	}

	#[inline]
	pub fn label(&self) -> Option<&str> {
		self.label.as_deref()
	}

	/// Invokes the callback with `receiver` as its context.
	#[inline]
	pub fn invoke(&self, receiver: &mut C, args: &[Value]) -> CallbackResult {
		(self.func)(receiver, args)
	}
}

impl<C> Clone for Callback<C> {
	fn clone(&self) -> Self {
		Self {
			id: self.id,
			label: self.label.clone(),
			func: self.func.clone(),
		}
	}
}

impl<C> PartialEq for Callback<C> {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id
	}
}

impl<C> Eq for Callback<C> {}

impl<C> fmt::Debug for Callback<C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.label {
			Some(label) => write!(f, "Callback({}, {label:?})", self.id),
			None => write!(f, "Callback({})", self.id),
		}
	}
}

/// Ordered, non-empty sequence of callbacks sharing one key.
pub struct Chain<C> {
	callbacks: SmallVec<[Callback<C>; 2]>,
}

impl<C> Chain<C> {
	fn starting_with(first: Callback<C>) -> Self {
		let mut callbacks = SmallVec::new();
		callbacks.push(first);
		Self { callbacks }
	}

	#[inline]
	pub fn len(&self) -> usize {
		self.callbacks.len()
	}

	/// Always false; chains hold at least one callback.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.callbacks.is_empty()
	}

	#[inline]
	pub fn callbacks(&self) -> &[Callback<C>] {
		&self.callbacks
	}
}

impl<C> Clone for Chain<C> {
	fn clone(&self) -> Self {
		Self {
			callbacks: self.callbacks.clone(),
		}
	}
}

impl<C> fmt::Debug for Chain<C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.callbacks.iter()).finish()
	}
}

/// A callback-valued table entry: either one callback or a chain of them.
pub enum Handler<C> {
	Single(Callback<C>),
	Chain(Chain<C>),
}

impl<C> Handler<C> {
	/// Returns the callbacks in invocation order.
	pub fn callbacks(&self) -> &[Callback<C>] {
		match self {
			Self::Single(callback) => std::slice::from_ref(callback),
			Self::Chain(chain) => chain.callbacks(),
		}
	}

	/// Returns the callback identities in invocation order.
	pub fn ids(&self) -> Vec<CallbackId> {
		self.callbacks().iter().map(Callback::id).collect()
	}

	#[inline]
	pub fn len(&self) -> usize {
		self.callbacks().len()
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.callbacks().is_empty()
	}

	#[inline]
	pub fn is_chain(&self) -> bool {
		matches!(self, Self::Chain(_))
	}

	/// Appends `next` after every callback already held, promoting a single callback
	/// to a chain.
	pub fn append(&mut self, next: &Handler<C>) {
		match self {
			Self::Chain(chain) => chain.callbacks.extend(next.callbacks().iter().cloned()),
			Self::Single(first) => {
				let mut chain = Chain::starting_with(first.clone());
				chain.callbacks.extend(next.callbacks().iter().cloned());
				*self = Self::Chain(chain);
			}
		}
	}

	/// Runs every callback in order against `receiver`. Return values are discarded.
	pub fn invoke(&self, receiver: &mut C, args: &[Value]) -> anyhow::Result<()> {
		for callback in self.callbacks() {
			callback.invoke(receiver, args)?;
		}
		Ok(())
	}
}

impl<C> From<Callback<C>> for Handler<C> {
	fn from(callback: Callback<C>) -> Self {
		Self::Single(callback)
	}
}

impl<C> Clone for Handler<C> {
	fn clone(&self) -> Self {
		match self {
			Self::Single(callback) => Self::Single(callback.clone()),
			Self::Chain(chain) => Self::Chain(chain.clone()),
		}
	}
}

impl<C> fmt::Debug for Handler<C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Single(callback) => f.debug_tuple("Single").field(callback).finish(),
			Self::Chain(chain) => f.debug_tuple("Chain").field(chain).finish(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn push(tag: &'static str) -> Callback<Vec<&'static str>> {
		Callback::labeled(tag, move |log: &mut Vec<&'static str>, _| {
			log.push(tag);
			Ok(Value::Null)
		})
	}

	#[test]
	fn clones_share_identity() {
		let a = push("a");
		let b = a.clone();
		assert_eq!(a, b);
		assert_ne!(a, push("a"));
	}

	#[test]
	fn append_promotes_single_to_chain() {
		let mut handler = Handler::from(push("a"));
		assert!(!handler.is_chain());

		handler.append(&Handler::from(push("b")));
		handler.append(&Handler::from(push("c")));
		assert!(handler.is_chain());
		assert_eq!(handler.len(), 3);

		let mut log = Vec::new();
		handler.invoke(&mut log, &[]).unwrap();
		assert_eq!(log, ["a", "b", "c"]);
	}

	#[test]
	fn chain_stops_at_first_error() {
		let failing: Callback<Vec<&'static str>> = Callback::new(|_, _| anyhow::bail!("boom"));
		let mut handler = Handler::from(push("a"));
		handler.append(&Handler::from(failing));
		handler.append(&Handler::from(push("c")));

		let mut log = Vec::new();
		let err = handler.invoke(&mut log, &[]).unwrap_err();
		assert_eq!(err.to_string(), "boom");
		assert_eq!(log, ["a"]);
	}
}
