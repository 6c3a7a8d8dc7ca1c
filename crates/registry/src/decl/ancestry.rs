//! Ancestor reference model.
//!
//! The ancestor argument list is positional: the trailing element is the single
//! base and everything before it is an argument trait. [`Ancestry`] is the split
//! view of that list plus the inline traits, in the shape the linearizer consumes.

use std::fmt;

use super::Declaration;
use crate::error::ResolveError;
use crate::kind::EntityKind;

/// One element of an ancestor argument list.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Ancestor {
	/// A registered declaration name.
	Named(Box<str>),
	/// "No real base": lets an entity list argument traits without extending anything.
	Root,
}

impl Ancestor {
	pub fn name(&self) -> Option<&str> {
		match self {
			Self::Named(name) => Some(name),
			Self::Root => None,
		}
	}
}

impl From<&str> for Ancestor {
	fn from(name: &str) -> Self {
		Self::Named(name.into())
	}
}

impl From<String> for Ancestor {
	fn from(name: String) -> Self {
		Self::Named(name.into_boxed_str())
	}
}

impl From<Box<str>> for Ancestor {
	fn from(name: Box<str>) -> Self {
		Self::Named(name)
	}
}

impl fmt::Debug for Ancestor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Named(name) => write!(f, "{name:?}"),
			Self::Root => f.write_str("Root"),
		}
	}
}

/// Positional split of a declaration's ancestors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ancestry<'a> {
	/// Trailing ancestor, unless absent or the root sentinel.
	pub base: Option<&'a str>,
	/// Traits named inside the declaration body.
	pub inline_traits: Vec<&'a str>,
	/// Ancestor arguments before the trailing base.
	pub arg_traits: Vec<&'a str>,
}

impl<'a> Ancestry<'a> {
	/// Splits `decl`'s ancestor lists.
	///
	/// Fails with [`ResolveError::InvalidAncestor`] when the root sentinel is not the
	/// trailing ancestor argument.
	pub fn of<C>(kind: EntityKind, decl: &'a Declaration<C>) -> Result<Self, ResolveError> {
		let (base, args) = match decl.ancestors.split_last() {
			Some((last, rest)) => (last.name(), rest),
			None => (None, &[][..]),
		};

		let mut arg_traits = Vec::with_capacity(args.len());
		for (position, ancestor) in args.iter().enumerate() {
			match ancestor {
				Ancestor::Named(name) => arg_traits.push(&**name),
				Ancestor::Root => {
					return Err(ResolveError::InvalidAncestor {
						kind,
						entity: decl.name.clone(),
						position,
					});
				}
			}
		}

		Ok(Self {
			base,
			inline_traits: decl.inline_traits.iter().map(|name| &**name).collect(),
			arg_traits,
		})
	}

	/// Ancestor names in resolution order: base, inline traits, argument traits.
	pub fn resolution_order(&self) -> impl Iterator<Item = &'a str> + '_ {
		self.base
			.into_iter()
			.chain(self.inline_traits.iter().copied())
			.chain(self.arg_traits.iter().copied())
	}
}
