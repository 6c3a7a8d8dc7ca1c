use std::fmt;

/// Namespace an entity is declared in.
///
/// Components and collections share the resolver but never see each other's
/// declarations: ancestors are always looked up in the entity's own namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityKind {
	/// A single component.
	Component,
	/// A component that splits a collection dependency into item components.
	Collection,
}

impl EntityKind {
	pub const ALL: [EntityKind; 2] = [EntityKind::Component, EntityKind::Collection];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Component => "component",
			Self::Collection => "collection",
		}
	}
}

impl fmt::Display for EntityKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
