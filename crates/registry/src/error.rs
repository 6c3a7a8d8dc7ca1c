use std::fmt;

use crate::kind::EntityKind;

/// Declaration store errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
	/// A name was registered twice in the same namespace.
	#[error("duplicate {kind} registration: {name:?}")]
	DuplicateRegistration { kind: EntityKind, name: Box<str> },
	/// No declaration is registered under the name.
	#[error("{kind} not found: {name:?}")]
	NotFound { kind: EntityKind, name: Box<str> },
}

/// How two contributions to the same dependency entry disagreed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyConflict {
	/// Both sides are boolean requirements and they differ.
	Flags { existing: bool, incoming: bool },
	/// One side is a plain boolean and the other a sub-event table.
	Shape { existing: DependencyShape, incoming: DependencyShape },
}

impl fmt::Display for DependencyConflict {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Flags { existing, incoming } => {
				write!(f, "required={existing} contradicts required={incoming}")
			}
			Self::Shape { existing, incoming } => {
				write!(f, "{existing} cannot be reconciled with {incoming}")
			}
		}
	}
}

/// Top-level representation of a dependency entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyShape {
	Flag,
	Events,
}

impl fmt::Display for DependencyShape {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Flag => f.write_str("boolean flag"),
			Self::Events => f.write_str("sub-event table"),
		}
	}
}

/// Resolution errors.
///
/// Every variant is an authoring error in the declaration graph; none are retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
	#[error(transparent)]
	Store(#[from] RegistryError),

	/// The ancestor graph loops back on itself. `path` starts and ends with the same name.
	#[error("{kind} ancestor cycle: {}", display_path(.path))]
	Cycle { kind: EntityKind, path: Vec<Box<str>> },

	/// An ancestor or trait name has no registered declaration.
	#[error("{kind} {entity:?} names unknown ancestor {ancestor:?}")]
	UnknownAncestor {
		kind: EntityKind,
		entity: Box<str>,
		ancestor: Box<str>,
	},

	/// The root sentinel appeared anywhere but the trailing ancestor position.
	#[error("{kind} {entity:?}: root sentinel at ancestor position {position} must be the trailing ancestor")]
	InvalidAncestor {
		kind: EntityKind,
		entity: Box<str>,
		position: usize,
	},

	/// Ancestor nesting is deeper than the configured limit.
	#[error("{kind} {entity:?}: ancestor nesting exceeds max depth {limit}")]
	DepthExceeded {
		kind: EntityKind,
		entity: Box<str>,
		limit: usize,
	},

	/// The linearized source list would grow past the configured limit.
	#[error("{kind} {entity:?}: linearization exceeds max sources {limit}")]
	TooManySources {
		kind: EntityKind,
		entity: Box<str>,
		limit: usize,
	},

	/// Two contributing declarations disagree on a dependency requirement.
	#[error(
		"{kind} {entity:?}: contradictory dependency {dependency:?}{} introduced by {source_decl:?}: {conflict}",
		display_sub_event(.sub_event)
	)]
	ContradictoryDependency {
		kind: EntityKind,
		entity: Box<str>,
		source_decl: Box<str>,
		dependency: Box<str>,
		sub_event: Option<Box<str>>,
		conflict: DependencyConflict,
	},

	/// A collection resolved without a split description.
	#[error("collection {entity:?} has no split")]
	MissingSplit { entity: Box<str> },

	/// A collection splits by a dependency it does not declare.
	#[error("collection {entity:?} splits by undeclared dependency {dependency:?}")]
	SplitDependencyUndeclared { entity: Box<str>, dependency: Box<str> },
}

fn display_path(path: &[Box<str>]) -> String {
	path.iter().map(|name| &**name).collect::<Vec<_>>().join(" -> ")
}

fn display_sub_event(sub_event: &Option<Box<str>>) -> String {
	match sub_event {
		Some(key) => format!(" sub-event {key:?}"),
		None => String::new(),
	}
}

/// Configuration loading errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("invalid registry config: {0}")]
	Parse(#[from] toml::de::Error),
	#[error("max_depth must be at least 1")]
	ZeroDepth,
	#[error("max_sources must be at least 1")]
	ZeroSources,
}
