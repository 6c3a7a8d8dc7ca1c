use std::collections::hash_map::Entry;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::decl::{Declaration, Dependency, SubEvent, Table};
use crate::error::{DependencyConflict, ResolveError};
use crate::kind::EntityKind;

struct Conflict {
	sub_event: Option<Box<str>>,
	conflict: DependencyConflict,
}

/// First explicit flag seen per `(dependency, sub-event)`, kept even after a callback
/// takes over the slot.
type DeclaredFlags = FxHashMap<(Box<str>, Box<str>), bool>;

/// Folds dependency tables in source order.
///
/// Fails on the first contradiction: differing boolean flags at either level, or a
/// flag meeting a sub-event table at the top level. Sub-event flags are compared
/// against every earlier flag on the key, whether or not a callback occupies it.
pub(crate) fn merge_dependencies<C>(
	kind: EntityKind,
	entity: &str,
	sources: &[Arc<Declaration<C>>],
) -> Result<Table<Dependency<C>>, ResolveError> {
	let mut dependencies: Table<Dependency<C>> = Table::default();
	let mut flags = DeclaredFlags::default();
	for source in sources {
		for (name, incoming) in source.dependencies() {
			let merged = check_flags(&mut flags, name, incoming).and_then(|()| {
				match dependencies.get_mut(name) {
					Some(existing) => merge_dependency(existing, incoming),
					None => {
						dependencies.insert(name.clone(), incoming.clone());
						Ok(())
					}
				}
			});
			merged.map_err(|Conflict { sub_event, conflict }| ResolveError::ContradictoryDependency {
				kind,
				entity: entity.into(),
				source_decl: source.name.clone(),
				dependency: name.clone(),
				sub_event,
				conflict,
			})?;
		}
	}
	Ok(dependencies)
}

fn check_flags<C>(flags: &mut DeclaredFlags, dependency: &str, incoming: &Dependency<C>) -> Result<(), Conflict> {
	for (sub_event, value) in incoming.sub_events().into_iter().flatten() {
		let Some(next) = value.as_flag() else {
			continue;
		};
		match flags.entry((dependency.into(), sub_event.clone())) {
			Entry::Occupied(seen) if *seen.get() != next => {
				return Err(Conflict {
					sub_event: Some(sub_event.clone()),
					conflict: DependencyConflict::Flags {
						existing: *seen.get(),
						incoming: next,
					},
				});
			}
			Entry::Occupied(_) => {}
			Entry::Vacant(slot) => {
				slot.insert(next);
			}
		}
	}
	Ok(())
}

fn merge_dependency<C>(existing: &mut Dependency<C>, incoming: &Dependency<C>) -> Result<(), Conflict> {
	match (existing, incoming) {
		(Dependency::Flag(current), Dependency::Flag(next)) => {
			if current != next {
				return Err(Conflict {
					sub_event: None,
					conflict: DependencyConflict::Flags {
						existing: *current,
						incoming: *next,
					},
				});
			}
			Ok(())
		}
		(Dependency::Events(current), Dependency::Events(next)) => {
			for (key, value) in next {
				match current.get_mut(key) {
					Some(slot) => merge_sub_event(slot, value),
					None => {
						current.insert(key.clone(), value.clone());
					}
				}
			}
			Ok(())
		}
		(existing, incoming) => Err(Conflict {
			sub_event: None,
			conflict: DependencyConflict::Shape {
				existing: existing.shape(),
				incoming: incoming.shape(),
			},
		}),
	}
}

/// Flag agreement is settled by [`check_flags`] before this runs.
fn merge_sub_event<C>(existing: &mut SubEvent<C>, incoming: &SubEvent<C>) {
	let SubEvent::Handler(next) = incoming else {
		return;
	};
	match *existing {
		SubEvent::Handler(ref mut current) => current.append(next),
		// A flag never suppresses a registered callback.
		SubEvent::Flag(_) => *existing = SubEvent::Handler(next.clone()),
	}
}
