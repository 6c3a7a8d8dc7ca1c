use std::sync::Arc;

use crate::decl::{Declaration, EventRef, Table};

/// Folds event tables in source order.
///
/// A key already holding callbacks that receives another callback grows into a chain;
/// any collision involving a method reference is won by the later source.
pub(crate) fn merge_events<C>(sources: &[Arc<Declaration<C>>]) -> Table<EventRef<C>> {
	let mut events: Table<EventRef<C>> = Table::default();
	for source in sources {
		for (key, incoming) in source.events() {
			match (events.get_mut(key), incoming) {
				(Some(EventRef::Handler(existing)), EventRef::Handler(next)) => existing.append(next),
				(Some(existing), _) => *existing = incoming.clone(),
				(None, _) => {
					events.insert(key.clone(), incoming.clone());
				}
			}
		}
	}
	events
}
