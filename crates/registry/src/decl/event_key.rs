/// Parsed form of an event table key.
///
/// `"click .some-event"` is a DOM-style binding (trigger, then selector after the
/// first whitespace run); `"init"` is a bare named event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKey<'a> {
	Named(&'a str),
	Dom { trigger: &'a str, selector: &'a str },
}

impl<'a> EventKey<'a> {
	pub fn parse(key: &'a str) -> Self {
		let key = key.trim();
		match key.split_once(char::is_whitespace) {
			Some((trigger, selector)) if !selector.trim().is_empty() => Self::Dom {
				trigger,
				selector: selector.trim(),
			},
			_ => Self::Named(key),
		}
	}

	/// Whether this key binds `trigger` on `selector`.
	pub fn matches_dom(&self, trigger: &str, selector: &str) -> bool {
		matches!(self, Self::Dom { trigger: t, selector: s } if *t == trigger && *s == selector.trim())
	}
}
