use lineage_registry::EventRef;
use pretty_assertions::assert_eq;

use super::*;
use crate::{DispatchError, INIT_EVENT};

#[test]
fn child_inherits_method_bindings() {
	let registry = registry();
	define(&registry, Decl::builder("base").event_method("click .some-event1", "method1").build());
	define(&registry, Decl::builder("mixin").event_method("click .some-event2", "method2").build());
	define(
		&registry,
		Decl::builder("child")
			.event_method("click .some-event3", "method3")
			.extends(["mixin", "base"])
			.build(),
	);

	let def = registry.resolve(EntityKind::Component, "child").unwrap();
	let events: Vec<_> = def
		.events()
		.iter()
		.map(|(key, value)| (&**key, value.as_method()))
		.collect();
	assert_eq!(
		events,
		[
			("click .some-event1", Some("method1")),
			("click .some-event2", Some("method2")),
			("click .some-event3", Some("method3")),
		]
	);
}

#[test]
fn same_event_callbacks_chain_base_first() {
	let registry = registry();
	define(&registry, Decl::builder("base").event_callback("click .some-event", spy("base")).build());
	define(&registry, Decl::builder("mixin").event_callback("click .some-event", spy("mixin")).build());
	define(
		&registry,
		Decl::builder("child")
			.event_callback("click .some-event", spy("child"))
			.extends(["mixin", "base"])
			.build(),
	);

	let mut view = create(&registry, "child");
	assert_eq!(view.dispatch_dom("click", ".some-event", &[]).unwrap(), 1);
	assert_eq!(view.state, ["base", "mixin", "child"]);
}

#[test]
fn init_callbacks_run_on_the_created_instance() {
	let registry = registry();
	nested_hierarchy(&registry, "child", |builder, tag| builder.event_callback(INIT_EVENT, spy(tag)));

	let first = create(&registry, "child");
	let second = create(&registry, "child");

	assert_eq!(first.state, ["bmixin", "base", "mixin", "child"]);
	assert_eq!(second.state, first.state);
	assert_ne!(first.id(), second.id());
}

#[test]
fn method_bindings_dispatch_through_the_method_table() {
	let registry = registry();
	define(
		&registry,
		Decl::builder("base")
			.event_method("click .save", "save")
			.method_callback("save", spy("save"))
			.build(),
	);
	define(
		&registry,
		Decl::builder("child")
			.method_callback("save", spy("child save"))
			.extends(["base"])
			.build(),
	);

	let mut view = create(&registry, "child");
	view.dispatch_dom("click", ".save", &[]).unwrap();
	assert_eq!(view.state, ["child save"]);
	assert_eq!(view.dispatch_dom("click", ".other", &[]).unwrap(), 0);
}

#[test]
fn dangling_method_binding_fails_at_dispatch() {
	let registry = registry();
	define(&registry, Decl::builder("view").event_method("refresh", "reload").build());

	let mut view = create(&registry, "view");
	assert!(matches!(
		view.trigger("refresh", &[]),
		Err(DispatchError::MethodNotFound { ref method, .. }) if &**method == "reload"
	));
	assert!(!view.trigger("unbound", &[]).unwrap());
}

#[test]
fn handler_error_stops_the_chain_unmodified() {
	let registry = registry();
	define(
		&registry,
		Decl::builder("base")
			.event("fail", |_: &mut View, _| anyhow::bail!("boom"))
			.build(),
	);
	define(
		&registry,
		Decl::builder("child")
			.event_callback("fail", spy("after"))
			.extends(["base"])
			.build(),
	);

	let mut view = create(&registry, "child");
	let err = view.trigger("fail", &[]).unwrap_err();
	assert_eq!(err.to_string(), "boom");
	assert!(view.state.is_empty());
	assert!(matches!(
		view.definition().event("fail"),
		Some(EventRef::Handler(handler)) if handler.len() == 2
	));
}
