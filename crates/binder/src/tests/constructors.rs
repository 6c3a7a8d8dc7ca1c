use pretty_assertions::assert_eq;

use super::*;
use crate::InstantiateError;

#[test]
fn base_constructor_runs_first() {
	let registry = registry();
	define(&registry, Decl::builder("base").constructor_callback(spy("base")).build());
	define(
		&registry,
		Decl::builder("child")
			.constructor_callback(spy("child"))
			.extends(["base"])
			.build(),
	);

	assert_eq!(create(&registry, "child").state, ["base", "child"]);
}

#[test]
fn argument_trait_runs_between_base_and_child() {
	let registry = registry();
	define(&registry, Decl::builder("base").constructor_callback(spy("base")).build());
	define(&registry, Decl::builder("mixin").constructor_callback(spy("mixin")).build());
	define(
		&registry,
		Decl::builder("child")
			.constructor_callback(spy("child"))
			.extends(["mixin", "base"])
			.build(),
	);

	assert_eq!(create(&registry, "child").state, ["base", "mixin", "child"]);
}

#[test]
fn ancestor_traits_run_before_the_ancestor() {
	let registry = registry();
	nested_hierarchy(&registry, "child", |builder, tag| builder.constructor_callback(spy(tag)));

	let view = create(&registry, "child");
	assert_eq!(view.state, ["bmixin", "base", "mixin", "child"]);
	assert_eq!(view.name(), "child");
}

#[test]
fn constructor_receives_arguments_free_instance() {
	let registry = registry();
	define(
		&registry,
		Decl::builder("view")
			.constructor(|view: &mut View, args| {
				assert!(args.is_empty());
				view.state.push(if view.responds_to("render") { "can render" } else { "inert" });
				Ok(Value::Null)
			})
			.method_callback("render", spy("render"))
			.build(),
	);

	assert_eq!(create(&registry, "view").state, ["can render"]);
}

#[test]
fn failing_constructor_aborts_instantiation() {
	let registry = registry();
	define(
		&registry,
		Decl::builder("base")
			.constructor(|_: &mut View, _| anyhow::bail!("no backing store"))
			.build(),
	);
	define(
		&registry,
		Decl::builder("child")
			.constructor_callback(spy("child"))
			.event_callback(crate::INIT_EVENT, spy("init"))
			.extends(["base"])
			.build(),
	);

	let err = instantiate(&registry, EntityKind::Component, "child", Log::new()).unwrap_err();
	assert!(matches!(err, InstantiateError::Callback(_)));
	assert_eq!(err.to_string(), "no backing store");
}

#[test]
fn unresolvable_entity_fails_to_instantiate() {
	let registry = registry();
	define(&registry, Decl::builder("orphan").extends(["missing"]).build());

	assert!(matches!(
		instantiate(&registry, EntityKind::Component, "orphan", Log::new()),
		Err(InstantiateError::Resolve(lineage_registry::ResolveError::UnknownAncestor { .. }))
	));
}
