use lineage_registry::{Callback, Declaration, DeclarationBuilder, EntityKind, RegistryConfig};
use serde_json::Value;

use crate::{Instance, InstanceRegistry, instantiate};

mod constructors;
mod events;

type Log = Vec<&'static str>;
type View = Instance<Log>;
type Decl = Declaration<View>;

fn registry() -> InstanceRegistry<Log> {
	InstanceRegistry::default()
}

fn eager_registry() -> InstanceRegistry<Log> {
	InstanceRegistry::new(RegistryConfig::eager())
}

/// Callback that appends `tag` to the receiving instance's log.
fn spy(tag: &'static str) -> Callback<View> {
	Callback::labeled(tag, move |view: &mut View, _| {
		view.state.push(tag);
		Ok(Value::Null)
	})
}

fn define(registry: &InstanceRegistry<Log>, decl: Decl) {
	registry.register(EntityKind::Component, decl).unwrap();
}

fn create(registry: &InstanceRegistry<Log>, name: &str) -> View {
	instantiate(registry, EntityKind::Component, name, Log::new()).unwrap()
}

/// `sbase <- base(bmixin) <- child(mixin)`, each contributing through `with`.
fn nested_hierarchy(
	registry: &InstanceRegistry<Log>,
	child: &str,
	with: impl Fn(DeclarationBuilder<View>, &'static str) -> DeclarationBuilder<View>,
) {
	define(registry, Decl::empty("sbase"));
	define(registry, with(Decl::builder("bmixin"), "bmixin").build());
	define(
		registry,
		with(Decl::builder("base"), "base")
			.extends(["bmixin", "sbase"])
			.build(),
	);
	define(registry, with(Decl::builder("mixin"), "mixin").build());
	define(
		registry,
		with(Decl::builder(child), "child")
			.extends(["mixin", "base"])
			.build(),
	);
}
