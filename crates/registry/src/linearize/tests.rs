use super::*;
use crate::config::RegistryConfig;
use crate::decl::Ancestor;
use crate::kind::EntityKind;

type Decl = Declaration<()>;

fn store(decls: impl IntoIterator<Item = Decl>) -> DeclarationStore<()> {
	let store = DeclarationStore::new(EntityKind::Component);
	for decl in decls {
		store.register(decl).unwrap();
	}
	store
}

fn order(store: &DeclarationStore<()>, name: &str) -> Result<Vec<String>, ResolveError> {
	let mut memo = LinearizationMemo::default();
	let sources = Linearizer::new(store, &mut memo, &RegistryConfig::default()).linearize(name)?;
	Ok(sources.iter().map(|decl| decl.name().to_string()).collect())
}

#[test]
fn base_then_arg_traits_then_self() {
	let store = store([
		Decl::empty("sbase"),
		Decl::empty("bmixin"),
		Decl::builder("base").extends(["bmixin", "sbase"]).build(),
		Decl::empty("mixin"),
		Decl::builder("child").extends(["mixin", "base"]).build(),
	]);

	assert_eq!(
		order(&store, "child").unwrap(),
		["sbase", "bmixin", "base", "mixin", "child"]
	);
}

#[test]
fn inline_traits_precede_arg_traits() {
	let store = store([
		Decl::empty("base"),
		Decl::empty("mixin1"),
		Decl::empty("mixin2"),
		Decl::builder("child")
			.mixins(["mixin1"])
			.extends(["mixin2", "base"])
			.build(),
	]);

	assert_eq!(
		order(&store, "child").unwrap(),
		["base", "mixin1", "mixin2", "child"]
	);
}

#[test]
fn traits_expand_their_own_ancestors() {
	let store = store([
		Decl::empty("root"),
		Decl::empty("helper"),
		Decl::builder("mixin").extends(["helper", "root"]).build(),
		Decl::builder("child").mixins(["mixin"]).build(),
	]);

	assert_eq!(
		order(&store, "child").unwrap(),
		["root", "helper", "mixin", "child"]
	);
}

#[test]
fn root_sentinel_keeps_arg_traits_in_order() {
	let store = store([
		Decl::empty("mixin1"),
		Decl::empty("mixin2"),
		Decl::builder("child")
			.extends([Ancestor::from("mixin1"), Ancestor::from("mixin2"), Ancestor::Root])
			.build(),
	]);

	assert_eq!(order(&store, "child").unwrap(), ["mixin1", "mixin2", "child"]);
}

#[test]
fn shared_ancestor_contributes_per_path() {
	let store = store([
		Decl::empty("common"),
		Decl::builder("left").extends(["common"]).build(),
		Decl::builder("right").extends(["common"]).build(),
		Decl::builder("child").extends(["right", "left"]).build(),
	]);

	assert_eq!(
		order(&store, "child").unwrap(),
		["common", "left", "common", "right", "child"]
	);
}

#[test]
fn self_reference_is_a_cycle() {
	let store = store([Decl::builder("loop").extends(["loop"]).build()]);

	assert_eq!(
		order(&store, "loop").unwrap_err(),
		ResolveError::Cycle {
			kind: EntityKind::Component,
			path: vec!["loop".into(), "loop".into()],
		}
	);
}

#[test]
fn mutual_reference_through_inline_trait_is_a_cycle() {
	let store = store([
		Decl::builder("a").mixins(["b"]).build(),
		Decl::builder("b").extends(["c"]).build(),
		Decl::builder("c").extends(["a"]).build(),
		Decl::builder("entry").extends(["a"]).build(),
	]);

	assert_eq!(
		order(&store, "entry").unwrap_err(),
		ResolveError::Cycle {
			kind: EntityKind::Component,
			path: vec!["a".into(), "b".into(), "c".into(), "a".into()],
		}
	);
}

#[test]
fn unknown_ancestor_names_both_sides() {
	let store = store([
		Decl::builder("mid").extends(["ghost"]).build(),
		Decl::builder("child").extends(["mid"]).build(),
	]);

	assert_eq!(
		order(&store, "child").unwrap_err(),
		ResolveError::UnknownAncestor {
			kind: EntityKind::Component,
			entity: "mid".into(),
			ancestor: "ghost".into(),
		}
	);
}

#[test]
fn unknown_entity_is_not_found() {
	let store = store([]);
	assert_eq!(
		order(&store, "nobody").unwrap_err(),
		ResolveError::Store(RegistryError::NotFound {
			kind: EntityKind::Component,
			name: "nobody".into(),
		})
	);
}

#[test]
fn depth_limit_stops_long_chains() {
	let mut decls = vec![Decl::empty("level0")];
	for level in 1..10 {
		decls.push(
			Decl::builder(format!("level{level}"))
				.extends([format!("level{}", level - 1)])
				.build(),
		);
	}
	let store = store(decls);
	let mut memo = LinearizationMemo::default();

	let err = Linearizer::new(&store, &mut memo, &RegistryConfig::default().with_max_depth(4))
		.linearize("level9")
		.unwrap_err();
	assert!(matches!(err, ResolveError::DepthExceeded { limit: 4, .. }));

	let config = RegistryConfig::default();

	let sources = Linearizer::new(&store, &mut memo, &config)
		.linearize("level9")
		.unwrap();
	assert_eq!(sources.len(), 10);
}

#[test]
fn memo_reuses_ancestor_lists() {
	let store = store([
		Decl::empty("base"),
		Decl::builder("child").extends(["base"]).build(),
	]);
	let mut memo = LinearizationMemo::default();
	let config = RegistryConfig::default();

	let base = Linearizer::new(&store, &mut memo, &config).linearize("base").unwrap();
	let child = Linearizer::new(&store, &mut memo, &config).linearize("child").unwrap();
	let again = Linearizer::new(&store, &mut memo, &config).linearize("child").unwrap();

	assert!(Arc::ptr_eq(&base[0], &child[0]));
	assert!(Arc::ptr_eq(&child, &again));
	assert_eq!(memo.len(), 2);
}

#[test]
fn repeated_ancestors_are_bounded_by_source_limit() {
	let mut decls = vec![Decl::empty("d0")];
	for level in 1..=40 {
		let prev = format!("d{}", level - 1);
		decls.push(
			Decl::builder(format!("d{level}"))
				.extends([prev.clone(), prev])
				.build(),
		);
	}
	let store = store(decls);

	let mut memo = LinearizationMemo::default();
	let err = Linearizer::new(&store, &mut memo, &RegistryConfig::default())
		.linearize("d40")
		.unwrap_err();
	assert!(matches!(
		err,
		ResolveError::TooManySources {
			limit: RegistryConfig::DEFAULT_MAX_SOURCES,
			..
		}
	));

	let tight = RegistryConfig::default().with_max_sources(7);
	let mut memo = LinearizationMemo::default();
	let d2 = Linearizer::new(&store, &mut memo, &tight).linearize("d2").unwrap();
	assert_eq!(d2.len(), 7);
	assert_eq!(
		Linearizer::new(&store, &mut memo, &tight)
			.linearize("d3")
			.unwrap_err(),
		ResolveError::TooManySources {
			kind: EntityKind::Component,
			entity: "d3".into(),
			limit: 7,
		}
	);
}
