use crate::buckets::{predicate, Bucket, BucketStore};
use crate::queries::Query;
use crate::entities::Entity;
use rand::prelude::SliceRandom;
use rand::{thread_rng, Rng};

const COMPONENTS: [&str; 4] = ["m_a", "m_b", "m_c", "m_d"];

fn random_entity(rng: &mut impl Rng) -> Entity {
	let entity = Entity::new().with("weight", rng.gen_range(0..100u32));
	for name in COMPONENTS {
		if rng.gen_bool(0.5) {
			entity.insert(name, ());
		}
	}
	entity
}

/// Every derived bucket must hold exactly the parent entities its rule accepts.
fn assert_sound(store: &BucketStore, bucket: Bucket) {
	for child in store.children(bucket) {
		let rule = store.rule(*child);
		let expected: Vec<_> = store.entities(bucket).iter().filter(|e| rule.wants(e)).collect();

		assert_eq!(expected.len(), store.len(*child), "Derived bucket size does not match its parent");
		for entity in expected {
			assert!(store.has(*child, entity), "Derived bucket is missing a matching entity");
		}
		assert_sound(store, *child);
	}
}

fn build_tree(store: &mut BucketStore, root: Bucket) {
	let a = store.archetype(root, ["m_a"]).unwrap();
	let not_b = store.archetype(root, Query::new().without(["m_b"])).unwrap();
	let heavy = store.archetype(root, predicate(|e| e.get("weight", |w: &u32| *w > 50).unwrap_or(false))).unwrap();

	store.archetype(a, Query::new().with(["m_c"]).without(["m_d"])).unwrap();
	store.archetype(not_b, ["m_a", "m_d"]).unwrap();
	let heavy_c = store.archetype(heavy, ["m_c"]).unwrap();
	store.archetype(heavy_c, Query::new()).unwrap();
}

#[test]
pub fn random_mutations_keep_buckets_sound() {
	let mut rng = thread_rng();
	let mut store = BucketStore::new();
	let root = store.create_root();

	// Half of the tree is built before any entity exists, half after.
	build_tree(&mut store, root);
	let mut live: Vec<Entity> = Vec::new();

	for step in 0..500 {
		if step == 250 {
			let late = store.archetype(root, ["m_b", "m_c"]).unwrap();
			store.archetype(late, predicate(|e| e.has("m_d"))).unwrap();
		}

		match rng.gen_range(0..4) {
			0 | 1 => {
				let entity = random_entity(&mut rng);
				store.add(root, &entity).unwrap();
				live.push(entity);
			},
			2 if !live.is_empty() => {
				let index = rng.gen_range(0..live.len());
				let entity = live.swap_remove(index);
				store.remove(root, &entity).unwrap();
			},
			_ => {
				if let Some(entity) = live.choose(&mut rng) {
					let name = *COMPONENTS.choose(&mut rng).unwrap();
					if !entity.remove(name) {
						entity.insert(name, ());
					}
					store.update(root, entity).unwrap();
				}
			},
		}

		assert_sound(&store, root);
	}
}

#[test]
pub fn backfilled_tree_matches_incremental_tree() {
	let mut rng = thread_rng();
	let entities: Vec<_> = (0..200).map(|_| random_entity(&mut rng)).collect();

	let mut eager = BucketStore::new();
	let eager_root = eager.create_root();
	build_tree(&mut eager, eager_root);

	let mut lazy = BucketStore::new();
	let lazy_root = lazy.create_root();

	for entity in entities.iter() {
		eager.add(eager_root, entity).unwrap();
		lazy.add(lazy_root, entity).unwrap();
	}
	build_tree(&mut lazy, lazy_root);

	assert_sound(&eager, eager_root);
	assert_sound(&lazy, lazy_root);

	let a = Query::new().with(["m_a"]);
	let eager_a = eager.archetype(eager_root, &a).unwrap();
	let lazy_a = lazy.archetype(lazy_root, &a).unwrap();
	assert_eq!(eager.len(eager_a), lazy.len(lazy_a));
}
