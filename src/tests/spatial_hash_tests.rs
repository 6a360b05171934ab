use crate::spatial::{SpatialHash, SpatialHashConfig};
use crate::buckets::BucketStore;
use crate::entities::Entity;
use nalgebra_glm::{vec3, Vec3};

fn transform(entity: &Entity) -> Option<Vec3> {
	entity.get_cloned::<Vec3>("transform")
}

fn positioned(x: f32, y: f32, z: f32) -> Entity {
	Entity::new().with("transform", vec3(x, y, z))
}

#[test]
pub fn cell_keys_floor_coordinates() {
	let hash = SpatialHash::default();
	assert_eq!(hash.cell_key(&vec3(0.5, 1.9, -0.1)), (0, 1, -1));

	let coarse = SpatialHash::new(SpatialHashConfig { cell_size: 4.0 });
	assert_eq!(coarse.cell_key(&vec3(3.9, 4.0, -4.5)), (0, 1, -2));
}

#[test]
pub fn rebuild_groups_bucket_entities_by_cell() {
	let mut store = BucketStore::new();
	let root = store.create_root();
	let positioned_bucket = store.archetype(root, ["transform"]).unwrap();

	let a = positioned(0.2, 0.2, 0.2);
	let b = positioned(0.8, 0.1, 0.9);
	let c = positioned(2.5, 0.0, 0.0);
	let unplaced = Entity::new().with("name", "ghost");
	for entity in [&a, &b, &c, &unplaced] {
		store.add(root, entity).unwrap();
	}

	let mut hash = SpatialHash::default();
	hash.rebuild(&store, positioned_bucket, transform);

	assert_eq!(hash.entities_in_cell(&vec3(0.5, 0.5, 0.5)), [a.clone(), b.clone()]);
	assert_eq!(hash.entities_in_cell(&vec3(2.0, 0.0, 0.0)), [c.clone()]);
	assert!(hash.entities_in_cell(&vec3(10.0, 0.0, 0.0)).is_empty());

	assert_eq!(hash.entities_in_radius(&vec3(1.5, 0.5, 0.5), 0).len(), 0);
	let mut near: Vec<_> = hash.entities_in_radius(&vec3(1.5, 0.5, 0.5), 1).iter().map(Entity::id).collect();
	near.sort();
	let mut expected = vec![a.id(), b.id(), c.id()];
	expected.sort();
	assert_eq!(near, expected);
}

#[test]
pub fn rebuild_reflects_movement_and_removal() {
	let mut store = BucketStore::new();
	let root = store.create_root();
	let bucket = store.archetype(root, ["transform"]).unwrap();

	let mover = positioned(0.0, 0.0, 0.0);
	let leaver = positioned(0.5, 0.5, 0.5);
	store.add(root, &mover).unwrap();
	store.add(root, &leaver).unwrap();

	let mut hash = SpatialHash::default();
	hash.rebuild(&store, bucket, transform);
	assert_eq!(hash.entities_in_cell(&vec3(0.0, 0.0, 0.0)).len(), 2);

	mover.get_mut("transform", |t: &mut Vec3| t.x = 5.0);
	store.remove(root, &leaver).unwrap();
	hash.rebuild(&store, bucket, transform);

	assert!(hash.entities_in_cell(&vec3(0.0, 0.0, 0.0)).is_empty());
	assert_eq!(hash.entities_in_cell(&vec3(5.0, 0.0, 0.0)), [mover.clone()]);
}

#[test]
pub fn radius_lookup_at_the_edge_of_the_grid() {
	let mut store = BucketStore::new();
	let root = store.create_root();
	let bucket = store.archetype(root, ["transform"]).unwrap();

	let far = positioned(3.0e9, 0.0, 0.0);
	let farther = positioned(5.0e9, 0.0, 0.0);
	let below = positioned(0.0, -3.0e9, 0.0);
	for entity in [&far, &farther, &below] {
		store.add(root, entity).unwrap();
	}

	let mut hash = SpatialHash::default();
	hash.rebuild(&store, bucket, transform);

	assert_eq!(hash.cell_key(&vec3(3.0e9, 0.0, 0.0)), (i32::MAX, 0, 0));
	assert_eq!(hash.cell_key(&vec3(0.0, -3.0e9, 0.0)), (0, i32::MIN, 0));
	assert_eq!(hash.entities_in_cell(&vec3(3.0e9, 0.0, 0.0)), [far.clone(), farther.clone()]);

	assert_eq!(hash.entities_in_radius(&vec3(3.0e9, 0.0, 0.0), 1).len(), 2);
	assert_eq!(hash.entities_in_radius(&vec3(0.0, -3.0e9, 0.0), 2), [below.clone()]);
}
