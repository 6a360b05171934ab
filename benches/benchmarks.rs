use criterion::*;
use nalgebra_glm::{vec3, Vec3};
use turbo_buckets::archetype;
use turbo_buckets::prelude::*;

const COUNT: usize = 10000;

fn create_entities(count: usize) -> Vec<Entity> {
    (0..count)
        .map(|i| {
            let entity = Entity::new().with("transform", vec3(i as f32 * 0.1, 0.0, 0.0));
            if i % 2 == 0 {
                entity.insert("velocity", Vec3::zeros());
            }
            if i % 3 == 0 {
                entity.insert("sprite", ());
            }
            entity
        })
        .collect()
}

fn build_tree(store: &mut BucketStore, root: Bucket) {
    let movers = archetype!(store, root, "transform", "velocity").unwrap();
    store.archetype(movers, ["sprite"]).unwrap();
    store.archetype(root, Query::new().with(["transform"]).without(["velocity"])).unwrap();
    store.archetype(root, predicate(|e| e.has("sprite"))).unwrap();
}

fn add_entities(c: &mut Criterion) {
    let entities = create_entities(COUNT);

    c.bench_function("Add entities", |b| {
        b.iter_batched(
            || {
                let mut store = BucketStore::new();
                let root = store.create_root();
                build_tree(&mut store, root);
                (store, root)
            },
            |(mut store, root)| {
                for entity in entities.iter() {
                    store.add(root, entity).unwrap();
                }
                store
            },
            BatchSize::PerIteration,
        );
    });
}

fn remove_entities(c: &mut Criterion) {
    let entities = create_entities(COUNT);

    c.bench_function("Remove entities", |b| {
        b.iter_batched(
            || {
                let mut store = BucketStore::new();
                let root = store.create_root();
                build_tree(&mut store, root);
                for entity in entities.iter() {
                    store.add(root, entity).unwrap();
                }
                (store, root)
            },
            |(mut store, root)| {
                for entity in entities.iter() {
                    store.remove(root, entity).unwrap();
                }
                store
            },
            BatchSize::PerIteration,
        );
    });
}

fn resolve_archetype(c: &mut Criterion) {
    let mut store = BucketStore::new();
    let root = store.create_root();
    build_tree(&mut store, root);

    c.bench_function("Resolve cached archetype", |b| {
        b.iter(|| store.archetype(root, black_box(["velocity", "transform"])).unwrap())
    });
}

fn rebuild_spatial_hash(c: &mut Criterion) {
    let mut store = BucketStore::new();
    let root = store.create_root();
    let positioned = store.archetype(root, ["transform"]).unwrap();
    for entity in create_entities(COUNT) {
        store.add(root, &entity).unwrap();
    }

    let mut hash = SpatialHash::default();
    c.bench_function("Rebuild spatial hash", |b| {
        b.iter(|| hash.rebuild(&store, positioned, |e| e.get_cloned::<Vec3>("transform")))
    });
}

criterion_group!(
    benchmarks,
    add_entities,
    remove_entities,
    resolve_archetype,
    rebuild_spatial_hash,
);
criterion_main!(benchmarks);
