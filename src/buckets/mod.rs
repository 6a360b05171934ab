//! Buckets are live subsets of a collection of [entities](crate::entities::Entity).
//!
//! A root bucket holds whatever is added to it. Derived buckets are created from another
//! bucket with a [predicate](Predicate) or an [archetype query](crate::queries::ArchetypeQuery)
//! and are kept up to date by the [BucketStore] as entities come and go.
//!
//! ```ignore
//! let mut store = BucketStore::new();
//! let world = store.create_root();
//!
//! let living = store.archetype(world, Query::new().with(["health"]).without(["dead"]))?;
//! store.add(world, &Entity::new().with("health", 100))?;
//! assert_eq!(store.len(living), 1);
//! ```

mod bucket_macros;
mod bucket_instance;
mod bucket_store;
mod bucket_filter;
mod bucket_observer;
mod derivation;

pub use bucket_instance::*;
pub use bucket_store::*;
pub use bucket_filter::*;
pub use bucket_observer::*;
pub use derivation::*;
