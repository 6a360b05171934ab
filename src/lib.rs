pub mod data_structures;
pub mod components;
pub mod entities;
pub mod queries;
pub mod buckets;
pub mod spatial;
pub mod error;

pub mod prelude {
	pub use crate::buckets::{
		predicate, Bucket, BucketEvent, BucketObserver, BucketStore, Derivation, MembershipRule, Predicate,
		StoreConfig, Subscription,
	};
	pub use crate::components::{has_components, has_no_components, ComponentId};
	pub use crate::queries::{ArchetypeQuery, Query};
	pub use crate::spatial::{SpatialHash, SpatialHashConfig};
	pub use crate::entities::Entity;
	pub use crate::error::BucketError;
	pub use crate::archetype;
}

#[cfg(test)]
mod tests;
