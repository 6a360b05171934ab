use crate::buckets::Bucket;
use crate::entities::Entity;

/// A change in a bucket's membership.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BucketEvent {
	Added,
	Removed,
}

/// Receives the membership changes of a single bucket.
///
/// Observers run synchronously while the store is updating. They get no access to the store,
/// so they cannot mutate buckets in the middle of a cascade.
pub trait BucketObserver {
	fn on_event(&mut self, event: BucketEvent, entity: &Entity);
}

impl<F: FnMut(BucketEvent, &Entity)> BucketObserver for F {
	fn on_event(&mut self, event: BucketEvent, entity: &Entity) {
		self(event, entity)
	}
}

/// Returned by [`BucketStore::subscribe`](crate::buckets::BucketStore::subscribe),
/// pass it to [`BucketStore::unsubscribe`](crate::buckets::BucketStore::unsubscribe) to stop observing.
#[derive(Debug, Hash, Copy, Clone, Eq, PartialEq)]
pub struct Subscription {
	pub(crate) bucket: Bucket,
	pub(crate) id: u64,
}

impl Subscription {
	pub fn bucket(&self) -> Bucket {
		self.bucket
	}
}
