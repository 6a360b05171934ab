use crate::buckets::{Bucket, BucketStore};
use crate::entities::Entity;

/// Iterates the entities of a bucket that satisfy a predicate, newest first.
///
/// Created by [`BucketStore::filter`]. Every call to `filter` starts a fresh traversal.
pub struct Filter<'l, P> {
	entities: &'l [Entity],
	index: usize,
	predicate: P,
}

impl<'l, P: FnMut(&Entity) -> bool> Filter<'l, P> {
	pub(crate) fn new(entities: &'l [Entity], predicate: P) -> Self {
		Self {
			index: entities.len(),
			entities,
			predicate,
		}
	}
}

impl<'l, P: FnMut(&Entity) -> bool> Iterator for Filter<'l, P> {
	type Item = &'l Entity;

	fn next(&mut self) -> Option<Self::Item> {
		while self.index > 0 {
			self.index -= 1;
			let entity = &self.entities[self.index];
			if (self.predicate)(entity) {
				return Some(entity);
			}
		}
		None
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		(0, Some(self.index))
	}
}

/// A snapshot cursor over a bucket that doesn't borrow the [BucketStore].
///
/// Created by [`BucketStore::filter_cursor`]. The cursor walks from the most recently added
/// entity towards the oldest, so removing the entity it just returned is safe: the removal
/// swaps an already visited entity into the freed position. Every remaining entity is still
/// visited exactly once. Entities added after the cursor was created may or may not be visited,
/// and removing entities other than the current one can cause some to be skipped.
#[derive(Debug, Clone)]
pub struct FilterCursor {
	bucket: Bucket,
	index: usize,
}

impl FilterCursor {
	pub(crate) fn new(bucket: Bucket, index: usize) -> Self {
		Self { bucket, index }
	}

	pub fn bucket(&self) -> Bucket {
		self.bucket
	}

	/// Advances to the next entity satisfying `predicate`.
	/// Returns [None] once every position was visited or if the bucket was disposed.
	pub fn next(&mut self, store: &BucketStore, mut predicate: impl FnMut(&Entity) -> bool) -> Option<Entity> {
		let entities = store.get(self.bucket)?.entities();

		while self.index > 0 {
			self.index -= 1;

			// The bucket may have shrunk since the previous step.
			if let Some(entity) = entities.get(self.index) {
				if predicate(entity) {
					return Some(entity.clone());
				}
			}
		}
		None
	}
}
