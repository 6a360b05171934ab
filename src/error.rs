//! Errors returned by [BucketStore](crate::buckets::BucketStore) operations.

use crate::buckets::Bucket;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketError {
	/// The handle refers to a bucket that was disposed.
	#[error("bucket {0:?} has already been disposed")]
	Disposed(Bucket),

	/// Entities can only be added to or removed from root buckets;
	/// derived bucket membership is maintained by the store.
	#[error("bucket {0:?} is derived and cannot be mutated directly")]
	DerivedMutation(Bucket),
}
