//! Spatial partitioning built on top of a bucket, typically an archetype of positioned entities.

mod spatial_hash;

pub use spatial_hash::*;
