//! [Entities](Entity) represent the individual "things" tracked by the engine.
//!
//! An [Entity] is a shared handle to a record of named [components](crate::components),
//! identified by reference. An [EntitySet] stores the ordered membership of one bucket.

mod entity_instance;
mod entity_set;

pub use entity_instance::*;
pub use entity_set::*;
