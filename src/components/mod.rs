//! Components are the named pieces of data attached to an [Entity](crate::entities::Entity).
//!
//! Only the presence or absence of a component matters to archetype matching;
//! component values are only ever inspected by user predicates.

mod component_id;
mod component_set;

pub use component_id::*;
pub use component_set::*;
