//! Component [queries](Query) and their canonical, identity-comparable
//! form, the [ArchetypeQuery].

mod query;
mod archetype_query;

pub use query::*;
pub use archetype_query::*;
