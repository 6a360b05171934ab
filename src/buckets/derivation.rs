use crate::queries::{ArchetypeQuery, Query};
use crate::buckets::Predicate;

/// Every way of asking a [BucketStore](crate::buckets::BucketStore) for a derived bucket.
///
/// Names and queries resolve to the same bucket whenever their canonical form is equal;
/// predicates only resolve to the same bucket when the very same [Predicate] is passed.
#[derive(Clone)]
pub enum Derivation {
	Predicate(Predicate),
	Names(Vec<String>),
	Query(Query),
	Canonical(ArchetypeQuery),
}

impl From<Predicate> for Derivation {
	fn from(predicate: Predicate) -> Self {
		Self::Predicate(predicate)
	}
}

impl From<&Predicate> for Derivation {
	fn from(predicate: &Predicate) -> Self {
		Self::Predicate(predicate.clone())
	}
}

impl From<Query> for Derivation {
	fn from(query: Query) -> Self {
		Self::Query(query)
	}
}

impl From<&Query> for Derivation {
	fn from(query: &Query) -> Self {
		Self::Query(query.clone())
	}
}

impl From<ArchetypeQuery> for Derivation {
	fn from(query: ArchetypeQuery) -> Self {
		Self::Canonical(query)
	}
}

impl From<&str> for Derivation {
	fn from(name: &str) -> Self {
		Self::Names(vec![name.to_owned()])
	}
}

impl From<&[&str]> for Derivation {
	fn from(names: &[&str]) -> Self {
		Self::Names(names.iter().map(|name| name.to_string()).collect())
	}
}

impl<const N: usize> From<[&str; N]> for Derivation {
	fn from(names: [&str; N]) -> Self {
		Self::from(names.as_slice())
	}
}

impl From<Vec<&str>> for Derivation {
	fn from(names: Vec<&str>) -> Self {
		Self::from(names.as_slice())
	}
}

impl From<Vec<String>> for Derivation {
	fn from(names: Vec<String>) -> Self {
		Self::Names(names)
	}
}
