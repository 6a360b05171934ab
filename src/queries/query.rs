use crate::queries::ArchetypeQuery;

/// A structured component query, before canonicalization.
///
/// Matches entities carrying every component in `with` and none in `without`.
/// Both lists default to empty, and the empty query matches every entity.
#[derive(Default, Clone, Debug, Eq, PartialEq)]
pub struct Query {
	with: Vec<String>,
	without: Vec<String>,
}

impl Query {
	pub fn new() -> Self {
		Self::default()
	}

	/// A query requiring every component in `names`.
	pub fn from_names<I: IntoIterator<Item = S>, S: Into<String>>(names: I) -> Self {
		Self::new().with(names)
	}

	/// Specify which components an entity must carry.
	pub fn with<I: IntoIterator<Item = S>, S: Into<String>>(mut self, names: I) -> Self {
		self.with.extend(names.into_iter().map(Into::into));
		self
	}

	/// Specify which components an entity must not carry.
	pub fn without<I: IntoIterator<Item = S>, S: Into<String>>(mut self, names: I) -> Self {
		self.without.extend(names.into_iter().map(Into::into));
		self
	}

	pub fn with_names(&self) -> &[String] {
		&self.with
	}

	pub fn without_names(&self) -> &[String] {
		&self.without
	}

	/// Shorthand for [ArchetypeQuery::canonicalize].
	pub fn canonicalize(&self) -> ArchetypeQuery {
		ArchetypeQuery::canonicalize(self)
	}
}
