use crate::components::ComponentId;
use crate::data_structures::BitField;
use crate::entities::Entity;
use crate::queries::Query;
use std::collections::HashMap;
use lazy_static::lazy_static;
use parking_lot::RwLock;
use std::sync::Arc;

type QueryKey = (Vec<String>, Vec<String>);

lazy_static! {
	static ref QUERY_TO_DATA: RwLock<Vec<ArchetypeQueryData>> = RwLock::new(Vec::default());
	static ref KEY_TO_QUERY: RwLock<HashMap<QueryKey, ArchetypeQuery>> = RwLock::new(HashMap::default());
}

/// A handle to a canonical `with`/`without` component query.
///
/// Structurally equal [queries](Query) canonicalize to the same handle regardless of
/// component order or duplicates, so handles can be compared by identity.
#[derive(Debug, Hash, Copy, Clone, Eq, PartialEq)]
pub struct ArchetypeQuery {
	index: usize,
}

/// The normalized contents of an [ArchetypeQuery].
#[derive(Clone, Debug)]
pub struct ArchetypeQueryData {
	with: Arc<[Arc<str>]>,
	without: Arc<[Arc<str>]>,
	include: Arc<BitField>,
	exclude: Arc<BitField>,
}

impl ArchetypeQuery {
	/// Normalize `query` and return its canonical handle.
	///
	/// Both lists are sorted by component name and deduplicated.
	/// Repeated calls with structurally equal input return the identical handle.
	pub fn canonicalize(query: &Query) -> ArchetypeQuery {
		let key = (normalize(query.with_names()), normalize(query.without_names()));

		if let Some(query) = KEY_TO_QUERY.read().get(&key) {
			return *query;
		}

		create_query(key)
	}

	/// A canonical query requiring every component in `names`.
	pub fn of<I: IntoIterator<Item = S>, S: Into<String>>(names: I) -> ArchetypeQuery {
		Self::canonicalize(&Query::from_names(names))
	}

	pub fn data(&self) -> ArchetypeQueryData {
		QUERY_TO_DATA.read()[self.index].clone()
	}

	/// Sorted, unique names of the required components.
	pub fn with(&self) -> Arc<[Arc<str>]> {
		QUERY_TO_DATA.read()[self.index].with.clone()
	}

	/// Sorted, unique names of the forbidden components.
	pub fn without(&self) -> Arc<[Arc<str>]> {
		QUERY_TO_DATA.read()[self.index].without.clone()
	}

	pub fn matches(&self, entity: &Entity) -> bool {
		QUERY_TO_DATA.read()[self.index].matches(entity)
	}
}

impl ArchetypeQueryData {
	pub fn with(&self) -> &[Arc<str>] {
		&self.with
	}

	pub fn without(&self) -> &[Arc<str>] {
		&self.without
	}

	pub fn include(&self) -> &BitField {
		&self.include
	}

	pub fn exclude(&self) -> &BitField {
		&self.exclude
	}

	/// `true` if `entity` has every `with` component and none of the `without` components.
	#[inline(always)]
	pub fn matches(&self, entity: &Entity) -> bool {
		entity.matches_masks(&self.include, &self.exclude)
	}
}

fn normalize(names: &[String]) -> Vec<String> {
	let mut names = names.to_vec();
	names.sort();
	names.dedup();
	names
}

fn mask(names: &[String]) -> BitField {
	let ids: Vec<_> = names.iter().map(|name| ComponentId::of(name)).collect();
	BitField::from(ids.as_slice())
}

#[inline(never)]
fn create_query(key: QueryKey) -> ArchetypeQuery {
	let mut ktq = KEY_TO_QUERY.write();

	// Another caller may have interned it between the read and the write lock.
	if let Some(query) = ktq.get(&key) {
		return *query;
	}

	let (with, without) = &key;
	let data = ArchetypeQueryData {
		include: Arc::new(mask(with)),
		exclude: Arc::new(mask(without)),
		with: with.iter().map(|name| Arc::<str>::from(name.as_str())).collect(),
		without: without.iter().map(|name| Arc::<str>::from(name.as_str())).collect(),
	};

	let mut qtd = QUERY_TO_DATA.write();
	let query = ArchetypeQuery { index: qtd.len() };

	log::trace!("interned archetype query {} with {:?} without {:?}", query.index, with, without);
	qtd.push(data);
	ktq.insert(key, query);
	query
}
