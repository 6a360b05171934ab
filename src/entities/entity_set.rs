use std::hash::BuildHasherDefault;
use nohash_hasher::NoHashHasher;
use std::collections::HashMap;
use crate::entities::Entity;
use std::slice::Iter;

type Hasher = BuildHasherDefault<NoHashHasher<u64>>;

/// An insertion-ordered set of [entities](Entity).
///
/// Removal swaps the last entity into the freed position,
/// so iterating from the back stays valid while removing the visited entity.
#[derive(Default)]
pub struct EntitySet {
	entities: Vec<Entity>,
	positions: HashMap<u64, usize, Hasher>,
}

impl EntitySet {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			entities: Vec::with_capacity(capacity),
			positions: HashMap::with_capacity_and_hasher(capacity, Hasher::default()),
		}
	}

	/// Appends `entity`. Returns `false` if it was already present.
	pub fn insert(&mut self, entity: Entity) -> bool {
		if self.positions.contains_key(&entity.id()) {
			return false;
		}

		self.positions.insert(entity.id(), self.entities.len());
		self.entities.push(entity);
		true
	}

	/// Removes `entity` by swapping the last entity into its position.
	/// Returns `false` if it wasn't present.
	pub fn remove(&mut self, entity: &Entity) -> bool {
		let index = match self.positions.remove(&entity.id()) {
			Some(index) => index,
			None => return false,
		};

		self.entities.swap_remove(index);
		if let Some(moved) = self.entities.get(index) {
			self.positions.insert(moved.id(), index);
		}
		true
	}

	#[inline(always)]
	pub fn contains(&self, entity: &Entity) -> bool {
		self.positions.contains_key(&entity.id())
	}

	#[inline(always)]
	pub fn len(&self) -> usize {
		self.entities.len()
	}

	#[inline(always)]
	pub fn is_empty(&self) -> bool {
		self.entities.is_empty()
	}

	pub fn get(&self, index: usize) -> Option<&Entity> {
		self.entities.get(index)
	}

	pub fn as_slice(&self) -> &[Entity] {
		&self.entities
	}

	pub fn iter(&self) -> Iter<'_, Entity> {
		self.entities.iter()
	}
}

impl<'l> IntoIterator for &'l EntitySet {
	type Item = &'l Entity;
	type IntoIter = Iter<'l, Entity>;

	fn into_iter(self) -> Self::IntoIter {
		self.entities.iter()
	}
}
