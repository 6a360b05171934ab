//! A unique runtime identifier tied to a component name.
//!
//! Developers shouldn't rely on [component ids](ComponentId), as they are not stable between program re-runs.
//! [Component ids](ComponentId) are generally used for populating the
//! [bitfields](crate::data_structures::BitField) used in
//! [archetype queries](crate::queries::ArchetypeQuery).

use crate::data_structures::BitField;
use std::collections::HashMap;
use lazy_static::lazy_static;
use parking_lot::RwLock;
use std::sync::Arc;
use std::fmt;

lazy_static! {
	static ref NAME_TO_ID: RwLock<HashMap<Arc<str>, ComponentId>> = RwLock::new(HashMap::default());
	static ref ID_TO_NAME: RwLock<Vec<Arc<str>>> = RwLock::new(Vec::default());
}

/// A globally unique identifier for a component name.
#[derive(Hash, Eq, PartialEq, Copy, Clone)]
pub struct ComponentId {
	value: usize,
}

impl ComponentId {
	/// Get the [ComponentId] of the component called `name`, registering it if needed.
	pub fn of(name: &str) -> ComponentId {
		if let Some(id) = Self::lookup(name) {
			return id;
		}
		register(name)
	}

	/// Get the [ComponentId] of `name` without registering it.
	/// Returns [None] if no entity or query has ever used that name.
	pub fn lookup(name: &str) -> Option<ComponentId> {
		NAME_TO_ID.read().get(name).copied()
	}

	/// The component name this id was registered for.
	pub fn name(&self) -> Arc<str> {
		ID_TO_NAME.read()[self.value].clone()
	}

	#[inline(always)]
	pub(crate) const fn value(&self) -> usize {
		self.value
	}
}

impl fmt::Debug for ComponentId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "ComponentId({}: {:?})", self.value, self.name())
	}
}

impl From<&[ComponentId]> for BitField {
	fn from(ids: &[ComponentId]) -> Self {
		let mut bitfield = BitField::new();
		for id in ids {
			bitfield.set(id.value(), true);
		}

		bitfield
	}
}

#[inline(never)]
fn register(name: &str) -> ComponentId {
	let mut nti = NAME_TO_ID.write();

	// Another caller may have registered it between the read and the write lock.
	if let Some(id) = nti.get(name) {
		return *id;
	}

	let mut itn = ID_TO_NAME.write();
	let id = ComponentId { value: itn.len() };
	let name: Arc<str> = Arc::from(name);

	log::trace!("registered component {:?} as {}", name, id.value);
	itn.push(name.clone());
	nti.insert(name, id);
	id
}
