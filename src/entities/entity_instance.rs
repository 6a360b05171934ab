use crate::components::ComponentId;
use crate::data_structures::BitField;
use std::sync::atomic::{AtomicU64, Ordering};
use std::hash::{BuildHasherDefault, Hash, Hasher};
use nohash_hasher::NoHashHasher;
use std::collections::HashMap;
use std::cell::RefCell;
use std::any::Any;
use std::sync::Arc;
use std::rc::Rc;
use std::fmt;

type ComponentHasher = BuildHasherDefault<NoHashHasher<usize>>;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// A shared handle to an open-ended record of named components.
///
/// Cloning an [Entity] clones the handle, never the record.
/// Two handles are equal only if they refer to the same record.
#[derive(Clone)]
pub struct Entity {
	instance: Rc<EntityInstance>,
}

struct EntityInstance {
	id: u64,
	data: RefCell<EntityData>,
}

#[derive(Default)]
struct EntityData {
	mask: BitField,
	components: HashMap<ComponentId, Box<dyn Any>, ComponentHasher>,
}

impl Entity {
	/// Creates an [Entity] with no components attached.
	pub fn new() -> Self {
		Self {
			instance: Rc::new(EntityInstance {
				id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
				data: RefCell::new(EntityData::default()),
			}),
		}
	}

	/// Attaches a component and returns the entity, for building entities inline.
	pub fn with<T: 'static>(self, name: &str, value: T) -> Self {
		self.insert(name, value);
		self
	}

	/// Process-unique identifier of the underlying record.
	#[inline(always)]
	pub fn id(&self) -> u64 {
		self.instance.id
	}

	/// Attaches or replaces a component.
	/// Returns `true` if the component was not present before.
	///
	/// Buckets holding this entity are not re-evaluated automatically;
	/// call [`BucketStore::update`](crate::buckets::BucketStore::update) afterwards.
	pub fn insert<T: 'static>(&self, name: &str, value: T) -> bool {
		let id = ComponentId::of(name);
		let mut data = self.instance.data.borrow_mut();
		data.mask.set(id.value(), true);
		data.components.insert(id, Box::new(value)).is_none()
	}

	/// Detaches a component. Returns `false` if it wasn't present.
	pub fn remove(&self, name: &str) -> bool {
		let id = match ComponentId::lookup(name) {
			Some(id) => id,
			None => return false,
		};

		let mut data = self.instance.data.borrow_mut();
		data.mask.set(id.value(), false);
		data.components.remove(&id).is_some()
	}

	/// Check whether the component called `name` is attached.
	pub fn has(&self, name: &str) -> bool {
		ComponentId::lookup(name).map_or(false, |id| self.has_id(id))
	}

	/// Check whether the component with the given id is attached.
	#[inline(always)]
	pub fn has_id(&self, id: ComponentId) -> bool {
		self.instance.data.borrow().mask.get(id.value())
	}

	/// Calls `func` with a reference to the component value.
	/// Returns [None] if the component is missing or isn't a `T`.
	///
	/// The entity stays borrowed while `func` runs: mutating it from inside `func`
	/// (or, with [get_mut](Self::get_mut), accessing it at all) panics.
	pub fn get<T: 'static, R>(&self, name: &str, func: impl FnOnce(&T) -> R) -> Option<R> {
		let id = ComponentId::lookup(name)?;
		let data = self.instance.data.borrow();
		let value = data.components.get(&id)?.downcast_ref::<T>()?;
		Some(func(value))
	}

	/// Calls `func` with a mutable reference to the component value.
	/// Returns [None] if the component is missing or isn't a `T`.
	///
	/// The entity stays mutably borrowed while `func` runs: any access to the same
	/// entity from inside `func`, including [has](Self::has) and [Debug], panics.
	pub fn get_mut<T: 'static, R>(&self, name: &str, func: impl FnOnce(&mut T) -> R) -> Option<R> {
		let id = ComponentId::lookup(name)?;
		let mut data = self.instance.data.borrow_mut();
		let value = data.components.get_mut(&id)?.downcast_mut::<T>()?;
		Some(func(value))
	}

	/// Returns a copy of the component value.
	pub fn get_cloned<T: 'static + Clone>(&self, name: &str) -> Option<T> {
		self.get(name, T::clone)
	}

	/// Names of the attached components, sorted.
	pub fn components(&self) -> Vec<Arc<str>> {
		let data = self.instance.data.borrow();
		let mut names: Vec<_> = data.components.keys().map(|id| id.name()).collect();
		names.sort();
		names
	}

	/// Check the component presence mask against an include and an exclude mask.
	pub(crate) fn matches_masks(&self, include: &BitField, exclude: &BitField) -> bool {
		let data = self.instance.data.borrow();
		include.is_subset_of(&data.mask) && !exclude.intersects(&data.mask)
	}
}

impl Default for Entity {
	fn default() -> Self {
		Self::new()
	}
}

impl Eq for Entity {}

impl PartialEq<Self> for Entity {
	fn eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.instance, &other.instance)
	}
}

impl Hash for Entity {
	fn hash<H: Hasher>(&self, state: &mut H) {
		state.write_u64(self.instance.id)
	}
}

impl fmt::Debug for Entity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Entity")
			.field("id", &self.id())
			.field("components", &self.components())
			.finish()
	}
}
