use crate::buckets::{BucketEvent, BucketObserver};
use crate::queries::{ArchetypeQuery, ArchetypeQueryData};
use crate::entities::{Entity, EntitySet};
use std::hash::BuildHasherDefault;
use nohash_hasher::NoHashHasher;
use std::collections::HashMap;
use std::rc::Rc;
use std::fmt;

type Hasher = BuildHasherDefault<NoHashHasher<usize>>;

/// A membership test over a single [entity](Entity).
///
/// Predicate buckets are deduplicated by the identity of the [Rc], not by what the function does.
pub type Predicate = Rc<dyn Fn(&Entity) -> bool>;

/// Wraps a closure into a [Predicate].
pub fn predicate(func: impl Fn(&Entity) -> bool + 'static) -> Predicate {
	Rc::new(func)
}

/// A stable handle to a bucket stored in a [BucketStore](crate::buckets::BucketStore).
#[derive(Debug, Hash, Copy, Clone, Eq, PartialEq)]
pub struct Bucket {
	pub(crate) index: u32,
	pub(crate) version: u32,
}

/// The rule deciding which of its parent's entities a bucket holds.
/// It is fixed when the bucket is created.
#[derive(Clone)]
pub enum MembershipRule {
	/// Root buckets hold whatever is added to them.
	Root,
	Predicate(Predicate),
	Archetype {
		query: ArchetypeQuery,
		data: ArchetypeQueryData,
	},
}

impl MembershipRule {
	pub(crate) fn archetype(query: ArchetypeQuery) -> Self {
		Self::Archetype { query, data: query.data() }
	}

	#[inline(always)]
	pub fn wants(&self, entity: &Entity) -> bool {
		match self {
			Self::Root => true,
			Self::Predicate(predicate) => predicate(entity),
			Self::Archetype { data, .. } => data.matches(entity),
		}
	}

	pub fn query(&self) -> Option<ArchetypeQuery> {
		match self {
			Self::Archetype { query, .. } => Some(*query),
			_ => None,
		}
	}

	pub(crate) fn is_predicate(&self, other: &Predicate) -> bool {
		match self {
			// Compare data pointers only, vtable pointers aren't guaranteed to be unique.
			Self::Predicate(predicate) => Rc::as_ptr(predicate) as *const () == Rc::as_ptr(other) as *const (),
			_ => false,
		}
	}
}

impl fmt::Debug for MembershipRule {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Root => write!(f, "Root"),
			Self::Predicate(predicate) => write!(f, "Predicate({:p})", Rc::as_ptr(predicate) as *const ()),
			Self::Archetype { data, .. } => f
				.debug_struct("Archetype")
				.field("with", &data.with())
				.field("without", &data.without())
				.finish(),
		}
	}
}

/// The storage behind a [Bucket] handle.
pub struct BucketInstance {
	pub(crate) handle: Bucket,
	pub(crate) parent: Option<Bucket>,
	pub(crate) rule: MembershipRule,
	pub(crate) entities: EntitySet,
	pub(crate) children: Vec<Bucket>,
	pub(crate) by_query: HashMap<ArchetypeQuery, Bucket, Hasher>,
	pub(crate) observers: Vec<(u64, Box<dyn BucketObserver>)>,
}

impl BucketInstance {
	pub(crate) fn new(handle: Bucket, parent: Option<Bucket>, rule: MembershipRule, entities: EntitySet) -> Self {
		Self {
			handle,
			parent,
			rule,
			entities,
			children: Vec::new(),
			by_query: HashMap::default(),
			observers: Vec::new(),
		}
	}

	pub fn handle(&self) -> Bucket {
		self.handle
	}

	/// The bucket this one was derived from, [None] for roots.
	pub fn parent(&self) -> Option<Bucket> {
		self.parent
	}

	pub fn rule(&self) -> &MembershipRule {
		&self.rule
	}

	pub fn entities(&self) -> &EntitySet {
		&self.entities
	}

	/// Derived buckets, in creation order.
	pub fn children(&self) -> &[Bucket] {
		&self.children
	}

	pub fn is_root(&self) -> bool {
		self.parent.is_none()
	}

	pub(crate) fn notify(&mut self, event: BucketEvent, entity: &Entity) {
		for (_, observer) in self.observers.iter_mut() {
			observer.on_event(event, entity);
		}
	}
}

impl fmt::Debug for BucketInstance {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("BucketInstance")
			.field("handle", &self.handle)
			.field("parent", &self.parent)
			.field("rule", &self.rule)
			.field("entities", &self.entities.len())
			.field("children", &self.children)
			.field("observers", &self.observers.len())
			.finish()
	}
}
