use crate::buckets::{
	Bucket, BucketEvent, BucketInstance, BucketObserver, Derivation, Filter, FilterCursor, MembershipRule, Predicate,
	Subscription,
};
use crate::entities::{Entity, EntitySet};
use crate::queries::ArchetypeQuery;
use crate::error::BucketError;

/// Initial capacities of a [BucketStore].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct StoreConfig {
	/// Number of bucket slots reserved up front.
	pub bucket_capacity: usize,
	/// Number of entities each new bucket reserves space for.
	pub entity_capacity: usize,
}

impl Default for StoreConfig {
	fn default() -> Self {
		Self {
			bucket_capacity: 16,
			entity_capacity: 0,
		}
	}
}

struct BucketSlot {
	version: u32,
	instance: Option<BucketInstance>,
}

/// An arena of buckets: root buckets holding entities directly, and buckets derived from them.
///
/// Every derived bucket holds exactly those entities of its parent that satisfy its
/// [rule](MembershipRule). Adding or removing an entity on a root updates the whole
/// derivation tree before the call returns: depth-first, children in creation order,
/// and a bucket's observers before its children.
///
/// A [Predicate] that panics unwinds out of the mutating call and leaves the buckets
/// visited before it updated and the remaining ones untouched.
pub struct BucketStore {
	config: StoreConfig,
	slots: Vec<BucketSlot>,
	free: Vec<usize>,
	next_subscription: u64,
}

impl BucketStore {
	pub fn new() -> Self {
		Self::with_config(StoreConfig::default())
	}

	pub fn with_config(config: StoreConfig) -> Self {
		Self {
			config,
			slots: Vec::with_capacity(config.bucket_capacity),
			free: Vec::new(),
			next_subscription: 0,
		}
	}

	pub fn config(&self) -> &StoreConfig {
		&self.config
	}

	/// Creates an empty root bucket. Only root buckets accept [add](Self::add) and [remove](Self::remove).
	pub fn create_root(&mut self) -> Bucket {
		let entities = EntitySet::with_capacity(self.config.entity_capacity);
		let root = self.allocate(None, MembershipRule::Root, entities);
		log::debug!("created root bucket {:?}", root);
		root
	}

	/// Gets the [BucketInstance] behind a handle, or [None] if it was disposed.
	pub fn get(&self, bucket: Bucket) -> Option<&BucketInstance> {
		let slot = self.slots.get(bucket.index as usize)?;
		match slot.version == bucket.version {
			true => slot.instance.as_ref(),
			false => None,
		}
	}

	fn get_mut(&mut self, bucket: Bucket) -> Option<&mut BucketInstance> {
		let slot = self.slots.get_mut(bucket.index as usize)?;
		match slot.version == bucket.version {
			true => slot.instance.as_mut(),
			false => None,
		}
	}

	/// Returns `true` if the handle refers to a live bucket.
	pub fn contains_bucket(&self, bucket: Bucket) -> bool {
		self.get(bucket).is_some()
	}

	/// Number of live buckets.
	pub fn bucket_count(&self) -> usize {
		self.slots.len() - self.free.len()
	}

	/// The entities of a bucket, in insertion order.
	/// This function will panic if the bucket was disposed.
	pub fn entities(&self, bucket: Bucket) -> &[Entity] {
		self.live(bucket).entities.as_slice()
	}

	pub fn has(&self, bucket: Bucket, entity: &Entity) -> bool {
		self.live(bucket).entities.contains(entity)
	}

	pub fn len(&self, bucket: Bucket) -> usize {
		self.live(bucket).entities.len()
	}

	pub fn is_empty(&self, bucket: Bucket) -> bool {
		self.live(bucket).entities.is_empty()
	}

	pub fn children(&self, bucket: Bucket) -> &[Bucket] {
		&self.live(bucket).children
	}

	pub fn parent(&self, bucket: Bucket) -> Option<Bucket> {
		self.live(bucket).parent
	}

	pub fn rule(&self, bucket: Bucket) -> &MembershipRule {
		&self.live(bucket).rule
	}

	/// Adds an entity to a root bucket and to every derived bucket that wants it.
	/// Returns `false` if the root already held it.
	pub fn add(&mut self, root: Bucket, entity: &Entity) -> Result<bool, BucketError> {
		self.check_root(root)?;
		Ok(self.insert(root, entity))
	}

	/// Removes an entity from a root bucket and from every derived bucket holding it.
	/// Returns `false` if the root didn't hold it.
	pub fn remove(&mut self, root: Bucket, entity: &Entity) -> Result<bool, BucketError> {
		self.check_root(root)?;
		Ok(self.erase(root, entity))
	}

	/// Re-evaluates the derived buckets of `root` for an entity whose components changed.
	///
	/// Entities that aren't in `root` are ignored.
	pub fn update(&mut self, root: Bucket, entity: &Entity) -> Result<(), BucketError> {
		self.check_root(root)?;
		if self.live(root).entities.contains(entity) {
			self.reevaluate(root, entity);
		}
		Ok(())
	}

	/// Gets or creates the bucket of `parent`'s entities matching `derivation`.
	///
	/// Names and [queries](crate::queries::Query) are canonicalized first, so any two requests
	/// for the same set of `with`/`without` components return the same bucket.
	/// Predicates are handled by [derive](Self::derive).
	pub fn archetype(&mut self, parent: Bucket, derivation: impl Into<Derivation>) -> Result<Bucket, BucketError> {
		match derivation.into() {
			Derivation::Predicate(predicate) => self.derive(parent, &predicate),
			Derivation::Names(names) => self.resolve_query(parent, ArchetypeQuery::of(names)),
			Derivation::Query(query) => self.resolve_query(parent, query.canonicalize()),
			Derivation::Canonical(query) => self.resolve_query(parent, query),
		}
	}

	/// Gets or creates the bucket of `parent`'s entities satisfying `predicate`.
	///
	/// Only the same [Predicate] instance returns the same bucket; two distinct
	/// predicates always produce two buckets, even if they behave identically.
	pub fn derive(&mut self, parent: Bucket, predicate: &Predicate) -> Result<Bucket, BucketError> {
		let instance = self.instance(parent)?;

		for child in instance.children.iter() {
			if self.live(*child).rule.is_predicate(predicate) {
				return Ok(*child);
			}
		}

		Ok(self.derive_child(parent, MembershipRule::Predicate(predicate.clone())))
	}

	/// Disposes a bucket and every bucket derived from it.
	///
	/// The handles become stale, and future requests for the same rule create a new bucket.
	pub fn dispose(&mut self, bucket: Bucket) -> Result<(), BucketError> {
		let instance = self.instance(bucket)?;
		let query = instance.rule.query();
		let parent = instance.parent;

		if let Some(parent) = parent {
			let parent = self.live_mut(parent);
			parent.children.retain(|child| *child != bucket);
			if let Some(query) = query {
				parent.by_query.remove(&query);
			}
		}

		self.release(bucket);
		Ok(())
	}

	/// Registers an observer for the membership changes of `bucket`.
	pub fn subscribe(
		&mut self, bucket: Bucket, observer: impl BucketObserver + 'static,
	) -> Result<Subscription, BucketError> {
		let id = self.next_subscription;
		let instance = self.instance_mut(bucket)?;

		instance.observers.push((id, Box::new(observer)));
		self.next_subscription += 1;

		Ok(Subscription { bucket, id })
	}

	/// Removes an observer. Returns `false` if it was already removed or its bucket was disposed.
	pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
		match self.get_mut(subscription.bucket) {
			None => false,
			Some(instance) => {
				let count = instance.observers.len();
				instance.observers.retain(|(id, _)| *id != subscription.id);
				instance.observers.len() != count
			},
		}
	}

	/// Iterates the entities of `bucket` satisfying `predicate`, from the most recently added.
	///
	/// The iterator borrows the store, so the bucket can't change while it is alive.
	/// Use [filter_cursor](Self::filter_cursor) to remove entities while iterating.
	pub fn filter<P: FnMut(&Entity) -> bool>(&self, bucket: Bucket, predicate: P) -> Filter<'_, P> {
		Filter::new(self.entities(bucket), predicate)
	}

	/// A detached cursor over the current entities of `bucket`, from the most recently added.
	pub fn filter_cursor(&self, bucket: Bucket) -> FilterCursor {
		FilterCursor::new(bucket, self.len(bucket))
	}

	fn allocate(&mut self, parent: Option<Bucket>, rule: MembershipRule, entities: EntitySet) -> Bucket {
		let index = match self.free.pop() {
			Some(index) => index,
			None => {
				self.slots.push(BucketSlot { version: 0, instance: None });
				self.slots.len() - 1
			},
		};

		let slot = &mut self.slots[index];
		let handle = Bucket {
			index: index as u32,
			version: slot.version,
		};

		slot.instance = Some(BucketInstance::new(handle, parent, rule, entities));
		handle
	}

	#[inline(never)]
	fn derive_child(&mut self, parent: Bucket, rule: MembershipRule) -> Bucket {
		let mut entities = EntitySet::with_capacity(self.config.entity_capacity);
		for entity in self.live(parent).entities.iter() {
			if rule.wants(entity) {
				entities.insert(entity.clone());
			}
		}

		let query = rule.query();
		let child = self.allocate(Some(parent), rule, entities);

		let instance = self.live_mut(parent);
		instance.children.push(child);
		if let Some(query) = query {
			instance.by_query.insert(query, child);
		}

		log::debug!(
			"derived bucket {:?} from {:?} ({:?}) with {} entities",
			child,
			parent,
			self.live(child).rule,
			self.live(child).entities.len()
		);
		child
	}

	fn resolve_query(&mut self, parent: Bucket, query: ArchetypeQuery) -> Result<Bucket, BucketError> {
		if let Some(child) = self.instance(parent)?.by_query.get(&query) {
			return Ok(*child);
		}

		Ok(self.derive_child(parent, MembershipRule::archetype(query)))
	}

	fn insert(&mut self, bucket: Bucket, entity: &Entity) -> bool {
		let instance = self.live_mut(bucket);
		if !instance.entities.insert(entity.clone()) {
			return false;
		}

		log::trace!("{:?} added to {:?}", entity.id(), bucket);
		instance.notify(BucketEvent::Added, entity);

		let mut i = 0;
		while let Some(child) = self.live(bucket).children.get(i).copied() {
			if self.live(child).rule.wants(entity) {
				self.insert(child, entity);
			}
			i += 1;
		}

		true
	}

	fn erase(&mut self, bucket: Bucket, entity: &Entity) -> bool {
		let instance = self.live_mut(bucket);
		if !instance.entities.remove(entity) {
			return false;
		}

		log::trace!("{:?} removed from {:?}", entity.id(), bucket);
		instance.notify(BucketEvent::Removed, entity);

		let mut i = 0;
		while let Some(child) = self.live(bucket).children.get(i).copied() {
			if self.live(child).entities.contains(entity) {
				self.erase(child, entity);
			}
			i += 1;
		}

		true
	}

	fn reevaluate(&mut self, bucket: Bucket, entity: &Entity) {
		let mut i = 0;
		while let Some(child) = self.live(bucket).children.get(i).copied() {
			let instance = self.live(child);
			let wanted = instance.rule.wants(entity);
			let present = instance.entities.contains(entity);

			match (wanted, present) {
				(true, false) => {
					self.insert(child, entity);
				},
				(false, true) => {
					self.erase(child, entity);
				},
				(true, true) => self.reevaluate(child, entity),
				(false, false) => {},
			}
			i += 1;
		}
	}

	fn release(&mut self, bucket: Bucket) {
		let index = bucket.index as usize;
		let instance = match self.slots[index].instance.take() {
			Some(instance) => instance,
			None => return,
		};

		for child in instance.children.iter() {
			self.release(*child);
		}

		let slot = &mut self.slots[index];
		slot.version = slot.version.wrapping_add(1);
		self.free.push(index);

		log::debug!("disposed bucket {:?} with {} entities", bucket, instance.entities.len());
	}

	fn check_root(&self, bucket: Bucket) -> Result<(), BucketError> {
		match self.instance(bucket)?.is_root() {
			true => Ok(()),
			false => Err(BucketError::DerivedMutation(bucket)),
		}
	}

	fn instance(&self, bucket: Bucket) -> Result<&BucketInstance, BucketError> {
		self.get(bucket).ok_or(BucketError::Disposed(bucket))
	}

	fn instance_mut(&mut self, bucket: Bucket) -> Result<&mut BucketInstance, BucketError> {
		self.get_mut(bucket).ok_or(BucketError::Disposed(bucket))
	}

	#[inline(always)]
	fn live(&self, bucket: Bucket) -> &BucketInstance {
		match self.get(bucket) {
			Some(instance) => instance,
			None => panic!("Bucket has already been disposed"),
		}
	}

	#[inline(always)]
	fn live_mut(&mut self, bucket: Bucket) -> &mut BucketInstance {
		match self.get_mut(bucket) {
			Some(instance) => instance,
			None => panic!("Bucket has already been disposed"),
		}
	}
}

impl Default for BucketStore {
	fn default() -> Self {
		Self::new()
	}
}
