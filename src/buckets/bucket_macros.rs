/// Get or create the [archetype](crate::buckets::BucketStore::archetype) bucket of `parent`
/// whose entities carry every listed component.
///
/// ```ignore
/// let enemies = archetype!(store, world, "enemy", "health")?;
/// ```
#[macro_export]
macro_rules! archetype {
    ($store: expr, $parent: expr, $($name: expr),+ $(,)?) => {
		$store.archetype($parent, [$($name),+])
	};
}
