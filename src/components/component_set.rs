use crate::components::ComponentId;
use crate::entities::Entity;

/// Returns `true` if `entity` carries every component in `names`.
/// An empty list is trivially satisfied.
pub fn has_components<S: AsRef<str>>(entity: &Entity, names: &[S]) -> bool {
	names.iter().all(|name| match ComponentId::lookup(name.as_ref()) {
		Some(id) => entity.has_id(id),
		None => false,
	})
}

/// Returns `true` if `entity` carries none of the components in `names`.
/// An empty list is trivially satisfied.
pub fn has_no_components<S: AsRef<str>>(entity: &Entity, names: &[S]) -> bool {
	names.iter().all(|name| match ComponentId::lookup(name.as_ref()) {
		Some(id) => !entity.has_id(id),
		None => true,
	})
}
