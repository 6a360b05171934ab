use crate::buckets::{Bucket, BucketStore};
use crate::entities::Entity;
use std::collections::HashMap;
use nalgebra_glm::Vec3;

/// Integer coordinates of a cell.
pub type CellKey = (i32, i32, i32);

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SpatialHashConfig {
	/// Edge length of a cubic cell.
	pub cell_size: f32,
}

impl Default for SpatialHashConfig {
	fn default() -> Self {
		Self { cell_size: 1.0 }
	}
}

/// Groups the entities of a bucket by the grid cell they are in.
///
/// The hash isn't kept up to date by the [BucketStore]: call [rebuild](Self::rebuild)
/// once per tick, after positions were updated.
pub struct SpatialHash {
	config: SpatialHashConfig,
	cells: HashMap<CellKey, Vec<Entity>>,
}

impl SpatialHash {
	pub fn new(config: SpatialHashConfig) -> Self {
		Self {
			config,
			cells: HashMap::default(),
		}
	}

	pub fn config(&self) -> &SpatialHashConfig {
		&self.config
	}

	/// Coordinates past the `i32` range saturate, so every position beyond it
	/// along an axis shares the outermost cell.
	pub fn cell_key(&self, position: &Vec3) -> CellKey {
		let size = self.config.cell_size;
		(
			(position.x / size).floor() as i32,
			(position.y / size).floor() as i32,
			(position.z / size).floor() as i32,
		)
	}

	/// Empties every cell and re-inserts the entities of `bucket`.
	/// Entities for which `position` returns [None] are left out.
	pub fn rebuild(&mut self, store: &BucketStore, bucket: Bucket, position: impl Fn(&Entity) -> Option<Vec3>) {
		// Keep the cell allocations around for the next tick.
		for cell in self.cells.values_mut() {
			cell.clear();
		}

		let mut count = 0;
		for entity in store.entities(bucket) {
			if let Some(p) = position(entity) {
				let key = self.cell_key(&p);
				self.cells.entry(key).or_default().push(entity.clone());
				count += 1;
			}
		}

		log::trace!("spatial hash rebuilt from {:?}: {} entities in {} cells", bucket, count, self.cells.len());
	}

	/// The entities in the cell containing `position`.
	pub fn entities_in_cell(&self, position: &Vec3) -> &[Entity] {
		match self.cells.get(&self.cell_key(position)) {
			Some(cell) => cell.as_slice(),
			None => &[],
		}
	}

	/// The entities in every cell at most `radius` cells away from the one containing `position`
	/// along each axis. Neighbours past the edge of the grid are skipped.
	pub fn entities_in_radius(&self, position: &Vec3, radius: i32) -> Vec<Entity> {
		let (x, y, z) = self.cell_key(position);
		let mut entities = Vec::new();

		for i in neighbours(x, radius) {
			for j in neighbours(y, radius) {
				for k in neighbours(z, radius) {
					if let Some(cell) = self.cells.get(&(i, j, k)) {
						entities.extend(cell.iter().cloned());
					}
				}
			}
		}

		entities
	}
}

fn neighbours(center: i32, radius: i32) -> impl Iterator<Item = i32> {
	(-radius..=radius).filter_map(move |offset| center.checked_add(offset))
}

impl Default for SpatialHash {
	fn default() -> Self {
		Self::new(SpatialHashConfig::default())
	}
}
