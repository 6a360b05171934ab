use crate::data_structures::BitField;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

fn hash_of(bitfield: &BitField) -> u64 {
	let mut hasher = DefaultHasher::new();
	bitfield.hash(&mut hasher);
	hasher.finish()
}

fn bits(indices: &[usize]) -> BitField {
	let mut bitfield = BitField::new();
	for i in indices {
		bitfield.set(*i, true);
	}
	bitfield
}

#[test]
pub fn set_and_get() {
	let mut bitfield = BitField::new();
	bitfield.set(3, true);
	bitfield.set(70, true);

	assert!(bitfield.get(3));
	assert!(bitfield.get(70));
	assert!(!bitfield.get(4));
	assert!(!bitfield.get(1000), "Bits past the capacity should read as unset");
	assert_eq!(bitfield.count_ones(), 2);

	bitfield.set(3, false);
	bitfield.set(1000, false);
	assert!(!bitfield.get(3));
	assert_eq!(bitfield.count_ones(), 1);
}

#[test]
pub fn subset_and_intersection() {
	let small = bits(&[1, 2]);
	let large = bits(&[1, 2, 40]);
	let other = bits(&[40, 90]);
	let empty = BitField::new();

	assert!(small.is_subset_of(&large));
	assert!(!large.is_subset_of(&small));
	assert!(empty.is_subset_of(&small), "The empty set is a subset of everything");
	assert!(empty.is_subset_of(&empty));
	assert!(!other.is_subset_of(&large));

	assert!(large.intersects(&other));
	assert!(!small.intersects(&other));
	assert!(!empty.intersects(&large));
}

#[test]
pub fn equality_ignores_capacity() {
	let mut a = BitField::with_capacity(256);
	let mut b = BitField::new();
	a.set(5, true);
	b.set(5, true);

	assert!(a.capacity() > b.capacity());
	assert_eq!(a, b);
	assert_eq!(hash_of(&a), hash_of(&b), "Equal bitfields must hash equally");

	b.set(6, true);
	assert_ne!(a, b);
}
