mod bit_field_tests;
mod membership_tests;
mod spatial_hash_tests;
