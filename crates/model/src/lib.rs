pub mod core;
pub mod pagination;
pub mod records;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;
