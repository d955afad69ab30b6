//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod customer_repo;

pub use customer_repo::CustomerRepo;
