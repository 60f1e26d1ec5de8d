//! Persistence core for the social/storefront backend.
//!
//! Three layers live here:
//! - entity CRUD (`users`, `posts`, `products`) with commit-per-operation
//!   semantics,
//! - the relationship manager (`social`, `cart`) for the follow/like/cart
//!   many-to-many relations,
//! - read-only projections (`projections`) that turn rows into the
//!   external shapes defined in the `common` crate.
//!
//! Every operation takes the database connection explicitly; there is no
//! ambient session. Multi-step mutations run inside a single transaction so
//! partial writes are never visible to concurrent readers.

pub mod cart;
pub mod error;
pub mod posts;
pub mod products;
pub mod projections;
pub mod social;
pub mod users;

#[cfg(test)]
pub(crate) mod test_support;
