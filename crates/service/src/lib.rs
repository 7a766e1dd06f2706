//! Service layer for the shop back-office.
//! - Catalog management with owned image lists.
//! - Order entry with price snapshots.
//! - Read-only storefront listings and file uploads.
//!
//! Every mutating call runs in its own transaction.

pub mod catalog;
pub mod errors;
pub mod orders;
pub mod public;
pub mod runtime;
pub mod upload;
#[cfg(test)]
pub mod test_support;
