//! SeaORM entities for the shop schema plus connection helpers.
//!
//! Tables are created by the `migration` crate; the entities here mirror them.

pub mod errors;
pub mod db;
pub mod category;
pub mod fabric;
pub mod fabric_image;
pub mod fabric_work;
pub mod product;
pub mod product_image;
pub mod order;
pub mod order_item;

#[cfg(test)]
mod tests;
