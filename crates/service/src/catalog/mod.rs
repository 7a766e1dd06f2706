//! Catalog management: fabrics, products, categories and the image lists
//! fabrics and products own.

pub mod categories;
pub mod fabrics;
pub mod images;
pub mod products;

pub use images::{AppendOutcome, DeleteTarget, ImageKind, ImageRef};
