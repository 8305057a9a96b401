pub mod backorder_record;
pub mod delivery_proof;
pub mod order;
pub mod product;
pub mod product_status;
pub mod vehicle;

pub use product_status::{ProductStatus, ProductStatusConverter};
