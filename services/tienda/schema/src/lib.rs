//! sea-orm entities for the store database, one module per table.

pub mod cart_items;
pub mod carts;
pub mod orders;
pub mod payment_transactions;
pub mod products;
pub mod users;
