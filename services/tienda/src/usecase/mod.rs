pub mod auth;
pub mod cart;
pub mod order;
pub mod payment;
pub mod product;
pub mod stats;
