mod helpers;

mod catalog_test;
mod order_test;
mod router_test;
