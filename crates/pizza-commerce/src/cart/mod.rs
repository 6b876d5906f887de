//! Shopping cart module.

mod cart;
mod manager;

pub use cart::Cart;
pub use manager::CartManager;
