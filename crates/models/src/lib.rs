//! SeaORM entities for the `products` and `users` tables plus connection helpers.

pub mod errors;
pub mod db;
pub mod product;
pub mod user;

#[cfg(test)]
mod tests;
