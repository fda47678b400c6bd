//! Service layer providing business operations on top of models.
//! - `product`: quote line items with derived totals and description search.
//! - `user`: user records with salted password hashes and authentication.
//! - Persistence sits behind gateway traits; SeaORM gateways live under `repo` (feature `seaorm`).

pub mod errors;
pub mod product;
pub mod user;
#[cfg(test)]
pub mod test_support;
