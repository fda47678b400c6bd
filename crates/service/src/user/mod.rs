pub mod domain;
pub mod errors;
pub mod hasher;
pub mod repository;
#[cfg(feature = "seaorm")]
pub mod repo;
pub mod service;

pub use service::UserService;
