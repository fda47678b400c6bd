//! Product module: domain, gateway trait, SeaORM gateway, service.

pub mod domain;
pub mod repository;
#[cfg(feature = "seaorm")]
pub mod repo;
pub mod service;

pub use service::ProductService;
