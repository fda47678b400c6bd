use std::sync::Arc;

use sea_orm::DatabaseConnection;

use service::product::repo::seaorm::SeaOrmProductRepository;
use service::product::repository::{mock::InMemoryProductRepository, ProductRepository};
use service::product::ProductService;
use service::user::hasher::CredentialHasher;
use service::user::repo::seaorm::SeaOrmUserRepository;
use service::user::repository::{mock::InMemoryUserRepository, UserRepository};
use service::user::UserService;

/// Shared handler state: services behind trait-object gateways.
#[derive(Clone)]
pub struct AppState {
    pub products: Arc<ProductService<dyn ProductRepository>>,
    pub users: Arc<UserService<dyn UserRepository>>,
}

impl AppState {
    pub fn new(
        products: Arc<dyn ProductRepository>,
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn CredentialHasher>,
    ) -> Self {
        Self {
            products: Arc::new(ProductService::new(products)),
            users: Arc::new(UserService::new(users, hasher)),
        }
    }

    /// SeaORM gateways sharing one connection pool.
    pub fn with_database(db: DatabaseConnection, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self::new(
            Arc::new(SeaOrmProductRepository { db: db.clone() }),
            Arc::new(SeaOrmUserRepository { db }),
            hasher,
        )
    }

    /// Process-local gateways; nothing survives a restart.
    pub fn in_memory(hasher: Arc<dyn CredentialHasher>) -> Self {
        Self::new(
            Arc::new(InMemoryProductRepository::default()),
            Arc::new(InMemoryUserRepository::default()),
            hasher,
        )
    }
}
